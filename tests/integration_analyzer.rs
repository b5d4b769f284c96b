use std::fs;
use std::path::Path;
use xrefgraph::core::{CodebaseAnalyzer, CrossReferenceGraph, XrefError};

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, code) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, code).unwrap();
    }
}

fn analyze(files: &[(&str, &str)]) -> CrossReferenceGraph {
    let dir = tempfile::TempDir::new().unwrap();
    write_tree(dir.path(), files);
    CodebaseAnalyzer::new().unwrap().analyze(dir.path()).unwrap()
}

#[test]
fn duplicate_top_level_functions_are_file_qualified() {
    let graph = analyze(&[
        ("a.py", "def run():\n    pass\n"),
        ("b.py", "def run():\n    pass\n"),
    ]);

    assert!(graph.functions.contains_key("a.py::run"));
    assert!(graph.functions.contains_key("b.py::run"));
    assert!(!graph.functions.contains_key("run"));
    assert_eq!(graph.functions["b.py::run"].defined_in, "b.py");
}

#[test]
fn package_import_links_file_and_class_usage() {
    let graph = analyze(&[
        ("pkg/util.py", "class Helper:\n    def assist(self):\n        pass\n"),
        ("pkg/main.py", "import pkg.util\n\ndef main():\n    return pkg.util.Helper()\n"),
    ]);

    assert_eq!(graph.files["pkg/util.py"].imported_by, vec!["pkg/main.py"]);
    assert_eq!(graph.files["pkg/main.py"].imports_from, vec!["pkg.util"]);

    let helper = &graph.classes["Helper"];
    assert_eq!(helper.defined_in, "pkg/util.py");
    assert_eq!(helper.methods, vec!["assist"]);
    assert_eq!(helper.used_in, vec!["pkg/main.py"]);
}

#[test]
fn invalid_file_is_reported_and_skipped() {
    let graph = analyze(&[
        ("bad.py", "def broken(:\n    pass\n"),
        ("good.py", "def fine():\n    return 1\n"),
    ]);

    assert_eq!(graph.total_files, 1);
    assert!(!graph.files.contains_key("bad.py"));
    assert!(graph.files.contains_key("good.py"));
    assert_eq!(graph.parse_errors.len(), 1);
    assert!(graph.parse_errors[0].starts_with("bad.py: SyntaxError: "));
    assert!(graph.functions.contains_key("fine"));
}

#[test]
fn python2_only_files_are_reported_and_skipped() {
    for legacy in ["def f():\n    print \"hello\"\n", "exec \"x = 1\"\n"] {
        let graph = analyze(&[("old.py", legacy), ("ok.py", "x = 1\n")]);

        assert!(!graph.files.contains_key("old.py"));
        assert!(!graph.functions.contains_key("f"));
        assert!(graph.files.contains_key("ok.py"));
        assert_eq!(graph.total_files, 1);
        assert_eq!(graph.parse_errors.len(), 1);
        assert!(graph.parse_errors[0]
            .starts_with("old.py: SyntaxError: invalid syntax at line "));
    }
}

#[test]
fn repeated_calls_record_caller_once() {
    let graph = analyze(&[
        ("a.py", "from b import g\n\ndef f():\n    g()\n    g()\n\ndef h():\n    g()\n"),
        ("b.py", "def g():\n    pass\n"),
    ]);

    assert_eq!(graph.functions["g"].called_by, vec!["a.py"]);
    assert_eq!(graph.files["b.py"].imported_by, vec!["a.py"]);
}

#[test]
fn repeated_imports_record_importer_once() {
    let graph = analyze(&[
        ("a.py", "import b\nfrom b import x\nimport b as again\n\ndef f():\n    import b\n"),
        ("b.py", "x = 1\n"),
    ]);

    assert_eq!(graph.files["b.py"].imported_by, vec!["a.py"]);
    assert_eq!(graph.files["a.py"].imports_from, vec!["b"]);
}

#[test]
fn no_self_edges_anywhere() {
    let graph = analyze(&[
        (
            "app.py",
            "import app\nfrom lib import tool\n\nclass App:\n    def go(self):\n        return start()\n\ndef start():\n    return tool()\n",
        ),
        ("lib.py", "import app\n\ndef tool():\n    return start()\n\ndef start():\n    pass\n"),
    ]);

    for (path, summary) in &graph.files {
        assert!(!summary.imported_by.contains(path), "{} imports itself", path);
    }
    for record in graph.functions.values() {
        assert!(!record.called_by.contains(&record.defined_in));
    }
    for record in graph.classes.values() {
        assert!(!record.used_in.contains(&record.defined_in));
    }

    assert_eq!(graph.files["app.py"].imported_by, vec!["lib.py"]);
    assert_eq!(graph.classes["App"].used_in, vec!["lib.py"]);
    assert_eq!(graph.functions["tool"].called_by, vec!["app.py"]);
}

#[test]
fn ambiguous_call_is_attributed_to_first_registered_definition() {
    let graph = analyze(&[
        ("main.py", "def main():\n    helper()\n"),
        ("util_a.py", "def helper():\n    pass\n"),
        ("util_b.py", "def helper():\n    pass\n"),
    ]);

    assert_eq!(graph.functions["util_a.py::helper"].called_by, vec!["main.py"]);
    assert!(graph.functions["util_b.py::helper"].called_by.is_empty());
}

#[test]
fn first_match_in_callers_own_file_records_nothing() {
    let graph = analyze(&[
        ("a.py", "def helper():\n    pass\n\ndef f():\n    helper()\n"),
        ("b.py", "def helper():\n    pass\n"),
    ]);

    assert!(graph.functions["a.py::helper"].called_by.is_empty());
    assert!(graph.functions["b.py::helper"].called_by.is_empty());
}

#[test]
fn same_named_classes_collide_across_files() {
    let graph = analyze(&[
        ("x.py", "class Worker:\n    def start(self):\n        pass\n"),
        ("y.py", "class Worker:\n    def start(self):\n        pass\n"),
    ]);

    assert!(graph.functions.contains_key("x.py::Worker.start"));
    assert!(graph.functions.contains_key("y.py::Worker.start"));
    assert_eq!(graph.classes["Worker"].defined_in, "x.py");
    assert_eq!(graph.classes["y.py::Worker"].defined_in, "y.py");
}

#[test]
fn method_calls_resolve_through_attribute_suffix() {
    let graph = analyze(&[
        ("jobs.py", "class Processor:\n    def process(self):\n        pass\n"),
        ("cli.py", "from jobs import Processor\n\ndef main():\n    Processor().process()\n"),
    ]);

    assert_eq!(graph.functions["Processor.process"].called_by, vec!["cli.py"]);
    assert_eq!(graph.functions["main"].calls, vec!["process", "Processor"]);
    assert_eq!(graph.functions["Processor.process"].class_name.as_deref(), Some("Processor"));
}

#[test]
fn bare_package_import_resolves_to_a_package_file() {
    let graph = analyze(&[
        ("pkg/a.py", "def a():\n    pass\n"),
        ("pkg/b.py", "def b():\n    pass\n"),
        ("main.py", "import pkg\n"),
    ]);

    let claimed: Vec<_> = ["pkg/a.py", "pkg/b.py"]
        .iter()
        .filter(|path| graph.files[**path].imported_by == vec!["main.py"])
        .collect();
    assert_eq!(claimed.len(), 1);
}

#[test]
fn external_imports_stay_in_raw_list_only() {
    let graph = analyze(&[("a.py", "import requests\nfrom django.db import models\n")]);

    assert_eq!(graph.files["a.py"].imports_from, vec!["django.db", "requests"]);
    assert!(graph.files["a.py"].imported_by.is_empty());
}

#[test]
fn skipped_directories_do_not_contribute() {
    let graph = analyze(&[
        ("app.py", "def main():\n    pass\n"),
        (".venv/lib/site.py", "def main():\n    pass\n"),
        ("pkg/__pycache__/app.py", "def main():\n    pass\n"),
    ]);

    assert_eq!(graph.total_files, 1);
    assert!(graph.functions.contains_key("main"));
}

#[test]
fn analysis_is_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tree(
        dir.path(),
        &[
            ("a.py", "from b import g\n\ndef f():\n    g()\n"),
            ("b.py", "class B:\n    def g(self):\n        pass\n\ndef g():\n    pass\n"),
            ("c/d.py", "import a\nimport b\n\ndef g():\n    pass\n"),
        ],
    );

    let analyzer = CodebaseAnalyzer::new().unwrap();
    let first = analyzer.analyze(dir.path()).unwrap();
    let second = analyzer.analyze(dir.path()).unwrap();

    assert_eq!(first.files, second.files);
    assert_eq!(first.functions, second.functions);
    assert_eq!(first.classes, second.classes);
    assert_eq!(
        first.functions.keys().collect::<Vec<_>>(),
        second.functions.keys().collect::<Vec<_>>()
    );
}

#[test]
fn missing_root_fails_before_scanning() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = CodebaseAnalyzer::new()
        .unwrap()
        .analyze(&dir.path().join("missing"))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<XrefError>(),
        Some(XrefError::RootNotFound(_))
    ));
}

#[test]
fn provenance_is_attached() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tree(dir.path(), &[("a.py", "x = 1\n")]);

    let graph = CodebaseAnalyzer::new().unwrap().analyze(dir.path()).unwrap();

    assert_eq!(graph.project_root, dir.path().display().to_string());
    assert_eq!(graph.total_files, 1);
    assert!(graph.generated_at <= chrono::Utc::now());
}
