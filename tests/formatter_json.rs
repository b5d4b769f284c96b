use serde_json::Value;
use std::fs;
use xrefgraph::core::CodebaseAnalyzer;
use xrefgraph::formatters::GraphJsonWriter;

fn sample_project() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/ui")).unwrap();
    fs::write(
        root.join("src/ui/app.py"),
        "from src.ui import styles\n\nclass App(object):\n    def run(self):\n        return styles.apply()\n",
    )
    .unwrap();
    fs::write(root.join("src/ui/styles.py"), "def apply():\n    pass\n").unwrap();
    fs::write(root.join("broken.py"), "def nope(:\n").unwrap();
    dir
}

#[test]
fn json_writer_emits_documented_schema() {
    let dir = sample_project();
    let graph = CodebaseAnalyzer::new().unwrap().analyze(dir.path()).unwrap();

    let out = dir.path().join("out/graph.json");
    GraphJsonWriter::new().write_to_file(&graph, &out).unwrap();

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert!(v["generated_at"].is_string());
    assert_eq!(v["project_root"], Value::String(dir.path().display().to_string()));
    assert_eq!(v["total_files"].as_u64().unwrap(), 2);
    assert_eq!(v["parse_errors"].as_array().unwrap().len(), 1);

    let app = &v["files"]["src/ui/app.py"];
    assert_eq!(app["functions"], serde_json::json!(["run"]));
    assert_eq!(app["classes"], serde_json::json!(["App"]));
    assert_eq!(app["imports_from"], serde_json::json!(["src.ui"]));
    assert!(app["imported_by"].as_array().unwrap().is_empty());

    let run = &v["functions"]["App.run"];
    assert_eq!(run["defined_in"], "src/ui/app.py");
    assert_eq!(run["class"], "App");
    assert_eq!(run["line"].as_u64().unwrap(), 4);
    assert_eq!(run["calls"], serde_json::json!(["styles.apply"]));

    let apply = &v["functions"]["apply"];
    assert!(apply["class"].is_null());
    assert_eq!(apply["called_by"], serde_json::json!(["src/ui/app.py"]));

    let class = &v["classes"]["App"];
    assert_eq!(class["bases"], serde_json::json!(["object"]));
    assert_eq!(class["methods"], serde_json::json!(["run"]));
    assert_eq!(class["line"].as_u64().unwrap(), 3);
    assert!(class["used_in"].as_array().unwrap().is_empty());
}

#[test]
fn json_output_round_trips_into_graph() {
    let dir = sample_project();
    let graph = CodebaseAnalyzer::new().unwrap().analyze(dir.path()).unwrap();

    let json = GraphJsonWriter::compact().format_graph(&graph).unwrap();
    assert!(!json.contains('\n'));

    let back: xrefgraph::core::CrossReferenceGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}
