use super::graph::{simple_name, unqualified_key};
use super::registry::FunctionRegistry;

/// Attributes a textual call target to a registered function.
///
/// The assembler only depends on this trait, so a scope-aware resolver can
/// replace the name heuristic without touching the other passes.
pub trait CallMatcher {
    /// Key of the function `call_target` is attributed to, if any.
    fn resolve<'r>(&self, call_target: &str, registry: &'r FunctionRegistry) -> Option<&'r str>;
}

/// Name-only matching over the flat registry. The first registered function
/// that matches wins, so a call to a name defined in several files is
/// attributed to exactly one of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameHeuristicMatcher;

impl NameHeuristicMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl CallMatcher for NameHeuristicMatcher {
    fn resolve<'r>(&self, call_target: &str, registry: &'r FunctionRegistry) -> Option<&'r str> {
        // A key matches exactly when its simple name is the target's last
        // segment, so the first such key is the first match in registry order.
        let last_segment = call_target.rsplit('.').next().unwrap_or(call_target);
        registry.first_named(last_segment)
    }
}

/// The matching rule in full: the target equals the key's simple name, or its
/// unqualified key, or ends in `.<simple name>`.
pub fn name_matches(call_target: &str, key: &str) -> bool {
    let simple = simple_name(key);
    call_target == simple
        || call_target == unqualified_key(key)
        || call_target
            .strip_suffix(simple)
            .map_or(false, |head| head.ends_with('.'))
}
