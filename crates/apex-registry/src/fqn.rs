//! FQN computation (§3): dotted path from the file scope downward.

use apex_symbols::Symbol;

/// `symbol.key.path` joined with the symbol's own name. A top-level
/// declaration's path is empty, so its fqn is just its simple name — this is
/// what lets a bare builtin name (`System`) and a dotted nested fqn
/// (`Outer.Inner`) share one key space in the registry's maps.
#[must_use]
pub fn fqn(symbol: &Symbol) -> String {
    if symbol.key.path.is_empty() {
        symbol.name.clone()
    } else {
        format!("{}.{}", symbol.key.path.join("."), symbol.name)
    }
}

#[cfg(test)]
#[path = "../tests/fqn.rs"]
mod tests;
