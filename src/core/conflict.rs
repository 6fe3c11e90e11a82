//! Shadowed binding detection
//!
//! The engine gives the static tree precedence over the dynamic registry.
//! When both bind the same key sequence, the registry handlers can never
//! fire. This module finds those sequences so they can be reported.
//!
//! # Performance
//! - O(r * d) where r = registered sequences and d = sequence length
//!
//! For typical setups (tens of bindings) this is negligible and runs once
//! per `check`.

use crate::core::action::HandlerList;
use crate::core::registry::HandlerRegistry;
use crate::core::tree::HotkeyTree;
use crate::core::types::KeySequence;

/// A key sequence bound both statically and dynamically.
#[derive(Clone, Debug)]
pub struct Shadowed {
    /// The key sequence bound in both places
    pub sequence: KeySequence,

    /// Handlers that run (from the tree)
    pub tree_handlers: HandlerList,

    /// Handlers that never run (from the registry)
    pub registry_handlers: HandlerList,
}

/// Finds registry bindings hidden by the static tree.
///
/// Results follow registration order.
pub fn find_shadowed(tree: &HotkeyTree, registry: &HandlerRegistry) -> Vec<Shadowed> {
    registry
        .sequences()
        .into_iter()
        .filter_map(|sequence| {
            let tree_handlers = tree.lookup(&sequence).ok()?;
            let registry_handlers = registry.handlers(&sequence).ok()?;
            Some(Shadowed {
                sequence,
                tree_handlers,
                registry_handlers,
            })
        })
        .collect()
}
