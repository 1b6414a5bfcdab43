//! Per-function analysis state.
//!
//! The pass carries exactly two maps, both keyed by bare variable name and
//! both wiped at every function boundary. Keying by textual name means
//! shadowing and nested blocks are not distinguished: a later declaration of
//! the same name overwrites earlier state. That simplification is inherited
//! from the reference tool and deliberately preserved.

use std::collections::HashMap;

use super::capacity::CapacityState;

/// Alias edges and capacity tags for the function currently being traversed.
///
/// Each map is independently last-write-wins. Recording a capacity tag does
/// not remove an alias edge for the same name, and recording an alias edge
/// does not remove a capacity tag.
#[derive(Debug, Default)]
pub struct FnContext {
    /// `name -> target`: name was assigned directly from target.
    aliases: HashMap<String, String>,
    /// Capacity knowledge per name. Absence means unclassified.
    capacity: HashMap<String, CapacityState>,
}

impl FnContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `lhs` as a direct alias of `rhs`. Self-edges are never stored.
    pub fn record_alias(&mut self, lhs: &str, rhs: &str) {
        if lhs != rhs {
            self.aliases.insert(lhs.to_string(), rhs.to_string());
        }
    }

    pub fn record_capacity(&mut self, name: &str, state: CapacityState) {
        self.capacity.insert(name.to_string(), state);
    }

    pub fn capacity_of(&self, name: &str) -> Option<CapacityState> {
        self.capacity.get(name).copied()
    }

    /// True if any state at all has been recorded for this name.
    pub fn knows(&self, name: &str) -> bool {
        self.capacity.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Follow alias edges from `name` to the end of the chain.
    ///
    /// A name with no outgoing edge is its own root and is returned as-is.
    /// The walk is bounded by the number of recorded edges, so it terminates
    /// even if a cycle were ever recorded.
    pub fn resolve_root<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        let mut hops = 0usize;
        while let Some(next) = self.aliases.get(current) {
            if next.as_str() == current || hops >= self.aliases.len() {
                break;
            }
            current = next.as_str();
            hops += 1;
        }
        current
    }
}
