//! Stable, human-readable identifier allocation.
//!
//! Every entity that needs a process-unique name draws it from an
//! [`IdAllocator`]: a per-type-tag counter rendered as `Tag_N`. The allocator
//! is an explicit value handed to whoever needs identifiers, so tests can
//! isolate their own numbering instead of sharing hidden global state.

use std::collections::HashMap;
use std::sync::Mutex;

/// Issues identifiers of the form `{type_tag}_{counter}`.
///
/// Counters start at 1 per tag and only ever move forward; an identifier is
/// never reused within the allocator's lifetime. Allocation is thread-safe,
/// so modules may be constructed concurrently against a shared allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl IdAllocator {
    /// Create an allocator with all counters at their initial value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for `type_tag`.
    pub fn allocate(&self, type_tag: &str) -> String {
        let mut counters = self.counters.lock().unwrap();
        let counter = counters.entry(type_tag.to_string()).or_insert(1);
        let id = format!("{}_{}", type_tag, counter);
        *counter += 1;
        id
    }
}
