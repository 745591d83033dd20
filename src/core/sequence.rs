use std::collections::HashMap;

/// Per-batch release line id allocator.
///
/// Produces line identifiers in the format `{order_id}_{sequential}`,
/// e.g. "SO_09000-1128_001", "SO_09000-1128_002", counting independently
/// per order id and starting at 1.
///
/// Counters are scoped to one batch run — create a fresh instance per run
/// and never share one across concurrent sessions. Regenerating the same
/// input with a fresh allocator yields the same sequence.
#[derive(Debug, Clone, Default)]
pub struct LineSequence {
    counters: HashMap<String, u64>,
    zero_pad: usize,
}

impl LineSequence {
    /// Create an allocator with all counters at 1.
    pub fn new() -> Self {
        Self {
            counters: HashMap::new(),
            zero_pad: 3,
        }
    }

    /// Set zero-padding width (default: 3, so "_001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Allocate the next line id for `order_id`.
    pub fn allocate(&mut self, order_id: &str) -> String {
        let counter = self.counters.entry(order_id.to_string()).or_insert(0);
        *counter += 1;
        let issued = *counter;
        format!("{order_id}_{issued:0>width$}", width = self.zero_pad)
    }

    /// Preview the next id for `order_id` without consuming it.
    pub fn peek(&self, order_id: &str) -> String {
        let next = self.counters.get(order_id).copied().unwrap_or(0) + 1;
        format!("{order_id}_{next:0>width$}", width = self.zero_pad)
    }

    /// How many ids have been issued for `order_id` so far.
    pub fn issued(&self, order_id: &str) -> u64 {
        self.counters.get(order_id).copied().unwrap_or(0)
    }
}
