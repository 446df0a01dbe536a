//! Decode limits.

/// Limits applied while decoding untrusted input.
///
/// Counts and lengths in a replay come straight from the file, so the
/// decoder never trusts them for nesting depth or up-front allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Deepest allowed `FOLD` nesting; a top-level chunk is depth 1.
    /// Deeper nesting is a container error. Default: 16.
    pub max_chunk_depth: usize,
    /// Upper bound on capacity reserved from a declared element count.
    /// Vectors still grow past it when the data is really there.
    /// Default: 4096.
    pub max_preallocation: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_chunk_depth: 16,
            max_preallocation: 4096,
        }
    }
}

impl DecodeConfig {
    /// Capacity to reserve for a declared element count.
    pub fn capacity_for(&self, declared: usize) -> usize {
        declared.min(self.max_preallocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_counts_are_capped() {
        let config = DecodeConfig::default();
        assert_eq!(config.capacity_for(3), 3);
        assert_eq!(config.capacity_for(u32::MAX as usize), 4096);
    }
}
