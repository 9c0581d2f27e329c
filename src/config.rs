//! Search configuration

use crate::DEFAULT_BOUNDED_DEPTH;

/// Settings used by [`SearchEngine::choose_move`](crate::solver::SearchEngine::choose_move)
/// and [`SearchEngine::analyse`](crate::solver::SearchEngine::analyse)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies after which a line is scored as unresolved (0).
    /// `None` searches every line to the end of the game.
    pub max_depth: Option<usize>,

    /// Score root candidates on the engine's worker pool
    pub parallel: bool,

    /// Alpha-beta cutoffs. Disabling them gives plain minimax, which returns
    /// the same scores while visiting every node.
    pub pruning: bool,

    /// Worker pool size, 0 for one worker per hardware thread
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            parallel: false,
            pruning: true,
            threads: 0,
        }
    }
}

impl SearchConfig {
    /// Full search on boards up to 3x3, depth-bounded search beyond that
    pub fn for_size(size: usize) -> Self {
        let max_depth = if size <= 3 {
            None
        } else {
            Some(DEFAULT_BOUNDED_DEPTH)
        };
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, None);
        assert!(!config.parallel);
        assert!(config.pruning);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn size_presets() {
        assert_eq!(SearchConfig::for_size(3).max_depth, None);
        assert_eq!(
            SearchConfig::for_size(4).max_depth,
            Some(DEFAULT_BOUNDED_DEPTH)
        );
    }

    #[test]
    fn builder_chain() {
        let config = SearchConfig::default()
            .with_max_depth(Some(2))
            .with_parallel(true)
            .with_pruning(false)
            .with_threads(3);
        assert_eq!(
            config,
            SearchConfig {
                max_depth: Some(2),
                parallel: true,
                pruning: false,
                threads: 3,
            }
        );
    }
}
