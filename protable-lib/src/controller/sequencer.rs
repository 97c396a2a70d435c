//! Generation tokens for last-dispatch-wins fetch sequencing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one fetch dispatch. Later dispatches have larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out generations and remembers the latest one.
///
/// A fetch result may be committed only while its generation is still the
/// latest; anything older was superseded and is discarded.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Issues the next generation, superseding every earlier one.
    pub(crate) fn advance(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` if no dispatch happened after `generation`.
    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_generation_wins() {
        let sequencer = Sequencer::new();
        let a = sequencer.advance();
        assert!(sequencer.is_current(a));

        let b = sequencer.advance();
        assert!(b > a);
        assert!(!sequencer.is_current(a));
        assert!(sequencer.is_current(b));
    }

    #[test]
    fn test_display() {
        let sequencer = Sequencer::new();
        assert_eq!(sequencer.advance().to_string(), "#1");
    }
}
