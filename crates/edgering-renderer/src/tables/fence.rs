//! Fenced code block detection for the line-block scanner.
//!
//! Bracket blocks written inside a code sample are content, not tables,
//! so the scanner asks this tracker where every line sits.

/// Position of a line relative to fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FenceLine {
    /// Regular markdown line.
    Outside,
    /// Line that opens a fence.
    Open,
    /// Line inside a fence.
    Inside,
    /// Line that closes the current fence.
    Close,
}

impl FenceLine {
    /// Whether the scanner must leave this line alone.
    pub(crate) fn is_code(self) -> bool {
        !matches!(self, Self::Outside)
    }
}

/// Tracks the currently open fence while lines are fed in order.
///
/// Fences use three or more backticks or tildes. A fence closes on a line
/// made only of the same character, at least as long as the opener.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Classify `line` and advance the fence state.
    pub(crate) fn classify(&mut self, line: &str) -> FenceLine {
        let trimmed = line.trim_start();
        match self.open {
            Some((ch, len)) => {
                if closes_fence(trimmed, ch, len) {
                    self.open = None;
                    FenceLine::Close
                } else {
                    FenceLine::Inside
                }
            }
            None => match fence_marker(trimmed) {
                Some(marker) => {
                    self.open = Some(marker);
                    FenceLine::Open
                }
                None => FenceLine::Outside,
            },
        }
    }
}

/// Leading fence character and run length, if the line opens a fence.
fn fence_marker(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

fn closes_fence(trimmed: &str, ch: char, min_len: usize) -> bool {
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    // Fence characters are ASCII, so `len` is also a byte offset.
    len >= min_len && trimmed[len..].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_outside() {
        let mut tracker = FenceTracker::default();
        assert_eq!(tracker.classify("[A;B"), FenceLine::Outside);
        assert_eq!(tracker.classify("``inline``"), FenceLine::Outside);
    }

    #[test]
    fn test_backtick_fence_cycle() {
        let mut tracker = FenceTracker::default();
        assert_eq!(tracker.classify("```text"), FenceLine::Open);
        assert_eq!(tracker.classify("[A;B"), FenceLine::Inside);
        assert_eq!(tracker.classify("C;D]"), FenceLine::Inside);
        assert_eq!(tracker.classify("```"), FenceLine::Close);
        assert_eq!(tracker.classify("[A;B"), FenceLine::Outside);
    }

    #[test]
    fn test_tilde_fence_ignores_backticks() {
        let mut tracker = FenceTracker::default();
        assert_eq!(tracker.classify("~~~"), FenceLine::Open);
        assert_eq!(tracker.classify("```"), FenceLine::Inside);
        assert_eq!(tracker.classify("  ~~~~  "), FenceLine::Close);
    }

    #[test]
    fn test_shorter_closer_does_not_close() {
        let mut tracker = FenceTracker::default();
        assert_eq!(tracker.classify("````"), FenceLine::Open);
        assert_eq!(tracker.classify("```"), FenceLine::Inside);
        assert_eq!(tracker.classify("```` trailing"), FenceLine::Inside);
        assert_eq!(tracker.classify("````"), FenceLine::Close);
    }

    #[test]
    fn test_is_code() {
        assert!(!FenceLine::Outside.is_code());
        assert!(FenceLine::Open.is_code());
        assert!(FenceLine::Inside.is_code());
        assert!(FenceLine::Close.is_code());
    }
}
