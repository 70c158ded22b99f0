//! Primitive lifetimes
//!
//! Every submission carries a [`Lifetime`] deciding how many flushes it
//! survives. The fixed policy is draw-while-unexpired, then prune: an
//! entry is drawn by every flush whose timestamp lies in
//! `[submission, submission + duration]` inclusive, and pruned
//! afterwards. The core never reads a clock; expiry timestamps are
//! resolved lazily against the caller-supplied time of the first flush
//! that sees the entry, which also guarantees no expiry ever precedes
//! its submission time.

/// How long a submitted primitive stays queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifetime {
    /// Drawn by exactly one flush (the one following submission), then
    /// discarded. The default for immediate-mode per-frame callers.
    #[default]
    Frame,
    /// Drawn by every flush for the given number of milliseconds after
    /// submission, inclusive of the boundary.
    Millis(u64),
    /// Never auto-pruned; only an explicit clear removes it.
    Persistent,
}

/// Expiry state of a timed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expiry {
    /// Submitted but not yet seen by a flush; resolved against the
    /// first flush timestamp.
    Pending(Lifetime),
    /// Expires once the flush clock passes this timestamp.
    At(u64),
    /// Persistent; survives every flush.
    Never,
}

/// One submission's slice of a primitive group's vertex run, paired
/// with its expiry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimedEntry {
    /// First vertex index of this submission within the group.
    pub start: usize,
    /// One past the last vertex index.
    pub end: usize,
    /// Expiry state.
    pub expiry: Expiry,
}

impl TimedEntry {
    pub(crate) fn new(start: usize, end: usize, lifetime: Lifetime) -> Self {
        Self {
            start,
            end,
            expiry: Expiry::Pending(lifetime),
        }
    }

    /// Pin a pending lifetime to the clock of the flush seeing it first.
    pub(crate) fn resolve(&mut self, now_ms: u64) {
        if let Expiry::Pending(lifetime) = self.expiry {
            self.expiry = match lifetime {
                Lifetime::Frame => Expiry::At(now_ms),
                Lifetime::Millis(duration) => Expiry::At(now_ms.saturating_add(duration)),
                Lifetime::Persistent => Expiry::Never,
            };
        }
    }

    /// Whether this entry is dead at `now_ms` under the given boundary
    /// rule. The inclusive form is used after dispatch (an entry
    /// expiring exactly now was just drawn for the last time); the
    /// exclusive form before dispatch catches entries that expired
    /// between flushes and must never be drawn again.
    pub(crate) fn expired(&self, now_ms: u64, inclusive: bool) -> bool {
        match self.expiry {
            Expiry::At(t) => {
                if inclusive {
                    t <= now_ms
                } else {
                    t < now_ms
                }
            }
            Expiry::Pending(_) | Expiry::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lifetime_expires_on_resolving_flush() {
        let mut entry = TimedEntry::new(0, 2, Lifetime::Frame);
        assert!(!entry.expired(100, true)); // pending entries never expire
        entry.resolve(100);
        assert!(!entry.expired(100, false)); // still drawn at the resolving flush
        assert!(entry.expired(100, true)); // pruned right after
    }

    #[test]
    fn test_timed_lifetime_boundary_is_inclusive() {
        let mut entry = TimedEntry::new(0, 1, Lifetime::Millis(500));
        entry.resolve(0);
        assert!(!entry.expired(400, true));
        assert!(!entry.expired(500, false)); // drawn at exactly T + D
        assert!(entry.expired(500, true)); // then pruned
        assert!(entry.expired(600, false)); // never drawn past T + D
    }

    #[test]
    fn test_persistent_never_expires() {
        let mut entry = TimedEntry::new(0, 1, Lifetime::Persistent);
        entry.resolve(0);
        assert!(!entry.expired(u64::MAX, true));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut entry = TimedEntry::new(0, 1, Lifetime::Millis(100));
        entry.resolve(50);
        entry.resolve(900); // later flushes must not move the expiry
        assert_eq!(entry.expiry, Expiry::At(150));
    }
}
