// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Throttling of scroll and resize reflows.
//!
//! The first event of a burst reflows at once. Events arriving within the interval after a
//! reflow collapse into one trailing reflow at the end of the interval, which reads the viewport
//! as it is then. The last event of a burst is therefore always reflected.

use std::time::Duration;

use crate::scheduler::TaskToken;

/// What to do with a reflow request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Throttled {
    /// Reflow now.
    Now,
    /// Schedule a trailing reflow after this delay.
    Later(Duration),
    /// A trailing reflow is already scheduled.
    Coalesced,
}

#[derive(Debug, Default)]
pub(crate) struct ReflowThrottle {
    last: Option<Duration>,
    trailing: Option<TaskToken>,
    resize: bool,
}

impl ReflowThrottle {
    pub(crate) fn request(&mut self, now: Duration, interval: Duration, resize: bool) -> Throttled {
        if self.trailing.is_some() {
            self.resize |= resize;
            return Throttled::Coalesced;
        }
        match self.last.map(|last| last.saturating_add(interval)) {
            Some(next) if now < next => {
                self.resize |= resize;
                Throttled::Later(next - now)
            }
            _ => {
                self.last = Some(now);
                Throttled::Now
            }
        }
    }

    pub(crate) fn set_trailing(&mut self, token: TaskToken) {
        self.trailing = Some(token);
    }

    /// Claim the trailing reflow. Returns whether it must also re-measure, or `None` if `token`
    /// is not the scheduled trailing reflow.
    pub(crate) fn take_trailing(&mut self, token: TaskToken, now: Duration) -> Option<bool> {
        if self.trailing != Some(token) {
            return None;
        }
        self.trailing = None;
        self.last = Some(now);
        Some(std::mem::take(&mut self.resize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;

    const INTERVAL: Duration = Duration::from_millis(16);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn leading_edge_then_one_trailing_reflow() {
        let mut s: Scheduler<()> = Scheduler::default();
        let mut t = ReflowThrottle::default();
        assert_eq!(t.request(ms(0), INTERVAL, false), Throttled::Now);
        assert_eq!(t.request(ms(4), INTERVAL, false), Throttled::Later(ms(12)));
        let token = s.schedule(ms(12), ());
        t.set_trailing(token);
        assert_eq!(t.request(ms(8), INTERVAL, true), Throttled::Coalesced);
        assert_eq!(t.request(ms(10), INTERVAL, false), Throttled::Coalesced);

        // The trailing reflow re-measures because a resize was folded into it.
        assert_eq!(t.take_trailing(token, ms(16)), Some(true));
        assert_eq!(t.take_trailing(token, ms(16)), None);

        // The trailing reflow counts as the last one.
        assert_eq!(t.request(ms(20), INTERVAL, false), Throttled::Later(ms(12)));
        assert_eq!(t.request(ms(40), INTERVAL, false), Throttled::Now);
    }

    #[test]
    fn zero_interval_never_throttles() {
        let mut t = ReflowThrottle::default();
        for i in 0..5 {
            assert_eq!(t.request(ms(i), Duration::ZERO, false), Throttled::Now);
            assert_eq!(t.request(ms(i), Duration::ZERO, false), Throttled::Now);
        }
    }

    #[test]
    fn foreign_tokens_are_ignored() {
        let mut s: Scheduler<()> = Scheduler::default();
        let mut t = ReflowThrottle::default();
        let stale = s.schedule(ms(0), ());
        let _ = t.request(ms(0), INTERVAL, false);
        let _ = t.request(ms(1), INTERVAL, false);
        let live = s.schedule(ms(15), ());
        t.set_trailing(live);
        assert_eq!(t.take_trailing(stale, ms(16)), None);
        assert_eq!(t.take_trailing(live, ms(16)), Some(false));
    }
}
