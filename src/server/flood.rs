use std::time::Instant;

use crate::config::limits::MAX_MESSAGES_PER_SECOND;

/// Tracks flood-protection state for a single session.
///
/// Counts inbound messages per second and suppresses repeated identical
/// error codes, so a misbehaving client can neither monopolize the server
/// nor trap itself in an error loop.
pub struct FloodGuard {
    // Last error code sent (for suppression)
    last_error_code: Option<&'static str>,
    // Timestamp of last reset (for the per-second counter)
    last_tick: Instant,
    // Number of messages received in the current second
    messages_this_tick: u32,
}

impl FloodGuard {
    pub fn new() -> Self {
        Self {
            last_error_code: None,
            last_tick: Instant::now(),
            messages_this_tick: 0,
        }
    }

    /// Call for every incoming message. Returns true once the session has
    /// exceeded its rate and should be closed.
    pub fn record_message(&mut self) -> bool {
        self.tick();
        self.messages_this_tick += 1;
        self.messages_this_tick > MAX_MESSAGES_PER_SECOND
    }

    /// Call before sending an error frame. Returns true if the error should
    /// be sent (not a duplicate of the previous one).
    pub fn should_send_error(&mut self, error_code: &'static str) -> bool {
        if self.last_error_code == Some(error_code) {
            return false;
        }
        self.last_error_code = Some(error_code);
        true
    }

    /// Call when a frame parses cleanly, so the next error is not suppressed.
    pub fn reset_error_suppression(&mut self) {
        self.last_error_code = None;
    }

    fn tick(&mut self) {
        if self.last_tick.elapsed().as_secs() >= 1 {
            self.last_tick = Instant::now();
            self.messages_this_tick = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_messages_under_the_rate() {
        let mut guard = FloodGuard::new();
        for _ in 0..MAX_MESSAGES_PER_SECOND {
            assert!(!guard.record_message());
        }
    }

    #[test]
    fn trips_once_the_rate_is_exceeded() {
        let mut guard = FloodGuard::new();
        for _ in 0..MAX_MESSAGES_PER_SECOND {
            guard.record_message();
        }
        assert!(guard.record_message());
    }

    #[test]
    fn suppresses_repeated_error_codes() {
        let mut guard = FloodGuard::new();
        assert!(guard.should_send_error("INVALID_MESSAGE"));
        assert!(!guard.should_send_error("INVALID_MESSAGE"));
        // A different code is not suppressed.
        assert!(guard.should_send_error("FLOODED"));
        // A clean frame resets suppression.
        guard.reset_error_suppression();
        assert!(guard.should_send_error("FLOODED"));
    }
}
