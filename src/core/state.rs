use chrono::Utc;

pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Which dedup slot a message is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Status,
    Diagnostic,
}

/// Everything the poll loop carries from one cycle to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    timestamp: i64,
    last_status: Option<String>,
    last_diagnostic: Option<String>,
}

impl PollState {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            last_status: None,
            last_diagnostic: None,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn advance(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    pub fn last_sent(&self, kind: MessageKind) -> Option<&str> {
        match kind {
            MessageKind::Status => self.last_status.as_deref(),
            MessageKind::Diagnostic => self.last_diagnostic.as_deref(),
        }
    }

    pub fn is_duplicate(&self, kind: MessageKind, message: &str) -> bool {
        self.last_sent(kind) == Some(message)
    }

    pub fn record_sent(&mut self, kind: MessageKind, message: String) {
        match kind {
            MessageKind::Status => self.last_status = Some(message),
            MessageKind::Diagnostic => self.last_diagnostic = Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_no_message() {
        let state = PollState::new(1000);
        assert_eq!(state.timestamp(), 1000);
        assert!(state.last_sent(MessageKind::Status).is_none());
        assert!(state.last_sent(MessageKind::Diagnostic).is_none());
        assert!(!state.is_duplicate(MessageKind::Status, ""));
    }

    #[test]
    fn test_duplicate_detection_is_exact() {
        let mut state = PollState::new(0);
        state.record_sent(MessageKind::Status, "Status changed".to_string());

        assert!(state.is_duplicate(MessageKind::Status, "Status changed"));
        assert!(!state.is_duplicate(MessageKind::Status, "Status changed "));
        assert!(!state.is_duplicate(MessageKind::Status, "status changed"));

        state.record_sent(MessageKind::Status, "Status changed again".to_string());
        assert!(!state.is_duplicate(MessageKind::Status, "Status changed"));
        assert_eq!(
            state.last_sent(MessageKind::Status),
            Some("Status changed again")
        );
    }

    #[test]
    fn test_slots_are_independent() {
        let mut state = PollState::new(0);
        state.record_sent(MessageKind::Diagnostic, "Program failure: 500".to_string());
        state.record_sent(MessageKind::Status, "Status changed".to_string());

        assert!(state.is_duplicate(MessageKind::Diagnostic, "Program failure: 500"));
        assert!(!state.is_duplicate(MessageKind::Status, "Program failure: 500"));
        assert!(!state.is_duplicate(MessageKind::Diagnostic, "Status changed"));
    }

    #[test]
    fn test_advance() {
        let mut state = PollState::new(10);
        state.advance(2000);
        assert_eq!(state.timestamp(), 2000);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
