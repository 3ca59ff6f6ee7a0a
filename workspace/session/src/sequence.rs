use std::fmt;

/// Identifies one issued request (or armed timer) within a [`RequestSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing tokens for one field of state.
///
/// Only the most recently issued token is current. A response that comes back
/// carrying any other token belongs to a superseded request and must not be
/// applied. [`RequestSequencer::invalidate`] retires the current token without
/// issuing a new one, so every outstanding response becomes stale.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    latest: Option<RequestToken>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    pub fn latest(&self) -> Option<RequestToken> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert_eq!(sequencer.latest(), Some(second));
    }

    #[test]
    fn test_invalidate_retires_everything() {
        let mut sequencer = RequestSequencer::new();
        let token = sequencer.issue();
        sequencer.invalidate();
        assert!(!sequencer.is_current(token));
        assert_eq!(sequencer.latest(), None);

        let next = sequencer.issue();
        assert_ne!(next, token);
        assert!(sequencer.is_current(next));
    }
}
