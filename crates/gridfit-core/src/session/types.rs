use serde::Serialize;

/// Lifecycle of a resize session.
///
/// `Uninitialized -> Located -> Ready -> (Resizing -> Ready)* -> Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    /// Process tree computed and window lookup done.
    Located,
    /// Terminal acquired (or there is nothing to acquire); accepts requests.
    Ready,
    /// A request is being applied.
    Resizing,
    /// Resources released; every request fails.
    Closed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Located => "located",
            SessionState::Ready => "ready",
            SessionState::Resizing => "resizing",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Ready.to_string(), "ready");
        assert_eq!(SessionState::Closed.to_string(), "closed");
    }
}
