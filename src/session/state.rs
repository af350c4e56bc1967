use tracing::debug;

/// Lifecycle of one dictation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Authenticating,
    /// Terminal: the token was not accepted
    Rejected,
    /// Terminal: the engine could not be reached or configured
    SessionSetupFailed,
    SessionOpen,
    /// Forwarder and multiplexer both running
    Streaming,
    /// Forwarder stopped, remaining results still being flushed
    Draining,
    /// Terminal
    Closed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Rejected | SessionState::SessionSetupFailed | SessionState::Closed
        )
    }

    fn can_advance_to(self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Init, Authenticating)
                | (Authenticating, Rejected)
                | (Authenticating, SessionOpen)
                | (Authenticating, SessionSetupFailed)
                | (SessionOpen, Streaming)
                | (Streaming, Draining)
                | (Streaming, Closed)
                | (Draining, Closed)
        )
    }

    /// Move to `next`, ignoring transitions the lifecycle does not allow.
    ///
    /// Returns whether the state changed.
    pub fn advance(&mut self, next: SessionState) -> bool {
        if !self.can_advance_to(next) {
            debug!("Ignoring session transition {:?} -> {:?}", self, next);
            return false;
        }

        debug!("Session {:?} -> {:?}", self, next);
        *self = next;
        true
    }
}
