use learn_core::model::{Credentials, Session};

use crate::error::CommandError;

/// Authentication gate in front of every navigation command.
#[derive(Debug, Default)]
pub struct SessionState {
    session: Session,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Accept any non-empty credential pair.
    ///
    /// Returns `true` when this call moved the session from anonymous to
    /// authenticated, `false` when it was already authenticated.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::LoginRejected` if either field is empty; the
    /// session stays anonymous.
    pub fn login(&mut self, credentials: &Credentials) -> Result<bool, CommandError> {
        if !credentials.is_acceptable() {
            tracing::info!(mode = ?credentials.mode, "login rejected");
            return Err(CommandError::LoginRejected);
        }
        if self.is_authenticated() {
            return Ok(false);
        }
        self.session = Session::Authenticated;
        tracing::info!(email = %credentials.email, mode = ?credentials.mode, "signed in");
        Ok(true)
    }

    /// Returns `true` if a session was actually ended.
    pub fn logout(&mut self) -> bool {
        let was_authenticated = self.is_authenticated();
        self.session = Session::Anonymous;
        if was_authenticated {
            tracing::info!("signed out");
        }
        was_authenticated
    }
}
