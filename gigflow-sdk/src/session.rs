//! Session lifecycle: anonymous → authenticating → authenticated.
//!
//! The credential is persisted as TOML under the user config dir
//! (`~/.config/gigflow/session.toml`) so a restart resumes an authenticated
//! session without re-prompting login. Load and save are tolerant: a
//! missing or malformed file just means starting anonymous.

use std::path::{Path, PathBuf};

use crate::types::Session;

/// Where the client sits in the auth lifecycle. Exactly one session exists
/// per running client; `Authenticated` owns it.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// A login/register dispatch is in flight.
    Authenticating,
    Authenticated(Session),
}

/// Owns the session state and its on-disk credential.
#[derive(Debug)]
pub struct SessionManager {
    state: SessionState,
    path: PathBuf,
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gigflow")
        .join("session.toml")
}

fn load_file(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(s) => match toml::from_str(&s) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "bad session file, ignoring");
                None
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "can't read session file");
            None
        }
    }
}

impl SessionManager {
    /// Open against the default config-dir path, restoring a persisted
    /// session when one exists.
    pub fn open() -> Self {
        Self::open_at(default_path())
    }

    /// Open against an explicit path (injected by tests).
    pub fn open_at(path: PathBuf) -> Self {
        let state = match load_file(&path) {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Anonymous,
        };
        Self { state, path }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// A login/register dispatch started.
    pub fn begin_auth(&mut self) {
        self.state = SessionState::Authenticating;
    }

    /// Collaborator accepted the credentials: persist and become
    /// authenticated.
    pub fn complete_auth(&mut self, session: Session) {
        self.save(&session);
        self.state = SessionState::Authenticated(session);
    }

    /// Collaborator rejected the credentials: back to anonymous.
    pub fn fail_auth(&mut self) {
        if matches!(self.state, SessionState::Authenticating) {
            self.state = SessionState::Anonymous;
        }
    }

    /// Explicit logout or credential expiry: drop the persisted credential
    /// and the in-memory session.
    pub fn clear(&mut self) {
        if self.path.exists()
            && let Err(e) = std::fs::remove_file(&self.path)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "can't remove session file");
        }
        self.state = SessionState::Anonymous;
    }

    fn save(&self, session: &Session) {
        if let Some(dir) = self.path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match toml::to_string_pretty(session) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&self.path, s) {
                    tracing::warn!(path = %self.path.display(), error = %e, "can't save session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "can't serialize session"),
        }
    }
}
