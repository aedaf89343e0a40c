//! Sign-in flow over an opaque identity provider.
//!
//! # Invariants
//! - Blank credentials are rejected before the provider is called.
//! - Provider failures surface with their message unchanged.
//! - Every attempt passes through `Loading` before its final state.

pub mod password;

use async_trait::async_trait;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::watch;

/// Result reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Error(String),
}

/// Remote identity provider; its implementation lives outside the core.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AuthOutcome;
    async fn sign_up(&self, email: &str, password: &str) -> AuthOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Credential input rejected locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    BlankEmail,
    BlankPassword,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankEmail => write!(f, "Email cannot be empty."),
            Self::BlankPassword => write!(f, "Password cannot be empty."),
        }
    }
}

impl Error for AuthError {}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::BlankEmail);
    }
    if password.is_empty() {
        return Err(AuthError::BlankPassword);
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Attempt {
    Login,
    SignUp,
}

impl Attempt {
    fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::SignUp => "sign_up",
        }
    }
}

/// Drives login and sign-up attempts and publishes their state.
pub struct LoginFlow<P> {
    provider: P,
    state: watch::Sender<LoginState>,
}

impl<P: AuthProvider> LoginFlow<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: watch::Sender::new(LoginState::Idle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoginState {
        self.state.borrow().clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginState {
        self.attempt(Attempt::Login, email, password).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> LoginState {
        self.attempt(Attempt::SignUp, email, password).await
    }

    /// Returns to `Idle`, e.g. after the UI consumed an error.
    pub fn reset(&self) {
        self.state.send_replace(LoginState::Idle);
    }

    async fn attempt(&self, attempt: Attempt, email: &str, password: &str) -> LoginState {
        if let Err(err) = validate_credentials(email, password) {
            warn!(
                "event=auth_{} module=auth status=error error_code=invalid_input",
                attempt.as_str()
            );
            return self.publish(LoginState::Error(err.to_string()));
        }

        self.state.send_replace(LoginState::Loading);
        let email = email.trim();
        let outcome = match attempt {
            Attempt::Login => self.provider.login(email, password).await,
            Attempt::SignUp => self.provider.sign_up(email, password).await,
        };

        let next = match outcome {
            AuthOutcome::Success => {
                info!("event=auth_{} module=auth status=ok", attempt.as_str());
                LoginState::Success
            }
            AuthOutcome::Error(message) => {
                warn!(
                    "event=auth_{} module=auth status=error error_code=provider",
                    attempt.as_str()
                );
                LoginState::Error(message)
            }
        };
        self.publish(next)
    }

    fn publish(&self, state: LoginState) -> LoginState {
        self.state.send_replace(state.clone());
        state
    }
}
