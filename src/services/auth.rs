//! Auth Service
//!
//! In-memory session over the backend's `/register` and `/login` endpoints.
//! Nothing is persisted; restarting the client signs the user out.

use parking_lot::RwLock;

use crate::domain::user::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::error::{Error, Result};
use crate::eventing::app_event::{AppEvent, EventSender, emit};
use crate::services::gateway::AuthApi;

/// Session holder
pub struct AuthService<A> {
    api: A,
    user: RwLock<Option<User>>,
    events: Option<EventSender>,
}

impl<A: AuthApi> AuthService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            user: RwLock::new(None),
            events: None,
        }
    }

    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.events = Some(tx);
        self
    }

    /// Register and sign in as the new user
    pub async fn register(&self, profile: RegisterRequest) -> Result<User> {
        let response = self.api.register_user(&profile).await.inspect_err(|e| {
            tracing::warn!("Registration failed: {}", e);
        })?;

        if !response.success {
            return Err(Error::Auth {
                message: "Registration was not accepted".to_string(),
            });
        }

        let user = User::from(&profile);
        tracing::info!("Registered {} as {:?}", user.email, user.job_role);
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Sign in; a success flag without a user record counts as failure
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login_user(&credentials).await.inspect_err(|e| {
            tracing::warn!("Login failed for {}: {}", email, e);
        })?;

        match response {
            AuthResponse {
                success: true,
                user: Some(user),
            } => {
                tracing::info!("Signed in as {}", user.email);
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            AuthResponse { success: true, .. } => Err(Error::Auth {
                message: "Login response did not include a user".to_string(),
            }),
            AuthResponse { .. } => Err(Error::Auth {
                message: "Invalid email or password".to_string(),
            }),
        }
    }

    pub fn logout(&self) {
        if self.user.read().is_some() {
            tracing::info!("Signed out");
            self.set_user(None);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write() = user.clone();
        emit(self.events.as_ref(), AppEvent::SessionChanged { user });
    }
}
