//! Session lifecycle: login, registration, token expiry, auto-logout.
//!
//! The session manager owns the bearer token and the authenticated user.
//! A session exists only while the token's `exp` claim is in the future;
//! a one-shot timer fires at expiry and clears the session, and any 401
//! from the auth service does the same immediately.
//!
//! State transitions:
//!
//! - `login`/`initialize` -> token decoded, profile fetched, timer armed
//! - `logout` (explicit, timer, or 401) -> token, session, and timer cleared
//!
//! Overlapping calls are allowed; a profile response that lands after a
//! logout (or after a new login swapped the token) is discarded.

mod error;
mod token;
mod validate;

pub use error::AuthError;
pub use validate::Registration;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthClient};
use crate::models::{ProfileUpdate, User};
use crate::store::StateStore;

/// An authenticated session.
///
/// Invariant: a `Session` only exists while its token's `exp` was in the
/// future at the last check; the manager tears it down at expiry.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated shopper.
    pub user: User,
    /// When the bearer token expires and auto-logout fires.
    pub expires_at: DateTime<Utc>,
    token: SecretString,
}

impl Session {
    pub(crate) fn token(&self) -> &SecretString {
        &self.token
    }
}

#[derive(Default)]
struct SessionState {
    session: Option<Session>,
    logout_timer: Option<JoinHandle<()>>,
}

/// Manages the authenticated session and its lifecycle.
///
/// Cheaply cloneable; clones share the same session state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    auth: AuthClient,
    store: StateStore,
    state: Mutex<SessionState>,
}

impl SessionManager {
    /// Create a session manager over an auth client and persisted store.
    #[must_use]
    pub fn new(auth: AuthClient, store: StateStore) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                auth,
                store,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Restore the session from the persisted token, if possible.
    ///
    /// An absent, expired, or malformed token clears all session state and
    /// yields `None` without an error; so does a failed profile fetch (the
    /// next explicit login starts clean).
    pub async fn initialize(&self) -> Option<User> {
        let token = self.inner.store.token()?;

        match token::expiry(&token) {
            Some(expiry) if expiry > Utc::now() => {}
            _ => {
                debug!("persisted token expired or malformed, clearing session");
                self.logout();
                return None;
            }
        }

        match self.establish(token).await {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(%error, "could not restore session");
                None
            }
        }
    }

    /// Log in with email and password.
    ///
    /// On success the token is persisted, auto-logout is armed for the
    /// token's expiry, and the profile is fetched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a rejected login,
    /// `AuthError::SessionExpired` if the service hands back an unusable
    /// token, or the underlying network error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let token = self
            .inner
            .auth
            .login(email, password)
            .await
            .map_err(|e| {
                if e.is_unauthorized() {
                    AuthError::InvalidCredentials
                } else {
                    AuthError::Api(e)
                }
            })?;
        self.establish(token).await
    }

    /// Create a new account. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`InvalidEmail`, `WeakPassword`,
    /// `PasswordMismatch`), `AuthError::EmailTaken` for a conflict, or the
    /// underlying network error.
    pub async fn register(&self, registration: Registration) -> Result<(), AuthError> {
        let email = registration.validate()?;
        self.inner
            .auth
            .register(
                email.as_str(),
                &registration.password,
                &registration.first_name,
                &registration.last_name,
            )
            .await
            .map_err(|e| match e {
                ApiError::Status { status: 409, .. } => AuthError::EmailTaken,
                other => AuthError::Api(other),
            })
    }

    /// Clear the persisted token, the in-memory session, and any pending
    /// auto-logout timer, unconditionally.
    pub fn logout(&self) {
        if let Err(error) = self.inner.store.set_token(None) {
            warn!(%error, "failed to clear persisted token");
        }

        let timer = {
            let mut state = self.lock_state();
            if state.session.take().is_some() {
                info!("session cleared");
            }
            state.logout_timer.take()
        };
        // Abort outside the lock; a firing timer takes this same lock.
        if let Some(timer) = timer {
            timer.abort();
        }
    }

    /// Refresh the profile from the auth service.
    ///
    /// Returns `Ok(None)` when the response landed after a logout or token
    /// swap and was discarded.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session, or
    /// `AuthError::SessionExpired` after a 401 (the session is already
    /// cleared).
    pub async fn fetch_profile(&self) -> Result<Option<User>, AuthError> {
        let token = self.current_token().ok_or(AuthError::NotAuthenticated)?;
        match self.inner.auth.fetch_profile(token.expose_secret()).await {
            Ok(user) => Ok(self.apply_profile(&token, user)),
            Err(e) if e.is_unauthorized() => {
                self.logout();
                Err(AuthError::SessionExpired)
            }
            Err(e) => Err(AuthError::Api(e)),
        }
    }

    /// Apply a partial profile update, then refresh the profile.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_profile`].
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Option<User>, AuthError> {
        let token = self.current_token().ok_or(AuthError::NotAuthenticated)?;
        match self
            .inner
            .auth
            .update_profile(token.expose_secret(), &update)
            .await
        {
            Ok(()) => self.fetch_profile().await,
            Err(e) if e.is_unauthorized() => {
                self.logout();
                Err(AuthError::SessionExpired)
            }
            Err(e) => Err(AuthError::Api(e)),
        }
    }

    /// The current session, if one is active.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.lock_state().session.clone()
    }

    /// The authenticated shopper, if logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock_state().session.as_ref().map(|s| s.user.clone())
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_state().session.is_some()
    }

    pub(crate) fn current_token(&self) -> Option<SecretString> {
        self.lock_state()
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub(crate) fn credentials(&self) -> Option<(User, SecretString)> {
        self.lock_state()
            .session
            .as_ref()
            .map(|s| (s.user.clone(), s.token.clone()))
    }

    /// Decode and persist a fresh token, fetch the profile, arm auto-logout.
    async fn establish(&self, token: String) -> Result<User, AuthError> {
        let Some(expires_at) = token::expiry(&token).filter(|expiry| *expiry > Utc::now()) else {
            // Malformed is treated identically to expired.
            self.logout();
            return Err(AuthError::SessionExpired);
        };

        if let Err(error) = self.inner.store.set_token(Some(&token)) {
            warn!(%error, "failed to persist bearer token");
        }

        let user = match self.inner.auth.fetch_profile(&token).await {
            Ok(user) => user,
            Err(e) => {
                self.logout();
                return Err(if e.is_unauthorized() {
                    AuthError::SessionExpired
                } else {
                    AuthError::Api(e)
                });
            }
        };

        self.commit(user.clone(), token, expires_at);
        Ok(user)
    }

    /// Install the session and (re)arm the one-shot auto-logout timer.
    fn commit(&self, user: User, token: String, expires_at: DateTime<Utc>) {
        let mut state = self.lock_state();
        if let Some(old) = state.logout_timer.take() {
            old.abort();
        }

        state.session = Some(Session {
            user,
            expires_at,
            token: SecretString::from(token),
        });

        let delay = (expires_at - Utc::now()).to_std().unwrap_or_default();
        // The timer holds a weak handle: it cannot keep the manager alive,
        // and an explicit logout aborts it before it can act on stale state.
        let weak = Arc::downgrade(&self.inner);
        state.logout_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                debug!("bearer token expired, clearing session");
                Self { inner }.logout();
            }
        }));

        info!(%expires_at, "session established");
    }

    /// Commit a fetched profile, unless the session went away or the token
    /// changed while the request was in flight.
    fn apply_profile(&self, token: &SecretString, user: User) -> Option<User> {
        let mut state = self.lock_state();
        match state.session.as_mut() {
            Some(session)
                if session.token.expose_secret() == token.expose_secret() =>
            {
                session.user = user.clone();
                Some(user)
            }
            _ => {
                debug!("discarding profile response for a stale session");
                None
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
