//! Session state for the dashboard. A [`SessionContext`] is constructed
//! explicitly and handed to every page that needs it; it owns the API client,
//! the token store and the navigator, and installs the 401 callback on the
//! client's middleware chain. Only non-sensitive metadata is logged.
//!
//! State machine: `Uninitialized → Initializing → {Authenticated, Unauthenticated}`.
//! Successful token changes are mirrored into the token store; every failure
//! path clears it.

use crate::{
    api::{
        middleware::UnauthorizedCallback, ApiClient, ApiConfig, AppError, BearerAuth,
        RequestTrace, TokenStore, UnauthorizedHandler,
    },
    features::auth::{
        client,
        types::{LoginRequest, RegisterRequest, User},
    },
    routes::{Navigator, Route},
};
use secrecy::SecretString;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the client-held session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<SecretString>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub state: SessionState,
}

impl Session {
    fn reset(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.is_loading = false;
        self.state = SessionState::Unauthenticated;
    }
}

#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<RwLock<Session>>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    client: ApiClient,
}

impl SessionContext {
    /// Builds the session and its API client. The persisted token (if any) is
    /// read once here; nothing is fetched until [`Self::init_auth`].
    ///
    /// # Errors
    /// Returns `AppError::Config` when the API client cannot be built.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AppError> {
        let token = store.load().unwrap_or_else(|err| {
            warn!("ignoring unreadable session token: {err}");
            None
        });
        let inner = Arc::new(RwLock::new(Session {
            token,
            ..Session::default()
        }));

        let client = ApiClient::builder(config)
            .with(RequestTrace)
            .with(BearerAuth::new(Arc::clone(&store)))
            .with(UnauthorizedHandler::new(unauthorized_callback(
                &inner,
                &store,
                &navigator,
            )))
            .build()?;

        Ok(Self {
            inner,
            store,
            navigator,
            client,
        })
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read().state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// Resolves the session on start. Without a persisted token this makes no
    /// network call.
    pub async fn init_auth(&self) -> SessionState {
        self.write().state = SessionState::Initializing;
        self.resolve().await
    }

    /// Re-validates the persisted token against the API.
    pub async fn check_auth(&self) -> SessionState {
        self.resolve().await
    }

    async fn resolve(&self) -> SessionState {
        let token = match self.store.load() {
            Ok(token) => token,
            Err(err) => {
                warn!("session token unavailable: {err}");
                None
            }
        };

        let Some(token) = token else {
            self.write().reset();
            debug!("no persisted session token");
            return SessionState::Unauthenticated;
        };

        match client::me(&self.client).await {
            Ok(user) => {
                debug!(user_id = %user.id, "session restored");
                let mut session = self.write();
                session.user = Some(user);
                session.token = Some(token);
                session.is_authenticated = true;
                session.state = SessionState::Authenticated;
                SessionState::Authenticated
            }
            Err(err) => {
                debug!("persisted token rejected: {err}");
                self.clear_store();
                self.write().reset();
                SessionState::Unauthenticated
            }
        }
    }

    /// Signs in and loads the user.
    ///
    /// # Errors
    /// Returns the API error; the normalized message is also kept in `Session::error`.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, AppError> {
        self.begin_request();
        let result = async {
            let token = client::login(&self.client, request).await?.into_token();
            self.authenticate(token).await
        }
        .await;
        self.finish_request(result)
    }

    /// Creates the account, signs in and loads the user.
    ///
    /// # Errors
    /// Returns the API error; the normalized message is also kept in `Session::error`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        self.begin_request();
        let result = async {
            let token = client::register(&self.client, request).await?.into_token();
            self.authenticate(token).await
        }
        .await;
        self.finish_request(result)
    }

    /// Clears the token and user and navigates to the login screen.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the persisted token could not be removed;
    /// the in-memory session is reset regardless.
    pub fn logout(&self) -> Result<(), AppError> {
        let cleared = self.store.clear();
        {
            let mut session = self.write();
            session.reset();
            session.error = None;
        }
        info!("signed out");
        self.navigator.navigate(Route::Login);
        cleared
    }

    /// Persists a fresh token, then loads the user behind it.
    async fn authenticate(&self, token: SecretString) -> Result<User, AppError> {
        self.store.save(&token)?;
        {
            let mut session = self.write();
            session.token = Some(token);
            session.is_authenticated = true;
        }
        client::me(&self.client).await
    }

    fn begin_request(&self) {
        let mut session = self.write();
        session.is_loading = true;
        session.error = None;
    }

    fn finish_request(&self, result: Result<User, AppError>) -> Result<User, AppError> {
        match result {
            Ok(user) => {
                info!(user_id = %user.id, "signed in");
                let mut session = self.write();
                session.user = Some(user.clone());
                session.is_authenticated = true;
                session.is_loading = false;
                session.error = None;
                session.state = SessionState::Authenticated;
                Ok(user)
            }
            Err(err) => {
                self.clear_store();
                let mut session = self.write();
                session.reset();
                session.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    fn clear_store(&self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear session token: {err}");
        }
    }

    // A poisoned lock only means a panic elsewhere; the session data stays usable.
    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Builds the callback the HTTP client runs on every 401 response: clear the
/// persisted token, reset the session, navigate to login.
fn unauthorized_callback(
    inner: &Arc<RwLock<Session>>,
    store: &Arc<dyn TokenStore>,
    navigator: &Arc<dyn Navigator>,
) -> UnauthorizedCallback {
    let inner = Arc::downgrade(inner);
    let store = Arc::clone(store);
    let navigator = Arc::clone(navigator);

    Arc::new(move || {
        if let Err(err) = store.clear() {
            warn!("failed to clear session token: {err}");
        }
        if let Some(inner) = inner.upgrade() {
            let mut session = inner
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            session.reset();
        }
        warn!("Session expired. Please log in again.");
        navigator.navigate(Route::Login);
    })
}
