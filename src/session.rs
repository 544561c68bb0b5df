use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

/// Storage key the session record lives under.
pub const STORAGE_KEY: &str = "auth-store";

// --- Identity ---

/// Role
///
/// RBAC field. Only `admin` may enter the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

/// User
///
/// The identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Credentials
///
/// Input payload of the login form (POST /api/auth/login).
/// The password is compared and dropped; it is never logged or persisted.
#[derive(Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// --- Session Record ---

/// Session
///
/// The client's record of who is logged in. This is also the persisted layout
/// (`{ user, token, isAuthenticated }`). Fields are private so that
/// `is_authenticated == true` can never be paired with a missing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
}

/// Raw shape of a stored record before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    user: Option<User>,
    token: Option<String>,
    #[serde(default)]
    is_authenticated: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::logged_out()
    }
}

impl Session {
    pub fn logged_out() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        }
    }

    /// rehydrate
    ///
    /// Restores a session from its serialized record. Anything unreadable, or a
    /// record claiming authentication without a user, is treated as logged out.
    pub fn rehydrate(record: &str) -> Self {
        match serde_json::from_str::<StoredSession>(record) {
            Ok(StoredSession {
                user: Some(user),
                token,
                is_authenticated: true,
            }) => Self {
                user: Some(user),
                token,
                is_authenticated: true,
            },
            Ok(StoredSession {
                is_authenticated: true,
                user: None,
                ..
            }) => {
                tracing::warn!("stored session claims authentication without a user; discarding");
                Self::logged_out()
            }
            Ok(_) => Self::logged_out(),
            Err(e) => {
                tracing::warn!(error = %e, "stored session is unreadable; discarding");
                Self::logged_out()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn to_record(&self) -> String {
        // A struct of strings, an enum and a bool always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// can_access_admin
///
/// The admin gate. True only for an authenticated session whose user has the
/// `admin` role. Evaluated on every guarded request; never cached.
pub fn can_access_admin(session: &Session) -> bool {
    session.is_authenticated && matches!(session.user, Some(User { role: Role::Admin, .. }))
}

// --- Credential Verification ---

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Grant
///
/// What a verifier hands back on success: the user and an opaque token.
#[derive(Debug, Clone, Deserialize)]
pub struct Grant {
    pub user: User,
    pub token: String,
}

/// CredentialVerifier
///
/// The seam between the gate and whatever authority checks passwords. Swapping
/// the static pair for a real backend does not touch the gate's control flow.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> Result<Grant, AuthError>;
}

/// StaticCredentialVerifier
///
/// Compares against a single configured email/password pair and synthesizes
/// the admin user locally. No network call is made.
// TODO: retire once AUTH_BACKEND_URL points at a real credential service in production.
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    email: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<Grant, AuthError> {
        if credentials.email != self.email || credentials.password != self.password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Grant {
            user: User {
                id: "1".to_string(),
                email: self.email.clone(),
                name: "Admin User".to_string(),
                role: Role::Admin,
            },
            token: uuid::Uuid::new_v4().simple().to_string(),
        })
    }
}

/// HttpCredentialVerifier
///
/// Delegates to a REST backend exposing `POST /auth/login`, which answers with
/// `{ user, token }`. 400/401/403 mean the pair was rejected; anything else
/// unexpected is reported as the backend being unavailable.
#[derive(Clone)]
pub struct HttpCredentialVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCredentialVerifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for HttpCredentialVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<Grant, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if matches!(status.as_u16(), 400 | 401 | 403) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!("backend answered {status}")));
        }

        response
            .json::<Grant>()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))
    }
}

// --- Persistence ---

/// SessionStorage
///
/// Durable client storage holding one serialized session record under
/// `STORAGE_KEY`. Every write replaces the whole record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, record: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// MemorySessionStorage
///
/// Keeps the record in process memory. Used in tests and for ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStorage {
    record: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<String> {
        self.record.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, record: &str) -> io::Result<()> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| io::Error::other("session storage lock poisoned"))?;
        *guard = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| io::Error::other("session storage lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// FileSessionStorage
///
/// Stores the record as `<dir>/auth-store.json`. Writes go to a sibling temp
/// file first and are renamed into place, so a crash never leaves half a record.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(record) => Some(record),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read session file"
                );
                None
            }
        }
    }

    fn save(&self, record: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// --- Gate ---

/// SessionGate
///
/// Owns the session and the only code paths that mutate it. Handed explicitly
/// to whoever guards routes instead of living in a global.
pub struct SessionGate<V, S> {
    verifier: V,
    storage: S,
    session: Session,
}

impl<V: CredentialVerifier, S: SessionStorage> SessionGate<V, S> {
    /// Rehydrates from storage. A corrupt record is cleared and the gate starts logged out.
    pub fn open(verifier: V, storage: S) -> Self {
        let session = match storage.load() {
            Some(record) => {
                let session = Session::rehydrate(&record);
                if !session.is_authenticated() {
                    if let Err(e) = storage.clear() {
                        tracing::warn!(error = %e, "failed to clear stale session record");
                    }
                }
                session
            }
            None => Session::logged_out(),
        };
        Self {
            verifier,
            storage,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn can_access_admin(&self) -> bool {
        can_access_admin(&self.session)
    }

    /// One verification attempt. On failure the current session is left untouched.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&Session, AuthError> {
        let grant = self.verifier.verify(credentials).await.inspect_err(|e| {
            tracing::info!(email = %credentials.email, reason = %e, "login rejected");
        })?;

        self.session = Session::authenticated(grant.user, grant.token);
        self.persist();
        tracing::info!(email = %credentials.email, "login succeeded");
        Ok(&self.session)
    }

    /// Clears the session unconditionally. Safe to call repeatedly.
    pub fn logout(&mut self) {
        self.session = Session::logged_out();
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.session.to_record()) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }
}
