use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::post};
use cafe_site::{
    HttpCredentialVerifier, StaticCredentialVerifier,
    config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    session::{
        AuthError, CredentialVerifier, Credentials, FileSessionStorage, Grant,
        MemorySessionStorage, Role, Session, SessionGate, SessionStorage, User, can_access_admin,
    },
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

// --- Helpers ---

fn admin_credentials() -> Credentials {
    Credentials {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
    }
}

fn wrong_password() -> Credentials {
    Credentials {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: "letmein".to_string(),
    }
}

fn static_verifier() -> StaticCredentialVerifier {
    StaticCredentialVerifier::new(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
}

fn editor() -> User {
    User {
        id: "7".to_string(),
        email: "editor@deglobecafe.com".to_string(),
        name: "Editor".to_string(),
        role: Role::Editor,
    }
}

/// Accepts any credentials and hands back a fixed editor.
struct EditorVerifier;

#[async_trait]
impl CredentialVerifier for EditorVerifier {
    async fn verify(&self, _credentials: &Credentials) -> Result<Grant, AuthError> {
        Ok(Grant {
            user: editor(),
            token: "editor-token".to_string(),
        })
    }
}

// --- Gate ---

#[tokio::test]
async fn test_valid_login_grants_admin_access() {
    let mut gate = SessionGate::open(static_verifier(), MemorySessionStorage::default());
    assert!(!gate.can_access_admin());

    let session = gate.login(&admin_credentials()).await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|u| u.role), Some(Role::Admin));
    assert!(session.token().is_some());
    assert!(gate.can_access_admin());
}

#[tokio::test]
async fn test_invalid_login_leaves_session_untouched() {
    let mut gate = SessionGate::open(static_verifier(), MemorySessionStorage::default());

    let result = gate.login(&wrong_password()).await;

    assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    assert_eq!(gate.session(), &Session::logged_out());
    assert!(!gate.can_access_admin());
}

#[tokio::test]
async fn test_failed_login_does_not_end_an_existing_session() {
    let mut gate = SessionGate::open(static_verifier(), MemorySessionStorage::default());
    gate.login(&admin_credentials()).await.unwrap();
    let before = gate.session().clone();

    assert!(gate.login(&wrong_password()).await.is_err());

    assert_eq!(gate.session(), &before);
    assert!(gate.can_access_admin());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let mut gate = SessionGate::open(static_verifier(), MemorySessionStorage::default());
    gate.login(&admin_credentials()).await.unwrap();

    gate.logout();
    let once = gate.session().clone();
    gate.logout();

    assert_eq!(gate.session(), &once);
    assert_eq!(once, Session::logged_out());
    assert!(!gate.can_access_admin());
}

#[tokio::test]
async fn test_editor_is_authenticated_but_denied_admin() {
    let mut gate = SessionGate::open(EditorVerifier, MemorySessionStorage::default());

    gate.login(&admin_credentials()).await.unwrap();

    assert!(gate.session().is_authenticated());
    assert!(!gate.can_access_admin());
}

// --- Persistence ---

#[tokio::test]
async fn test_session_survives_restart_via_file_storage() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut gate = SessionGate::open(static_verifier(), FileSessionStorage::in_dir(dir.path()));
        gate.login(&admin_credentials()).await.unwrap().clone()
    };

    let storage = FileSessionStorage::in_dir(dir.path());
    assert!(storage.path().ends_with("auth-store.json"));
    let record: Value = serde_json::from_str(&storage.load().unwrap()).unwrap();
    assert_eq!(record["isAuthenticated"], json!(true));
    assert!(record.get("password").is_none());

    let gate = SessionGate::open(static_verifier(), storage);
    assert_eq!(gate.session(), &before);
    assert!(gate.can_access_admin());
}

#[tokio::test]
async fn test_logout_clears_persisted_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut gate = SessionGate::open(static_verifier(), FileSessionStorage::in_dir(dir.path()));
    gate.login(&admin_credentials()).await.unwrap();

    gate.logout();
    gate.logout();

    assert!(FileSessionStorage::in_dir(dir.path()).load().is_none());
    let reopened = SessionGate::open(static_verifier(), FileSessionStorage::in_dir(dir.path()));
    assert!(!reopened.session().is_authenticated());
}

#[test]
fn test_corrupt_record_rehydrates_as_logged_out_and_is_cleared() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSessionStorage::in_dir(dir.path());
    storage.save("{ this is not json").unwrap();

    let gate = SessionGate::open(static_verifier(), storage);

    assert_eq!(gate.session(), &Session::logged_out());
    assert!(FileSessionStorage::in_dir(dir.path()).load().is_none());
}

#[test]
fn test_partial_record_rehydrates_as_logged_out() {
    let storage = MemorySessionStorage::with_record(r#"{"token":"abc"}"#);
    let gate = SessionGate::open(static_verifier(), storage);

    assert!(!gate.session().is_authenticated());
}

#[test]
fn test_rehydrate_rejects_authenticated_record_without_user() {
    let record = json!({ "user": null, "token": "abc", "isAuthenticated": true }).to_string();
    let session = Session::rehydrate(&record);

    assert!(!session.is_authenticated());
    assert!(!can_access_admin(&session));
}

#[test]
fn test_rehydrate_restores_valid_record() {
    let record = json!({
        "user": { "id": "1", "email": DEFAULT_ADMIN_EMAIL, "name": "Admin User", "role": "admin" },
        "token": "abc",
        "isAuthenticated": true
    })
    .to_string();

    let session = Session::rehydrate(&record);

    assert!(can_access_admin(&session));
    assert_eq!(session.token(), Some("abc"));
}

#[test]
fn test_credentials_debug_redacts_password() {
    let rendered = format!("{:?}", admin_credentials());
    assert!(rendered.contains(DEFAULT_ADMIN_EMAIL));
    assert!(!rendered.contains(DEFAULT_ADMIN_PASSWORD));
}

// --- Remote Verifier ---

/// Minimal stand-in for the credential backend: accepts one pair, rejects the rest.
async fn spawn_auth_backend() -> String {
    async fn stub_login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
        if body["email"] == json!(DEFAULT_ADMIN_EMAIL) && body["password"] == json!("s3cret") {
            Ok(Json(json!({
                "user": {
                    "id": "42",
                    "email": DEFAULT_ADMIN_EMAIL,
                    "name": "Owner",
                    "role": "admin"
                },
                "token": "backend-token"
            })))
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    let router = Router::new().route("/auth/login", post(stub_login));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_http_verifier_accepts_backend_grant() {
    let base = spawn_auth_backend().await;
    let verifier = HttpCredentialVerifier::new(format!("{base}/"));

    let grant = verifier
        .verify(&Credentials {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(grant.user.id, "42");
    assert_eq!(grant.token, "backend-token");
}

#[tokio::test]
async fn test_http_verifier_maps_rejection_to_invalid_credentials() {
    let base = spawn_auth_backend().await;
    let verifier = HttpCredentialVerifier::new(base);

    let result = verifier.verify(&wrong_password()).await;

    assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_http_verifier_reports_unreachable_backend() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let verifier = HttpCredentialVerifier::new(format!("http://127.0.0.1:{port}"));
    let result = verifier.verify(&admin_credentials()).await;

    assert!(matches!(result, Err(AuthError::Unavailable(_))));
}
