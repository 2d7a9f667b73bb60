//! Unit tests for the auth crate
//!
//! Use-case and filter tests run against in-memory repository and mail
//! gateway fakes; nothing here touches a real database or network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    ActivateUseCase, ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
    OtpUseCase, PasswordResetUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::{role::Role, user::User, verification_token::VerificationToken};
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{RoleRepository, UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{
    email::Email, token_kind::TokenKind, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Default)]
struct StoreInner {
    users: HashMap<String, User>,
    roles: HashMap<String, Role>,
    tokens: HashMap<(String, TokenKind), VerificationToken>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    fn with_seeded_roles() -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for name in ["USER", "ADMIN"] {
                inner
                    .roles
                    .insert(name.to_string(), Role::seeded_for_test(name));
            }
        }
        store
    }

    fn token_count(&self) -> usize {
        self.inner.lock().unwrap().tokens.len()
    }

    fn live_token(&self, email: &str, kind: TokenKind) -> Option<VerificationToken> {
        self.inner
            .lock()
            .unwrap()
            .tokens
            .get(&(email.to_string(), kind))
            .cloned()
    }

    fn user(&self, email: &str) -> Option<User> {
        self.inner.lock().unwrap().users.get(email).cloned()
    }
}

impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user.email.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.inner.lock().unwrap().users.contains_key(email.as_str()))
    }

    async fn enable(&self, email: &Email) -> AuthResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.get_mut(email.as_str()) {
            Some(user) => {
                user.enabled = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.get_mut(email.as_str()) {
            user.password_hash = password_hash.clone();
        }
        Ok(())
    }
}

impl RoleRepository for MemoryStore {
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>> {
        Ok(self.inner.lock().unwrap().roles.get(name).cloned())
    }
}

impl VerificationTokenRepository for MemoryStore {
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .tokens
            .insert((token.email.as_str().to_string(), token.kind), token.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tokens
            .values()
            .find(|t| t.token == token && t.kind == kind)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tokens
            .get(&(email.as_str().to_string(), kind))
            .cloned())
    }

    async fn delete(&self, email: &Email, kind: TokenKind) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .tokens
            .remove(&(email.as_str().to_string(), kind));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SentMail {
    Activation { to: String, link: String },
    Reset { to: String, link: String },
    Otp { to: String, code: String },
}

#[derive(Default)]
struct MailerInner {
    sent: Vec<SentMail>,
    fail: bool,
}

#[derive(Clone, Default)]
struct MockMailer {
    inner: Arc<Mutex<MailerInner>>,
}

impl MockMailer {
    fn set_fail(&self, fail: bool) {
        self.inner.lock().unwrap().fail = fail;
    }

    fn sent(&self) -> Vec<SentMail> {
        self.inner.lock().unwrap().sent.clone()
    }

    fn record(&self, mail: SentMail) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail {
            return Err(AuthError::EmailDelivery("mail service down".into()));
        }
        inner.sent.push(mail);
        Ok(())
    }
}

impl MailGateway for MockMailer {
    async fn send_activation(
        &self,
        to: &Email,
        _name: &str,
        activation_link: &str,
    ) -> AuthResult<()> {
        self.record(SentMail::Activation {
            to: to.as_str().to_string(),
            link: activation_link.to_string(),
        })
    }

    async fn send_password_reset(&self, to: &Email, reset_link: &str) -> AuthResult<()> {
        self.record(SentMail::Reset {
            to: to.as_str().to_string(),
            link: reset_link.to_string(),
        })
    }

    async fn send_otp(&self, to: &Email, otp: &str) -> AuthResult<()> {
        self.record(SentMail::Otp {
            to: to.as_str().to_string(),
            code: otp.to_string(),
        })
    }
}

// ============================================================================
// Test harness
// ============================================================================

struct Harness {
    store: MemoryStore,
    mailer: MockMailer,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(AuthConfig::with_random_secret())
    }

    fn with_config(config: AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config));
        Self {
            store: MemoryStore::with_seeded_roles(),
            mailer: MockMailer::default(),
            tokens,
            config: Arc::new(config),
        }
    }

    fn register_use_case(&self) -> RegisterUseCase<MemoryStore, MemoryStore, MockMailer> {
        RegisterUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.mailer.clone()),
            self.tokens.clone(),
            self.config.clone(),
        )
    }

    fn activate_use_case(&self) -> ActivateUseCase<MemoryStore> {
        ActivateUseCase::new(Arc::new(self.store.clone()), self.tokens.clone())
    }

    fn login_use_case(&self) -> LoginUseCase<MemoryStore> {
        LoginUseCase::new(
            Arc::new(self.store.clone()),
            self.tokens.clone(),
            self.config.clone(),
        )
    }

    fn change_password_use_case(&self) -> ChangePasswordUseCase<MemoryStore> {
        ChangePasswordUseCase::new(Arc::new(self.store.clone()), self.config.clone())
    }

    fn password_reset_use_case(&self) -> PasswordResetUseCase<MemoryStore, MemoryStore, MockMailer> {
        PasswordResetUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.mailer.clone()),
            self.config.clone(),
        )
    }

    fn otp_use_case(&self) -> OtpUseCase<MemoryStore, MemoryStore, MockMailer> {
        OtpUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.mailer.clone()),
            self.config.clone(),
        )
    }

    async fn register(&self, email: &str, password: &str) {
        self.register_use_case()
            .execute(RegisterInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("registration should succeed");
    }

    async fn register_and_activate(&self, email: &str, password: &str) {
        self.register(email, password).await;
        let token = self.last_activation_token();
        self.activate_use_case()
            .execute(&token)
            .await
            .expect("activation should succeed");
    }

    fn last_activation_token(&self) -> String {
        let link = self
            .mailer
            .sent()
            .into_iter()
            .rev()
            .find_map(|m| match m {
                SentMail::Activation { link, .. } => Some(link),
                _ => None,
            })
            .expect("an activation email was sent");
        link.split_once("token=")
            .expect("activation link carries a token")
            .1
            .to_string()
    }
}

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "CorrectHorse#42";
const NEW_PASSWORD: &str = "NewSecret#2024";

// ============================================================================
// Registration and activation
// ============================================================================

mod register {
    use super::*;

    #[tokio::test]
    async fn creates_disabled_account_and_sends_activation() {
        let h = Harness::new();
        h.register(EMAIL, PASSWORD).await;

        let user = h.store.user(EMAIL).unwrap();
        assert!(!user.enabled);
        assert_eq!(user.role_names(), vec!["USER".to_string()]);

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], SentMail::Activation { to, .. } if to == EMAIL));
    }

    #[tokio::test]
    async fn duplicate_email_fails_with_conflict() {
        let h = Harness::new();
        h.register(EMAIL, PASSWORD).await;

        let result = h
            .register_use_case()
            .execute(RegisterInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn rejects_weak_password() {
        let h = Harness::new();
        let result = h
            .register_use_case()
            .execute(RegisterInput {
                email: EMAIL.to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::PasswordValidation(_))));
        assert!(h.store.user(EMAIL).is_none());
    }

    #[tokio::test]
    async fn mail_failure_leaves_disabled_account_recoverable_by_resend() {
        let h = Harness::new();
        h.mailer.set_fail(true);

        let result = h
            .register_use_case()
            .execute(RegisterInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::EmailDelivery(_))));

        // Account row exists but stays unusable
        let user = h.store.user(EMAIL).unwrap();
        assert!(!user.enabled);

        // Re-attempting notification completes the flow
        h.mailer.set_fail(false);
        h.register_use_case()
            .resend_activation(EMAIL)
            .await
            .unwrap();

        let token = h.last_activation_token();
        h.activate_use_case().execute(&token).await.unwrap();
        assert!(h.store.user(EMAIL).unwrap().enabled);
    }

    #[tokio::test]
    async fn resend_for_active_account_fails() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let result = h.register_use_case().resend_activation(EMAIL).await;
        assert!(matches!(result, Err(AuthError::AlreadyActivated)));
    }
}

mod activate {
    use super::*;

    #[tokio::test]
    async fn flips_enabled_flag() {
        let h = Harness::new();
        h.register(EMAIL, PASSWORD).await;
        assert!(!h.store.user(EMAIL).unwrap().enabled);

        let token = h.last_activation_token();
        h.activate_use_case().execute(&token).await.unwrap();

        assert!(h.store.user(EMAIL).unwrap().enabled);
    }

    #[tokio::test]
    async fn tampered_token_never_flips_the_flag() {
        let h = Harness::new();
        h.register(EMAIL, PASSWORD).await;

        let mut token = h.last_activation_token();
        token.pop();
        token.push('x');

        let result = h.activate_use_case().execute(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
        assert!(!h.store.user(EMAIL).unwrap().enabled);
    }

    #[tokio::test]
    async fn expired_token_never_flips_the_flag() {
        let config = AuthConfig {
            activation_ttl: std::time::Duration::from_secs(0),
            ..AuthConfig::with_random_secret()
        };
        let h = Harness::with_config(config);
        h.register(EMAIL, PASSWORD).await;

        let token = h.last_activation_token();
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let result = h.activate_use_case().execute(&token).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
        assert!(!h.store.user(EMAIL).unwrap().enabled);
    }

    #[tokio::test]
    async fn unknown_subject_reports_not_found() {
        let h = Harness::new();
        let token = h
            .tokens
            .issue_activation(&Email::new("ghost@example.com").unwrap())
            .unwrap();

        let result = h.activate_use_case().execute(&token).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}

// ============================================================================
// Login
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn issues_session_token_with_roles() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let output = h
            .login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();

        assert!(h.tokens.validate(&output.token));
        let claims = h.tokens.claims(&output.token).unwrap();
        assert_eq!(claims.sub, EMAIL);
        assert_eq!(claims.roles, vec!["USER".to_string()]);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_report_alike() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let wrong_password = h
            .login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: "NotThePassword#1".to_string(),
            })
            .await;
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

        let unknown_email = h
            .login_use_case()
            .execute(LoginInput {
                email: "ghost@example.com".to_string(),
                password: PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn pending_activation_account_cannot_login() {
        let h = Harness::new();
        h.register(EMAIL, PASSWORD).await;

        let result = h
            .login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::AccountDisabled)));
    }
}

// ============================================================================
// Password change and reset
// ============================================================================

mod change_password {
    use super::*;

    #[tokio::test]
    async fn rotates_hash_only_when_old_password_matches() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let wrong_old = h
            .change_password_use_case()
            .execute(ChangePasswordInput {
                email: EMAIL.to_string(),
                old_password: "NotThePassword#1".to_string(),
                new_password: NEW_PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(wrong_old, Err(AuthError::InvalidCredentials)));

        h.change_password_use_case()
            .execute(ChangePasswordInput {
                email: EMAIL.to_string(),
                old_password: PASSWORD.to_string(),
                new_password: NEW_PASSWORD.to_string(),
            })
            .await
            .unwrap();

        // Old password is dead, new one logs in
        let old_login = h
            .login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(old_login, Err(AuthError::InvalidCredentials)));

        h.login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: NEW_PASSWORD.to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_email_is_distinguished_internally() {
        let h = Harness::new();
        let result = h
            .change_password_use_case()
            .execute(ChangePasswordInput {
                email: "ghost@example.com".to_string(),
                old_password: PASSWORD.to_string(),
                new_password: NEW_PASSWORD.to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}

mod password_reset {
    use super::*;

    #[tokio::test]
    async fn request_twice_leaves_exactly_one_live_token() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        h.password_reset_use_case().request(EMAIL).await.unwrap();
        let first = h.store.live_token(EMAIL, TokenKind::PasswordReset).unwrap();

        h.password_reset_use_case().request(EMAIL).await.unwrap();
        let second = h.store.live_token(EMAIL, TokenKind::PasswordReset).unwrap();

        assert_eq!(h.store.token_count(), 1);
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn unknown_email_reports_not_found() {
        let h = Harness::new();
        let result = h.password_reset_use_case().request("ghost@example.com").await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn reset_rotates_password_and_consumes_token() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        h.password_reset_use_case().request(EMAIL).await.unwrap();
        let token = h
            .store
            .live_token(EMAIL, TokenKind::PasswordReset)
            .unwrap()
            .token;

        h.password_reset_use_case()
            .reset(&token, NEW_PASSWORD.to_string())
            .await
            .unwrap();

        h.login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: NEW_PASSWORD.to_string(),
            })
            .await
            .unwrap();

        // Consumed: a second redemption fails
        let again = h
            .password_reset_use_case()
            .reset(&token, "Another#Secret9".to_string())
            .await;
        assert!(matches!(again, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let expired = VerificationToken::password_reset(
            Email::new(EMAIL).unwrap(),
            chrono::Duration::seconds(-1),
        );
        VerificationTokenRepository::upsert(&h.store, &expired)
            .await
            .unwrap();

        let result = h
            .password_reset_use_case()
            .reset(&expired.token, NEW_PASSWORD.to_string())
            .await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn reset_link_carries_the_stored_token() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        h.password_reset_use_case().request(EMAIL).await.unwrap();

        let stored = h
            .store
            .live_token(EMAIL, TokenKind::PasswordReset)
            .unwrap()
            .token;
        let link = h
            .mailer
            .sent()
            .into_iter()
            .find_map(|m| match m {
                SentMail::Reset { link, .. } => Some(link),
                _ => None,
            })
            .unwrap();

        assert!(link.ends_with(&stored));
    }
}

mod otp {
    use super::*;

    #[tokio::test]
    async fn issues_six_digit_code_and_mails_it() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        h.otp_use_case().request(EMAIL).await.unwrap();

        let stored = h
            .store
            .live_token(EMAIL, TokenKind::OtpVerification)
            .unwrap();
        assert_eq!(stored.token.len(), 6);

        let sent_code = h
            .mailer
            .sent()
            .into_iter()
            .find_map(|m| match m {
                SentMail::Otp { code, .. } => Some(code),
                _ => None,
            })
            .unwrap();
        assert_eq!(sent_code, stored.token);
    }

    #[tokio::test]
    async fn rerequest_replaces_live_code() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        h.otp_use_case().request(EMAIL).await.unwrap();
        h.otp_use_case().request(EMAIL).await.unwrap();

        assert_eq!(h.store.token_count(), 1);
    }
}

// ============================================================================
// Request filter
// ============================================================================

mod request_filter {
    use super::*;
    use crate::presentation::middleware::{BearerAuthState, CurrentUser, bearer_auth};
    use axum::{Extension, Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn whoami(user: Option<Extension<CurrentUser>>) -> String {
        match user {
            Some(Extension(user)) => user.email,
            None => "anonymous".to_string(),
        }
    }

    fn test_app(h: &Harness) -> Router {
        let state = BearerAuthState {
            repo: Arc::new(h.store.clone()),
            tokens: h.tokens.clone(),
        };

        Router::new()
            .route("/validate/ping", get(|| async { "pong" }))
            .route("/me", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                state,
                bearer_auth::<MemoryStore>,
            ))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn public_path_reaches_handler_without_authorization() {
        let h = Harness::new();
        let app = test_app(&h);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/validate/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "pong");
    }

    #[tokio::test]
    async fn missing_header_continues_without_principal() {
        let h = Harness::new();
        let app = test_app(&h);

        let response = app
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn valid_bearer_installs_principal() {
        let h = Harness::new();
        h.register_and_activate(EMAIL, PASSWORD).await;

        let token = h
            .login_use_case()
            .execute(LoginInput {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
            .token;

        let app = test_app(&h);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, EMAIL);
    }

    #[tokio::test]
    async fn garbage_bearer_is_rejected() {
        let h = Harness::new();
        let app = test_app(&h);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header("Authorization", "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn vanished_subject_continues_without_principal() {
        let h = Harness::new();
        let token = h
            .tokens
            .issue_session(&Email::new("ghost@example.com").unwrap(), Vec::new())
            .unwrap();

        let app = test_app(&h);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "anonymous");
    }
}
