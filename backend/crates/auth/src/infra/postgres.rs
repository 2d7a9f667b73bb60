//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{role::Role, user::User, verification_token::VerificationToken};
use crate::domain::repository::{RoleRepository, UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{
    email::Email, role_id::RoleId, token_kind::TokenKind, user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired verification tokens
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM verification_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired verification tokens");

        Ok(deleted)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> AuthResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.role_id, r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_role()).collect())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                enabled,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.enabled)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        for role in &user.roles {
            sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
                .bind(user.user_id.as_uuid())
                .bind(role.role_id.as_uuid())
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                enabled,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let roles = self.roles_for_user(r.user_id).await?;
                Ok(Some(r.into_user(roles)?))
            }
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn enable(&self, email: &Email) -> AuthResult<bool> {
        let affected = sqlx::query(
            "UPDATE users SET enabled = TRUE, updated_at = $2 WHERE email = $1",
        )
        .bind(email.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn update_password(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = $3 WHERE email = $1",
        )
        .bind(email.as_str())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT role_id, name FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_role()))
    }
}

// ============================================================================
// Verification Token Repository Implementation
// ============================================================================

impl VerificationTokenRepository for PgAuthRepository {
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()> {
        // One statement keyed on (email, kind) keeps replacement atomic
        sqlx::query(
            r#"
            INSERT INTO verification_tokens (
                email,
                kind,
                token,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email, kind) DO UPDATE SET
                token = EXCLUDED.token,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(token.email.as_str())
        .bind(token.kind.id())
        .bind(&token.token)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>> {
        let row = sqlx::query_as::<_, VerificationTokenRow>(
            r#"
            SELECT email, kind, token, expires_at, created_at
            FROM verification_tokens
            WHERE token = $1 AND kind = $2
            "#,
        )
        .bind(token)
        .bind(kind.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_token()).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>> {
        let row = sqlx::query_as::<_, VerificationTokenRow>(
            r#"
            SELECT email, kind, token, expires_at, created_at
            FROM verification_tokens
            WHERE email = $1 AND kind = $2
            "#,
        )
        .bind(email.as_str())
        .bind(kind.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_token()).transpose()
    }

    async fn delete(&self, email: &Email, kind: TokenKind) -> AuthResult<()> {
        sqlx::query("DELETE FROM verification_tokens WHERE email = $1 AND kind = $2")
            .bind(email.as_str())
            .bind(kind.id())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, roles: Vec<Role>) -> AuthResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            enabled: self.enabled,
            roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id: Uuid,
    name: String,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            role_id: RoleId::from_uuid(self.role_id),
            name: self.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VerificationTokenRow {
    email: String,
    kind: i16,
    token: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl VerificationTokenRow {
    fn into_token(self) -> AuthResult<VerificationToken> {
        let kind = TokenKind::from_id(self.kind)
            .ok_or_else(|| AuthError::Internal(format!("Invalid token kind: {}", self.kind)))?;

        Ok(VerificationToken {
            token: self.token,
            email: Email::from_db(self.email),
            kind,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}
