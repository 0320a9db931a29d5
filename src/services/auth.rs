// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::Settings,
    db::UserRepository,
    models::auth::{BranchId, Claims, Credentials, NewAccount, SessionContext, User, UserProfile},
};

/// Resultado de um login bem-sucedido.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    session_ttl: chrono::Duration,
    bcrypt_cost: u32,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, settings: &Settings, pool: SqlitePool) -> Self {
        Self {
            user_repo,
            jwt_secret: settings.session_secret.clone(),
            session_ttl: chrono::Duration::hours(settings.session_ttl_hours),
            bcrypt_cost: settings.bcrypt_cost,
            pool,
        }
    }

    pub async fn register_user(
        &self,
        account: NewAccount,
    ) -> Result<(User, UserProfile), AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password = account.password;
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // --- INÍCIO DA TRANSAÇÃO ---
        // Usuário e perfil nascem juntos ou não nascem.
        let mut tx = self.pool.begin().await?;

        // 2. Cria Usuário (staff = admin)
        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &account.username,
                &hashed_password,
                account.user_type.is_staff(),
            )
            .await?; // Se falhar aqui, o tx sofre rollback automático no drop

        // 3. Cria o perfil ligado ao usuário
        let profile = self
            .user_repo
            .create_profile(&mut *tx, user.id, account.user_type, &account.branch)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        Ok((user, profile))
    }

    /// `Ok(None)` para credenciais inválidas: a view só re-renderiza o form.
    pub async fn login_user(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<LoginOutcome>, AppError> {
        let Some(user) = self.user_repo.find_by_username(&credentials.username).await? else {
            return Ok(None);
        };

        let password_clone = credentials.password.clone();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Ok(None);
        }

        let token = self.create_token(user.id)?;
        Ok(Some(LoginOutcome { user, token }))
    }

    /// Token do cookie -> contexto {usuário, papel, agência}.
    pub async fn resolve_session(&self, token: &str) -> Result<SessionContext, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let profile = self
            .user_repo
            .find_profile(user.id)
            .await?
            .ok_or(AppError::ProfileNotFound(user.id))?;

        Ok(SessionContext {
            user_id: user.id,
            username: user.username,
            role: profile.user_type,
            branch: BranchId::new(profile.branch_type),
        })
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::UserType,
        test_utils::test_utils::{setup_test_app_state, test_settings},
    };

    fn account(username: &str, user_type: UserType, branch: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            password: "correct-horse".into(),
            user_type,
            branch: BranchId::new(branch),
        }
    }

    async fn profile_count(pool: &SqlitePool, user_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn staff_flag_follows_user_type() {
        let state = setup_test_app_state().await;
        let auth = &state.auth_service;

        let (admin, admin_profile) =
            auth.register_user(account("alice", UserType::Admin, "North")).await.unwrap();
        let (cashier, _) =
            auth.register_user(account("bob", UserType::Cashier, "North")).await.unwrap();

        assert!(admin.is_staff);
        assert!(!cashier.is_staff);
        assert_eq!(admin_profile.branch_type, "North");
        assert_eq!(profile_count(&state.db_pool, admin.id).await, 1);
        assert_eq!(profile_count(&state.db_pool, cashier.id).await, 1);
    }

    #[tokio::test]
    async fn duplicate_username_leaves_no_orphans() {
        let state = setup_test_app_state().await;
        let auth = &state.auth_service;

        auth.register_user(account("alice", UserType::Admin, "North")).await.unwrap();
        let err = auth
            .register_user(account("alice", UserType::Cashier, "South"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameAlreadyExists));

        let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(&state.db_pool)
            .await
            .unwrap();
        assert_eq!(profiles, 1);
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let state = setup_test_app_state().await;
        let auth = &state.auth_service;
        auth.register_user(account("alice", UserType::Admin, "North")).await.unwrap();

        let wrong = Credentials { username: "alice".into(), password: "nope".into() };
        assert!(auth.login_user(&wrong).await.unwrap().is_none());

        let unknown = Credentials { username: "carol".into(), password: "correct-horse".into() };
        assert!(auth.login_user(&unknown).await.unwrap().is_none());

        let right = Credentials { username: "alice".into(), password: "correct-horse".into() };
        let outcome = auth.login_user(&right).await.unwrap().unwrap();
        assert!(outcome.user.is_staff);
        assert!(!outcome.token.is_empty());
    }

    #[tokio::test]
    async fn session_carries_role_and_branch() {
        let state = setup_test_app_state().await;
        let auth = &state.auth_service;
        auth.register_user(account("bob", UserType::Cashier, "South")).await.unwrap();

        let credentials = Credentials { username: "bob".into(), password: "correct-horse".into() };
        let outcome = auth.login_user(&credentials).await.unwrap().unwrap();

        let session = auth.resolve_session(&outcome.token).await.unwrap();
        assert_eq!(session.user_id, outcome.user.id);
        assert_eq!(session.role, UserType::Cashier);
        assert_eq!(session.branch, BranchId::new("South"));
    }

    #[tokio::test]
    async fn foreign_or_garbage_tokens_are_rejected() {
        let state = setup_test_app_state().await;
        let auth = &state.auth_service;

        let err = auth.resolve_session("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));

        // Assinado com outro segredo
        let other = AuthService::new(
            UserRepository::new(state.db_pool.clone()),
            &Settings { session_secret: "another-secret".into(), ..test_settings() },
            state.db_pool.clone(),
        );
        let token = other.create_token(Uuid::new_v4()).unwrap();
        let err = auth.resolve_session(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }
}
