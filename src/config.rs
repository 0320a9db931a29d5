// src/config.rs

use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{RecordRepository, UserRepository},
    services::{auth::AuthService, record_service::RecordService},
};

// Configuração lida do ambiente (.env é opcional)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub session_secret: String,
    pub bind_address: String,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://branchdesk.db".to_string()),
            session_secret: env::var("SESSION_SECRET")
                .context("SESSION_SECRET deve ser definido")?,
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            session_ttl_hours: parse_var("SESSION_TTL_HOURS", 12)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cookie_secure: parse_var("COOKIE_SECURE", false)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} inválido ({:?}): {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub settings: Settings,
    pub auth_service: AuthService,
    pub record_service: RecordService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .create_if_missing(true);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool, settings: Settings) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, &settings, db_pool.clone());
        let record_service = RecordService::new(RecordRepository::new(db_pool.clone()));

        Self {
            db_pool,
            settings,
            auth_service,
            record_service,
        }
    }
}
