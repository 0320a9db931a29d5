// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::common::session::{end_session, LOGIN_PATH};

// Nosso tipo de erro, com `thiserror` para a conversão automática via `?`.
// Erros de formulário NÃO passam por aqui: os handlers re-renderizam o form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Sessão ausente, inválida ou expirada")]
    Unauthenticated,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Usuário {0} não possui perfil")]
    ProfileNotFound(Uuid),

    #[error("{entity} {id} não encontrado")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Sem sessão: volta para o login e apaga o cookie velho.
            AppError::Unauthenticated => {
                return (end_session(CookieJar::new()), Redirect::to(LOGIN_PATH)).into_response();
            }
            AppError::NotFound { entity, id } => {
                tracing::warn!("{} {} não encontrado", entity, id);
                (StatusCode::NOT_FOUND, format!("{entity} not found."))
            }
            // O cadastro converte isto em erro de formulário; este braço só
            // responde se outro caminho deixar o erro subir.
            AppError::UsernameAlreadyExists => (
                StatusCode::CONFLICT,
                "A user with that username already exists.".to_string(),
            ),

            // Todo o resto (banco, bcrypt, JWT, perfil ausente) vira 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], LOGIN_PATH);
        assert!(response.headers().get("set-cookie").is_some());
    }

    #[test]
    fn missing_row_is_not_found() {
        let response = AppError::NotFound { entity: "Record", id: Uuid::new_v4() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_username_outside_the_form_is_a_conflict() {
        let response = AppError::UsernameAlreadyExists.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_profile_is_a_server_error() {
        let response = AppError::ProfileNotFound(Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
