// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{error::AppError, session::session_token},
    config::AppState,
    models::auth::{BranchId, SessionContext},
};

// O middleware em si: cookie -> SessionContext nos "extensions" da requisição.
// Sem sessão válida, o AppError::Unauthenticated vira redirect para o login.
pub async fn session_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar).ok_or(AppError::Unauthenticated)?;
    let session = app_state.auth_service.resolve_session(token).await?;
    tracing::debug!("Sessão de {} ({}) na agência {}", session.username, session.user_id, session.branch);

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão diretamente nos handlers
pub struct CurrentSession(pub SessionContext);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AppError::Unauthenticated)
    }
}

/// A agência de quem está logado. Toda listagem e criação passa por aqui.
pub fn current_branch(session: &SessionContext) -> &BranchId {
    &session.branch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserType;
    use axum::http::Request as HttpRequest;
    use uuid::Uuid;

    fn context() -> SessionContext {
        SessionContext {
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            role: UserType::Admin,
            branch: BranchId::new("North"),
        }
    }

    #[test]
    fn current_branch_is_the_profile_branch() {
        assert_eq!(current_branch(&context()).as_str(), "North");
    }

    #[tokio::test]
    async fn extractor_reads_the_guard_context() {
        let (mut parts, _) = HttpRequest::new(()).into_parts();
        parts.extensions.insert(context());

        let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(session.username, "alice");
    }

    #[tokio::test]
    async fn extractor_without_guard_is_unauthenticated() {
        let (mut parts, _) = HttpRequest::new(()).into_parts();
        let result = CurrentSession::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
