// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{
        error::AppError,
        session::{end_session, push_flash, start_session, take_flash, Flash, LOGIN_PATH},
    },
    config::AppState,
    handlers::render_invalid,
    models::{
        auth::{LoginForm, RegisterForm},
        forms::{FormErrors, FormSchema},
        records::{BranchEntity, McRegister, Record},
        views::{FormView, PageView},
    },
};

// GET /
pub async fn home(jar: CookieJar) -> impl IntoResponse {
    let (jar, messages) = take_flash(jar);
    (jar, Json(PageView { messages }))
}

// GET /register
pub async fn register_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, messages) = take_flash(jar);
    (jar, Json(FormView::blank(RegisterForm::default(), messages)))
}

// POST /register
pub async fn register(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    // 1. Validar o formulário
    let account = match form.clean() {
        Ok(account) => account,
        Err(errors) => return Ok(render_invalid(form, errors)),
    };

    // 2. Criar usuário + perfil (transação no serviço)
    let (user, profile) = match app_state.auth_service.register_user(account).await {
        Ok(created) => created,
        Err(AppError::UsernameAlreadyExists) => {
            let errors =
                FormErrors::single("username", "A user with that username already exists.");
            return Ok(render_invalid(form, errors));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        "👤 Conta {} criada ({}, agência {})",
        user.username,
        profile.user_type.as_str(),
        profile.branch_type
    );

    // 3. Responder com sucesso
    Ok((push_flash(jar, Flash::AccountCreated), Redirect::to(Record::LIST_PATH)).into_response())
}

// GET /my-login
pub async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, messages) = take_flash(jar);
    (jar, Json(FormView::blank(LoginForm::default(), messages)))
}

// POST /my-login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = match form.clean() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(render_invalid(form, errors)),
    };

    // Credenciais erradas: o form volta sem mensagem de erro.
    let Some(outcome) = app_state.auth_service.login_user(&credentials).await? else {
        tracing::info!("Falha de login para {}", credentials.username);
        return Ok(Json(FormView::blank(form, Vec::new())).into_response());
    };

    // Staff vai para o painel do admin; caixa para o registro de cheques.
    let target = if outcome.user.is_staff {
        Record::LIST_PATH
    } else {
        McRegister::LIST_PATH
    };

    tracing::info!("🔑 {} entrou", outcome.user.username);
    let jar = start_session(jar, outcome.token, app_state.settings.cookie_secure);
    Ok((jar, Redirect::to(target)).into_response())
}

// GET|POST /user-logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = push_flash(end_session(jar), Flash::LoggedOut);
    (jar, Redirect::to(LOGIN_PATH))
}
