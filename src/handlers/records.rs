// src/handlers/records.rs
//
// Handlers genéricos das quatro telas por agência (Record, BICSetup,
// MCRegister, PesoNet). O router instancia cada um com o tipo concreto.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        session::{push_flash, take_flash, Flash},
    },
    config::AppState,
    handlers::render_invalid,
    middleware::auth::{current_branch, CurrentSession},
    models::{
        forms::FormSchema,
        records::BranchEntity,
        views::{FormView, ListView},
    },
};

// GET lista filtrada pela agência do usuário
pub async fn list<T: BranchEntity>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let branch = current_branch(&session);
    let items = app_state.record_service.list_for_branch::<T>(branch).await?;

    let (jar, messages) = take_flash(jar);
    Ok((
        jar,
        Json(ListView {
            branch_type: branch.clone(),
            items,
            messages,
        }),
    ))
}

// GET formulário vazio
pub async fn create_form<T: BranchEntity>(jar: CookieJar) -> impl IntoResponse {
    let (jar, messages) = take_flash(jar);
    (jar, Json(FormView::blank(T::Form::default(), messages)))
}

// POST criação; a agência vem da sessão
pub async fn create<T: BranchEntity>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    Form(form): Form<T::Form>,
) -> Result<Response, AppError> {
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return Ok(render_invalid(form, errors)),
    };

    let record = app_state
        .record_service
        .create::<T>(current_branch(&session), fields)
        .await?;

    tracing::info!(
        "📝 {} {} criado por {} ({}, agência {})",
        T::LABEL,
        record.id(),
        session.username,
        session.role.as_str(),
        session.branch
    );

    Ok((push_flash(jar, Flash::RecordCreated), Redirect::to(T::LIST_PATH)).into_response())
}

// GET formulário preenchido com a linha atual
pub async fn update_form<T: BranchEntity>(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state.record_service.get::<T>(id).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, Json(FormView::blank(record.to_form(), messages))))
}

// POST atualização. Carrega primeiro: id inexistente é 404 antes de validar.
pub async fn update<T: BranchEntity>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    jar: CookieJar,
    Form(form): Form<T::Form>,
) -> Result<Response, AppError> {
    app_state.record_service.get::<T>(id).await?;

    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return Ok(render_invalid(form, errors)),
    };

    app_state.record_service.update::<T>(id, fields).await?;

    tracing::info!("✏️ {} {} atualizado por {}", T::LABEL, id, session.username);

    Ok((push_flash(jar, Flash::RecordUpdated), Redirect::to(T::LIST_PATH)).into_response())
}

// POST exclusão, sem confirmação
pub async fn delete<T: BranchEntity>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    app_state.record_service.delete::<T>(id).await?;

    tracing::info!("🗑️ {} {} excluído por {}", T::LABEL, id, session.username);

    Ok((push_flash(jar, Flash::RecordDeleted), Redirect::to(T::LIST_PATH)))
}
