pub mod auth;
pub mod records;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{forms::FormErrors, views::FormView};

// Formulário inválido: devolve o próprio form com os erros por campo.
pub(crate) fn render_invalid<F: Serialize>(form: F, errors: FormErrors) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(FormView::invalid(form, errors))).into_response()
}
