// src/models/views.rs
//
// O que um template receberia. A camada de apresentação não faz parte
// deste serviço; as views respondem com estes modelos em JSON.

use serde::Serialize;

use crate::models::{auth::BranchId, forms::FormErrors};

#[derive(Debug, Serialize)]
pub struct PageView {
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FormView<F> {
    pub form: F,
    pub errors: FormErrors,
    pub messages: Vec<String>,
}

impl<F> FormView<F> {
    pub fn blank(form: F, messages: Vec<String>) -> Self {
        Self {
            form,
            errors: FormErrors::default(),
            messages,
        }
    }

    pub fn invalid(form: F, errors: FormErrors) -> Self {
        Self {
            form,
            errors,
            messages: Vec::new(),
        }
    }
}

// Listagem filtrada pela agência de quem está logado
#[derive(Debug, Serialize)]
pub struct ListView<T> {
    pub branch_type: BranchId,
    pub items: Vec<T>,
    pub messages: Vec<String>,
}
