// src/models/auth.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::forms::{not_blank, FormErrors, FormSchema};

// Papel do usuário: define o staff flag e o redirect após o login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Cashier,
}

impl UserType {
    pub fn is_staff(self) -> bool {
        matches!(self, UserType::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Cashier => "cashier",
        }
    }
}

impl FromStr for UserType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(UserType::Admin),
            "cashier" => Ok(UserType::Cashier),
            _ => Err(()),
        }
    }
}

/// Identificador da agência: a única chave de particionamento dos dados.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BranchId(String);

impl BranchId {
    pub fn new(branch: impl Into<String>) -> Self {
        BranchId(branch.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Extensão 1-1 do usuário: papel e agência
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub branch_type: String,
    pub created_at: DateTime<Utc>,
}

/// O contexto da requisição autenticada, montado pelo `session_guard`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserType,
    pub branch: BranchId,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

// ---
// Formulários
// ---

fn valid_username(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || "@.+-_".contains(c);
    if !value.chars().all(allowed) {
        let mut err = ValidationError::new("username");
        err.message = Some("Username may contain only letters, digits and @/./+/-/_.".into());
        return Err(err);
    }
    Ok(())
}

fn valid_user_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<UserType>().map_err(|_| {
        let mut err = ValidationError::new("user_type");
        err.message = Some("Select a valid choice: admin or cashier.".into());
        err
    })?;
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(
        length(min = 3, max = 150, message = "Username must have 3 to 150 characters."),
        custom(function = "valid_username")
    )]
    pub username: String,

    // Senhas nunca voltam na re-renderização do formulário
    #[serde(skip_serializing)]
    #[validate(length(min = 8, message = "Password must have at least 8 characters."))]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,

    #[validate(custom(function = "valid_user_type"))]
    pub user_type: String,

    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub branch_type: String,
}

/// Dados limpos do cadastro.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub user_type: UserType,
    pub branch: BranchId,
}

impl FormSchema for RegisterForm {
    type Cleaned = NewAccount;

    fn clean(&self) -> Result<NewAccount, FormErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if self.password1 != self.password2 {
            let mut err = ValidationError::new("password_mismatch");
            err.message = Some("The two password fields didn't match.".into());
            errors.add("password2", err);
        }
        if !errors.errors().is_empty() {
            return Err(errors.into());
        }

        let user_type = self
            .user_type
            .parse()
            .map_err(|_| FormErrors::single("user_type", "Select a valid choice: admin or cashier."))?;

        Ok(NewAccount {
            username: self.username.clone(),
            password: self.password1.clone(),
            user_type,
            branch: BranchId::new(self.branch_type.trim()),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(custom(function = "not_blank"))]
    pub username: String,

    #[serde(skip_serializing)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl FormSchema for LoginForm {
    type Cleaned = Credentials;

    fn clean(&self) -> Result<Credentials, FormErrors> {
        self.validate()?;
        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "alice".into(),
            password1: "s3cret-pass".into(),
            password2: "s3cret-pass".into(),
            user_type: "admin".into(),
            branch_type: " North ".into(),
        }
    }

    #[test]
    fn only_admins_are_staff() {
        assert!(UserType::Admin.is_staff());
        assert!(!UserType::Cashier.is_staff());
    }

    #[test]
    fn register_form_cleans_into_account() {
        let account = register_form().clean().unwrap();
        assert_eq!(account.user_type, UserType::Admin);
        assert_eq!(account.branch.as_str(), "North");
    }

    #[test]
    fn mismatched_passwords_are_a_field_error() {
        let form = RegisterForm {
            password2: "something-else".into(),
            ..register_form()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.field("password2"), ["The two password fields didn't match."]);
    }

    #[test]
    fn unknown_user_type_is_rejected() {
        let form = RegisterForm {
            user_type: "manager".into(),
            username: "a b".into(),
            ..register_form()
        };
        let errors = form.clean().unwrap_err();
        assert!(!errors.field("user_type").is_empty());
        assert!(!errors.field("username").is_empty());
    }

    #[test]
    fn passwords_are_never_serialized() {
        let json = serde_json::to_value(register_form()).unwrap();
        assert!(json.get("password1").is_none());
        assert!(json.get("password2").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn login_form_requires_both_fields() {
        let errors = LoginForm::default().clean().unwrap_err();
        assert!(!errors.field("username").is_empty());
        assert!(!errors.field("password").is_empty());
    }
}
