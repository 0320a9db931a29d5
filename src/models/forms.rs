// src/models/forms.rs
//
// Validação explícita dos formulários. `clean()` devolve os dados já
// convertidos (Ok) ou o mapa campo -> mensagens (Err) para re-renderizar.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
    money::{Amount, AmountError},
    records::{BicSetupFields, McRegisterFields, PesoNetFields, RecordFields},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        FormErrors(errors)
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            details.insert(field.to_string(), messages);
        }
        FormErrors(details)
    }
}

pub trait FormSchema {
    type Cleaned;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors>;
}

// ---
// Validações customizadas
// ---

fn invalid(code: &'static str, message: impl Into<String>) -> ValidationError {
    let message: String = message.into();
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "This field is required."));
    }
    Ok(())
}

pub fn valid_amount(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Amount>()
        .map(|_| ())
        .map_err(|e| invalid("amount", e.to_string()))
}

pub fn valid_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| invalid("date", "Enter a valid date (YYYY-MM-DD)."))
}

// BIC/SWIFT: 8 ou 11 caracteres alfanuméricos.
pub fn valid_bic_code(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    if !matches!(code.len(), 8 | 11) || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("bic_code", "BIC code must be 8 or 11 letters or digits."));
    }
    Ok(())
}

pub fn valid_currency(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("currency", "Currency must be a 3-letter code."));
    }
    Ok(())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn text(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn amount(field: &str, value: &str) -> Result<Amount, FormErrors> {
    value
        .parse()
        .map_err(|e: AmountError| FormErrors::single(field, e.to_string()))
}

fn date(field: &str, value: &str) -> Result<NaiveDate, FormErrors> {
    parse_date(value).ok_or_else(|| FormErrors::single(field, "Enter a valid date (YYYY-MM-DD)."))
}

// ---
// Record (cadastro de clientes da agência)
// ---
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RecordForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address."), length(max = 255))]
    pub email: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub phone: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub address: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub city: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub province: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub country: String,
}

impl FormSchema for RecordForm {
    type Cleaned = RecordFields;

    fn clean(&self) -> Result<RecordFields, FormErrors> {
        self.validate()?;
        Ok(RecordFields {
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            email: text(&self.email),
            phone: text(&self.phone),
            address: text(&self.address),
            city: text(&self.city),
            province: text(&self.province),
            country: text(&self.country),
        })
    }
}

// ---
// BICSetup
// ---
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BicSetupForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub bank_name: String,
    #[validate(custom(function = "valid_bic_code"))]
    pub bic_code: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub account_number: String,
    #[validate(custom(function = "valid_currency"))]
    pub currency: String,
    #[validate(length(max = 500))]
    pub remarks: String,
}

impl FormSchema for BicSetupForm {
    type Cleaned = BicSetupFields;

    fn clean(&self) -> Result<BicSetupFields, FormErrors> {
        self.validate()?;
        Ok(BicSetupFields {
            bank_name: text(&self.bank_name),
            bic_code: self.bic_code.trim().to_ascii_uppercase(),
            account_number: text(&self.account_number),
            currency: self.currency.trim().to_ascii_uppercase(),
            remarks: optional(&self.remarks),
        })
    }
}

// ---
// MCRegister (cheques administrativos emitidos pelo caixa)
// ---
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct McRegisterForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub check_number: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub payee: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub purchaser: String,
    #[validate(custom(function = "valid_amount"))]
    pub amount: String,
    #[validate(custom(function = "valid_date"))]
    pub date_issued: String,
    #[validate(length(max = 500))]
    pub remarks: String,
}

impl FormSchema for McRegisterForm {
    type Cleaned = McRegisterFields;

    fn clean(&self) -> Result<McRegisterFields, FormErrors> {
        self.validate()?;
        Ok(McRegisterFields {
            check_number: text(&self.check_number),
            payee: text(&self.payee),
            purchaser: text(&self.purchaser),
            amount: amount("amount", &self.amount)?,
            date_issued: date("date_issued", &self.date_issued)?,
            remarks: optional(&self.remarks),
        })
    }
}

// ---
// PesoNet (transferências em lote)
// ---
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PesoNetForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub reference_number: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub sender_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub sender_account: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub beneficiary_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub beneficiary_account: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub beneficiary_bank: String,
    #[validate(custom(function = "valid_amount"))]
    pub amount: String,
    #[validate(custom(function = "valid_date"))]
    pub transaction_date: String,
}

impl FormSchema for PesoNetForm {
    type Cleaned = PesoNetFields;

    fn clean(&self) -> Result<PesoNetFields, FormErrors> {
        self.validate()?;
        Ok(PesoNetFields {
            reference_number: text(&self.reference_number),
            sender_name: text(&self.sender_name),
            sender_account: text(&self.sender_account),
            beneficiary_name: text(&self.beneficiary_name),
            beneficiary_account: text(&self.beneficiary_account),
            beneficiary_bank: text(&self.beneficiary_bank),
            amount: amount("amount", &self.amount)?,
            transaction_date: date("transaction_date", &self.transaction_date)?,
        })
    }
}
