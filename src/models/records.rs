// src/models/records.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{query_builder::Separated, sqlite::SqliteRow, FromRow, Sqlite};
use uuid::Uuid;

use crate::models::{
    forms::{BicSetupForm, FormSchema, McRegisterForm, PesoNetForm, RecordForm, DATE_FORMAT},
    money::Amount,
};

// ---
// Contratos genéricos
// ---

/// Colunas de negócio de uma tabela, na ordem em que `push_values` faz o bind.
pub trait ColumnValues: Send + 'static {
    const COLUMNS: &'static [&'static str];

    fn push_values(self, values: &mut Separated<'_, 'static, Sqlite, &'static str>);
}

/// Uma tabela particionada por agência (`branch`).
///
/// As quatro telas de cadastro são a mesma coisa com colunas diferentes;
/// repositório, serviço e handlers são genéricos sobre este trait.
pub trait BranchEntity:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    type Form: FormSchema<Cleaned = Self::Fields>
        + Default
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    type Fields: ColumnValues;

    const TABLE: &'static str;
    const LABEL: &'static str;
    /// Para onde create/update/delete redirecionam.
    const LIST_PATH: &'static str;

    fn id(&self) -> Uuid;
    fn branch(&self) -> &str;
    fn to_form(&self) -> Self::Form;
}

// ---
// 1. Record (admin)
// ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Record {
    pub id: Uuid,
    pub branch: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
}

impl ColumnValues for RecordFields {
    const COLUMNS: &'static [&'static str] = &[
        "first_name", "last_name", "email", "phone", "address", "city", "province", "country",
    ];

    fn push_values(self, values: &mut Separated<'_, 'static, Sqlite, &'static str>) {
        values
            .push_bind(self.first_name)
            .push_bind(self.last_name)
            .push_bind(self.email)
            .push_bind(self.phone)
            .push_bind(self.address)
            .push_bind(self.city)
            .push_bind(self.province)
            .push_bind(self.country);
    }
}

impl BranchEntity for Record {
    type Form = RecordForm;
    type Fields = RecordFields;

    const TABLE: &'static str = "records";
    const LABEL: &'static str = "Record";
    const LIST_PATH: &'static str = "/dashboard";

    fn id(&self) -> Uuid {
        self.id
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn to_form(&self) -> RecordForm {
        RecordForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            country: self.country.clone(),
        }
    }
}

// ---
// 2. BICSetup (admin cadastra, caixa consulta)
// ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BicSetup {
    pub id: Uuid,
    pub branch: String,
    pub bank_name: String,
    pub bic_code: String,
    pub account_number: String,
    pub currency: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BicSetupFields {
    pub bank_name: String,
    pub bic_code: String,
    pub account_number: String,
    pub currency: String,
    pub remarks: Option<String>,
}

impl ColumnValues for BicSetupFields {
    const COLUMNS: &'static [&'static str] =
        &["bank_name", "bic_code", "account_number", "currency", "remarks"];

    fn push_values(self, values: &mut Separated<'_, 'static, Sqlite, &'static str>) {
        values
            .push_bind(self.bank_name)
            .push_bind(self.bic_code)
            .push_bind(self.account_number)
            .push_bind(self.currency)
            .push_bind(self.remarks);
    }
}

impl BranchEntity for BicSetup {
    type Form = BicSetupForm;
    type Fields = BicSetupFields;

    const TABLE: &'static str = "bic_setups";
    const LABEL: &'static str = "BICSetup";
    const LIST_PATH: &'static str = "/bic-setup";

    fn id(&self) -> Uuid {
        self.id
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn to_form(&self) -> BicSetupForm {
        BicSetupForm {
            bank_name: self.bank_name.clone(),
            bic_code: self.bic_code.clone(),
            account_number: self.account_number.clone(),
            currency: self.currency.clone(),
            remarks: self.remarks.clone().unwrap_or_default(),
        }
    }
}

// ---
// 3. MCRegister (caixa)
// ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct McRegister {
    pub id: Uuid,
    pub branch: String,
    pub check_number: String,
    pub payee: String,
    pub purchaser: String,
    pub amount: Amount,
    pub date_issued: NaiveDate,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct McRegisterFields {
    pub check_number: String,
    pub payee: String,
    pub purchaser: String,
    pub amount: Amount,
    pub date_issued: NaiveDate,
    pub remarks: Option<String>,
}

impl ColumnValues for McRegisterFields {
    const COLUMNS: &'static [&'static str] =
        &["check_number", "payee", "purchaser", "amount", "date_issued", "remarks"];

    fn push_values(self, values: &mut Separated<'_, 'static, Sqlite, &'static str>) {
        values
            .push_bind(self.check_number)
            .push_bind(self.payee)
            .push_bind(self.purchaser)
            .push_bind(self.amount)
            .push_bind(self.date_issued)
            .push_bind(self.remarks);
    }
}

impl BranchEntity for McRegister {
    type Form = McRegisterForm;
    type Fields = McRegisterFields;

    const TABLE: &'static str = "mc_registers";
    const LABEL: &'static str = "MCRegister";
    const LIST_PATH: &'static str = "/mc-register";

    fn id(&self) -> Uuid {
        self.id
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn to_form(&self) -> McRegisterForm {
        McRegisterForm {
            check_number: self.check_number.clone(),
            payee: self.payee.clone(),
            purchaser: self.purchaser.clone(),
            amount: self.amount.to_string(),
            date_issued: self.date_issued.format(DATE_FORMAT).to_string(),
            remarks: self.remarks.clone().unwrap_or_default(),
        }
    }
}

// ---
// 4. PesoNet (caixa)
// ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PesoNet {
    pub id: Uuid,
    pub branch: String,
    pub reference_number: String,
    pub sender_name: String,
    pub sender_account: String,
    pub beneficiary_name: String,
    pub beneficiary_account: String,
    pub beneficiary_bank: String,
    pub amount: Amount,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PesoNetFields {
    pub reference_number: String,
    pub sender_name: String,
    pub sender_account: String,
    pub beneficiary_name: String,
    pub beneficiary_account: String,
    pub beneficiary_bank: String,
    pub amount: Amount,
    pub transaction_date: NaiveDate,
}

impl ColumnValues for PesoNetFields {
    const COLUMNS: &'static [&'static str] = &[
        "reference_number",
        "sender_name",
        "sender_account",
        "beneficiary_name",
        "beneficiary_account",
        "beneficiary_bank",
        "amount",
        "transaction_date",
    ];

    fn push_values(self, values: &mut Separated<'_, 'static, Sqlite, &'static str>) {
        values
            .push_bind(self.reference_number)
            .push_bind(self.sender_name)
            .push_bind(self.sender_account)
            .push_bind(self.beneficiary_name)
            .push_bind(self.beneficiary_account)
            .push_bind(self.beneficiary_bank)
            .push_bind(self.amount)
            .push_bind(self.transaction_date);
    }
}

impl BranchEntity for PesoNet {
    type Form = PesoNetForm;
    type Fields = PesoNetFields;

    const TABLE: &'static str = "peso_nets";
    const LABEL: &'static str = "PesoNet";
    const LIST_PATH: &'static str = "/peso-net";

    fn id(&self) -> Uuid {
        self.id
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn to_form(&self) -> PesoNetForm {
        PesoNetForm {
            reference_number: self.reference_number.clone(),
            sender_name: self.sender_name.clone(),
            sender_account: self.sender_account.clone(),
            beneficiary_name: self.beneficiary_name.clone(),
            beneficiary_account: self.beneficiary_account.clone(),
            beneficiary_bank: self.beneficiary_bank.clone(),
            amount: self.amount.to_string(),
            transaction_date: self.transaction_date.format(DATE_FORMAT).to_string(),
        }
    }
}
