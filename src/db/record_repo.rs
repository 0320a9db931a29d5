// src/db/record_repo.rs

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::BranchId,
        records::{BranchEntity, ColumnValues},
    },
};

// Um único repositório para as quatro tabelas por agência.
// A tabela e as colunas vêm do `BranchEntity`; os valores sempre via bind.
#[derive(Clone)]
pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_branch<T: BranchEntity>(
        &self,
        branch: &BranchId,
    ) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE branch = ? ORDER BY created_at, id",
            T::TABLE
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(branch.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id<T: BranchEntity>(&self, id: Uuid) -> Result<Option<T>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insere com `branch` fixo: o valor vem da sessão, nunca do formulário.
    pub async fn create<T: BranchEntity>(
        &self,
        branch: &BranchId,
        fields: T::Fields,
    ) -> Result<T, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "INSERT INTO {} (id, branch, created_at, updated_at, {}) VALUES (",
            T::TABLE,
            T::Fields::COLUMNS.join(", ")
        ));
        let mut values = query.separated(", ");
        values
            .push_bind(id)
            .push_bind(branch.as_str().to_string())
            .push_bind(now)
            .push_bind(now);
        fields.push_values(&mut values);
        query.push(")");

        query.build().execute(&self.pool).await?;

        self.fetch::<T>(id).await
    }

    /// Sobrescreve as colunas de negócio. `branch`, `id` e `created_at` ficam.
    /// Retorna `None` se a linha não existir.
    pub async fn update<T: BranchEntity>(
        &self,
        id: Uuid,
        fields: T::Fields,
    ) -> Result<Option<T>, AppError> {
        // UPDATE t SET (updated_at, c1, c2, ...) = (?, ?, ?, ...) WHERE id = ?
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "UPDATE {} SET (updated_at, {}) = (",
            T::TABLE,
            T::Fields::COLUMNS.join(", ")
        ));
        let mut values = query.separated(", ");
        values.push_bind(Utc::now());
        fields.push_values(&mut values);
        query.push(") WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.fetch::<T>(id).await.map(Some)
    }

    pub async fn delete<T: BranchEntity>(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch<T: BranchEntity>(&self, id: Uuid) -> Result<T, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::records::{BicSetup, McRegister, McRegisterFields, Record, RecordFields},
        test_utils::test_utils::setup_test_db,
    };
    use chrono::NaiveDate;

    fn record_fields(first_name: &str) -> RecordFields {
        RecordFields {
            first_name: first_name.into(),
            last_name: "Reyes".into(),
            email: "client@example.com".into(),
            phone: "+63 912 345 6789".into(),
            address: "12 Rizal Ave".into(),
            city: "Baguio".into(),
            province: "Benguet".into(),
            country: "Philippines".into(),
        }
    }

    #[tokio::test]
    async fn list_only_returns_rows_of_the_branch() {
        let repo = RecordRepository::new(setup_test_db().await);
        let north = BranchId::new("North");
        let south = BranchId::new("South");

        repo.create::<Record>(&north, record_fields("Ana")).await.unwrap();
        repo.create::<Record>(&north, record_fields("Ben")).await.unwrap();
        repo.create::<Record>(&south, record_fields("Carla")).await.unwrap();

        let rows = repo.list_by_branch::<Record>(&north).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.branch == "North"));

        // Tabelas independentes: nada vaza para BICSetup
        let bic = repo.list_by_branch::<BicSetup>(&north).await.unwrap();
        assert!(bic.is_empty());
    }

    #[tokio::test]
    async fn update_keeps_branch_and_creation_time() {
        let repo = RecordRepository::new(setup_test_db().await);
        let branch = BranchId::new("Main");
        let created = repo.create::<Record>(&branch, record_fields("Ana")).await.unwrap();

        let updated = repo
            .update::<Record>(created.id, record_fields("Anabel"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.first_name, "Anabel");
        assert_eq!(updated.branch, "Main");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_row() {
        let repo = RecordRepository::new(setup_test_db().await);
        let missing = Uuid::new_v4();

        assert!(repo.update::<Record>(missing, record_fields("X")).await.unwrap().is_none());
        assert!(!repo.delete::<Record>(missing).await.unwrap());
    }

    #[tokio::test]
    async fn amounts_and_dates_survive_storage() {
        let repo = RecordRepository::new(setup_test_db().await);
        let fields = McRegisterFields {
            check_number: "0001234".into(),
            payee: "Juan dela Cruz".into(),
            purchaser: "Maria Santos".into(),
            amount: "1500.75".parse().unwrap(),
            date_issued: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            remarks: None,
        };

        let created = repo
            .create::<McRegister>(&BranchId::new("Main"), fields.clone())
            .await
            .unwrap();
        let loaded = repo.find_by_id::<McRegister>(created.id).await.unwrap().unwrap();

        assert_eq!(loaded.amount, fields.amount);
        assert_eq!(loaded.amount.to_string(), "1500.75");
        assert_eq!(loaded.date_issued, fields.date_issued);
        assert_eq!(loaded.remarks, None);
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = RecordRepository::new(setup_test_db().await);
        let branch = BranchId::new("Main");
        let record = repo.create::<Record>(&branch, record_fields("Ana")).await.unwrap();

        assert!(repo.delete::<Record>(record.id).await.unwrap());
        assert!(repo.find_by_id::<Record>(record.id).await.unwrap().is_none());
        assert!(repo.list_by_branch::<Record>(&branch).await.unwrap().is_empty());
    }
}
