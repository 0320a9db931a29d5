// src/services/record_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RecordRepository,
    models::{auth::BranchId, records::BranchEntity},
};

#[derive(Clone)]
pub struct RecordService {
    record_repo: RecordRepository,
}

impl RecordService {
    pub fn new(record_repo: RecordRepository) -> Self {
        Self { record_repo }
    }

    pub async fn list_for_branch<T: BranchEntity>(
        &self,
        branch: &BranchId,
    ) -> Result<Vec<T>, AppError> {
        self.record_repo.list_by_branch::<T>(branch).await
    }

    // Busca por chave primária, sem checar a agência.
    pub async fn get<T: BranchEntity>(&self, id: Uuid) -> Result<T, AppError> {
        self.record_repo
            .find_by_id::<T>(id)
            .await?
            .ok_or(AppError::NotFound { entity: T::LABEL, id })
    }

    pub async fn create<T: BranchEntity>(
        &self,
        branch: &BranchId,
        fields: T::Fields,
    ) -> Result<T, AppError> {
        let record = self.record_repo.create::<T>(branch, fields).await?;
        tracing::debug!("{} {} criado na agência {}", T::LABEL, record.id(), record.branch());
        Ok(record)
    }

    pub async fn update<T: BranchEntity>(&self, id: Uuid, fields: T::Fields) -> Result<T, AppError> {
        self.record_repo
            .update::<T>(id, fields)
            .await?
            .ok_or(AppError::NotFound { entity: T::LABEL, id })
    }

    pub async fn delete<T: BranchEntity>(&self, id: Uuid) -> Result<(), AppError> {
        if !self.record_repo.delete::<T>(id).await? {
            return Err(AppError::NotFound { entity: T::LABEL, id });
        }
        Ok(())
    }
}
