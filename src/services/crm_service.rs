// src/services/crm_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{crm_repo::VehicleData, CrmRepository},
    models::crm::{Client, Vehicle},
};

#[derive(Clone)]
pub struct CrmService {
    crm_repo: CrmRepository,
}

impl CrmService {
    pub fn new(crm_repo: CrmRepository) -> Self {
        Self { crm_repo }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.crm_repo.list_clients().await
    }

    pub async fn get_client(&self, national_id: &str) -> Result<Client, AppError> {
        self.crm_repo
            .find_client(national_id)
            .await?
            .ok_or(AppError::ResourceNotFound("cliente"))
    }

    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        national_id: &str,
        full_name: &str,
        main_phone_no: &str,
        secondary_phone_no: &str,
        email: &str,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.crm_repo
            .insert_client(
                executor,
                national_id,
                full_name,
                main_phone_no,
                secondary_phone_no,
                email,
            )
            .await
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        self.crm_repo.list_vehicles().await
    }

    pub async fn get_vehicle(&self, pool: &sqlx::PgPool, plate: &str) -> Result<Vehicle, AppError> {
        self.crm_repo
            .find_vehicle(pool, plate)
            .await?
            .ok_or(AppError::ResourceNotFound("veículo"))
    }

    pub async fn create_vehicle<'e, E>(
        &self,
        executor: E,
        data: VehicleData,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.crm_repo.insert_vehicle(executor, &data).await
    }
}
