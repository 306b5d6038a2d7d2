// src/db/crm_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::crm::{Client, Vehicle},
};

#[derive(Debug, Clone)]
pub struct VehicleData {
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub serial_no: String,
    pub engine_serial_no: String,
    pub color: String,
    pub purchase_date: NaiveDate,
    pub additional_info: Option<String>,
    pub owner_national_id: String,
}

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY full_name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    pub async fn find_client(&self, national_id: &str) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE national_id = $1")
            .bind(national_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    pub async fn insert_client<'e, E>(
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
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (national_id, full_name, main_phone_no, secondary_phone_no, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(national_id)
        .bind(full_name)
        .bind(main_phone_no)
        .bind(secondary_phone_no)
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe cliente com a cédula {national_id}"
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    pub async fn find_vehicle<'e, E>(
        &self,
        executor: E,
        plate: &str,
    ) -> Result<Option<Vehicle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate = $1")
            .bind(plate)
            .fetch_optional(executor)
            .await?;
        Ok(vehicle)
    }

    pub async fn insert_vehicle<'e, E>(
        &self,
        executor: E,
        data: &VehicleData,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                plate, brand, model, serial_no, engine_serial_no,
                color, purchase_date, additional_info, owner_national_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.plate)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_no)
        .bind(&data.engine_serial_no)
        .bind(&data.color)
        .bind(data.purchase_date)
        .bind(&data.additional_info)
        .bind(&data.owner_national_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe veículo com a placa {}",
                        data.plate
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("ownerNationalId".to_string());
                }
            }
            e.into()
        })
    }
}
