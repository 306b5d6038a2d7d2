// src/db/dealership_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::dealership::Dealership};

#[derive(Clone)]
pub struct DealershipRepository {
    pool: PgPool,
}

impl DealershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Dealership>, AppError> {
        let dealerships =
            sqlx::query_as::<_, Dealership>("SELECT * FROM dealerships ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(dealerships)
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        rif: &str,
    ) -> Result<Option<Dealership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dealership = sqlx::query_as::<_, Dealership>("SELECT * FROM dealerships WHERE rif = $1")
            .bind(rif)
            .fetch_optional(executor)
            .await?;
        Ok(dealership)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        rif: &str,
        name: &str,
        city: &str,
        manager_national_id: &str,
    ) -> Result<Dealership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Dealership>(
            r#"
            INSERT INTO dealerships (rif, name, city, manager_national_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(rif)
        .bind(name)
        .bind(city)
        .bind(manager_national_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe concessionária com o RIF {rif}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("managerNationalId".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        rif: &str,
        name: &str,
        city: &str,
        manager_national_id: &str,
    ) -> Result<Option<Dealership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Dealership>(
            r#"
            UPDATE dealerships
            SET name = $1, city = $2, manager_national_id = $3
            WHERE rif = $4
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(city)
        .bind(manager_national_id)
        .bind(rif)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("managerNationalId".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        rif: &str,
    ) -> Result<Option<Dealership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted =
            sqlx::query_as::<_, Dealership>("DELETE FROM dealerships WHERE rif = $1 RETURNING *")
                .bind(rif)
                .fetch_optional(executor)
                .await?;
        Ok(deleted)
    }
}
