// src/db/operations_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::operations::{Activity, OrderDetail, ProductApplication, Service, ServiceOrder},
};

// Os quatro marcos temporais de uma ordem, na ordem em que devem acontecer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderTimeline {
    pub reservation: Option<DateTime<Utc>>,
    pub checkin: Option<DateTime<Utc>>,
    pub estimated_checkout: Option<DateTime<Utc>>,
    pub checkout: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct OperationsRepository {
    pool: PgPool,
}

impl OperationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATÁLOGO (SERVIÇOS & ATIVIDADES)
    // =========================================================================

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn insert_service<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        coordinator_national_id: &str,
    ) -> Result<Service, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, description, coordinator_national_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(coordinator_national_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("coordinatorNationalId".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn list_activities(&self, service_id: i32) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities WHERE service_id = $1 ORDER BY activity_number ASC",
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }

    pub async fn find_activity<'e, E>(
        &self,
        executor: E,
        service_id: i32,
        activity_number: i32,
    ) -> Result<Option<Activity>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities WHERE service_id = $1 AND activity_number = $2",
        )
        .bind(service_id)
        .bind(activity_number)
        .fetch_optional(executor)
        .await?;
        Ok(activity)
    }

    pub async fn insert_activity<'e, E>(
        &self,
        executor: E,
        service_id: i32,
        activity_number: i32,
        description: &str,
        price_per_hour: Decimal,
    ) -> Result<Activity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (service_id, activity_number, description, price_per_hour)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(service_id)
        .bind(activity_number)
        .bind(description)
        .bind(price_per_hour)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe atividade {activity_number} para o serviço {service_id}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("serviceId".to_string());
                }
            }
            e.into()
        })
    }

    // =========================================================================
    //  ORDENS DE SERVIÇO
    // =========================================================================

    pub async fn find_order<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Option<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<ServiceOrder>, AppError> {
        let orders = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM orders ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        vehicle_plate: &str,
        analyst_national_id: &str,
        dealership_rif: &str,
        timeline: &OrderTimeline,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO orders (
                vehicle_plate, analyst_national_id, dealership_rif,
                reservation_timestamp, checkin_timestamp,
                estimated_checkout_timestamp, checkout_timestamp
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(vehicle_plate)
        .bind(analyst_national_id)
        .bind(dealership_rif)
        .bind(timeline.reservation)
        .bind(timeline.checkin)
        .bind(timeline.estimated_checkout)
        .bind(timeline.checkout)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("vehiclePlate".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update_order_timeline<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        timeline: &OrderTimeline,
    ) -> Result<Option<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            UPDATE orders
            SET
                reservation_timestamp = $1,
                checkin_timestamp = $2,
                estimated_checkout_timestamp = $3,
                checkout_timestamp = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(timeline.reservation)
        .bind(timeline.checkin)
        .bind(timeline.estimated_checkout)
        .bind(timeline.checkout)
        .bind(order_id)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    pub async fn delete_order<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Option<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ServiceOrder>("DELETE FROM orders WHERE id = $1 RETURNING *")
            .bind(order_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        // Aplicações de produto são um ledger permanente e a
                        // fatura emitida também bloqueia a exclusão.
                        return AppError::ForeignKeyViolation(
                            "a ordem possui aplicações de produto ou fatura".to_string(),
                        );
                    }
                }
                e.into()
            })
    }

    // =========================================================================
    //  LINHAS DE ATIVIDADE
    // =========================================================================

    pub async fn list_order_details<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<OrderDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let details = sqlx::query_as::<_, OrderDetail>(
            r#"
            SELECT * FROM order_details
            WHERE order_id = $1
            ORDER BY service_id ASC, activity_number ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(details)
    }

    pub async fn find_order_detail<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        service_id: i32,
        activity_number: i32,
    ) -> Result<Option<OrderDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let detail = sqlx::query_as::<_, OrderDetail>(
            r#"
            SELECT * FROM order_details
            WHERE order_id = $1 AND service_id = $2 AND activity_number = $3
            "#,
        )
        .bind(order_id)
        .bind(service_id)
        .bind(activity_number)
        .fetch_optional(executor)
        .await?;
        Ok(detail)
    }

    pub async fn insert_order_detail<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        service_id: i32,
        activity_number: i32,
        price_per_hour: Decimal,
        worked_hours: Decimal,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, OrderDetail>(
            r#"
            INSERT INTO order_details (
                order_id, service_id, activity_number, price_per_hour, worked_hours
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(service_id)
        .bind(activity_number)
        .bind(price_per_hour)
        .bind(worked_hours)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "a ordem {order_id} já possui a atividade {service_id}/{activity_number}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("serviceId/activityNumber".to_string());
                }
            }
            e.into()
        })
    }

    // =========================================================================
    //  APLICAÇÕES DE PRODUTO (LEDGER DE CONSUMO)
    // =========================================================================

    pub async fn list_product_applications<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<ProductApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let applications = sqlx::query_as::<_, ProductApplication>(
            r#"
            SELECT * FROM product_applications
            WHERE order_id = $1
            ORDER BY service_id ASC, activity_number ASC, product_id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(applications)
    }

    pub async fn insert_product_application<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        service_id: i32,
        activity_number: i32,
        product_id: i32,
        employee_national_id: &str,
        application_count: i32,
        product_cost: Decimal,
    ) -> Result<ProductApplication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ProductApplication>(
            r#"
            INSERT INTO product_applications (
                order_id, service_id, activity_number, product_id,
                employee_national_id, application_count, product_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(service_id)
        .bind(activity_number)
        .bind(product_id)
        .bind(employee_national_id)
        .bind(application_count)
        .bind(product_cost)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "o produto {product_id} já foi aplicado na atividade \
                         {service_id}/{activity_number} da ordem {order_id}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation(
                        "productId ou employeeNationalId".to_string(),
                    );
                }
            }
            e.into()
        })
    }
}
