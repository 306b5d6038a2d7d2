// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::finance::{DiscountTier, Invoice},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FAIXAS DE DESCONTO
    // =========================================================================

    pub async fn list_discount_tiers(
        &self,
        dealership_rif: &str,
    ) -> Result<Vec<DiscountTier>, AppError> {
        let tiers = sqlx::query_as::<_, DiscountTier>(
            "SELECT * FROM discounts WHERE dealership_rif = $1 ORDER BY discount_number ASC",
        )
        .bind(dealership_rif)
        .fetch_all(&self.pool)
        .await?;
        Ok(tiers)
    }

    /// Mesma consulta acima, mas dentro da transação de faturamento.
    pub async fn discount_tiers_for_dealership<'e, E>(
        &self,
        executor: E,
        dealership_rif: &str,
    ) -> Result<Vec<DiscountTier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tiers = sqlx::query_as::<_, DiscountTier>(
            "SELECT * FROM discounts WHERE dealership_rif = $1 ORDER BY discount_number ASC",
        )
        .bind(dealership_rif)
        .fetch_all(executor)
        .await?;
        Ok(tiers)
    }

    pub async fn insert_discount_tier<'e, E>(
        &self,
        executor: E,
        discount_number: i32,
        dealership_rif: &str,
        discount_percentage: Decimal,
        required_annual_service_usage_count: i16,
    ) -> Result<DiscountTier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, DiscountTier>(
            r#"
            INSERT INTO discounts (
                discount_number, dealership_rif,
                discount_percentage, required_annual_service_usage_count
            )
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(discount_number)
        .bind(dealership_rif)
        .bind(discount_percentage)
        .bind(required_annual_service_usage_count)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe a faixa de desconto {discount_number} na concessionária {dealership_rif}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation("dealershipRif".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn delete_discount_tier<'e, E>(
        &self,
        executor: E,
        discount_number: i32,
        dealership_rif: &str,
    ) -> Result<Option<DiscountTier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = sqlx::query_as::<_, DiscountTier>(
            r#"
            DELETE FROM discounts
            WHERE discount_number = $1 AND dealership_rif = $2
            RETURNING *
            "#,
        )
        .bind(discount_number)
        .bind(dealership_rif)
        .fetch_optional(executor)
        .await?;
        Ok(deleted)
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    /// Uso anual de serviços do cliente na concessionária: pares distintos
    /// (ordem, serviço, atividade) já faturados cujo check-in da ordem caiu
    /// na janela móvel de um ano.
    pub async fn annual_service_usage<'e, E>(
        &self,
        executor: E,
        client_national_id: &str,
        dealership_rif: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usage = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM (
                SELECT DISTINCT d.order_id, d.service_id, d.activity_number
                FROM invoices i
                JOIN orders o ON o.id = i.order_id
                JOIN order_details d ON d.order_id = o.id
                JOIN vehicles v ON v.plate = o.vehicle_plate
                WHERE v.owner_national_id = $1
                  AND o.dealership_rif = $2
                  AND o.checkin_timestamp >= NOW() - INTERVAL '1 year'
            ) AS annual_usage
            "#,
        )
        .bind(client_national_id)
        .bind(dealership_rif)
        .fetch_one(executor)
        .await?;
        Ok(usage)
    }

    pub async fn find_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(invoice)
    }

    pub async fn find_invoice_by_order(&self, order_id: i32) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(invoice)
    }

    pub async fn insert_invoice<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        amount_due: Decimal,
        discount: Decimal,
        issue_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (order_id, amount_due, discount, issue_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(amount_due)
        .bind(discount)
        .bind(issue_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::InvoiceAlreadyExists(order_id);
                }
            }
            e.into()
        })
    }
}
