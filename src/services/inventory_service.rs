// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{InventoryRepository, OperationsRepository},
    models::{
        inventory::{Product, StockItem},
        operations::ProductApplication,
    },
    services::staff_service::StaffService,
};

// Checagem aritmética da baixa: o pedido cabe no saldo lido sob lock?
fn ensure_available(requested: i32, available: i32, dealership_rif: &str) -> Result<(), AppError> {
    if requested > available {
        return Err(AppError::InsufficientStock {
            requested,
            available,
            dealership_rif: dealership_rif.to_string(),
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    operations_repo: OperationsRepository,
    staff_service: StaffService,
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        operations_repo: OperationsRepository,
        staff_service: StaffService,
    ) -> Self {
        Self {
            inventory_repo,
            operations_repo,
            staff_service,
        }
    }

    // ---
    // Catálogo de produtos e saldos
    // ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.inventory_repo.list_products().await
    }

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        is_ecological: bool,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.inventory_repo
            .insert_product(executor, name, description, is_ecological)
            .await
    }

    pub async fn list_stock(&self, dealership_rif: &str) -> Result<Vec<StockItem>, AppError> {
        self.inventory_repo.list_stock(dealership_rif).await
    }

    pub async fn get_stock_item(
        &self,
        pool: &sqlx::PgPool,
        product_id: i32,
        dealership_rif: &str,
    ) -> Result<StockItem, AppError> {
        self.inventory_repo
            .find_stock_item(pool, product_id, dealership_rif)
            .await?
            .ok_or_else(|| AppError::StockNotFound {
                product_id,
                dealership_rif: dealership_rif.to_string(),
            })
    }

    pub async fn create_stock_item<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
        product_cost: Decimal,
        product_count: i32,
        vendor_name: &str,
        max_capacity: i32,
        min_capacity: i32,
    ) -> Result<StockItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.inventory_repo
            .insert_stock_item(
                executor,
                product_id,
                dealership_rif,
                product_cost,
                product_count,
                vendor_name,
                max_capacity,
                min_capacity,
            )
            .await
    }

    pub async fn delete_stock_item<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
    ) -> Result<StockItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.inventory_repo
            .delete_stock_item(executor, product_id, dealership_rif)
            .await?
            .ok_or_else(|| AppError::StockNotFound {
                product_id,
                dealership_rif: dealership_rif.to_string(),
            })
    }

    pub async fn list_applications(
        &self,
        pool: &sqlx::PgPool,
        order_id: i32,
    ) -> Result<Vec<ProductApplication>, AppError> {
        self.operations_repo
            .list_product_applications(pool, order_id)
            .await
    }

    // ---
    // Ledger de estoque
    // ---

    /// Aplica um produto a uma atividade de uma ordem, baixando o estoque da
    /// concessionária da ordem na mesma transação que grava a aplicação.
    ///
    /// O par (produto, concessionária) é lido com FOR UPDATE: duas aplicações
    /// concorrentes sobre a mesma linha são serializadas e a segunda revalida
    /// o saldo já decrementado pela primeira. A checagem compara apenas com o
    /// saldo disponível; cair abaixo de `min_capacity` é permitido, o limiar
    /// dispara reposição fora deste fluxo.
    pub async fn apply_product<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        service_id: i32,
        activity_number: i32,
        product_id: i32,
        employee_national_id: &str,
        count: i32,
    ) -> Result<ProductApplication, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. A ordem existe e define a concessionária do consumo.
        let order = self
            .operations_repo
            .find_order(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;

        // 2. Quem executa a aplicação é um operativo.
        self.staff_service
            .validate_role(&mut tx, employee_national_id, false)
            .await?;

        // 3. A linha de atividade referenciada existe na ordem.
        self.operations_repo
            .find_order_detail(&mut *tx, order_id, service_id, activity_number)
            .await?
            .ok_or(AppError::ResourceNotFound("linha de atividade da ordem"))?;

        // 4. Lock de linha + revalidação do saldo.
        let stock = self
            .inventory_repo
            .find_stock_item_for_update(&mut *tx, product_id, &order.dealership_rif)
            .await?
            .ok_or_else(|| AppError::StockNotFound {
                product_id,
                dealership_rif: order.dealership_rif.clone(),
            })?;

        ensure_available(count, stock.product_count, &order.dealership_rif)?;

        // 5. Baixa e registro no ledger, juntos ou nenhum.
        self.inventory_repo
            .decrement_stock(&mut *tx, product_id, &order.dealership_rif, count)
            .await?;

        let application = self
            .operations_repo
            .insert_product_application(
                &mut *tx,
                order_id,
                service_id,
                activity_number,
                product_id,
                employee_national_id,
                count,
                stock.product_cost,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Aplicadas {} unidades do produto {} na ordem {} (estoque {})",
            count,
            product_id,
            order_id,
            order.dealership_rif
        );
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_within_balance_passes() {
        assert!(ensure_available(3, 10, "J-12345678-9").is_ok());
        assert!(ensure_available(10, 10, "J-12345678-9").is_ok());
    }

    #[test]
    fn request_above_balance_reports_both_sides() {
        let err = ensure_available(11, 10, "J-12345678-9").unwrap_err();
        match err {
            AppError::InsufficientStock {
                requested,
                available,
                dealership_rif,
            } => {
                assert_eq!(requested, 11);
                assert_eq!(available, 10);
                assert_eq!(dealership_rif, "J-12345678-9");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }
}
