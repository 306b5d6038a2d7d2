// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::inventory::{Product, StockItem},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Produtos (catálogo)
    // ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn insert_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        is_ecological: bool,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, is_ecological)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(is_ecological)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    // ---
    // Estoque por concessionária
    // ---

    pub async fn list_stock(&self, dealership_rif: &str) -> Result<Vec<StockItem>, AppError> {
        let stock = sqlx::query_as::<_, StockItem>(
            "SELECT * FROM stock WHERE dealership_rif = $1 ORDER BY product_id ASC",
        )
        .bind(dealership_rif)
        .fetch_all(&self.pool)
        .await?;
        Ok(stock)
    }

    pub async fn find_stock_item<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
    ) -> Result<Option<StockItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, StockItem>(
            "SELECT * FROM stock WHERE product_id = $1 AND dealership_rif = $2",
        )
        .bind(product_id)
        .bind(dealership_rif)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Busca a linha de estoque com lock de linha (FOR UPDATE). Serializa as
    /// aplicações concorrentes sobre o mesmo par (produto, concessionária)
    /// sem travar os demais pares.
    pub async fn find_stock_item_for_update<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
    ) -> Result<Option<StockItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, StockItem>(
            "SELECT * FROM stock WHERE product_id = $1 AND dealership_rif = $2 FOR UPDATE",
        )
        .bind(product_id)
        .bind(dealership_rif)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Baixa de estoque. Deve rodar na mesma transação que adquiriu o lock e
    /// que registra a aplicação do produto.
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
        count: i32,
    ) -> Result<StockItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, StockItem>(
            r#"
            UPDATE stock
            SET product_count = product_count - $1
            WHERE product_id = $2 AND dealership_rif = $3
            RETURNING *
            "#,
        )
        .bind(count)
        .bind(product_id)
        .bind(dealership_rif)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn insert_stock_item<'e, E>(
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
        sqlx::query_as::<_, StockItem>(
            r#"
            INSERT INTO stock (
                product_id, dealership_rif, product_cost, product_count,
                vendor_name, max_capacity, min_capacity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(dealership_rif)
        .bind(product_cost)
        .bind(product_count)
        .bind(vendor_name)
        .bind(max_capacity)
        .bind(min_capacity)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe estoque do produto {product_id} na concessionária {dealership_rif}"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation(
                        "productId ou dealershipRif".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn delete_stock_item<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        dealership_rif: &str,
    ) -> Result<Option<StockItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = sqlx::query_as::<_, StockItem>(
            "DELETE FROM stock WHERE product_id = $1 AND dealership_rif = $2 RETURNING *",
        )
        .bind(product_id)
        .bind(dealership_rif)
        .fetch_optional(executor)
        .await?;
        Ok(deleted)
    }
}
