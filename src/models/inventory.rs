// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    #[schema(example = "Filtro de óleo")]
    pub name: String,
    pub description: String,
    #[schema(example = false)]
    pub is_ecological: bool,
}

// Saldo de estoque de um produto em uma concessionária.
// `min_capacity` é o limiar de reposição; ele NÃO bloqueia a baixa de
// estoque, apenas `product_count >= 0` é garantido na baixa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub product_id: i32,
    #[schema(example = "J-12345678-9")]
    pub dealership_rif: String,
    #[schema(example = "12.75")]
    pub product_cost: Decimal,
    #[schema(example = 40)]
    pub product_count: i32,
    pub vendor_name: String,
    #[schema(example = 100)]
    pub max_capacity: i32,
    #[schema(example = 5)]
    pub min_capacity: i32,
}
