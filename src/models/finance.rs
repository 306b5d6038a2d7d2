// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Faixa de desconto de uma concessionária. `discount_percentage` é uma
// fração em [0, 1]; a faixa se aplica a clientes com pelo menos
// `required_annual_service_usage_count` serviços pagos no último ano.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub discount_number: i32,
    #[schema(example = "J-12345678-9")]
    pub dealership_rif: String,
    #[schema(example = "0.10")]
    pub discount_percentage: Decimal,
    #[schema(example = 5)]
    pub required_annual_service_usage_count: i16,
}

// `discount` e `amount_due` são sempre calculados pelo FinanceService;
// valores enviados pelo caller são ignorados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i32,
    pub order_id: i32,
    #[schema(example = "135.00")]
    pub amount_due: Decimal,
    #[schema(example = "0.10")]
    pub discount: Decimal,
    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub issue_date: NaiveDate,
}
