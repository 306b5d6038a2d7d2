// src/models/operations.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Catálogo ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    #[schema(example = "Manutenção preventiva")]
    pub name: String,
    pub description: String,
    #[schema(example = "V-12345678")]
    pub coordinator_national_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub service_id: i32,
    pub activity_number: i32,
    #[schema(example = "Troca de óleo")]
    pub description: String,
    #[schema(example = "25.00")]
    pub price_per_hour: Decimal,
}

// --- Ordens de serviço ---

// A concessionária da ordem é derivada da alocação do analista, nunca
// informada pelo caller. Os quatro marcos temporais são opcionais e a ordem
// parcial entre os presentes é validada pelo OperationService.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: i32,
    #[schema(example = "AB123CD")]
    pub vehicle_plate: String,
    #[schema(example = "V-12345678")]
    pub analyst_national_id: String,
    #[schema(example = "J-12345678-9")]
    pub dealership_rif: String,
    pub reservation_timestamp: Option<DateTime<Utc>>,
    pub checkin_timestamp: Option<DateTime<Utc>>,
    pub estimated_checkout_timestamp: Option<DateTime<Utc>>,
    pub checkout_timestamp: Option<DateTime<Utc>>,
}

// Linha de atividade de uma ordem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: i32,
    pub service_id: i32,
    pub activity_number: i32,
    #[schema(example = "25.00")]
    pub price_per_hour: Decimal,
    #[schema(example = "2.50")]
    pub worked_hours: Decimal,
}

// Registro permanente de consumo de peça; nunca é estornado pela exclusão da
// ordem. `product_cost` é o custo unitário vigente no estoque no momento da
// aplicação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductApplication {
    pub order_id: i32,
    pub service_id: i32,
    pub activity_number: i32,
    pub product_id: i32,
    #[schema(example = "V-11222333")]
    pub employee_national_id: String,
    #[schema(example = 2)]
    pub application_count: i32,
    #[schema(example = "12.75")]
    pub product_cost: Decimal,
}
