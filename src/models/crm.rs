// src/models/crm.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "V-87654321")]
    pub national_id: String,
    pub full_name: String,
    pub main_phone_no: String,
    pub secondary_phone_no: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[schema(example = "AB123CD")]
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub serial_no: String,
    pub engine_serial_no: String,
    pub color: String,
    #[schema(value_type = String, format = Date, example = "2020-03-15")]
    pub purchase_date: NaiveDate,
    pub additional_info: Option<String>,
    #[schema(example = "V-87654321")]
    pub owner_national_id: String,
}
