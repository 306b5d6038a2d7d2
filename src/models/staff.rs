// src/models/staff.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Gerente")]
    pub name: String,
    pub description: String,
}

// Um funcionário da rede. `employer_dealership_rif` é obrigatório no
// cadastro, mas a coluna é anulável: a exclusão da concessionária gerenciada
// anula o vínculo (ver DealershipService).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[schema(example = "V-12345678")]
    pub national_id: String,
    #[schema(example = "Maria Pérez")]
    pub full_name: String,
    #[schema(example = "0414-1234567")]
    pub main_phone_no: String,
    #[schema(example = "0212-5550001")]
    pub secondary_phone_no: String,
    #[schema(example = "maria@oficina.com")]
    pub email: String,
    pub address: String,
    #[schema(example = 2)]
    pub role_id: i32,
    #[schema(example = "850.00")]
    pub salary: Decimal,
    #[schema(example = "J-12345678-9")]
    pub employer_dealership_rif: Option<String>,
    // Alocação temporária em outra filial; quando presente, o resolvedor de
    // concessionária prefere esta referência.
    pub helped_dealership_rif: Option<String>,
}
