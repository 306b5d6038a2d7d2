// src/models/dealership.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// `manager_national_id` é obrigatório no cadastro e em atualizações diretas.
// A coluna é anulável apenas porque a exclusão do funcionário gerente anula a
// referência (ON DELETE SET NULL).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dealership {
    #[schema(example = "J-12345678-9")]
    pub rif: String,
    #[schema(example = "Oficina Central")]
    pub name: String,
    #[schema(example = "Caracas")]
    pub city: String,
    #[schema(example = "V-12345678")]
    pub manager_national_id: Option<String>,
}
