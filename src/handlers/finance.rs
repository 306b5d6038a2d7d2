// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;
use validator::ValidationError;

use crate::{
    common::{error::AppError, validators::validate_rif},
    config::AppState,
    models::finance::{DiscountTier, Invoice},
};

// A fração de desconto de uma faixa vive em [0, 1].
fn validate_fraction(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        let mut err = ValidationError::new("range");
        err.message = Some("O desconto precisa estar entre 0 e 1.".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
//  1. FAIXAS DE DESCONTO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscountTierPayload {
    #[schema(example = 1)]
    pub discount_number: i32,

    #[validate(custom(function = validate_rif))]
    #[schema(example = "J-12345678-9")]
    pub dealership_rif: String,

    #[validate(custom(function = validate_fraction))]
    #[schema(example = "0.10")]
    pub discount_percentage: Decimal,

    #[validate(range(min = 0, message = "O requisito não pode ser negativo."))]
    #[schema(example = 5)]
    pub required_annual_service_usage_count: i16,
}

// POST /api/finance/discounts
#[utoipa::path(
    post,
    path = "/api/finance/discounts",
    tag = "Finance",
    request_body = CreateDiscountTierPayload,
    responses(
        (status = 201, description = "Faixa de desconto criada", body = DiscountTier),
        (status = 409, description = "Faixa já existe na concessionária")
    )
)]
pub async fn create_discount_tier(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDiscountTierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tier = app_state
        .finance_service
        .create_discount_tier(
            &app_state.db_pool,
            payload.discount_number,
            &payload.dealership_rif,
            payload.discount_percentage,
            payload.required_annual_service_usage_count,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tier)))
}

// GET /api/finance/discounts/{dealership_rif}
#[utoipa::path(
    get,
    path = "/api/finance/discounts/{dealership_rif}",
    tag = "Finance",
    params(("dealership_rif" = String, Path, description = "RIF da concessionária")),
    responses((status = 200, description = "Faixas da concessionária", body = [DiscountTier]))
)]
pub async fn list_discount_tiers(
    State(app_state): State<AppState>,
    Path(dealership_rif): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tiers = app_state
        .finance_service
        .list_discount_tiers(&dealership_rif)
        .await?;
    Ok(Json(tiers))
}

// DELETE /api/finance/discounts/{dealership_rif}/{discount_number}
#[utoipa::path(
    delete,
    path = "/api/finance/discounts/{dealership_rif}/{discount_number}",
    tag = "Finance",
    params(
        ("dealership_rif" = String, Path, description = "RIF da concessionária"),
        ("discount_number" = i32, Path, description = "Número da faixa")
    ),
    responses(
        (status = 200, description = "Faixa excluída", body = DiscountTier),
        (status = 404, description = "Faixa não encontrada")
    )
)]
pub async fn delete_discount_tier(
    State(app_state): State<AppState>,
    Path((dealership_rif, discount_number)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let tier = app_state
        .finance_service
        .delete_discount_tier(&app_state.db_pool, discount_number, &dealership_rif)
        .await?;
    Ok(Json(tier))
}

// =============================================================================
//  2. FATURAS
// =============================================================================

// Só a ordem e a data de emissão entram no cálculo. Desconto e total vindos
// do caller são aceitos e sobrescritos pela regra de faturamento.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoicePayload {
    #[schema(example = 1)]
    pub order_id: i32,

    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub issue_date: NaiveDate,

    #[serde(default)]
    #[schema(ignore)]
    pub discount: Option<Decimal>,

    #[serde(default)]
    #[schema(ignore)]
    pub amount_due: Option<Decimal>,
}

// POST /api/finance/invoices
#[utoipa::path(
    post,
    path = "/api/finance/invoices",
    tag = "Finance",
    request_body = GenerateInvoicePayload,
    responses(
        (status = 201, description = "Fatura emitida com desconto e total calculados", body = Invoice),
        (status = 404, description = "Ordem não encontrada"),
        (status = 409, description = "Ordem já faturada")
    )
)]
pub async fn generate_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .finance_service
        .generate_invoice(&app_state.db_pool, payload.order_id, payload.issue_date)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/finance/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/finance/invoices/{id}",
    tag = "Finance",
    params(("id" = i32, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura encontrada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.finance_service.get_invoice(id).await?;
    Ok(Json(invoice))
}

// GET /api/finance/invoices/by-order/{order_id}
#[utoipa::path(
    get,
    path = "/api/finance/invoices/by-order/{order_id}",
    tag = "Finance",
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Fatura da ordem", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice_by_order(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .finance_service
        .get_invoice_by_order(order_id)
        .await?;
    Ok(Json(invoice))
}
