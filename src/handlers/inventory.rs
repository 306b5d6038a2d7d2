// src/handlers/inventory.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validators::{validate_national_id, validate_not_negative, validate_rif},
    },
    config::AppState,
    models::{
        inventory::{Product, StockItem},
        operations::ProductApplication,
    },
};

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Filtro de óleo")]
    pub name: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[serde(default)]
    pub is_ecological: bool,
}

// POST /api/inventory/products
#[utoipa::path(
    post,
    path = "/api/inventory/products",
    tag = "Inventory",
    request_body = CreateProductPayload,
    responses((status = 201, description = "Produto criado", body = Product))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .create_product(
            &app_state.db_pool,
            &payload.name,
            &payload.description,
            payload.is_ecological,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/inventory/products
#[utoipa::path(
    get,
    path = "/api/inventory/products",
    tag = "Inventory",
    responses((status = 200, description = "Catálogo de produtos", body = [Product]))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.inventory_service.list_products().await?;
    Ok(Json(products))
}

// ---
// Payload: CreateStockItem
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemPayload {
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(custom(function = validate_rif))]
    #[schema(example = "J-12345678-9")]
    pub dealership_rif: String,

    #[validate(custom(function = validate_not_negative))]
    #[schema(example = "12.75")]
    pub product_cost: Decimal,

    #[validate(range(min = 0, message = "O saldo não pode ser negativo."))]
    #[schema(example = 40)]
    pub product_count: i32,

    #[validate(length(min = 1, message = "O fornecedor é obrigatório."))]
    pub vendor_name: String,

    #[validate(range(min = 0))]
    #[schema(example = 100)]
    pub max_capacity: i32,

    #[validate(range(min = 0))]
    #[schema(example = 5)]
    pub min_capacity: i32,
}

// POST /api/inventory/stock
#[utoipa::path(
    post,
    path = "/api/inventory/stock",
    tag = "Inventory",
    request_body = CreateStockItemPayload,
    responses(
        (status = 201, description = "Item de estoque criado", body = StockItem),
        (status = 409, description = "Par produto/concessionária já existe")
    )
)]
pub async fn create_stock_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStockItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .inventory_service
        .create_stock_item(
            &app_state.db_pool,
            payload.product_id,
            &payload.dealership_rif,
            payload.product_cost,
            payload.product_count,
            &payload.vendor_name,
            payload.max_capacity,
            payload.min_capacity,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/inventory/stock/{dealership_rif}
#[utoipa::path(
    get,
    path = "/api/inventory/stock/{dealership_rif}",
    tag = "Inventory",
    params(("dealership_rif" = String, Path, description = "RIF da concessionária")),
    responses((status = 200, description = "Estoque da concessionária", body = [StockItem]))
)]
pub async fn list_stock(
    State(app_state): State<AppState>,
    Path(dealership_rif): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state
        .inventory_service
        .list_stock(&dealership_rif)
        .await?;
    Ok(Json(stock))
}

// GET /api/inventory/stock/{dealership_rif}/{product_id}
#[utoipa::path(
    get,
    path = "/api/inventory/stock/{dealership_rif}/{product_id}",
    tag = "Inventory",
    params(
        ("dealership_rif" = String, Path, description = "RIF da concessionária"),
        ("product_id" = i32, Path, description = "ID do produto")
    ),
    responses(
        (status = 200, description = "Saldo encontrado", body = StockItem),
        (status = 404, description = "Sem registro de estoque")
    )
)]
pub async fn get_stock_item(
    State(app_state): State<AppState>,
    Path((dealership_rif, product_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .inventory_service
        .get_stock_item(&app_state.db_pool, product_id, &dealership_rif)
        .await?;
    Ok(Json(item))
}

// DELETE /api/inventory/stock/{dealership_rif}/{product_id}
#[utoipa::path(
    delete,
    path = "/api/inventory/stock/{dealership_rif}/{product_id}",
    tag = "Inventory",
    params(
        ("dealership_rif" = String, Path, description = "RIF da concessionária"),
        ("product_id" = i32, Path, description = "ID do produto")
    ),
    responses(
        (status = 200, description = "Item de estoque excluído", body = StockItem),
        (status = 404, description = "Sem registro de estoque")
    )
)]
pub async fn delete_stock_item(
    State(app_state): State<AppState>,
    Path((dealership_rif, product_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .inventory_service
        .delete_stock_item(&app_state.db_pool, product_id, &dealership_rif)
        .await?;
    Ok(Json(item))
}

// ---
// Payload: ApplyProduct (baixa de estoque via ledger)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyProductPayload {
    #[schema(example = 1)]
    pub order_id: i32,

    #[schema(example = 1)]
    pub service_id: i32,

    #[schema(example = 1)]
    pub activity_number: i32,

    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-11222333")]
    pub employee_national_id: String,

    #[validate(range(min = 1, message = "A quantidade precisa ser maior que zero."))]
    #[schema(example = 2)]
    pub application_count: i32,
}

// POST /api/inventory/applications
#[utoipa::path(
    post,
    path = "/api/inventory/applications",
    tag = "Inventory",
    request_body = ApplyProductPayload,
    responses(
        (status = 201, description = "Produto aplicado e estoque baixado", body = ProductApplication),
        (status = 409, description = "Estoque insuficiente"),
        (status = 422, description = "Executor com papel gerencial")
    )
)]
pub async fn apply_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ApplyProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let application = app_state
        .inventory_service
        .apply_product(
            &app_state.db_pool,
            payload.order_id,
            payload.service_id,
            payload.activity_number,
            payload.product_id,
            &payload.employee_national_id,
            payload.application_count,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

// GET /api/inventory/applications/{order_id}
#[utoipa::path(
    get,
    path = "/api/inventory/applications/{order_id}",
    tag = "Inventory",
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses((status = 200, description = "Consumo registrado da ordem", body = [ProductApplication]))
)]
pub async fn list_applications(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let applications = app_state
        .inventory_service
        .list_applications(&app_state.db_pool, order_id)
        .await?;
    Ok(Json(applications))
}
