// src/handlers/crm.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validators::{validate_national_id, validate_phone},
    },
    config::AppState,
    db::crm_repo::VehicleData,
    models::crm::{Client, Vehicle},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-87654321")]
    pub national_id: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(custom(function = validate_phone))]
    #[schema(example = "0414-1234567")]
    pub main_phone_no: String,

    #[validate(custom(function = validate_phone))]
    #[schema(example = "0212-5550001")]
    pub secondary_phone_no: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
}

// POST /api/crm/clients
#[utoipa::path(
    post,
    path = "/api/crm/clients",
    tag = "CRM",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Client),
        (status = 409, description = "Cédula já cadastrada")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .crm_service
        .create_client(
            &app_state.db_pool,
            &payload.national_id,
            &payload.full_name,
            &payload.main_phone_no,
            &payload.secondary_phone_no,
            &payload.email,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/crm/clients
#[utoipa::path(
    get,
    path = "/api/crm/clients",
    tag = "CRM",
    responses((status = 200, description = "Clientes cadastrados", body = [Client]))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.crm_service.list_clients().await?;
    Ok(Json(clients))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    #[validate(length(min = 1, message = "A placa é obrigatória."))]
    #[schema(example = "AB123CD")]
    pub plate: String,

    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,

    #[validate(length(min = 1, message = "O serial é obrigatório."))]
    pub serial_no: String,

    #[validate(length(min = 1, message = "O serial do motor é obrigatório."))]
    pub engine_serial_no: String,

    #[validate(length(min = 1, message = "A cor é obrigatória."))]
    pub color: String,

    #[schema(value_type = String, format = Date, example = "2020-03-15")]
    pub purchase_date: NaiveDate,

    pub additional_info: Option<String>,

    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-87654321")]
    pub owner_national_id: String,
}

// POST /api/crm/vehicles
#[utoipa::path(
    post,
    path = "/api/crm/vehicles",
    tag = "CRM",
    request_body = CreateVehiclePayload,
    responses(
        (status = 201, description = "Veículo cadastrado", body = Vehicle),
        (status = 422, description = "Dono inexistente")
    )
)]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state
        .crm_service
        .create_vehicle(
            &app_state.db_pool,
            VehicleData {
                plate: payload.plate,
                brand: payload.brand,
                model: payload.model,
                serial_no: payload.serial_no,
                engine_serial_no: payload.engine_serial_no,
                color: payload.color,
                purchase_date: payload.purchase_date,
                additional_info: payload.additional_info,
                owner_national_id: payload.owner_national_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

// GET /api/crm/vehicles
#[utoipa::path(
    get,
    path = "/api/crm/vehicles",
    tag = "CRM",
    responses((status = 200, description = "Veículos cadastrados", body = [Vehicle]))
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = app_state.crm_service.list_vehicles().await?;
    Ok(Json(vehicles))
}

// GET /api/crm/vehicles/{plate}
#[utoipa::path(
    get,
    path = "/api/crm/vehicles/{plate}",
    tag = "CRM",
    params(("plate" = String, Path, description = "Placa do veículo")),
    responses(
        (status = 200, description = "Veículo encontrado", body = Vehicle),
        (status = 404, description = "Veículo não encontrado")
    )
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = app_state
        .crm_service
        .get_vehicle(&app_state.db_pool, &plate)
        .await?;
    Ok(Json(vehicle))
}
