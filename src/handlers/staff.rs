// src/handlers/staff.rs

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
        validators::{validate_national_id, validate_not_negative, validate_phone, validate_rif},
    },
    config::AppState,
    db::staff_repo::EmployeeData,
};

// ---
// Payload: cadastro / atualização completa de funcionário
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-12345678")]
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

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,

    #[schema(example = 2)]
    pub role_id: i32,

    #[validate(custom(function = validate_not_negative))]
    #[schema(example = "850.00")]
    pub salary: Decimal,

    #[validate(custom(function = validate_rif))]
    #[schema(example = "J-12345678-9")]
    pub employer_dealership_rif: String,

    #[validate(custom(function = validate_rif))]
    pub helped_dealership_rif: Option<String>,
}

impl EmployeePayload {
    fn into_data(self) -> EmployeeData {
        EmployeeData {
            national_id: self.national_id,
            full_name: self.full_name,
            main_phone_no: self.main_phone_no,
            secondary_phone_no: self.secondary_phone_no,
            email: self.email,
            address: self.address,
            role_id: self.role_id,
            salary: self.salary,
            employer_dealership_rif: self.employer_dealership_rif,
            helped_dealership_rif: self.helped_dealership_rif,
        }
    }
}

// POST /api/staff
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Funcionário cadastrado", body = crate::models::staff::Employee),
        (status = 409, description = "Cédula já cadastrada")
    )
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state
        .staff_service
        .create_employee(&app_state.db_pool, payload.into_data())
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    responses(
        (status = 200, description = "Quadro de funcionários", body = [crate::models::staff::Employee])
    )
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state.staff_service.list_staff().await?;
    Ok(Json(staff))
}

// GET /api/staff/roles
#[utoipa::path(
    get,
    path = "/api/staff/roles",
    tag = "Staff",
    responses(
        (status = 200, description = "Papéis disponíveis", body = [crate::models::staff::Role])
    )
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.staff_service.list_roles().await?;
    Ok(Json(roles))
}

// GET /api/staff/{national_id}
#[utoipa::path(
    get,
    path = "/api/staff/{national_id}",
    tag = "Staff",
    params(("national_id" = String, Path, description = "Cédula do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = crate::models::staff::Employee),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    Path(national_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state
        .staff_service
        .get_employee(&app_state.db_pool, &national_id)
        .await?;
    Ok(Json(employee))
}

// PUT /api/staff/{national_id}
#[utoipa::path(
    put,
    path = "/api/staff/{national_id}",
    tag = "Staff",
    request_body = EmployeePayload,
    params(("national_id" = String, Path, description = "Cédula do funcionário")),
    responses(
        (status = 200, description = "Funcionário atualizado", body = crate::models::staff::Employee),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    Path(national_id): Path<String>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state
        .staff_service
        .update_employee(&app_state.db_pool, &national_id, payload.into_data())
        .await?;

    Ok(Json(employee))
}
