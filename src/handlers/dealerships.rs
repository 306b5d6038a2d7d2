// src/handlers/dealerships.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validators::{validate_national_id, validate_rif},
    },
    config::AppState,
    models::dealership::Dealership,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealershipPayload {
    #[validate(custom(function = validate_rif))]
    #[schema(example = "J-12345678-9")]
    pub rif: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,

    // Obrigatório no cadastro; o funcionário precisa ter o papel gerencial.
    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-12345678")]
    pub manager_national_id: String,
}

// POST /api/dealerships
#[utoipa::path(
    post,
    path = "/api/dealerships",
    tag = "Dealerships",
    request_body = CreateDealershipPayload,
    responses(
        (status = 201, description = "Concessionária cadastrada", body = Dealership),
        (status = 422, description = "Gerente sem o papel gerencial")
    )
)]
pub async fn create_dealership(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDealershipPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dealership = app_state
        .dealership_service
        .create(
            &app_state.db_pool,
            &payload.rif,
            &payload.name,
            &payload.city,
            &payload.manager_national_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(dealership)))
}

// GET /api/dealerships
#[utoipa::path(
    get,
    path = "/api/dealerships",
    tag = "Dealerships",
    responses((status = 200, description = "Concessionárias da rede", body = [Dealership]))
)]
pub async fn list_dealerships(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let dealerships = app_state.dealership_service.list().await?;
    Ok(Json(dealerships))
}

// GET /api/dealerships/{rif}
#[utoipa::path(
    get,
    path = "/api/dealerships/{rif}",
    tag = "Dealerships",
    params(("rif" = String, Path, description = "RIF da concessionária")),
    responses(
        (status = 200, description = "Concessionária encontrada", body = Dealership),
        (status = 404, description = "Concessionária não encontrada")
    )
)]
pub async fn get_dealership(
    State(app_state): State<AppState>,
    Path(rif): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let dealership = app_state
        .dealership_service
        .get(&app_state.db_pool, &rif)
        .await?;
    Ok(Json(dealership))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealershipPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,

    // Enviar null (ou omitir) é rejeitado pela guarda com ManagerRequired:
    // só a exclusão do funcionário gerente pode anular o campo.
    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-12345678")]
    pub manager_national_id: Option<String>,
}

// PUT /api/dealerships/{rif}
#[utoipa::path(
    put,
    path = "/api/dealerships/{rif}",
    tag = "Dealerships",
    request_body = UpdateDealershipPayload,
    params(("rif" = String, Path, description = "RIF da concessionária")),
    responses(
        (status = 200, description = "Concessionária atualizada", body = Dealership),
        (status = 422, description = "Tentativa de deixar a concessionária sem gerente")
    )
)]
pub async fn update_dealership(
    State(app_state): State<AppState>,
    Path(rif): Path<String>,
    Json(payload): Json<UpdateDealershipPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dealership = app_state
        .dealership_service
        .update(
            &app_state.db_pool,
            &rif,
            &payload.name,
            &payload.city,
            payload.manager_national_id.as_deref(),
        )
        .await?;

    Ok(Json(dealership))
}

// DELETE /api/dealerships/{rif}
#[utoipa::path(
    delete,
    path = "/api/dealerships/{rif}",
    tag = "Dealerships",
    params(("rif" = String, Path, description = "RIF da concessionária")),
    responses(
        (status = 200, description = "Concessionária excluída", body = Dealership),
        (status = 404, description = "Concessionária não encontrada")
    )
)]
pub async fn delete_dealership(
    State(app_state): State<AppState>,
    Path(rif): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let dealership = app_state
        .dealership_service
        .delete(&app_state.db_pool, &rif)
        .await?;
    Ok(Json(dealership))
}
