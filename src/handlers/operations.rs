// src/handlers/operations.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validators::{validate_national_id, validate_not_negative, validate_positive},
    },
    config::AppState,
    db::operations_repo::OrderTimeline,
    models::operations::{Activity, OrderDetail, Service, ServiceOrder},
};

// =============================================================================
//  1. CATÁLOGO (SERVIÇOS & ATIVIDADES)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Manutenção preventiva")]
    pub name: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-12345678")]
    pub coordinator_national_id: String,
}

// POST /api/operations/services
#[utoipa::path(
    post,
    path = "/api/operations/services",
    tag = "Operations",
    request_body = CreateServicePayload,
    responses((status = 201, description = "Serviço criado", body = Service))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .operation_service
        .create_service(
            &app_state.db_pool,
            &payload.name,
            &payload.description,
            &payload.coordinator_national_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/operations/services
#[utoipa::path(
    get,
    path = "/api/operations/services",
    tag = "Operations",
    responses((status = 200, description = "Catálogo de serviços", body = [Service]))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.operation_service.list_services().await?;
    Ok(Json(services))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityPayload {
    #[schema(example = 1)]
    pub activity_number: i32,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Troca de óleo")]
    pub description: String,

    #[validate(custom(function = validate_not_negative))]
    #[schema(example = "25.00")]
    pub price_per_hour: Decimal,
}

// POST /api/operations/services/{service_id}/activities
#[utoipa::path(
    post,
    path = "/api/operations/services/{service_id}/activities",
    tag = "Operations",
    request_body = CreateActivityPayload,
    params(("service_id" = i32, Path, description = "ID do serviço")),
    responses((status = 201, description = "Atividade criada", body = Activity))
)]
pub async fn create_activity(
    State(app_state): State<AppState>,
    Path(service_id): Path<i32>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let activity = app_state
        .operation_service
        .create_activity(
            &app_state.db_pool,
            service_id,
            payload.activity_number,
            &payload.description,
            payload.price_per_hour,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

// GET /api/operations/services/{service_id}/activities
#[utoipa::path(
    get,
    path = "/api/operations/services/{service_id}/activities",
    tag = "Operations",
    params(("service_id" = i32, Path, description = "ID do serviço")),
    responses((status = 200, description = "Atividades do serviço", body = [Activity]))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
    Path(service_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let activities = app_state
        .operation_service
        .list_activities(service_id)
        .await?;
    Ok(Json(activities))
}

// =============================================================================
//  2. ORDENS DE SERVIÇO
// =============================================================================

// A concessionária NÃO é aceita no payload: ela é derivada da alocação do
// analista pelo resolvedor.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "A placa é obrigatória."))]
    #[schema(example = "AB123CD")]
    pub vehicle_plate: String,

    #[validate(custom(function = validate_national_id))]
    #[schema(example = "V-12345678")]
    pub analyst_national_id: String,

    pub reservation_timestamp: Option<DateTime<Utc>>,
    pub checkin_timestamp: Option<DateTime<Utc>>,
    pub estimated_checkout_timestamp: Option<DateTime<Utc>>,
    pub checkout_timestamp: Option<DateTime<Utc>>,
}

// POST /api/operations/orders
#[utoipa::path(
    post,
    path = "/api/operations/orders",
    tag = "Operations",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Ordem aberta", body = ServiceOrder),
        (status = 422, description = "Analista com papel gerencial ou linha do tempo inválida")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .operation_service
        .create_order(
            &app_state.db_pool,
            &payload.vehicle_plate,
            &payload.analyst_national_id,
            OrderTimeline {
                reservation: payload.reservation_timestamp,
                checkin: payload.checkin_timestamp,
                estimated_checkout: payload.estimated_checkout_timestamp,
                checkout: payload.checkout_timestamp,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/operations/orders
#[utoipa::path(
    get,
    path = "/api/operations/orders",
    tag = "Operations",
    responses((status = 200, description = "Ordens de serviço", body = [ServiceOrder]))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.operation_service.list_orders().await?;
    Ok(Json(orders))
}

// GET /api/operations/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/operations/orders/{order_id}",
    tag = "Operations",
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Ordem encontrada", body = ServiceOrder),
        (status = 404, description = "Ordem não encontrada")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .operation_service
        .get_order(&app_state.db_pool, order_id)
        .await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimelinePayload {
    pub reservation_timestamp: Option<DateTime<Utc>>,
    pub checkin_timestamp: Option<DateTime<Utc>>,
    pub estimated_checkout_timestamp: Option<DateTime<Utc>>,
    pub checkout_timestamp: Option<DateTime<Utc>>,
}

// PUT /api/operations/orders/{order_id}/timeline
#[utoipa::path(
    put,
    path = "/api/operations/orders/{order_id}/timeline",
    tag = "Operations",
    request_body = UpdateTimelinePayload,
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Marcos atualizados", body = ServiceOrder),
        (status = 422, description = "Linha do tempo inválida")
    )
)]
pub async fn update_order_timeline(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateTimelinePayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .operation_service
        .update_order_timeline(
            &app_state.db_pool,
            order_id,
            OrderTimeline {
                reservation: payload.reservation_timestamp,
                checkin: payload.checkin_timestamp,
                estimated_checkout: payload.estimated_checkout_timestamp,
                checkout: payload.checkout_timestamp,
            },
        )
        .await?;

    Ok(Json(order))
}

// DELETE /api/operations/orders/{order_id}
#[utoipa::path(
    delete,
    path = "/api/operations/orders/{order_id}",
    tag = "Operations",
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Ordem excluída", body = ServiceOrder),
        (status = 422, description = "Ordem com consumo registrado ou fatura emitida")
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .operation_service
        .delete_order(&app_state.db_pool, order_id)
        .await?;
    Ok(Json(order))
}

// =============================================================================
//  3. LINHAS DE ATIVIDADE
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderDetailPayload {
    #[schema(example = 1)]
    pub service_id: i32,

    #[schema(example = 1)]
    pub activity_number: i32,

    #[validate(custom(function = validate_positive))]
    #[schema(example = "2.50")]
    pub worked_hours: Decimal,

    // Sem preço informado, vale o preço por hora do catálogo.
    #[validate(custom(function = validate_not_negative))]
    pub price_per_hour: Option<Decimal>,
}

// POST /api/operations/orders/{order_id}/details
#[utoipa::path(
    post,
    path = "/api/operations/orders/{order_id}/details",
    tag = "Operations",
    request_body = AddOrderDetailPayload,
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 201, description = "Linha adicionada", body = OrderDetail),
        (status = 404, description = "Ordem ou atividade inexistente")
    )
)]
pub async fn add_order_detail(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<AddOrderDetailPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .operation_service
        .add_order_detail(
            &app_state.db_pool,
            order_id,
            payload.service_id,
            payload.activity_number,
            payload.worked_hours,
            payload.price_per_hour,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/operations/orders/{order_id}/details
#[utoipa::path(
    get,
    path = "/api/operations/orders/{order_id}/details",
    tag = "Operations",
    params(("order_id" = i32, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Linhas da ordem", body = [OrderDetail]),
        (status = 404, description = "Ordem não encontrada")
    )
)]
pub async fn list_order_details(
    State(app_state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let details = app_state
        .operation_service
        .list_order_details(&app_state.db_pool, order_id)
        .await?;
    Ok(Json(details))
}
