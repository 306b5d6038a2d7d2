// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;

// Monta o router completo da aplicação sobre o estado compartilhado.
pub fn build_router(app_state: AppState) -> Router {
    let staff_routes = Router::new()
        .route(
            "/",
            post(handlers::staff::create_employee).get(handlers::staff::list_staff),
        )
        .route("/roles", get(handlers::staff::list_roles))
        .route(
            "/{national_id}",
            get(handlers::staff::get_employee).put(handlers::staff::update_employee),
        );

    let dealership_routes = Router::new()
        .route(
            "/",
            post(handlers::dealerships::create_dealership)
                .get(handlers::dealerships::list_dealerships),
        )
        .route(
            "/{rif}",
            get(handlers::dealerships::get_dealership)
                .put(handlers::dealerships::update_dealership)
                .delete(handlers::dealerships::delete_dealership),
        );

    let crm_routes = Router::new()
        .route(
            "/clients",
            post(handlers::crm::create_client).get(handlers::crm::list_clients),
        )
        .route(
            "/vehicles",
            post(handlers::crm::create_vehicle).get(handlers::crm::list_vehicles),
        )
        .route("/vehicles/{plate}", get(handlers::crm::get_vehicle));

    let operations_routes = Router::new()
        .route(
            "/services",
            post(handlers::operations::create_service).get(handlers::operations::list_services),
        )
        .route(
            "/services/{service_id}/activities",
            post(handlers::operations::create_activity)
                .get(handlers::operations::list_activities),
        )
        .route(
            "/orders",
            post(handlers::operations::create_order).get(handlers::operations::list_orders),
        )
        .route(
            "/orders/{order_id}",
            get(handlers::operations::get_order).delete(handlers::operations::delete_order),
        )
        .route(
            "/orders/{order_id}/timeline",
            put(handlers::operations::update_order_timeline),
        )
        .route(
            "/orders/{order_id}/details",
            post(handlers::operations::add_order_detail)
                .get(handlers::operations::list_order_details),
        );

    let inventory_routes = Router::new()
        .route(
            "/products",
            post(handlers::inventory::create_product).get(handlers::inventory::list_products),
        )
        .route("/stock", post(handlers::inventory::create_stock_item))
        .route(
            "/stock/{dealership_rif}",
            get(handlers::inventory::list_stock),
        )
        .route(
            "/stock/{dealership_rif}/{product_id}",
            get(handlers::inventory::get_stock_item)
                .delete(handlers::inventory::delete_stock_item),
        )
        .route(
            "/applications",
            post(handlers::inventory::apply_product),
        )
        .route(
            "/applications/{order_id}",
            get(handlers::inventory::list_applications),
        );

    let finance_routes = Router::new()
        .route("/discounts", post(handlers::finance::create_discount_tier))
        .route(
            "/discounts/{dealership_rif}",
            get(handlers::finance::list_discount_tiers),
        )
        .route(
            "/discounts/{dealership_rif}/{discount_number}",
            axum::routing::delete(handlers::finance::delete_discount_tier),
        )
        .route("/invoices", post(handlers::finance::generate_invoice))
        .route("/invoices/{id}", get(handlers::finance::get_invoice))
        .route(
            "/invoices/by-order/{order_id}",
            get(handlers::finance::get_invoice_by_order),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/staff", staff_routes)
        .nest("/api/dealerships", dealership_routes)
        .nest("/api/crm", crm_routes)
        .nest("/api/operations", operations_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/finance", finance_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}
