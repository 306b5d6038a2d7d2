// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Staff ---
        handlers::staff::create_employee,
        handlers::staff::list_staff,
        handlers::staff::list_roles,
        handlers::staff::get_employee,
        handlers::staff::update_employee,

        // --- Dealerships ---
        handlers::dealerships::create_dealership,
        handlers::dealerships::list_dealerships,
        handlers::dealerships::get_dealership,
        handlers::dealerships::update_dealership,
        handlers::dealerships::delete_dealership,

        // --- CRM ---
        handlers::crm::create_client,
        handlers::crm::list_clients,
        handlers::crm::create_vehicle,
        handlers::crm::list_vehicles,
        handlers::crm::get_vehicle,

        // --- Operations ---
        handlers::operations::create_service,
        handlers::operations::list_services,
        handlers::operations::create_activity,
        handlers::operations::list_activities,
        handlers::operations::create_order,
        handlers::operations::list_orders,
        handlers::operations::get_order,
        handlers::operations::update_order_timeline,
        handlers::operations::delete_order,
        handlers::operations::add_order_detail,
        handlers::operations::list_order_details,

        // --- Inventory ---
        handlers::inventory::create_product,
        handlers::inventory::list_products,
        handlers::inventory::create_stock_item,
        handlers::inventory::list_stock,
        handlers::inventory::get_stock_item,
        handlers::inventory::delete_stock_item,
        handlers::inventory::apply_product,
        handlers::inventory::list_applications,

        // --- Finance ---
        handlers::finance::create_discount_tier,
        handlers::finance::list_discount_tiers,
        handlers::finance::delete_discount_tier,
        handlers::finance::generate_invoice,
        handlers::finance::get_invoice,
        handlers::finance::get_invoice_by_order,
    ),
    components(
        schemas(
            models::staff::Role,
            models::staff::Employee,
            models::dealership::Dealership,
            models::crm::Client,
            models::crm::Vehicle,
            models::operations::Service,
            models::operations::Activity,
            models::operations::ServiceOrder,
            models::operations::OrderDetail,
            models::operations::ProductApplication,
            models::inventory::Product,
            models::inventory::StockItem,
            models::finance::DiscountTier,
            models::finance::Invoice,
            handlers::staff::EmployeePayload,
            handlers::dealerships::CreateDealershipPayload,
            handlers::dealerships::UpdateDealershipPayload,
            handlers::crm::CreateClientPayload,
            handlers::crm::CreateVehiclePayload,
            handlers::operations::CreateServicePayload,
            handlers::operations::CreateActivityPayload,
            handlers::operations::CreateOrderPayload,
            handlers::operations::UpdateTimelinePayload,
            handlers::operations::AddOrderDetailPayload,
            handlers::inventory::CreateProductPayload,
            handlers::inventory::CreateStockItemPayload,
            handlers::inventory::ApplyProductPayload,
            handlers::finance::CreateDiscountTierPayload,
            handlers::finance::GenerateInvoicePayload,
        )
    ),
    tags(
        (name = "Staff", description = "Quadro de funcionários e papéis"),
        (name = "Dealerships", description = "Concessionárias da rede"),
        (name = "CRM", description = "Clientes e veículos"),
        (name = "Operations", description = "Catálogo e ordens de serviço"),
        (name = "Inventory", description = "Produtos, estoque e aplicações"),
        (name = "Finance", description = "Faixas de desconto e faturas"),
    )
)]
pub struct ApiDoc;
