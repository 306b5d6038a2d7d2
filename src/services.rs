// src/services.rs

pub mod staff_service;
pub use staff_service::StaffService;
pub mod dealership_service;
pub use dealership_service::DealershipService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod operation_service;
pub use operation_service::OperationService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod finance_service;
pub use finance_service::FinanceService;
