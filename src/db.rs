// src/db.rs

pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod dealership_repo;
pub use dealership_repo::DealershipRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod operations_repo;
pub use operations_repo::OperationsRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
