// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CrmRepository, DealershipRepository, FinanceRepository, InventoryRepository,
        OperationsRepository, StaffRepository,
    },
    services::{
        CrmService, DealershipService, FinanceService, InventoryService, OperationService,
        StaffService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub staff_service: StaffService,
    pub dealership_service: DealershipService,
    pub crm_service: CrmService,
    pub operation_service: OperationService,
    pub inventory_service: InventoryService,
    pub finance_service: FinanceService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool))
    }

    // --- Monta o gráfico de dependências ---
    // Separado do `new` para os testes de integração montarem o estado sobre
    // uma pool já existente.
    pub fn with_pool(db_pool: PgPool) -> Self {
        let staff_repo = StaffRepository::new(db_pool.clone());
        let dealership_repo = DealershipRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let operations_repo = OperationsRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());

        let staff_service = StaffService::new(staff_repo.clone());
        let dealership_service = DealershipService::new(
            dealership_repo,
            staff_repo.clone(),
            staff_service.clone(),
        );
        let crm_service = CrmService::new(crm_repo.clone());
        let operation_service = OperationService::new(
            operations_repo.clone(),
            staff_repo,
            staff_service.clone(),
        );
        let inventory_service = InventoryService::new(
            inventory_repo,
            operations_repo.clone(),
            staff_service.clone(),
        );
        let finance_service = FinanceService::new(finance_repo, operations_repo, crm_repo);

        Self {
            db_pool,
            staff_service,
            dealership_service,
            crm_service,
            operation_service,
            inventory_service,
            finance_service,
        }
    }
}
