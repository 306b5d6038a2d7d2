// src/services/dealership_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{DealershipRepository, StaffRepository},
    models::dealership::Dealership,
    services::staff_service::StaffService,
};

#[derive(Clone)]
pub struct DealershipService {
    dealership_repo: DealershipRepository,
    staff_repo: StaffRepository,
    staff_service: StaffService,
}

impl DealershipService {
    pub fn new(
        dealership_repo: DealershipRepository,
        staff_repo: StaffRepository,
        staff_service: StaffService,
    ) -> Self {
        Self {
            dealership_repo,
            staff_repo,
            staff_service,
        }
    }

    pub async fn list(&self) -> Result<Vec<Dealership>, AppError> {
        self.dealership_repo.list().await
    }

    pub async fn get(&self, pool: &sqlx::PgPool, rif: &str) -> Result<Dealership, AppError> {
        self.dealership_repo
            .find(pool, rif)
            .await?
            .ok_or(AppError::ResourceNotFound("concessionária"))
    }

    /// Cadastra uma concessionária. O gerente é obrigatório e precisa ter o
    /// papel gerencial; a checagem roda na mesma transação do INSERT.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        rif: &str,
        name: &str,
        city: &str,
        manager_national_id: &str,
    ) -> Result<Dealership, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.staff_service
            .validate_role(&mut tx, manager_national_id, true)
            .await?;

        let dealership = self
            .dealership_repo
            .insert(&mut *tx, rif, name, city, manager_national_id)
            .await?;

        tx.commit().await?;

        tracing::info!("Concessionária {} cadastrada", dealership.rif);
        Ok(dealership)
    }

    /// Atualização direta. A assimetria da regra: a exclusão do funcionário
    /// gerente pode anular o campo, mas um UPDATE nunca pode.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        rif: &str,
        name: &str,
        city: &str,
        manager_national_id: Option<&str>,
    ) -> Result<Dealership, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let manager_national_id = manager_national_id.ok_or(AppError::ManagerRequired)?;

        let mut tx = executor.begin().await?;

        self.staff_service
            .validate_role(&mut tx, manager_national_id, true)
            .await?;

        let updated = self
            .dealership_repo
            .update(&mut *tx, rif, name, city, manager_national_id)
            .await?
            .ok_or(AppError::ResourceNotFound("concessionária"))?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Exclui a concessionária e, na mesma transação, desfaz o vínculo
    /// empregatício do funcionário que a gerenciava. Se a exclusão for
    /// abortada (por exemplo, por outro funcionário ainda empregado nela), a
    /// anulação é desfeita junto.
    pub async fn delete<'e, E>(&self, executor: E, rif: &str) -> Result<Dealership, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let dealership = self
            .dealership_repo
            .find(&mut *tx, rif)
            .await?
            .ok_or(AppError::ResourceNotFound("concessionária"))?;

        if let Some(manager_national_id) = &dealership.manager_national_id {
            let demoted = self
                .staff_repo
                .clear_employer_dealership(&mut *tx, manager_national_id)
                .await?;
            // Zero linhas é um no-op legítimo: o gerente pode já ter sido
            // excluído do quadro.
            if demoted > 0 {
                tracing::info!(
                    "Gerente {} desvinculado da concessionária {}",
                    manager_national_id,
                    rif
                );
            }
        }

        let deleted = self
            .dealership_repo
            .delete(&mut *tx, rif)
            .await?
            .ok_or(AppError::ResourceNotFound("concessionária"))?;

        tx.commit().await?;

        tracing::info!("Concessionária {} excluída", rif);
        Ok(deleted)
    }
}
