// src/services/staff_service.rs

use sqlx::{Executor, PgConnection, Postgres};

use crate::{
    common::error::AppError,
    db::staff_repo::{EmployeeData, StaffRepository, MANAGER_ROLE_NAME},
    models::staff::{Employee, Role},
};

// A classificação bate quando "ter o papel de gerente" e "ser registrado como
// gerente" dizem a mesma coisa.
fn classification_matches(role_id: i32, manager_role_id: i32, as_manager: bool) -> bool {
    (role_id == manager_role_id) == as_manager
}

#[derive(Clone)]
pub struct StaffService {
    staff_repo: StaffRepository,
}

impl StaffService {
    pub fn new(staff_repo: StaffRepository) -> Self {
        Self { staff_repo }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.staff_repo.list_roles().await
    }

    pub async fn list_staff(&self) -> Result<Vec<Employee>, AppError> {
        self.staff_repo.list_staff().await
    }

    pub async fn get_employee(&self, pool: &sqlx::PgPool, national_id: &str) -> Result<Employee, AppError> {
        self.staff_repo
            .find_employee(pool, national_id)
            .await?
            .ok_or_else(|| AppError::UnknownStaff(national_id.to_string()))
    }

    // ---
    // Guarda de consistência de papéis.
    // ---
    // Recebe a conexão da transação do chamador: a verificação precisa
    // enxergar (e ser abortada junto com) a escrita que a disparou.
    pub async fn validate_role(
        &self,
        conn: &mut PgConnection,
        national_id: &str,
        as_manager: bool,
    ) -> Result<(), AppError> {
        let employee = self
            .staff_repo
            .find_employee(&mut *conn, national_id)
            .await?
            .ok_or_else(|| AppError::UnknownStaff(national_id.to_string()))?;

        let manager_role = self
            .staff_repo
            .find_role_by_name(&mut *conn, MANAGER_ROLE_NAME)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("o papel '{MANAGER_ROLE_NAME}' não está cadastrado")
            })?;

        if !classification_matches(employee.role_id, manager_role.id, as_manager) {
            let expected_role = if as_manager {
                MANAGER_ROLE_NAME.to_string()
            } else {
                format!("qualquer papel exceto {MANAGER_ROLE_NAME}")
            };
            tracing::warn!(
                "Guarda de papéis rejeitou {}: papel {} esperado ({})",
                national_id,
                employee.role_id,
                expected_role
            );
            return Err(AppError::RoleMismatch {
                national_id: national_id.to_string(),
                expected_role,
            });
        }

        Ok(())
    }

    // ---
    // Cadastro / atualização
    // ---

    pub async fn create_employee<'e, E>(
        &self,
        executor: E,
        data: EmployeeData,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let employee = self.staff_repo.insert_employee(&mut *tx, &data).await?;
        tx.commit().await?;

        tracing::info!("Funcionário {} cadastrado", employee.national_id);
        Ok(employee)
    }

    pub async fn update_employee<'e, E>(
        &self,
        executor: E,
        national_id: &str,
        data: EmployeeData,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // Quem ocupa o posto de gerente de alguma concessionária não pode
        // perder o papel gerencial por atualização de cadastro.
        let manager_role = self
            .staff_repo
            .find_role_by_name(&mut *tx, MANAGER_ROLE_NAME)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("o papel '{MANAGER_ROLE_NAME}' não está cadastrado")
            })?;
        if data.role_id != manager_role.id {
            let seats = self
                .staff_repo
                .managed_dealerships(&mut *tx, national_id)
                .await?;
            if seats > 0 {
                return Err(AppError::RoleMismatch {
                    national_id: national_id.to_string(),
                    expected_role: MANAGER_ROLE_NAME.to_string(),
                });
            }
        }

        let updated = self
            .staff_repo
            .update_employee(&mut *tx, national_id, &data)
            .await?
            .ok_or_else(|| AppError::UnknownStaff(national_id.to_string()))?;
        tx.commit().await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MANAGER: i32 = 1;
    const ANALYST: i32 = 2;

    #[rstest]
    // gerente registrado como gerente, operativo registrado como operativo
    #[case(MANAGER, true, true)]
    #[case(ANALYST, false, true)]
    // as combinações cruzadas violam a guarda
    #[case(MANAGER, false, false)]
    #[case(ANALYST, true, false)]
    fn classification_matrix(#[case] role_id: i32, #[case] as_manager: bool, #[case] ok: bool) {
        assert_eq!(classification_matches(role_id, MANAGER, as_manager), ok);
    }
}
