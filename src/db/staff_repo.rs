// src/db/staff_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::staff::{Employee, Role},
};

// Nome do papel que identifica a classificação gerencial.
pub const MANAGER_ROLE_NAME: &str = "Gerente";

// Dados de cadastro/atualização de um funcionário. O PUT é uma atualização
// completa, então o mesmo conjunto de campos serve para os dois casos.
#[derive(Debug, Clone)]
pub struct EmployeeData {
    pub national_id: String,
    pub full_name: String,
    pub main_phone_no: String,
    pub secondary_phone_no: String,
    pub email: String,
    pub address: String,
    pub role_id: i32,
    pub salary: rust_decimal::Decimal,
    pub employer_dealership_rif: String,
    pub helped_dealership_rif: Option<String>,
}

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras simples usam a pool principal.
    // ---

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn list_staff(&self) -> Result<Vec<Employee>, AppError> {
        let staff =
            sqlx::query_as::<_, Employee>("SELECT * FROM staff ORDER BY full_name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(staff)
    }

    // ---
    // Consultas usadas pelas guardas, genéricas sobre Executor para rodarem
    // dentro da transação do chamador.
    // ---

    pub async fn find_role_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Role>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await?;
        Ok(role)
    }

    pub async fn find_employee<'e, E>(
        &self,
        executor: E,
        national_id: &str,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM staff WHERE national_id = $1")
                .bind(national_id)
                .fetch_optional(executor)
                .await?;
        Ok(employee)
    }

    // ---
    // Escritas.
    // ---

    pub async fn insert_employee<'e, E>(
        &self,
        executor: E,
        data: &EmployeeData,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO staff (
                national_id, full_name, main_phone_no, secondary_phone_no,
                email, address, role_id, salary,
                employer_dealership_rif, helped_dealership_rif
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.national_id)
        .bind(&data.full_name)
        .bind(&data.main_phone_no)
        .bind(&data.secondary_phone_no)
        .bind(&data.email)
        .bind(&data.address)
        .bind(data.role_id)
        .bind(data.salary)
        .bind(&data.employer_dealership_rif)
        .bind(&data.helped_dealership_rif)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe funcionário com a cédula {}",
                        data.national_id
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation(
                        "roleId, employerDealershipRif ou helpedDealershipRif".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn update_employee<'e, E>(
        &self,
        executor: E,
        national_id: &str,
        data: &EmployeeData,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE staff
            SET
                national_id = $1,
                full_name = $2,
                main_phone_no = $3,
                secondary_phone_no = $4,
                email = $5,
                address = $6,
                role_id = $7,
                salary = $8,
                employer_dealership_rif = $9,
                helped_dealership_rif = $10
            WHERE national_id = $11
            RETURNING *
            "#,
        )
        .bind(&data.national_id)
        .bind(&data.full_name)
        .bind(&data.main_phone_no)
        .bind(&data.secondary_phone_no)
        .bind(&data.email)
        .bind(&data.address)
        .bind(data.role_id)
        .bind(data.salary)
        .bind(&data.employer_dealership_rif)
        .bind(&data.helped_dealership_rif)
        .bind(national_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(format!(
                        "já existe funcionário com a cédula {}",
                        data.national_id
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ForeignKeyViolation(
                        "roleId, employerDealershipRif ou helpedDealershipRif".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    /// Quantas concessionárias têm o funcionário como gerente titular.
    pub async fn managed_dealerships<'e, E>(
        &self,
        executor: E,
        national_id: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM dealerships WHERE manager_national_id = $1",
        )
        .bind(national_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Anula o vínculo empregatício do funcionário informado. Retorna quantas
    /// linhas foram afetadas (zero é um no-op legítimo).
    pub async fn clear_employer_dealership<'e, E>(
        &self,
        executor: E,
        national_id: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE staff SET employer_dealership_rif = NULL WHERE national_id = $1")
                .bind(national_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }
}
