// src/services/operation_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, Postgres};

use crate::{
    common::error::AppError,
    db::{operations_repo::OrderTimeline, OperationsRepository, StaffRepository},
    models::operations::{Activity, OrderDetail, Service, ServiceOrder},
    services::staff_service::StaffService,
};

// Valida a ordem parcial reserva <= check-in <= previsão <= check-out,
// considerando apenas os marcos presentes.
fn validate_timeline(timeline: &OrderTimeline) -> Result<(), AppError> {
    let marks = [
        ("reservation", timeline.reservation),
        ("checkin", timeline.checkin),
        ("estimatedCheckout", timeline.estimated_checkout),
        ("checkout", timeline.checkout),
    ];

    let mut last: Option<(&str, chrono::DateTime<chrono::Utc>)> = None;
    for (name, mark) in marks {
        let Some(mark) = mark else { continue };
        if let Some((previous_name, previous)) = last {
            if previous > mark {
                return Err(AppError::InvalidOrderTimeline(format!(
                    "{previous_name} é posterior a {name}"
                )));
            }
        }
        last = Some((name, mark));
    }

    Ok(())
}

#[derive(Clone)]
pub struct OperationService {
    operations_repo: OperationsRepository,
    staff_repo: StaffRepository,
    staff_service: StaffService,
}

impl OperationService {
    pub fn new(
        operations_repo: OperationsRepository,
        staff_repo: StaffRepository,
        staff_service: StaffService,
    ) -> Self {
        Self {
            operations_repo,
            staff_repo,
            staff_service,
        }
    }

    // =========================================================================
    //  CATÁLOGO
    // =========================================================================

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        self.operations_repo.list_services().await
    }

    pub async fn create_service<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        coordinator_national_id: &str,
    ) -> Result<Service, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.operations_repo
            .insert_service(executor, name, description, coordinator_national_id)
            .await
    }

    pub async fn list_activities(&self, service_id: i32) -> Result<Vec<Activity>, AppError> {
        self.operations_repo.list_activities(service_id).await
    }

    pub async fn create_activity<'e, E>(
        &self,
        executor: E,
        service_id: i32,
        activity_number: i32,
        description: &str,
        price_per_hour: Decimal,
    ) -> Result<Activity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.operations_repo
            .insert_activity(executor, service_id, activity_number, description, price_per_hour)
            .await
    }

    // =========================================================================
    //  ORDENS
    // =========================================================================

    /// Resolve a concessionária dona de uma nova ordem a partir da alocação
    /// do analista: a filial ajudada, quando existe, senão a empregadora.
    pub async fn resolve_order_dealership(
        &self,
        conn: &mut PgConnection,
        analyst_national_id: &str,
    ) -> Result<String, AppError> {
        let analyst = self
            .staff_repo
            .find_employee(&mut *conn, analyst_national_id)
            .await?
            .ok_or_else(|| AppError::UnknownStaff(analyst_national_id.to_string()))?;

        analyst
            .helped_dealership_rif
            .or(analyst.employer_dealership_rif)
            .ok_or_else(|| AppError::AnalystUnassigned(analyst_national_id.to_string()))
    }

    /// Abre uma ordem de serviço. A concessionária nunca vem do caller; o
    /// analista precisa ser um operativo e a linha do tempo precisa respeitar
    /// a ordem parcial dos marcos.
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        vehicle_plate: &str,
        analyst_national_id: &str,
        timeline: OrderTimeline,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        validate_timeline(&timeline)?;

        let mut tx = executor.begin().await?;

        self.staff_service
            .validate_role(&mut tx, analyst_national_id, false)
            .await?;

        let dealership_rif = self
            .resolve_order_dealership(&mut tx, analyst_national_id)
            .await?;

        let order = self
            .operations_repo
            .insert_order(
                &mut *tx,
                vehicle_plate,
                analyst_national_id,
                &dealership_rif,
                &timeline,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Ordem {} aberta na concessionária {}",
            order.id,
            order.dealership_rif
        );
        Ok(order)
    }

    pub async fn get_order(&self, pool: &sqlx::PgPool, order_id: i32) -> Result<ServiceOrder, AppError> {
        self.operations_repo
            .find_order(pool, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))
    }

    pub async fn list_orders(&self) -> Result<Vec<ServiceOrder>, AppError> {
        self.operations_repo.list_orders().await
    }

    /// Substitui os marcos temporais da ordem, revalidando a ordem parcial
    /// sobre o estado final.
    pub async fn update_order_timeline<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        timeline: OrderTimeline,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        validate_timeline(&timeline)?;

        let mut tx = executor.begin().await?;
        let updated = self
            .operations_repo
            .update_order_timeline(&mut *tx, order_id, &timeline)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Exclui uma ordem. As aplicações de produto não são estornadas: o
    /// ledger de consumo bloqueia a exclusão enquanto existirem registros.
    pub async fn delete_order<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let deleted = self
            .operations_repo
            .delete_order(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;
        tx.commit().await?;

        Ok(deleted)
    }

    // =========================================================================
    //  LINHAS DE ATIVIDADE
    // =========================================================================

    pub async fn list_order_details(
        &self,
        pool: &sqlx::PgPool,
        order_id: i32,
    ) -> Result<Vec<OrderDetail>, AppError> {
        self.operations_repo
            .find_order(pool, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;
        self.operations_repo.list_order_details(pool, order_id).await
    }

    /// Adiciona uma linha de atividade à ordem. Sem preço informado, usa o
    /// preço por hora do catálogo.
    pub async fn add_order_detail<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        service_id: i32,
        activity_number: i32,
        worked_hours: Decimal,
        price_per_hour: Option<Decimal>,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.operations_repo
            .find_order(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;

        let price_per_hour = match price_per_hour {
            Some(price) => price,
            None => {
                self.operations_repo
                    .find_activity(&mut *tx, service_id, activity_number)
                    .await?
                    .ok_or(AppError::ResourceNotFound("atividade"))?
                    .price_per_hour
            }
        };

        let detail = self
            .operations_repo
            .insert_order_detail(
                &mut *tx,
                order_id,
                service_id,
                activity_number,
                price_per_hour,
                worked_hours,
            )
            .await?;

        tx.commit().await?;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn mark(hours: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap() + Duration::hours(hours)
    }

    #[test]
    fn full_chain_in_order_passes() {
        let timeline = OrderTimeline {
            reservation: Some(mark(0)),
            checkin: Some(mark(1)),
            estimated_checkout: Some(mark(5)),
            checkout: Some(mark(6)),
        };
        assert!(validate_timeline(&timeline).is_ok());
    }

    #[test]
    fn equal_marks_are_allowed() {
        let timeline = OrderTimeline {
            reservation: Some(mark(0)),
            checkin: Some(mark(0)),
            estimated_checkout: None,
            checkout: Some(mark(0)),
        };
        assert!(validate_timeline(&timeline).is_ok());
    }

    #[test]
    fn empty_timeline_passes() {
        assert!(validate_timeline(&OrderTimeline::default()).is_ok());
    }

    #[test]
    fn ordering_skips_absent_marks() {
        // check-in ausente: reserva é comparada direto com a previsão
        let timeline = OrderTimeline {
            reservation: Some(mark(3)),
            checkin: None,
            estimated_checkout: Some(mark(1)),
            checkout: None,
        };
        let err = validate_timeline(&timeline).unwrap_err();
        assert!(matches!(err, AppError::InvalidOrderTimeline(_)));
    }

    #[test]
    fn checkout_before_checkin_is_rejected() {
        let timeline = OrderTimeline {
            reservation: None,
            checkin: Some(mark(4)),
            estimated_checkout: None,
            checkout: Some(mark(2)),
        };
        assert!(validate_timeline(&timeline).is_err());
    }
}
