// src/services/finance_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{CrmRepository, FinanceRepository, OperationsRepository},
    models::{
        finance::{DiscountTier, Invoice},
        operations::OrderDetail,
    },
};

// Escolhe a melhor faixa para o uso anual do cliente: entre as faixas cujo
// requisito é atendido, a de maior percentual; empate decide pelo menor
// número da faixa. Sem faixa elegível, desconto zero.
fn select_discount(tiers: &[DiscountTier], usage_count: i64) -> Decimal {
    tiers
        .iter()
        .filter(|tier| i64::from(tier.required_annual_service_usage_count) <= usage_count)
        .max_by(|a, b| {
            a.discount_percentage
                .cmp(&b.discount_percentage)
                .then_with(|| b.discount_number.cmp(&a.discount_number))
        })
        .map(|tier| tier.discount_percentage)
        .unwrap_or(Decimal::ZERO)
}

// Total de mão de obra da ordem. Uma ordem sem linhas fatura zero.
fn labor_total(details: &[OrderDetail]) -> Decimal {
    details
        .iter()
        .map(|detail| detail.price_per_hour * detail.worked_hours)
        .sum()
}

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    operations_repo: OperationsRepository,
    crm_repo: CrmRepository,
}

impl FinanceService {
    pub fn new(
        finance_repo: FinanceRepository,
        operations_repo: OperationsRepository,
        crm_repo: CrmRepository,
    ) -> Self {
        Self {
            finance_repo,
            operations_repo,
            crm_repo,
        }
    }

    // =========================================================================
    //  FAIXAS DE DESCONTO
    // =========================================================================

    pub async fn list_discount_tiers(
        &self,
        dealership_rif: &str,
    ) -> Result<Vec<DiscountTier>, AppError> {
        self.finance_repo.list_discount_tiers(dealership_rif).await
    }

    pub async fn create_discount_tier<'e, E>(
        &self,
        executor: E,
        discount_number: i32,
        dealership_rif: &str,
        discount_percentage: Decimal,
        required_annual_service_usage_count: i16,
    ) -> Result<DiscountTier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.finance_repo
            .insert_discount_tier(
                executor,
                discount_number,
                dealership_rif,
                discount_percentage,
                required_annual_service_usage_count,
            )
            .await
    }

    pub async fn delete_discount_tier<'e, E>(
        &self,
        executor: E,
        discount_number: i32,
        dealership_rif: &str,
    ) -> Result<DiscountTier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.finance_repo
            .delete_discount_tier(executor, discount_number, dealership_rif)
            .await?
            .ok_or(AppError::ResourceNotFound("faixa de desconto"))
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    pub async fn get_invoice(&self, id: i32) -> Result<Invoice, AppError> {
        self.finance_repo
            .find_invoice(id)
            .await?
            .ok_or(AppError::ResourceNotFound("fatura"))
    }

    pub async fn get_invoice_by_order(&self, order_id: i32) -> Result<Invoice, AppError> {
        self.finance_repo
            .find_invoice_by_order(order_id)
            .await?
            .ok_or(AppError::ResourceNotFound("fatura"))
    }

    /// Emite a fatura de uma ordem. `discount` e `amount_due` são derivados
    /// aqui dentro; qualquer valor vindo do caller é ignorado.
    pub async fn generate_invoice<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        issue_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. Ordem -> veículo -> cliente dono, e a concessionária da ordem.
        let order = self
            .operations_repo
            .find_order(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;

        let vehicle = self
            .crm_repo
            .find_vehicle(&mut *tx, &order.vehicle_plate)
            .await?
            .ok_or(AppError::ResourceNotFound("veículo"))?;

        // 2. Uso anual de serviços pagos do cliente nesta concessionária.
        let usage_count = self
            .finance_repo
            .annual_service_usage(
                &mut *tx,
                &vehicle.owner_national_id,
                &order.dealership_rif,
            )
            .await?;

        // 3. Melhor faixa de desconto elegível.
        let tiers = self
            .finance_repo
            .discount_tiers_for_dealership(&mut *tx, &order.dealership_rif)
            .await?;
        let discount = select_discount(&tiers, usage_count);

        // 4. Mão de obra da ordem com o desconto aplicado.
        let details = self
            .operations_repo
            .list_order_details(&mut *tx, order_id)
            .await?;
        let amount_due = (labor_total(&details) * (Decimal::ONE - discount)).round_dp(2);

        let invoice = self
            .finance_repo
            .insert_invoice(&mut *tx, order_id, amount_due, discount, issue_date)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Fatura {} emitida para a ordem {}: uso anual {}, desconto {}, total {}",
            invoice.id,
            order_id,
            usage_count,
            discount,
            amount_due
        );
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tier(number: i32, required: i16, percentage: &str) -> DiscountTier {
        DiscountTier {
            discount_number: number,
            dealership_rif: "J-12345678-9".to_string(),
            discount_percentage: percentage.parse().unwrap(),
            required_annual_service_usage_count: required,
        }
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn sample_tiers() -> Vec<DiscountTier> {
        vec![
            tier(1, 0, "0.00"),
            tier(2, 5, "0.10"),
            tier(3, 10, "0.20"),
        ]
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(4, "0.00")]
    // exatamente no limiar: a faixa de 10% vale, a de 20% ainda não
    #[case(5, "0.10")]
    #[case(9, "0.10")]
    #[case(10, "0.20")]
    #[case(50, "0.20")]
    fn discount_follows_usage_tiers(#[case] usage: i64, #[case] expected: &str) {
        assert_eq!(select_discount(&sample_tiers(), usage), dec(expected));
    }

    #[test]
    fn no_qualifying_tier_means_no_discount() {
        let tiers = vec![tier(1, 5, "0.10")];
        assert_eq!(select_discount(&tiers, 2), Decimal::ZERO);
    }

    #[test]
    fn empty_tier_table_means_no_discount() {
        assert_eq!(select_discount(&[], 99), Decimal::ZERO);
    }

    #[test]
    fn percentage_tie_breaks_on_lowest_tier_number() {
        let tiers = vec![tier(7, 0, "0.15"), tier(2, 0, "0.15"), tier(9, 0, "0.05")];
        let winner = tiers
            .iter()
            .max_by(|a, b| {
                a.discount_percentage
                    .cmp(&b.discount_percentage)
                    .then_with(|| b.discount_number.cmp(&a.discount_number))
            })
            .unwrap();
        assert_eq!(winner.discount_number, 2);
        assert_eq!(select_discount(&tiers, 0), dec("0.15"));
    }

    fn detail(price: &str, hours: &str) -> OrderDetail {
        OrderDetail {
            order_id: 1,
            service_id: 1,
            activity_number: 1,
            price_per_hour: price.parse().unwrap(),
            worked_hours: hours.parse().unwrap(),
        }
    }

    #[test]
    fn labor_total_sums_lines() {
        let details = vec![detail("25.00", "2.0"), detail("40.00", "1.5")];
        assert_eq!(labor_total(&details), dec("110.00"));
    }

    #[test]
    fn order_without_lines_bills_zero() {
        assert_eq!(labor_total(&[]), Decimal::ZERO);
        let amount = (labor_total(&[]) * (Decimal::ONE - dec("0.10"))).round_dp(2);
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn amount_due_applies_discount_fraction() {
        let details = vec![detail("100.00", "1.5")];
        let amount = (labor_total(&details) * (Decimal::ONE - dec("0.10"))).round_dp(2);
        assert_eq!(amount, dec("135.00"));
    }
}
