use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::domain::product::ProductId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTrace {
    pub currency: String,
    pub steps: Vec<PricingTraceStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub total: Decimal,
    pub trace: PricingTrace,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, lines: &[CartLine], currency: &str) -> Result<PricingResult, DomainError>;
}

#[derive(Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, lines: &[CartLine], currency: &str) -> Result<PricingResult, DomainError> {
        price_cart_with_trace(lines, currency)
    }
}

pub fn line_amount(
    product_id: ProductId,
    unit_price: Decimal,
    quantity: u32,
) -> Result<Decimal, DomainError> {
    unit_price.checked_mul(Decimal::from(quantity)).ok_or(DomainError::AmountOverflow(product_id))
}

pub fn price_cart(lines: &[CartLine]) -> Result<Decimal, DomainError> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        let amount = line_amount(line.product_id, line.unit_price, line.quantity)?;
        total.checked_add(amount).ok_or(DomainError::AmountOverflow(line.product_id))
    })
}

pub fn price_cart_with_trace(
    lines: &[CartLine],
    currency: &str,
) -> Result<PricingResult, DomainError> {
    let mut steps: Vec<PricingTraceStep> = lines
        .iter()
        .map(|line| PricingTraceStep {
            stage: format!("line:{}", line.product_id),
            detail: format!("{} x {} @ {}", line.name, line.quantity, format_money(line.unit_price)),
            amount: line.line_total,
        })
        .collect();

    let total = price_cart(lines)?;
    steps.push(PricingTraceStep {
        stage: "total".to_string(),
        detail: "sum(unit_price * quantity)".to_string(),
        amount: total,
    });

    Ok(PricingResult { total, trace: PricingTrace { currency: currency.to_string(), steps } })
}

/// Two-decimal display form, e.g. `12.50`. Midpoints round away from zero.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
