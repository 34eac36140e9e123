//! Residual amount and residual duration of a mortgage after a single period.
//!
//! Every function here is pure: the running state of a schedule lives in the
//! [`MortgageResidual`] the caller threads from one period to the next.

use log::{debug, trace};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::error::{ResidualError, ResidualResult};
use crate::{InputData, MortgageResidual, Rate, RateAmounts, RateType, calculate_q};

/// Decimal places kept for the annuity ratio before taking its logarithm.
const RATIO_SCALE: u32 = 10;

/// Calculates the residual after the first period of the schedule.
///
/// A loan with a zero amount has nothing to repay and yields a paid-off residual.
///
/// # Errors
///
/// Returns a [`ResidualError`] when an overpayment forces a duration recompute
/// that the loan terms cannot satisfy.
pub fn calculate_initial(
    rate_amounts: &RateAmounts,
    input_data: &InputData,
) -> ResidualResult<MortgageResidual> {
    if input_data.amount.is_zero() {
        debug!("Loan amount is zero, nothing to amortize");
        return Ok(MortgageResidual::paid_off());
    }

    calculate(
        input_data.amount,
        input_data.months_duration_decimal(),
        rate_amounts,
        input_data,
    )
}

/// Calculates the residual after any period following the first one.
///
/// Once the previous residual amount is zero the loan is repaid, and every
/// further call yields `(0, 0)` whatever the rate amounts are.
///
/// # Errors
///
/// Same as [`calculate_initial`].
pub fn calculate_next(
    rate_amounts: &RateAmounts,
    input_data: &InputData,
    previous_rate: &Rate,
) -> ResidualResult<MortgageResidual> {
    let previous = &previous_rate.mortgage_residual;

    if previous.is_paid_off() {
        debug!("Loan repaid by rate {}, residual stays at zero", previous_rate.rate_number);
        return Ok(MortgageResidual::paid_off());
    }

    calculate(
        previous.residual_amount,
        previous.residual_duration,
        rate_amounts,
        input_data,
    )
}

fn calculate(
    prior_amount: Decimal,
    prior_duration: Decimal,
    rate_amounts: &RateAmounts,
    input_data: &InputData,
) -> ResidualResult<MortgageResidual> {
    let residual_amount = calculate_residual_amount(prior_amount, rate_amounts);
    let residual_duration =
        calculate_residual_duration(input_data, residual_amount, prior_duration, rate_amounts)?;

    Ok(MortgageResidual::new(residual_amount, residual_duration))
}

/// Subtracts the capital portion and the overpayment from the prior amount.
///
/// The result is floored at zero so rounding drift at payoff never leaves a
/// negative principal.
pub fn calculate_residual_amount(prior_amount: Decimal, rate_amounts: &RateAmounts) -> Decimal {
    (prior_amount - rate_amounts.capital_amount - rate_amounts.overpayment.amount).max(Decimal::ZERO)
}

/// Calculates how many installments remain after the period.
///
/// Without an overpayment the previous duration is decremented by one. This is
/// not clamped at zero: the schedule generator is expected to stop once the
/// residual amount reaches zero.
///
/// # Errors
///
/// Propagates the errors of [`calculate_constant_residual_duration`] and
/// [`calculate_decreasing_residual_duration`].
pub fn calculate_residual_duration(
    input_data: &InputData,
    residual_amount: Decimal,
    previous_residual_duration: Decimal,
    rate_amounts: &RateAmounts,
) -> ResidualResult<Decimal> {
    if rate_amounts.overpayment.amount > Decimal::ZERO {
        debug!(
            "Overpayment of {} on a {:?} rate, recalculating duration for residual {}",
            rate_amounts.overpayment.amount, input_data.rate_type, residual_amount
        );
        match input_data.rate_type {
            RateType::Constant => {
                calculate_constant_residual_duration(input_data, residual_amount, rate_amounts)
            }
            RateType::Decreasing => {
                calculate_decreasing_residual_duration(residual_amount, rate_amounts)
            }
        }
    } else {
        Ok(previous_residual_duration - Decimal::ONE)
    }
}

/// Number of fixed capital portions needed to cover the residual amount.
///
/// A partial last portion still takes a whole installment, so the quotient is
/// rounded up.
///
/// # Errors
///
/// Returns [`ResidualError::ZeroCapitalAmount`] if the capital portion is zero.
pub fn calculate_decreasing_residual_duration(
    residual_amount: Decimal,
    rate_amounts: &RateAmounts,
) -> ResidualResult<Decimal> {
    residual_amount
        .checked_div(rate_amounts.capital_amount)
        .map(|installments| installments.ceil())
        .ok_or(ResidualError::ZeroCapitalAmount)
}

/// Number of constant installments needed to amortize the residual amount.
///
/// Solves the annuity relation for `n`:
///
/// `n = log_q(R / (R - S * (q - 1)))`
///
/// where `R` is the installment, `S` the residual amount and `q` the monthly
/// growth factor. The ratio is rounded half-up to ten places before the
/// logarithms are taken, and `n` is rounded up to a whole installment.
///
/// # Errors
///
/// * [`ResidualError::NeutralGrowthFactor`] if `q` is exactly one.
/// * [`ResidualError::UnamortizableResidual`] if the installment does not
///   exceed the interest accrued on the residual.
pub fn calculate_constant_residual_duration(
    input_data: &InputData,
    residual_amount: Decimal,
    rate_amounts: &RateAmounts,
) -> ResidualResult<Decimal> {
    let q = calculate_q(input_data.interest_rate());
    if q == Decimal::ONE {
        return Err(ResidualError::NeutralGrowthFactor);
    }

    let rate_amount = rate_amounts.rate_amount;
    let unamortizable = || ResidualError::UnamortizableResidual {
        rate_amount,
        residual_amount,
        q,
    };

    let x_denominator = rate_amount - residual_amount * (q - Decimal::ONE);
    if x_denominator <= Decimal::ZERO {
        return Err(unamortizable());
    }

    let x = (rate_amount / x_denominator)
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // x and q are both positive here, so the logarithms only fail on overflow.
    let log_x = x.checked_ln().ok_or_else(unamortizable)?;
    let log_q = q.checked_ln().ok_or_else(unamortizable)?;
    trace!("q = {}, x = {}, ln(x) = {}, ln(q) = {}", q, x, log_x, log_q);

    log_x
        .checked_div(log_q)
        .map(|installments| installments.ceil())
        .ok_or_else(unamortizable)
}
