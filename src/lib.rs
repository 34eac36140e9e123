//! `mortgage_residual` is a Rust library for recalculating what is left of a mortgage
//! after each installment.
//!
//! A schedule generator calls it once per period with that period's monetary breakdown.
//! It answers two questions:
//! - **Residual amount**: how much principal remains after the capital portion and any
//!   overpayment are applied.
//! - **Residual duration**: how many installments remain. Without an overpayment the
//!   count simply ticks down. With one, it is recomputed from scratch, using the annuity
//!   formula for **constant** rates and a plain division for **decreasing** rates.
//!
//! ## Usage
//!
//! Add `mortgage_residual` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mortgage_residual = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then thread each period's result into the next call:
//!
//! ```rust
//! use mortgage_residual::{
//!     calculate_initial, calculate_next, InputData, Overpayment, Rate, RateAmounts, RateType,
//! };
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let input = InputData {
//!         amount: dec!(100_000),
//!         months_duration: 200,
//!         interest_percent: dec!(6),
//!         rate_type: RateType::Decreasing,
//!     };
//!
//!     let first_amounts = RateAmounts {
//!         rate_amount: dec!(1000),
//!         interest_amount: dec!(500),
//!         capital_amount: dec!(500),
//!         overpayment: Overpayment::none(),
//!     };
//!     let first = calculate_initial(&first_amounts, &input).unwrap();
//!     println!("Residual after period 1: {} ({} left)", first.residual_amount, first.residual_duration);
//!
//!     let previous = Rate {
//!         rate_number: 1,
//!         rate_amounts: first_amounts,
//!         mortgage_residual: first,
//!     };
//!     let second_amounts = RateAmounts {
//!         rate_amount: dec!(997.50),
//!         interest_amount: dec!(497.50),
//!         capital_amount: dec!(500),
//!         overpayment: Overpayment::new(dec!(10_000)),
//!     };
//!
//!     match calculate_next(&second_amounts, &input, &previous) {
//!         Ok(second) => {
//!             println!("Residual after period 2: {}", second.residual_amount);
//!             println!("Installments left:       {}", second.residual_duration);
//!         }
//!         Err(e) => {
//!             eprintln!("Error recalculating residual: {}", e);
//!         }
//!     }
//! }
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod residual;

pub use error::{ResidualError, ResidualResult};
pub use residual::{
    calculate_constant_residual_duration, calculate_decreasing_residual_duration,
    calculate_initial, calculate_next, calculate_residual_amount, calculate_residual_duration,
};

/// Decimal places kept when turning a percentage into a fraction.
const RATE_SCALE: u32 = 4;
/// Decimal places kept for the periodic growth factor.
const Q_SCALE: u32 = 10;
const MONTHS_IN_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// How installments are shaped over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    /// Annuity: the total installment stays fixed, the capital share grows.
    Constant,
    /// Declining balance: the capital share stays fixed, the installment shrinks.
    Decreasing,
}

/// Loan parameters, fixed for the whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    /// The original principal of the loan.
    pub amount: Decimal,
    /// The number of monthly installments the loan was agreed for.
    pub months_duration: u32,
    /// The nominal annual interest rate as a percentage (e.g., 6 for 6%).
    pub interest_percent: Decimal,
    /// Whether installments are constant or decreasing.
    pub rate_type: RateType,
}

impl InputData {
    /// The annual interest rate as a fraction, e.g. `6` becomes `0.06`.
    pub fn interest_rate(&self) -> Decimal {
        (self.interest_percent / PERCENT)
            .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn months_duration_decimal(&self) -> Decimal {
        Decimal::from(self.months_duration)
    }
}

/// A voluntary payment on top of the scheduled installment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overpayment {
    /// Extra principal paid off this period.
    pub amount: Decimal,
}

impl Overpayment {
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// A period without any overpayment.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Monetary breakdown of a single period, computed by the rate calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAmounts {
    /// The total installment paid this period.
    pub rate_amount: Decimal,
    /// The portion of the installment that covers interest.
    pub interest_amount: Decimal,
    /// The portion of the installment that reduces the principal.
    pub capital_amount: Decimal,
    /// Extra principal paid on top of the installment.
    pub overpayment: Overpayment,
}

/// What is left of the loan after a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResidual {
    /// Principal still owed. Never negative.
    pub residual_amount: Decimal,
    /// Installments still needed to pay off the residual amount.
    pub residual_duration: Decimal,
}

impl MortgageResidual {
    pub fn new(residual_amount: Decimal, residual_duration: Decimal) -> Self {
        Self {
            residual_amount,
            residual_duration,
        }
    }

    /// The residual of a loan that is fully repaid.
    pub fn paid_off() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    pub fn is_paid_off(&self) -> bool {
        self.residual_amount.is_zero()
    }
}

/// One period of a schedule, as recorded by the schedule generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// 1-based position of the period in the schedule.
    pub rate_number: u32,
    pub rate_amounts: RateAmounts,
    pub mortgage_residual: MortgageResidual,
}

/// Calculates the monthly growth factor `q = 1 + rate / 12`.
///
/// # Arguments
///
/// * `interest_rate` - The nominal annual interest rate as a fraction (not percentage).
pub fn calculate_q(interest_rate: Decimal) -> Decimal {
    (interest_rate / MONTHS_IN_YEAR)
        .round_dp_with_strategy(Q_SCALE, RoundingStrategy::MidpointAwayFromZero)
        + Decimal::ONE
}
