//! Error types for residual recalculation.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for residual recalculation.
pub type ResidualResult<T> = Result<T, ResidualError>;

/// Errors raised when the supplied loan terms cannot amortize the residual.
///
/// Every variant describes an invalid loan configuration. None of them are
/// transient: the same arguments always produce the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResidualError {
    /// The constant installment does not cover the interest accrued on the residual.
    #[error(
        "Invalid loan configuration: installment {rate_amount} cannot amortize residual {residual_amount} at growth factor {q}"
    )]
    UnamortizableResidual {
        /// Constant installment of the period.
        rate_amount: Decimal,
        /// Residual amount left after the period.
        residual_amount: Decimal,
        /// Periodic growth factor.
        q: Decimal,
    },

    /// The periodic growth factor is exactly one, so the annuity logarithm is undefined.
    #[error("Invalid loan configuration: growth factor must differ from 1")]
    NeutralGrowthFactor,

    /// A decreasing loan was recalculated with a zero capital portion.
    #[error("Invalid loan configuration: capital amount cannot be zero for a decreasing rate")]
    ZeroCapitalAmount,
}

impl ResidualError {
    /// Whether the error belongs to the invalid-loan-configuration family.
    pub fn is_invalid_loan_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnamortizableResidual { .. } | Self::NeutralGrowthFactor | Self::ZeroCapitalAmount
        )
    }
}
