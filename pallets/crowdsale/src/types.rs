//! Sale phases, settlement outcomes and the purchase arithmetic.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Branch chosen when the sale is finalized.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    Clone,
    Copy,
    PartialEq,
    Eq,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum Settlement {
    /// Soft cap reached; funds stay with the sale, no refunds.
    Success,
    /// Soft cap missed; contributors may reclaim their payment.
    Failure,
}

/// Where the sale stands at a given instant.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum SalePhase {
    Pending,
    Active,
    /// Window closed but not finalized yet.
    Ended,
    SettledSuccess,
    SettledFailure,
}

impl SalePhase {
    pub fn at(now: u64, start: u64, end: u64, outcome: Option<Settlement>) -> Self {
        match outcome {
            Some(Settlement::Success) => SalePhase::SettledSuccess,
            Some(Settlement::Failure) => SalePhase::SettledFailure,
            None if now < start => SalePhase::Pending,
            None if now <= end => SalePhase::Active,
            None => SalePhase::Ended,
        }
    }
}

/// What a purchase actually settles to after the hard cap is applied.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub struct Purchase {
    pub tokens: u128,
    /// Payment kept by the sale.
    pub value: u128,
    /// Payment handed back to the payer.
    pub refund: u128,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum QuoteError {
    Overflow,
    /// No tokens left under the hard cap.
    CapReached,
}

/// Price `value` at `rate`, clamping the grant to the headroom under `hard_cap`.
///
/// A clamped purchase keeps `headroom / rate` (rounded down) and refunds the rest,
/// so `sold + tokens` never exceeds `hard_cap`.
pub fn quote(value: u128, rate: u128, sold: u128, hard_cap: u128) -> Result<Purchase, QuoteError> {
    let requested = value.checked_mul(rate).ok_or(QuoteError::Overflow)?;
    let headroom = hard_cap.saturating_sub(sold);
    if headroom == 0 {
        return Err(QuoteError::CapReached);
    }
    if requested <= headroom {
        return Ok(Purchase { tokens: requested, value, refund: 0 });
    }

    let kept = headroom.checked_div(rate).ok_or(QuoteError::Overflow)?;
    Ok(Purchase { tokens: headroom, value: kept, refund: value - kept })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_within_headroom_is_exact() {
        assert_eq!(
            quote(20, 10, 0, 10_000),
            Ok(Purchase { tokens: 200, value: 20, refund: 0 })
        );
        // Landing exactly on the cap is not clamped
        assert_eq!(
            quote(10, 10, 9_900, 10_000),
            Ok(Purchase { tokens: 100, value: 10, refund: 0 })
        );
    }

    #[test]
    fn quote_clamps_to_hard_cap() {
        assert_eq!(
            quote(20, 10, 9_900, 10_000),
            Ok(Purchase { tokens: 100, value: 10, refund: 10 })
        );
    }

    #[test]
    fn clamped_value_rounds_down() {
        // 95 tokens left at rate 10: 9 units kept, 91 refunded
        assert_eq!(
            quote(100, 10, 9_905, 10_000),
            Ok(Purchase { tokens: 95, value: 9, refund: 91 })
        );
    }

    #[test]
    fn quote_fails_once_cap_is_reached() {
        assert_eq!(quote(1, 10, 10_000, 10_000), Err(QuoteError::CapReached));
    }

    #[test]
    fn quote_detects_overflow() {
        assert_eq!(quote(u128::MAX, 2, 0, u128::MAX), Err(QuoteError::Overflow));
    }

    #[test]
    fn phase_follows_clock_and_outcome() {
        assert_eq!(SalePhase::at(9, 10, 20, None), SalePhase::Pending);
        assert_eq!(SalePhase::at(10, 10, 20, None), SalePhase::Active);
        assert_eq!(SalePhase::at(20, 10, 20, None), SalePhase::Active);
        assert_eq!(SalePhase::at(21, 10, 20, None), SalePhase::Ended);
        assert_eq!(SalePhase::at(21, 10, 20, Some(Settlement::Failure)), SalePhase::SettledFailure);
        assert_eq!(SalePhase::at(99, 10, 20, Some(Settlement::Success)), SalePhase::SettledSuccess);
    }
}
