//! Basis-point payout splitting.
//!
//! ## Rounding Policy
//!
//! Both percentage shares use **floor (round-down)** rounding; the remainder
//! from basis-point division accrues to the beneficiary. The invariant
//! `bounty + tip + beneficiary == balance` holds for every split.

/// Basis-point denominator (1 bp = 0.01%).
pub const HUNDRED_PERCENT_BPS: u32 = 10_000;

/// The three-way division of a custody balance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PayoutSplit {
    pub bounty: i128,
    pub tip: i128,
    pub beneficiary: i128,
}

/// Floored basis-point share of `amount`.
///
/// `share = floor(amount * basis_points / 10_000)`
///
/// Returns `None` on overflow of the widening multiply.
pub fn basis_share(amount: i128, basis_points: u32) -> Option<i128> {
    if basis_points == 0 {
        return Some(0);
    }
    amount
        .checked_mul(basis_points as i128)
        .map(|x| x / HUNDRED_PERCENT_BPS as i128)
}

/// Split `balance` into bounty, tip, and beneficiary portions.
///
/// The beneficiary portion is the subtraction remainder, so it absorbs all
/// rounding. Callers pass `tip_bps == 0` when no tip recipient is
/// configured. Returns `None` on overflow.
pub fn split_balance(balance: i128, bounty_bps: u32, tip_bps: u32) -> Option<PayoutSplit> {
    let bounty = basis_share(balance, bounty_bps)?;
    let tip = basis_share(balance, tip_bps)?;
    let beneficiary = balance.checked_sub(bounty)?.checked_sub(tip)?;
    Some(PayoutSplit {
        bounty,
        tip,
        beneficiary,
    })
}
