//! Combinable decimal accumulator (sum, min, max, count)
//!
//! `DecimalStatistics` is folded over a window's amounts on every membership
//! change. `combine` is associative and commutative, so partial accumulators
//! built over disjoint slices can be merged in any order.
//!
//! Positive and negative amounts are summed separately. Each bucket only
//! grows in magnitude as values are added, so if a set of amounts folds
//! without overflow, every subset of it does too (eviction never overflows).

use super::error::AggregateOverflow;
use super::types::Statistics;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits used when presenting amounts
pub const PRESENTATION_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalStatistics {
    positive: Decimal,
    negative: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
    count: u64,
}

impl DecimalStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every amount, failing on the first one that would overflow
    pub fn from_amounts<I>(amounts: I) -> Result<Self, AggregateOverflow>
    where
        I: IntoIterator<Item = Decimal>,
    {
        let mut stats = Self::new();
        for amount in amounts {
            stats.accept(amount)?;
        }
        Ok(stats)
    }

    /// Fold a single value into the accumulator
    ///
    /// On overflow the accumulator is left unchanged.
    pub fn accept(&mut self, value: Decimal) -> Result<(), AggregateOverflow> {
        let overflow = AggregateOverflow { amount: value };
        let mut next = *self;

        if value.is_sign_negative() {
            next.negative = self.negative.checked_add(value).ok_or(overflow)?;
        } else {
            next.positive = self.positive.checked_add(value).ok_or(overflow)?;
        }
        next.count = self.count.checked_add(1).ok_or(overflow)?;
        next.min = Some(self.min.map_or(value, |min| min.min(value)));
        next.max = Some(self.max.map_or(value, |max| max.max(value)));

        *self = next;
        Ok(())
    }

    /// Merge another accumulator into this one
    pub fn combine(self, other: Self) -> Result<Self, AggregateOverflow> {
        if other.count == 0 {
            return Ok(self);
        }
        if self.count == 0 {
            return Ok(other);
        }

        let overflow = AggregateOverflow {
            amount: other.sum(),
        };
        Ok(Self {
            positive: self.positive.checked_add(other.positive).ok_or(overflow)?,
            negative: self.negative.checked_add(other.negative).ok_or(overflow)?,
            min: pick(self.min, other.min, |a, b| a.min(b)),
            max: pick(self.max, other.max, |a, b| a.max(b)),
            count: self.count.checked_add(other.count).ok_or(overflow)?,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Net sum; buckets have opposite signs, so this cannot overflow
    pub fn sum(&self) -> Decimal {
        self.positive + self.negative
    }

    pub fn min(&self) -> Option<Decimal> {
        self.min
    }

    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    /// Mean of the accepted values at full decimal precision
    ///
    /// With fewer than two values the sum is returned as-is (zero when empty).
    pub fn average(&self) -> Decimal {
        if self.count < 2 {
            self.sum()
        } else {
            self.sum() / Decimal::from(self.count)
        }
    }

    /// Render the presentation snapshot (2dp, half-up)
    pub fn to_statistics(&self) -> Statistics {
        Statistics {
            sum: format_amount(self.sum()),
            avg: format_amount(self.average()),
            max: format_amount(self.max.unwrap_or(Decimal::ZERO)),
            min: format_amount(self.min.unwrap_or(Decimal::ZERO)),
            count: self.count,
        }
    }
}

fn pick(
    a: Option<Decimal>,
    b: Option<Decimal>,
    choose: fn(Decimal, Decimal) -> Decimal,
) -> Option<Decimal> {
    match (a, b) {
        (Some(a), Some(b)) => Some(choose(a, b)),
        (a, b) => a.or(b),
    }
}

/// Round half-up to two places and pad to exactly two fractional digits
pub fn format_amount(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(PRESENTATION_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(PRESENTATION_SCALE);
    rounded.to_string()
}
