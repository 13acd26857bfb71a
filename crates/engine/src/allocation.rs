//! Money allocation: turns a total and a [`SplitDefinition`] into owed
//! amounts that sum **exactly** to the total.
//!
//! Amounts are integer cents, proportions are computed with [`Decimal`].
//!
//! ## Rounding policy
//!
//! Naive per-participant rounding can leave the allocation one cent off the
//! total. Instead:
//!
//! 1. every participant except the *remainder recipient* receives its exact
//!    proportional value `total * weight / sum(weights)`, truncated to the cent;
//! 2. the remainder recipient receives `total - sum(others)`.
//!
//! The recipient is chosen by [`RemainderPolicy`].
//!
//! ## Equal splits
//!
//! When every charged participant has the same effective percentage (within
//! [`EQUAL_WEIGHT_TOLERANCE`], exclusive), the total is divided into equal cents
//! and the leftover cents are handed out one at a time: first to the remainder
//! recipient, then walking backwards through the iteration order. `10.00` split
//! three ways gives `3.33, 3.33, 3.34`.

use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{EngineError, Money, ParticipantId, ResultEngine, SplitDefinition};

/// Effective percentages closer than this are considered equal.
pub const EQUAL_WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Ordered participant → owed amount mapping. Zero-weight participants are
/// never present.
pub type Allocation = IndexMap<ParticipantId, Money>;

/// Who absorbs the rounding residual of an allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// The last charged participant in iteration order.
    #[default]
    LastParticipant,
    /// The payer of the expense, when the payer is charged; otherwise the last
    /// charged participant.
    Payer,
}

impl RemainderPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastParticipant => "last",
            Self::Payer => "payer",
        }
    }
}

impl TryFrom<&str> for RemainderPolicy {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last" | "last_participant" => Ok(Self::LastParticipant),
            "payer" => Ok(Self::Payer),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown remainder policy: {other}"
            ))),
        }
    }
}

/// Allocates `total` according to `split`, the last charged participant
/// absorbing the remainder.
///
/// # Examples
///
/// ```rust
/// use engine::{Money, create_equal_split, allocate};
///
/// let split = create_equal_split(["a", "b", "c"]).unwrap();
/// let owed = allocate(Money::new(10_00), &split).unwrap();
/// let cents: Vec<i64> = owed.values().map(|m| m.cents()).collect();
/// assert_eq!(cents, vec![333, 333, 334]);
/// ```
pub fn allocate(total: Money, split: &SplitDefinition) -> ResultEngine<Allocation> {
    allocate_with_policy(total, split, RemainderPolicy::LastParticipant, None)
}

/// Allocates `total` according to `split` using an explicit remainder policy.
///
/// `payer` is only consulted by [`RemainderPolicy::Payer`].
pub fn allocate_with_policy(
    total: Money,
    split: &SplitDefinition,
    policy: RemainderPolicy,
    payer: Option<&ParticipantId>,
) -> ResultEngine<Allocation> {
    split.validate()?;
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "cannot allocate a negative total ({total})"
        )));
    }

    let charged: Vec<(&ParticipantId, Decimal)> = split
        .weights()
        .iter()
        .filter(|(_, weight)| !weight.is_zero())
        .map(|(participant, weight)| (participant, *weight))
        .collect();
    // Validation guarantees at least one positive weight.
    let last = charged.len() - 1;
    let recipient = match (policy, payer) {
        (RemainderPolicy::Payer, Some(payer)) => charged
            .iter()
            .position(|(participant, _)| *participant == payer)
            .unwrap_or(last),
        _ => last,
    };

    let weight_total: Decimal = charged.iter().map(|(_, weight)| *weight).sum();
    let cents = if weights_are_equal(&charged, weight_total) {
        equal_cents(total, charged.len(), recipient)
    } else {
        proportional_cents(total, &charged, weight_total, recipient)?
    };

    Ok(charged
        .into_iter()
        .zip(cents)
        .map(|((participant, _), amount)| (participant.clone(), Money::new(amount)))
        .collect())
}

/// Returns `true` when every effective percentage lies within
/// [`EQUAL_WEIGHT_TOLERANCE`] of the others.
fn weights_are_equal(charged: &[(&ParticipantId, Decimal)], weight_total: Decimal) -> bool {
    let percentages: Option<Vec<Decimal>> = charged
        .iter()
        .map(|(_, weight)| {
            weight
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(weight_total))
        })
        .collect();
    let Some(percentages) = percentages else {
        return false;
    };
    let (Some(min), Some(max)) = (percentages.iter().min(), percentages.iter().max()) else {
        return false;
    };
    *max - *min < EQUAL_WEIGHT_TOLERANCE
}

/// Equal division in cents; leftover cents go to `recipient` first, then
/// backwards through the order (wrapping around).
fn equal_cents(total: Money, count: usize, recipient: usize) -> Vec<i64> {
    let count_i64 = count as i64;
    let base = total.cents() / count_i64;
    let leftover = (total.cents() % count_i64) as usize;

    let mut cents = vec![base; count];
    for step in 0..leftover {
        let idx = (recipient + count - step) % count;
        cents[idx] += 1;
    }
    cents
}

/// Truncated proportional shares; `recipient` absorbs the residual.
fn proportional_cents(
    total: Money,
    charged: &[(&ParticipantId, Decimal)],
    weight_total: Decimal,
    recipient: usize,
) -> ResultEngine<Vec<i64>> {
    let total_dec = Decimal::from(total.cents());
    let mut cents = Vec::with_capacity(charged.len());
    let mut assigned: i64 = 0;

    for (idx, (participant, weight)) in charged.iter().enumerate() {
        if idx == recipient {
            cents.push(0);
            continue;
        }
        let share = total_dec
            .checked_mul(*weight)
            .and_then(|scaled| scaled.checked_div(weight_total))
            .and_then(|exact| exact.trunc().to_i64())
            .ok_or_else(|| {
                EngineError::InvalidAmount(format!(
                    "share of '{participant}' overflows for total {total}"
                ))
            })?;
        assigned += share;
        cents.push(share);
    }

    cents[recipient] = total.cents() - assigned;
    Ok(cents)
}
