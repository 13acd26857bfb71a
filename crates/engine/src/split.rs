//! Split definitions: how one expense is divided among participants.
//!
//! Two weight systems exist and are mutually exclusive per expense:
//!
//! - [`SplitDefinition::Percentage`]: weights are percentages that must sum to
//!   100 (within [`SPLIT_SUM_TOLERANCE`]).
//! - [`SplitDefinition::Shares`]: weights are shares; a participant's effective
//!   percentage is `weight / sum(weights)`.
//!
//! In both systems a weight of 0 means "excluded but tracked": the participant
//! owes nothing but is still part of the split (e.g. the payer of an expense
//! they do not consume).
//!
//! Weights keep the insertion order of the caller. That order is the
//! deterministic iteration order every allocation policy relies on.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{EngineError, ParticipantId, ResultEngine};

/// Percentage weights may deviate from 100 by at most this much (inclusive).
pub const SPLIT_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Ordered participant → weight mapping.
pub type Weights = IndexMap<ParticipantId, Decimal>;

/// How one expense is divided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitDefinition {
    Percentage(Weights),
    Shares(Weights),
}

impl SplitDefinition {
    /// Builds a percentage split from `(participant, percentage)` pairs.
    pub fn percentage<I, P>(weights: I) -> Self
    where
        I: IntoIterator<Item = (P, Decimal)>,
        P: Into<ParticipantId>,
    {
        Self::Percentage(weights.into_iter().map(|(p, w)| (p.into(), w)).collect())
    }

    /// Builds a share split from `(participant, shares)` pairs.
    pub fn shares<I, P>(weights: I) -> Self
    where
        I: IntoIterator<Item = (P, Decimal)>,
        P: Into<ParticipantId>,
    {
        Self::Shares(weights.into_iter().map(|(p, w)| (p.into(), w)).collect())
    }

    /// Raw weights, in iteration order.
    #[must_use]
    pub fn weights(&self) -> &Weights {
        match self {
            Self::Percentage(weights) | Self::Shares(weights) => weights,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights().is_empty()
    }

    /// Returns `true` if the participant is part of the split, even with a
    /// zero weight.
    #[must_use]
    pub fn contains(&self, participant: &str) -> bool {
        self.weights().contains_key(participant)
    }

    /// Weight of a participant, `None` when not part of the split.
    #[must_use]
    pub fn weight_of(&self, participant: &str) -> Option<Decimal> {
        self.weights().get(participant).copied()
    }

    /// Returns `true` if the participant owes a part of the expense.
    #[must_use]
    pub fn is_charged(&self, participant: &str) -> bool {
        self.weight_of(participant).is_some_and(|w| !w.is_zero())
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> Decimal {
        self.weights().values().copied().sum()
    }

    /// Checks the split invariants.
    ///
    /// - the split must not be empty
    /// - weights must be non-negative
    /// - percentages must sum to 100 within [`SPLIT_SUM_TOLERANCE`]
    /// - shares must not sum to 0
    pub fn validate(&self) -> ResultEngine<()> {
        let weights = self.weights();
        if weights.is_empty() {
            return Err(EngineError::SplitInvalid(
                "split definition must not be empty".to_string(),
            ));
        }
        if let Some((participant, weight)) = weights
            .iter()
            .find(|(_, w)| w.is_sign_negative() && !w.is_zero())
        {
            return Err(EngineError::SplitInvalid(format!(
                "negative weight {weight} for participant '{participant}'"
            )));
        }

        let total = self.total_weight();
        match self {
            Self::Percentage(_) => {
                if (total - Decimal::ONE_HUNDRED).abs() > SPLIT_SUM_TOLERANCE {
                    return Err(EngineError::SplitInvalid(format!(
                        "percentages must sum to 100, got {total}"
                    )));
                }
            }
            Self::Shares(_) => {
                if total.is_zero() {
                    return Err(EngineError::SplitInvalid(
                        "shares must not sum to 0".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Checks the split invariants and that `payer` is part of the split.
    pub fn validate_for_payer(&self, payer: &ParticipantId) -> ResultEngine<()> {
        self.validate()?;
        if !self.contains(payer.as_str()) {
            return Err(EngineError::SplitInvalid(format!(
                "payer '{payer}' is not part of the split"
            )));
        }
        Ok(())
    }

    /// Effective percentage of every participant (`weight / sum * 100`).
    ///
    /// Fails like [`validate`](Self::validate) on an invalid split.
    pub fn effective_percentages(&self) -> ResultEngine<Weights> {
        self.validate()?;
        let total = self.total_weight();
        self.weights()
            .iter()
            .map(|(participant, weight)| {
                weight
                    .checked_mul(Decimal::ONE_HUNDRED)
                    .and_then(|scaled| scaled.checked_div(total))
                    .map(|pct| (participant.clone(), pct.normalize()))
                    .ok_or_else(|| {
                        EngineError::SplitInvalid(format!(
                            "weight of '{participant}' cannot be converted to a percentage"
                        ))
                    })
            })
            .collect()
    }

    /// Converts the split into the equivalent percentage split.
    ///
    /// A share split `{a:1, b:2, c:1}` becomes `{a:25, b:50, c:25}`. A
    /// percentage split is returned unchanged.
    pub fn to_percentages(&self) -> ResultEngine<SplitDefinition> {
        match self {
            Self::Percentage(_) => {
                self.validate()?;
                Ok(self.clone())
            }
            Self::Shares(_) => Ok(Self::Percentage(self.effective_percentages()?)),
        }
    }
}

/// Builds a split charging every participant the same amount.
///
/// The result is a share split with one share each, so it never suffers from
/// percentages like `33.33` that do not divide evenly.
pub fn create_equal_split<I, P>(participants: I) -> ResultEngine<SplitDefinition>
where
    I: IntoIterator<Item = P>,
    P: Into<ParticipantId>,
{
    let mut weights = Weights::new();
    for participant in participants {
        let participant = participant.into();
        if weights.contains_key(&participant) {
            return Err(EngineError::SplitInvalid(format!(
                "participant '{participant}' listed twice"
            )));
        }
        weights.insert(participant, Decimal::ONE);
    }
    if weights.is_empty() {
        return Err(EngineError::SplitInvalid(
            "an equal split needs at least one participant".to_string(),
        ));
    }
    Ok(SplitDefinition::Shares(weights))
}
