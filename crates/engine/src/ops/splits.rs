use crate::{
    Allocation, Money, ParticipantId, ResultEngine, SplitDefinition, allocation, split,
};

use super::Engine;

impl Engine {
    /// Allocates `total` according to `split`.
    ///
    /// The result sums exactly to `total`; the last charged participant
    /// absorbs the rounding residual. See [`allocate`](crate::allocate).
    pub fn allocate(&self, total: Money, split: &SplitDefinition) -> ResultEngine<Allocation> {
        allocation::allocate(total, split)
    }

    /// Allocates the amount of an expense paid by `payer`, honouring the
    /// configured [`RemainderPolicy`](crate::RemainderPolicy).
    pub(crate) fn allocate_for_payer(
        &self,
        total: Money,
        split: &SplitDefinition,
        payer: &ParticipantId,
    ) -> ResultEngine<Allocation> {
        allocation::allocate_with_policy(total, split, self.remainder_policy, Some(payer))
    }

    /// Checks a split definition, returning
    /// [`SplitInvalid`](crate::EngineError::SplitInvalid) when broken.
    pub fn validate_split(&self, split: &SplitDefinition) -> ResultEngine<()> {
        split.validate()
    }

    /// Builds a split charging every participant the same amount.
    pub fn create_equal_split<I, P>(&self, participants: I) -> ResultEngine<SplitDefinition>
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        split::create_equal_split(participants)
    }
}
