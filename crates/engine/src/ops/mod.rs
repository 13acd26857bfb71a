use crate::RemainderPolicy;

mod events;
mod expenses;
mod settlements;
mod splits;
mod users;

/// The calculation engine.
///
/// `Engine` only carries immutable configuration: every operation is a pure
/// function of its arguments, so one instance can be shared freely between
/// threads and calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    remainder_policy: RemainderPolicy,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    remainder_policy: RemainderPolicy,
}

impl EngineBuilder {
    /// Pick who absorbs the rounding residual of expense allocations.
    pub fn remainder_policy(mut self, policy: RemainderPolicy) -> EngineBuilder {
        self.remainder_policy = policy;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            remainder_policy: self.remainder_policy,
        }
    }
}
