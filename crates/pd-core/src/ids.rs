//! Strongly typed identifiers.
//!
//! `AgentId` is a monotonically increasing integer handed out by the agent
//! factory and never reused, so a dead agent's id can never alias a newborn.
//! The inner integer is `pub` so agent storage can index a `Vec` directly via
//! `.index()`.
//!
//! `JobId` is a generational `slotmap` key.  Jobs are created and destroyed
//! every step by churn, so slot reuse matters; the generation counter keeps a
//! stale id from resolving to a replacement job.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id that follows this one.
            #[inline]
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of an agent.  Max ~4.3 billion agents over a run's lifetime.
    pub struct AgentId(u32);
}

slotmap::new_key_type! {
    /// Key of a job slot in the labour market's job pool.
    pub struct JobId;
}
