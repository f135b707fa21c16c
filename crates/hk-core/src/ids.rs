//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as map keys and as
//! direct indices into SoA `Vec`s via `.index()`.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<usize> for $name {
            #[inline(always)]
            fn from(n: usize) -> $name {
                $name(n as $inner)
            }
        }
    };
}

typed_id! {
    /// Dense index of an agent in the follower graph. Max ~4.3 billion agents.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an agent type in the [`Registry`](../hk_types/struct.Registry.html).
    pub struct AgentTypeId(u16);
}
