use sdk::cosmwasm_std::{Int128, Uint128};

/// A signed change of a non-negative amount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Increase(Uint128),
    Decrease(Uint128),
    Unchanged,
}

impl Change {
    /// The amount after the change, `None` if it would go below zero or overflow
    pub fn apply(self, amount: Uint128) -> Option<Uint128> {
        match self {
            Self::Increase(by) => amount.checked_add(by).ok(),
            Self::Decrease(by) => amount.checked_sub(by).ok(),
            Self::Unchanged => Some(amount),
        }
    }

    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl From<Int128> for Change {
    fn from(delta: Int128) -> Self {
        let magnitude = Uint128::new(delta.i128().unsigned_abs());
        if delta.is_zero() {
            Self::Unchanged
        } else if delta.is_negative() {
            Self::Decrease(magnitude)
        } else {
            Self::Increase(magnitude)
        }
    }
}
