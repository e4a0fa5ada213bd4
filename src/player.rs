//! Per-participant state: wallet, board position, jail/bankruptcy flags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub cash: u32,
    pub position: usize,
    pub in_jail: bool,
    pub is_bankrupt: bool,
    pub consecutive_doubles: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, starting_cash: u32, start_position: usize) -> Self {
        Player {
            name: name.into(),
            cash: starting_cash,
            position: start_position,
            in_jail: false,
            is_bankrupt: false,
            consecutive_doubles: 0,
        }
    }

    /// Unconditional increase.
    pub fn credit(&mut self, amount: u32) {
        self.cash += amount;
    }

    /// Decrease cash by `amount` if covered. On failure nothing changes.
    ///
    /// This is the single chokepoint for insufficient-funds detection: every
    /// rent, fee, and tax goes through here, and a `false` return is what
    /// triggers bankruptcy at the call sites that demand payment.
    pub fn debit(&mut self, amount: u32) -> bool {
        if self.cash >= amount {
            self.cash -= amount;
            true
        } else {
            false
        }
    }

    pub fn reset_doubles_streak(&mut self) {
        self.consecutive_doubles = 0;
    }
}
