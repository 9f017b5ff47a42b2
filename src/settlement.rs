use crate::{Outcome, Role};
use serde::{Deserialize, Serialize};

/// Balances and wagers, in whole chips.
pub type Chips = i64;

/// Largest starting balance a table accepts. Two of them still fit in a `Chips`.
pub const MAX_BALANCE: Chips = Chips::MAX / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallets {
    pub player: Chips,
    pub dealer: Chips,
}

impl Wallets {
    pub fn new(player: Chips, dealer: Chips) -> Self {
        Self { player, dealer }
    }

    pub fn balance(&self, role: Role) -> Chips {
        match role {
            Role::Player => self.player,
            Role::Dealer => self.dealer,
        }
    }

    pub fn total(&self) -> i128 {
        i128::from(self.player) + i128::from(self.dealer)
    }
}

/// Even-money settlement: the loser pays the wager to the winner, a push moves nothing.
///
/// The wager must already have passed `Session::validate_wager`, which keeps both
/// sides of the transfer in range.
pub fn settle(outcome: Outcome, wager: Chips, wallets: Wallets) -> Wallets {
    match outcome.winner() {
        Some(Role::Player) => Wallets {
            player: wallets.player + wager,
            dealer: wallets.dealer - wager,
        },
        Some(Role::Dealer) => Wallets {
            player: wallets.player - wager,
            dealer: wallets.dealer + wager,
        },
        None => wallets,
    }
}
