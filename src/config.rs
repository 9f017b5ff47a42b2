use serde::{Deserialize, Serialize};

use crate::settlement::{Chips, Wallets, MAX_BALANCE};
use crate::GameError;

/// Starting conditions for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub player_balance: Chips,
    pub dealer_balance: Chips,
    /// Wager offered when the front end has none of its own
    pub default_wager: Chips,
    /// Seed for reproducible shuffles; entropy when unset
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            player_balance: 100,
            dealer_balance: 1000,
            default_wager: 10,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_balance < 0 {
            return Err(GameError::InvalidConfig(format!(
                "player balance must not be negative, got {}",
                self.player_balance
            )));
        }
        if self.dealer_balance < 0 {
            return Err(GameError::InvalidConfig(format!(
                "dealer balance must not be negative, got {}",
                self.dealer_balance
            )));
        }
        if self.player_balance > MAX_BALANCE || self.dealer_balance > MAX_BALANCE {
            return Err(GameError::InvalidConfig(format!(
                "balances must not exceed {MAX_BALANCE}"
            )));
        }
        if self.default_wager <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "default wager must be positive, got {}",
                self.default_wager
            )));
        }
        Ok(())
    }

    pub fn wallets(&self) -> Wallets {
        Wallets::new(self.player_balance, self.dealer_balance)
    }
}
