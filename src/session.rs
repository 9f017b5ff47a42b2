use serde::{Deserialize, Serialize};
use std::fmt;

use crate::settlement::{Chips, Wallets};
use crate::{
    Action, Card, GameError, GamePhase, Outcome, PoolSource, RandomPools, Round, TableConfig,
    Tone, WagerError,
};

/// Read-only view handed to the presentation layer after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_score: u16,
    pub dealer_score: u16,
    /// `None` before the first round is dealt
    pub phase: Option<GamePhase>,
    pub outcome: Option<Outcome>,
    pub outcome_message: Option<String>,
    pub tone: Option<Tone>,
    pub player_balance: Chips,
    pub dealer_balance: Chips,
    /// Deal control shown and wager input editable
    pub deal_enabled: bool,
    /// Hit and stand available
    pub actions_enabled: bool,
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phase.is_some() {
            writeln!(
                f,
                "Dealer: {} ({})",
                join_cards(&self.dealer_hand),
                self.dealer_score
            )?;
            writeln!(
                f,
                "Player: {} ({})",
                join_cards(&self.player_hand),
                self.player_score
            )?;
        }
        write!(
            f,
            "Wallets: player {}, dealer {}",
            self.player_balance, self.dealer_balance
        )?;
        if let Some(message) = &self.outcome_message {
            write!(f, "\n{message}")?;
        }
        Ok(())
    }
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs consecutive rounds against the dealer and owns both wallets.
///
/// At most one round is held. A finished round stays visible until the next
/// [`Session::start_round`] replaces it.
#[derive(Debug)]
pub struct Session<S = RandomPools> {
    wallets: Wallets,
    pools: S,
    round: Option<Round>,
}

impl Session<RandomPools> {
    pub fn from_config(config: &TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        let pools = match config.seed {
            Some(seed) => RandomPools::from_seed(seed),
            None => RandomPools::from_entropy(),
        };
        Ok(Self::new(config.wallets(), pools))
    }
}

impl<S: PoolSource> Session<S> {
    pub fn new(wallets: Wallets, pools: S) -> Self {
        Self {
            wallets,
            pools,
            round: None,
        }
    }

    pub fn wallets(&self) -> Wallets {
        self.wallets
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_round_in_progress(&self) -> bool {
        self.round.as_ref().is_some_and(|round| !round.is_finished())
    }

    /// Check a wager against both balances without touching any state.
    pub fn validate_wager(&self, wager: Chips) -> Result<(), WagerError> {
        if wager <= 0 {
            return Err(WagerError::NotPositive(wager));
        }
        if wager > self.wallets.player {
            return Err(WagerError::ExceedsPlayerBalance {
                wager,
                balance: self.wallets.player,
            });
        }
        if wager > self.wallets.dealer {
            return Err(WagerError::ExceedsDealerBalance {
                wager,
                balance: self.wallets.dealer,
            });
        }
        // The winner receives the wager; its balance must have room for it.
        for balance in [self.wallets.player, self.wallets.dealer] {
            if balance.checked_add(wager).is_none() {
                return Err(WagerError::ExceedsTableLimit { wager, balance });
            }
        }
        Ok(())
    }

    /// Validate the wager, deal a fresh pool and hand the turn to the player.
    pub fn start_round(&mut self, wager: Chips) -> Result<TableSnapshot, GameError> {
        if self.is_round_in_progress() {
            log::warn!("Refused to deal: round still in progress");
            return Err(GameError::RoundInProgress);
        }
        if let Err(e) = self.validate_wager(wager) {
            log::warn!("Rejected wager: {e}");
            return Err(e.into());
        }

        let pool = self.pools.fresh_pool();
        match Round::deal(pool, wager) {
            Ok(round) => self.round = Some(round),
            Err(e) => {
                self.abort(&e);
                return Err(e);
            }
        }
        Ok(self.snapshot())
    }

    pub fn hit(&mut self) -> Result<TableSnapshot, GameError> {
        self.act(Action::Hit)
    }

    pub fn stand(&mut self) -> Result<TableSnapshot, GameError> {
        self.act(Action::Stand)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let Some(round) = &self.round else {
            return TableSnapshot {
                player_hand: Vec::new(),
                dealer_hand: Vec::new(),
                player_score: 0,
                dealer_score: 0,
                phase: None,
                outcome: None,
                outcome_message: None,
                tone: None,
                player_balance: self.wallets.player,
                dealer_balance: self.wallets.dealer,
                deal_enabled: true,
                actions_enabled: false,
            };
        };

        let outcome = round.outcome();
        TableSnapshot {
            player_hand: round.player_hand().cards.clone(),
            dealer_hand: round.dealer_hand().cards.clone(),
            player_score: round.player_score(),
            dealer_score: round.dealer_score(),
            phase: Some(round.phase()),
            outcome,
            outcome_message: outcome.map(|o| o.message().to_string()),
            tone: outcome.map(|o| o.tone()),
            player_balance: self.wallets.player,
            dealer_balance: self.wallets.dealer,
            deal_enabled: round.is_finished(),
            actions_enabled: round.phase() == GamePhase::PlayerTurn,
        }
    }

    fn act(&mut self, action: Action) -> Result<TableSnapshot, GameError> {
        let Some(round) = self.round.as_mut() else {
            log::warn!("Rejected {action}: no round dealt");
            return Err(GameError::NoActiveRound);
        };

        let result = match action {
            Action::Hit => round.hit(),
            Action::Stand => round.stand(),
        };

        match result {
            Ok(_) => {
                if let Some(wallets) = round.settle(self.wallets) {
                    self.wallets = wallets;
                }
                Ok(self.snapshot())
            }
            Err(GameError::EmptyPool) => {
                self.abort(&GameError::EmptyPool);
                Err(GameError::EmptyPool)
            }
            Err(e) => {
                log::warn!("Rejected {action}: {e}");
                Err(e)
            }
        }
    }

    fn abort(&mut self, error: &GameError) {
        log::error!("Aborting round without settlement: {error}");
        self.round = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pool, Rank, ScriptedPools, Suit};

    fn session_with(pools: Vec<Pool>) -> Session<ScriptedPools> {
        Session::new(Wallets::new(100, 1000), ScriptedPools::new(pools))
    }

    #[test]
    fn test_snapshot_before_first_round() {
        let session = session_with(vec![]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, None);
        assert!(snapshot.deal_enabled);
        assert!(!snapshot.actions_enabled);
        assert_eq!(snapshot.player_balance, 100);
        assert_eq!(snapshot.dealer_balance, 1000);
        assert_eq!(snapshot.to_string(), "Wallets: player 100, dealer 1000");
    }

    #[test]
    fn test_validate_wager_bounds() {
        let session = session_with(vec![]);
        assert_eq!(session.validate_wager(0), Err(WagerError::NotPositive(0)));
        assert_eq!(session.validate_wager(-5), Err(WagerError::NotPositive(-5)));
        assert_eq!(
            session.validate_wager(101),
            Err(WagerError::ExceedsPlayerBalance {
                wager: 101,
                balance: 100
            })
        );
        assert_eq!(session.validate_wager(100), Ok(()));
        assert_eq!(session.validate_wager(1), Ok(()));

        let rich = Session::new(Wallets::new(5000, 1000), ScriptedPools::default());
        assert_eq!(
            rich.validate_wager(1001),
            Err(WagerError::ExceedsDealerBalance {
                wager: 1001,
                balance: 1000
            })
        );
    }

    #[test]
    fn test_wager_that_would_overflow_refused() {
        let mut session = Session::new(
            Wallets::new(Chips::MAX, Chips::MAX),
            ScriptedPools::new(vec![Pool::stacked(&[]).unwrap()]),
        );
        assert_eq!(
            session.start_round(1),
            Err(GameError::Wager(WagerError::ExceedsTableLimit {
                wager: 1,
                balance: Chips::MAX
            }))
        );
        assert!(session.round().is_none());
        assert_eq!(session.wallets(), Wallets::new(Chips::MAX, Chips::MAX));
    }

    #[test]
    fn test_deal_in_progress_refused() {
        let mut session = session_with(vec![
            Pool::stacked(&[]).unwrap(),
            Pool::stacked(&[]).unwrap(),
        ]);
        session.start_round(10).unwrap();
        assert!(session.is_round_in_progress());
        assert_eq!(session.start_round(10), Err(GameError::RoundInProgress));
    }

    #[test]
    fn test_display_shows_outcome() {
        let mut session = session_with(vec![Pool::stacked(&[
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Five, Suit::Hearts),
            Card::new(Rank::Six, Suit::Hearts),
            Card::new(Rank::Two, Suit::Spades),
        ])
        .unwrap()]);
        session.start_round(10).unwrap();
        let snapshot = session.hit().unwrap();
        assert_eq!(
            snapshot.to_string(),
            "Dealer: 5 of Hearts, 6 of Hearts (11)\n\
             Player: 10 of Spades, K of Spades, 2 of Spades (22)\n\
             Wallets: player 90, dealer 1010\n\
             You Busted! Dealer Wins!"
        );
    }
}
