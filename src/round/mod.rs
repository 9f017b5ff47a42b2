use crate::settlement::{self, Chips, Wallets};
use crate::{Card, GameError, Hand, Pool, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The dealer keeps drawing while below this score. Soft and hard 17 are treated alike.
pub const DEALER_STANDS_ON: u16 = 17;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Dealing,
    PlayerTurn,
    DealerTurn,
    /// Outcome known, balances not yet adjusted
    Resolved,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBusted,
    DealerBusted,
    PlayerWins,
    DealerWins,
    Push,
}

/// Result colouring from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn winner(&self) -> Option<Role> {
        match self {
            Outcome::PlayerBusted | Outcome::DealerWins => Some(Role::Dealer),
            Outcome::DealerBusted | Outcome::PlayerWins => Some(Role::Player),
            Outcome::Push => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerBusted => "You Busted! Dealer Wins!",
            Outcome::DealerBusted => "Dealer Busted! You Win!",
            Outcome::PlayerWins => "You Win!",
            Outcome::DealerWins => "Dealer Wins!",
            Outcome::Push => "It's a Tie!",
        }
    }

    pub fn tone(&self) -> Tone {
        match self.winner() {
            Some(Role::Player) => Tone::Win,
            Some(Role::Dealer) => Tone::Lose,
            None => Tone::Tie,
        }
    }
}

/// Classify final scores. A player bust wins for the dealer before the dealer's
/// score is looked at.
pub fn classify(player_score: u16, dealer_score: u16) -> Outcome {
    if player_score > crate::BUST_LIMIT {
        Outcome::PlayerBusted
    } else if dealer_score > crate::BUST_LIMIT {
        Outcome::DealerBusted
    } else if player_score > dealer_score {
        Outcome::PlayerWins
    } else if player_score < dealer_score {
        Outcome::DealerWins
    } else {
        Outcome::Push
    }
}

/// One hand of blackjack: the pool it is dealt from, both hands and the wager.
#[derive(Debug, Clone)]
pub struct Round {
    pool: Pool,
    player: Hand,
    dealer: Hand,
    wager: Chips,
    phase: GamePhase,
    outcome: Option<Outcome>,
}

impl Round {
    /// Deal two cards to the player, then two to the dealer, and hand the turn to the player.
    pub fn deal(pool: Pool, wager: Chips) -> Result<Self, GameError> {
        let mut round = Self {
            pool,
            player: Hand::new(),
            dealer: Hand::new(),
            wager,
            phase: GamePhase::Dealing,
            outcome: None,
        };

        for role in [Role::Player, Role::Player, Role::Dealer, Role::Dealer] {
            round.draw_into(role)?;
        }

        round.phase = GamePhase::PlayerTurn;
        log::info!(
            "Dealt round for {}: player {} ({}), dealer {} ({})",
            wager,
            round.player,
            round.player.value(),
            round.dealer,
            round.dealer.value()
        );
        Ok(round)
    }

    /// Player draws one card. Busting resolves the round on the spot.
    pub fn hit(&mut self) -> Result<GamePhase, GameError> {
        self.ensure_player_turn(Action::Hit)?;

        self.draw_into(Role::Player)?;
        if self.player.is_busted() {
            self.resolve();
        }
        Ok(self.phase)
    }

    /// Player stands; the dealer plays out its hand and the round resolves.
    pub fn stand(&mut self) -> Result<GamePhase, GameError> {
        self.ensure_player_turn(Action::Stand)?;

        self.phase = GamePhase::DealerTurn;
        self.play_dealer()?;
        Ok(self.phase)
    }

    /// Apply the outcome to `wallets`. Returns `None` unless the round is resolved
    /// and not yet settled, so a round can only pay out once.
    pub fn settle(&mut self, wallets: Wallets) -> Option<Wallets> {
        if self.phase != GamePhase::Resolved {
            return None;
        }
        let outcome = self.outcome?;
        let updated = settlement::settle(outcome, self.wager, wallets);
        self.phase = GamePhase::Settled;
        log::info!(
            "Settled {:?} for {}: player {} -> {}, dealer {} -> {}",
            outcome,
            self.wager,
            wallets.player,
            updated.player,
            wallets.dealer,
            updated.dealer
        );
        Some(updated)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn wager(&self) -> Chips {
        self.wager
    }

    pub fn current_turn(&self) -> Option<Role> {
        match self.phase {
            GamePhase::PlayerTurn => Some(Role::Player),
            GamePhase::DealerTurn => Some(Role::Dealer),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Resolved | GamePhase::Settled)
    }

    pub fn hand(&self, role: Role) -> &Hand {
        match role {
            Role::Player => &self.player,
            Role::Dealer => &self.dealer,
        }
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> u16 {
        self.player.value()
    }

    pub fn dealer_score(&self) -> u16 {
        self.dealer.value()
    }

    pub fn cards_remaining(&self) -> usize {
        self.pool.len()
    }

    fn ensure_player_turn(&self, action: Action) -> Result<(), GameError> {
        if self.phase == GamePhase::PlayerTurn {
            Ok(())
        } else {
            Err(GameError::IllegalAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn draw_into(&mut self, role: Role) -> Result<Card, GameError> {
        let card = self.pool.draw()?;
        let hand = match role {
            Role::Player => &mut self.player,
            Role::Dealer => &mut self.dealer,
        };
        hand.add_card(card);
        log::debug!("{role} draws {card}, score {}", hand.value());
        Ok(card)
    }

    // Terminates: each card raises the raw total and each Ace can be reduced only once.
    fn play_dealer(&mut self) -> Result<(), GameError> {
        while self.dealer.value() < DEALER_STANDS_ON {
            self.draw_into(Role::Dealer)?;
        }
        log::debug!("Dealer finishes on {}", self.dealer.value());
        self.resolve();
        Ok(())
    }

    fn resolve(&mut self) {
        let outcome = classify(self.player.value(), self.dealer.value());
        self.outcome = Some(outcome);
        self.phase = GamePhase::Resolved;
        log::info!(
            "Round resolved: {:?} (player {}, dealer {})",
            outcome,
            self.player.value(),
            self.dealer.value()
        );
    }
}
