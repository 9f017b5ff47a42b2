use crate::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score that is not a bust.
pub const BUST_LIMIT: u16 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Dealer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => write!(f, "player"),
            Role::Dealer => write!(f, "dealer"),
        }
    }
}

/// Calculate the value of a blackjack hand.
///
/// Aces start at 11 and drop to 1 one at a time, only while the total is over 21.
pub fn calculate_hand_value(cards: &[Card]) -> u16 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    while total > BUST_LIMIT && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > BUST_LIMIT
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn value(&self) -> u16 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "{}", labels.join(", "))
    }
}
