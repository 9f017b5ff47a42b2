use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::{Card, GameError};

/// Ordered cards of a single deck. Cards are dealt from the end of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Pool {
    cards: Vec<Card>,
}

impl Pool {
    /// A full 52-card pool in a random order.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool = Self {
            cards: Card::standard_set(),
        };
        pool.shuffle(rng);
        pool
    }

    /// Builds a pool from explicit cards, last card dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, GameError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(*card) {
                return Err(GameError::DuplicateCard(*card));
            }
        }
        Ok(Self { cards })
    }

    /// A full pool whose first draws are `top`, in order. The remaining cards
    /// sit underneath in index order.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut cards: Vec<Card> = Card::standard_set()
            .into_iter()
            .filter(|c| !top.contains(c))
            .collect();
        cards.extend(top.iter().rev().copied());
        Self::from_cards(cards)
    }

    /// Fisher-Yates: walk from the last index down, swapping with a uniform pick in `[0, i]`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyPool)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl TryFrom<Vec<Card>> for Pool {
    type Error = GameError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl From<Pool> for Vec<Card> {
    fn from(pool: Pool) -> Self {
        pool.cards
    }
}

/// Supplies a fresh pool for every round.
pub trait PoolSource {
    fn fresh_pool(&mut self) -> Pool;
}

/// Shuffled single-deck pools drawn from a pseudo-random generator.
#[derive(Debug, Clone)]
pub struct RandomPools<R = ChaCha8Rng> {
    rng: R,
}

impl<R: Rng> RandomPools<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPools<ChaCha8Rng> {
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Same seed, same sequence of pools.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PoolSource for RandomPools<R> {
    fn fresh_pool(&mut self) -> Pool {
        Pool::build(&mut self.rng)
    }
}

/// Hands out pre-arranged pools in order, then empty ones.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPools {
    queue: VecDeque<Pool>,
}

impl ScriptedPools {
    pub fn new(pools: impl IntoIterator<Item = Pool>) -> Self {
        Self {
            queue: pools.into_iter().collect(),
        }
    }

    pub fn push(&mut self, pool: Pool) {
        self.queue.push_back(pool);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PoolSource for ScriptedPools {
    fn fresh_pool(&mut self) -> Pool {
        self.queue.pop_front().unwrap_or(Pool { cards: Vec::new() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn sorted(cards: &[Card]) -> Vec<usize> {
        let mut indices: Vec<usize> = cards.iter().map(Card::index).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_build_is_permutation_of_standard_set() {
        let canonical: Vec<usize> = (0..52).collect();
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pool = Pool::build(&mut rng);
            assert_eq!(pool.len(), 52);
            assert_eq!(sorted(pool.cards()), canonical);
        }
    }

    #[test]
    fn test_shuffle_changes_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pool = Pool::build(&mut rng);
        assert_ne!(pool.cards(), Card::standard_set().as_slice());
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Ace of Spades is the last canonical card; it should land everywhere.
        let target = Card::new(Rank::Ace, Suit::Spades);
        let mut positions = HashSet::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..2_000 {
            let pool = Pool::build(&mut rng);
            let pos = pool.cards().iter().position(|c| *c == target).unwrap();
            positions.insert(pos);
        }
        assert_eq!(positions.len(), 52);
    }

    #[test]
    fn test_draw_takes_from_end() {
        let first = Card::new(Rank::Nine, Suit::Hearts);
        let second = Card::new(Rank::Two, Suit::Clubs);
        let mut pool = Pool::from_cards(vec![second, first]).unwrap();
        assert_eq!(pool.draw(), Ok(first));
        assert_eq!(pool.draw(), Ok(second));
        assert_eq!(pool.draw(), Err(GameError::EmptyPool));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_draws_never_repeat() {
        let mut pool = RandomPools::from_seed(3).fresh_pool();
        let mut seen = HashSet::new();
        while let Ok(card) = pool.draw() {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_from_cards_rejects_duplicates() {
        let card = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(
            Pool::from_cards(vec![card, card]),
            Err(GameError::DuplicateCard(card))
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[{"rank":"Ace","suit":"Spades"},{"rank":"Ace","suit":"Spades"}]"#;
        assert!(serde_json::from_str::<Pool>(json).is_err());

        let pool = Pool::stacked(&[]).unwrap();
        let encoded = serde_json::to_string(&pool).unwrap();
        assert_eq!(serde_json::from_str::<Pool>(&encoded).unwrap(), pool);
    }

    #[test]
    fn test_stacked_pool_deals_top_first() {
        let top = [
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        ];
        let mut pool = Pool::stacked(&top).unwrap();
        assert_eq!(pool.len(), 52);
        assert_eq!(pool.draw(), Ok(top[0]));
        assert_eq!(pool.draw(), Ok(top[1]));
    }

    #[test]
    fn test_seeded_pools_repeat() {
        let mut a = RandomPools::from_seed(99);
        let mut b = RandomPools::from_seed(99);
        assert_eq!(a.fresh_pool(), b.fresh_pool());
        assert_eq!(a.fresh_pool(), b.fresh_pool());
    }

    #[test]
    fn test_scripted_pools_run_dry() {
        let mut source = ScriptedPools::default();
        source.push(Pool::stacked(&[]).unwrap());
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.fresh_pool().len(), 52);
        assert!(source.fresh_pool().is_empty());
    }
}
