mod card;
mod config;
mod error;
mod hand;
mod pool;
mod round;
mod settlement;
mod session;

pub use card::{Card, Rank, Suit};
pub use config::TableConfig;
pub use error::{GameError, WagerError};
pub use hand::{calculate_hand_value, is_busted, Hand, Role, BUST_LIMIT};
pub use pool::{Pool, PoolSource, RandomPools, ScriptedPools};
pub use round::{classify, Action, GamePhase, Outcome, Round, Tone, DEALER_STANDS_ON};
pub use session::{Session, TableSnapshot};
pub use settlement::{settle, Chips, Wallets, MAX_BALANCE};
