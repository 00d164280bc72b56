//! Players and value learning: the `Player` trait, the random and console
//! players, open-line features, and the two afterstate TD learners.

mod features;
mod human;
mod player;
mod random;
mod replay;
mod td;
mod value;

pub use features::{count_open_positions, feature_vector, NUM_FEATURES};
pub use human::HumanPlayer;
pub use player::Player;
pub use random::RandomPlayer;
pub use replay::{ReplayConfig, ReplayTdPlayer};
pub use td::{TdConfig, TdPlayer};
pub use value::{LinearValue, ValueFunction};
