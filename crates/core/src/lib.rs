//! Dice rules and match flow. Keep this crate free of IO and platform concerns.

pub mod category;
pub mod dice;
pub mod events;
pub mod game;
pub mod result;
pub mod rng;
pub mod scoring;
pub mod sheet;
pub mod state;
pub mod stats;

pub use category::*;
pub use dice::*;
pub use events::*;
pub use game::*;
pub use result::*;
pub use rng::*;
pub use scoring::*;
pub use sheet::*;
pub use state::*;
pub use stats::*;
