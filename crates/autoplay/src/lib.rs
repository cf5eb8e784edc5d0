//! Computer opponent: threshold policy, stepwise turns and headless simulation.

mod clock;
mod config;
mod error;
mod policy;
mod simulator;
mod trace;
mod turn;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use policy::*;
pub use simulator::*;
pub use trace::*;
pub use turn::*;
