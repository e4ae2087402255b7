//! Game rules: win conditions, turn state, and turn processing.

/// Turn processing on top of the state engine.
pub mod controller;
/// Per-game state engine.
pub mod state;
/// Victory rules.
pub mod win;

pub use controller::{GameController, GameError, TurnResult};
pub use state::{Conclusion, GamePhase, GameState, MAX_CONNECTION_USES, RECENT_HISTORY_CAPACITY};
pub use win::WinCondition;
