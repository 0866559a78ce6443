// Placement engine for keyword-ordering puzzles
pub mod token;
pub mod location;
pub mod error;
pub mod state;
pub mod engine;
pub mod gesture;
pub mod question;
pub mod config;
pub mod repl;

pub use engine::{PendingMove, PlacementEngine, Preview};
pub use error::PlacementError;
pub use location::Location;
pub use state::PuzzleState;
pub use token::{Token, TokenId};
