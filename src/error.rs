use crate::location::Location;
use crate::token::TokenId;

/// Failures surfaced by the placement engine. Nothing is recovered implicitly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The claimed origin does not hold the token; the caller's view is stale.
    #[error("token {token} is not at {claimed}")]
    InconsistentState { token: TokenId, claimed: Location },
    /// Pool->Slot onto a slot that already holds another token.
    #[error("slot {slot} is occupied by token {occupant}")]
    SlotOccupied { slot: usize, occupant: TokenId },
    #[error("{location} is out of range (container length {len})")]
    InvalidLocation { location: Location, len: usize },
    #[error("duplicate token id {0}")]
    DuplicateToken(TokenId),
    #[error("unknown token id {0}")]
    UnknownToken(TokenId),
    /// A roster token is in neither container.
    #[error("token {0} is missing from both pool and slots")]
    MissingToken(TokenId),
}

impl PlacementError {
    /// True for errors that mean the input layer disagrees with `current_state()`.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, PlacementError::InconsistentState { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlacementError>;
