use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};
use crate::location::Location;
use crate::token::{Token, TokenId};

/// Committed puzzle state: the free pool plus the fixed-length answer slots.
/// `None` in `slots` is the empty-slot marker the renderer draws as a drop target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleState {
    pool: Vec<Token>,
    slots: Vec<Option<Token>>,
}

impl PuzzleState {
    pub fn new(pool: Vec<Token>, slot_count: usize) -> Self {
        Self { pool, slots: vec![None; slot_count] }
    }

    pub fn pool(&self) -> &[Token] { &self.pool }

    pub fn slots(&self) -> &[Option<Token>] { &self.slots }

    pub fn slot_count(&self) -> usize { self.slots.len() }

    pub fn placed_count(&self) -> usize { self.slots.iter().filter(|s| s.is_some()).count() }

    pub fn is_filled(&self) -> bool { self.slots.iter().all(Option::is_some) }

    /// Ids in slot order, `None` for empty slots.
    pub fn answer_ids(&self) -> Vec<Option<TokenId>> {
        self.slots.iter().map(|s| s.as_ref().map(|t| t.id)).collect()
    }

    pub fn token_at(&self, loc: Location) -> Option<&Token> {
        match loc {
            Location::Pool(p) => self.pool.get(p),
            Location::Slot(p) => self.slots.get(p).and_then(Option::as_ref),
        }
    }

    pub fn locate(&self, id: TokenId) -> Option<Location> {
        if let Some(p) = self.pool.iter().position(|t| t.id == id) {
            return Some(Location::Pool(p));
        }
        self.slots
            .iter()
            .position(|s| s.as_ref().map_or(false, |t| t.id == id))
            .map(Location::Slot)
    }

    /// `InvalidLocation` unless `loc` indexes an existing pool entry or slot.
    pub fn check_range(&self, loc: Location) -> Result<()> {
        let len = match loc {
            Location::Pool(_) => self.pool.len(),
            Location::Slot(_) => self.slots.len(),
        };
        if loc.position() < len { Ok(()) } else { Err(PlacementError::InvalidLocation { location: loc, len }) }
    }

    /// Checks that `origin` currently holds `token`. An origin past the end of
    /// its container holds nothing, so it is `InconsistentState` as well.
    pub fn expect_at(&self, token: TokenId, origin: Location) -> Result<()> {
        match self.token_at(origin) {
            Some(t) if t.id == token => Ok(()),
            _ => Err(PlacementError::InconsistentState { token, claimed: origin }),
        }
    }

    /// Computes the state after moving `token` from `origin` to `destination`
    /// without touching `self`.
    ///
    /// | origin -> destination | effect |
    /// |---|---|
    /// | Pool -> Pool | swap the two pool entries |
    /// | Pool -> Slot | remove from pool, place in the slot; occupied slot is `SlotOccupied` |
    /// | Slot -> Pool | empty the slot, insert into pool at the position (`len` appends) |
    /// | Slot -> Slot | move into an empty slot, or swap with the occupant |
    ///
    /// A destination equal to the origin returns an unchanged copy.
    pub fn apply(&self, token: TokenId, origin: Location, destination: Location) -> Result<PuzzleState> {
        self.expect_at(token, origin)?;
        if origin == destination {
            return Ok(self.clone());
        }
        let mut next = self.clone();
        match (origin, destination) {
            (Location::Pool(from), Location::Pool(to)) => {
                self.check_range(destination)?;
                next.pool.swap(from, to);
            }
            (Location::Pool(from), Location::Slot(to)) => {
                self.check_range(destination)?;
                if let Some(occupant) = &self.slots[to] {
                    return Err(PlacementError::SlotOccupied { slot: to, occupant: occupant.id });
                }
                let moved = next.pool.remove(from);
                next.slots[to] = Some(moved);
            }
            (Location::Slot(from), Location::Pool(to)) => {
                if to > self.pool.len() {
                    return Err(PlacementError::InvalidLocation { location: destination, len: self.pool.len() });
                }
                let Some(moved) = next.slots[from].take() else {
                    return Err(PlacementError::InconsistentState { token, claimed: origin });
                };
                next.pool.insert(to, moved);
            }
            (Location::Slot(from), Location::Slot(to)) => {
                self.check_range(destination)?;
                // An empty destination swaps with `None`, which vacates the origin.
                next.slots.swap(from, to);
            }
        }
        Ok(next)
    }

    /// Verifies the closed-world invariant against the full token roster:
    /// every id is present exactly once and nothing else is.
    pub fn check_closed_world(&self, roster: &[TokenId]) -> Result<()> {
        let mut seen: HashMap<TokenId, usize> = roster.iter().map(|&id| (id, 0)).collect();
        for t in self.pool.iter().chain(self.slots.iter().flatten()) {
            let count = seen.get_mut(&t.id).ok_or(PlacementError::UnknownToken(t.id))?;
            *count += 1;
            if *count > 1 {
                return Err(PlacementError::DuplicateToken(t.id));
            }
        }
        if let Some(&missing) = roster.iter().find(|id| seen.get(*id) == Some(&0)) {
            return Err(PlacementError::MissingToken(missing));
        }
        Ok(())
    }
}
