use std::collections::HashSet;

use log::{debug, error, trace, warn};

use crate::error::{PlacementError, Result};
use crate::location::Location;
use crate::state::PuzzleState;
use crate::token::{Token, TokenId};

/// What the state would look like if the pending move were dropped on its
/// current candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No candidate yet, or the candidate is the origin itself.
    Unchanged,
    Accepted(PuzzleState),
    Rejected(PlacementError),
}

/// An in-progress drag. Each engine call takes it by value or reference and
/// hands back a fresh snapshot; nothing mutates it behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub token: TokenId,
    pub origin: Location,
    pub dragged_over: Option<Location>,
    pub preview: Preview,
}

/// Sole owner of the committed puzzle state.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    state: PuzzleState,
    roster: Vec<TokenId>,
    commits: u64,
}

impl PlacementEngine {
    /// Starts a puzzle with `pool` in the given order and `slot_count` empty slots.
    pub fn new(pool: Vec<Token>, slot_count: usize) -> Result<Self> {
        let mut ids = HashSet::with_capacity(pool.len());
        for t in &pool {
            if !ids.insert(t.id) { return Err(PlacementError::DuplicateToken(t.id)); }
        }
        let roster = pool.iter().map(|t| t.id).collect();
        debug!("new puzzle: {} tokens, {} slots", pool.len(), slot_count);
        Ok(Self { state: PuzzleState::new(pool, slot_count), roster, commits: 0 })
    }

    /// One slot per token, the conventional puzzle shape.
    pub fn with_one_slot_per_token(pool: Vec<Token>) -> Result<Self> {
        let n = pool.len();
        Self::new(pool, n)
    }

    pub fn current_state(&self) -> &PuzzleState { &self.state }

    pub fn roster(&self) -> &[TokenId] { &self.roster }

    pub fn total_tokens(&self) -> usize { self.roster.len() }

    /// Number of commits that changed the state.
    pub fn commits(&self) -> u64 { self.commits }

    fn report(&self, err: PlacementError) -> PlacementError {
        if err.is_caller_bug() {
            error!("input layer out of sync with engine: {err}");
        } else {
            warn!("move rejected: {err}");
        }
        err
    }

    /// Starts a drag. A fresh origin out of range is `InvalidLocation`; once a
    /// move is pending, a bad origin only ever means it went stale.
    pub fn begin_move(&self, token: TokenId, origin: Location) -> Result<PendingMove> {
        self.state
            .check_range(origin)
            .and_then(|_| self.state.expect_at(token, origin))
            .map_err(|e| self.report(e))?;
        trace!("begin move of {token} from {origin}");
        Ok(PendingMove { token, origin, dragged_over: None, preview: Preview::Unchanged })
    }

    /// Records `candidate` as the hover target and computes the would-be state.
    /// The committed state is never touched. Only a stale `pending` is an error;
    /// a candidate that commit would refuse comes back as `Preview::Rejected`.
    pub fn preview_move(&self, pending: &PendingMove, candidate: Location) -> Result<PendingMove> {
        self.state.expect_at(pending.token, pending.origin).map_err(|e| self.report(e))?;
        let preview = if candidate == pending.origin {
            Preview::Unchanged
        } else {
            match self.state.apply(pending.token, pending.origin, candidate) {
                Ok(next) => Preview::Accepted(next),
                Err(e) => Preview::Rejected(e),
            }
        };
        trace!("preview {} {} -> {candidate}: {}", pending.token, pending.origin, match &preview {
            Preview::Unchanged => "unchanged",
            Preview::Accepted(_) => "accepted",
            Preview::Rejected(_) => "rejected",
        });
        Ok(PendingMove { dragged_over: Some(candidate), preview, ..pending.clone() })
    }

    /// The only state-mutating call. On error the committed state is untouched.
    pub fn commit_move(&mut self, pending: PendingMove, destination: Location) -> Result<&PuzzleState> {
        let next = self
            .state
            .apply(pending.token, pending.origin, destination)
            .map_err(|e| self.report(e))?;
        if next != self.state {
            debug!("commit {} {} -> {destination}", pending.token, pending.origin);
            self.state = next;
            self.commits += 1;
        }
        debug_assert!(self.state.check_closed_world(&self.roster).is_ok());
        Ok(&self.state)
    }

    /// Abandons a gesture. Consuming the pending move is all there is to it.
    pub fn cancel_move(&self, pending: PendingMove) {
        trace!("cancel move of {} from {}", pending.token, pending.origin);
    }

    /// Closed-world check against the roster captured at construction.
    pub fn verify(&self) -> Result<()> { self.state.check_closed_world(&self.roster) }
}
