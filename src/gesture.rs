use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::{PendingMove, PlacementEngine, Preview};
use crate::error::PlacementError;
use crate::location::Location;
use crate::state::PuzzleState;
use crate::token::TokenId;

/// What to do when a pool token is dropped on an occupied slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupiedPolicy {
    /// Surface `SlotOccupied` and leave the state alone.
    #[default]
    Reject,
    /// Send the occupant to the end of the pool, then place the dragged token.
    BounceToPool,
}

/// The three pointer primitives plus cancellation, as any input layer would report them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    Begin { token: TokenId, origin: Location },
    Over { candidate: Location },
    Drop { destination: Location },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Began,
    Previewed(Preview),
    Committed,
    /// `occupant` went back to the pool before the dragged token took its slot.
    Bounced { occupant: TokenId },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("a move of token {0} is already in progress")]
    MoveInProgress(TokenId),
    #[error("no move in progress")]
    NoActiveMove,
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Threads one `PendingMove` between events so the input layer only has to
/// forward what the pointer did.
#[derive(Debug)]
pub struct GestureDriver {
    engine: PlacementEngine,
    pending: Option<PendingMove>,
    policy: OccupiedPolicy,
}

impl GestureDriver {
    pub fn new(engine: PlacementEngine, policy: OccupiedPolicy) -> Self {
        Self { engine, pending: None, policy }
    }

    pub fn engine(&self) -> &PlacementEngine { &self.engine }

    pub fn state(&self) -> &PuzzleState { self.engine.current_state() }

    pub fn pending(&self) -> Option<&PendingMove> { self.pending.as_ref() }

    pub fn policy(&self) -> OccupiedPolicy { self.policy }

    /// Applies one event. A drop always ends the gesture, whether or not it commits.
    pub fn apply(&mut self, event: GestureEvent) -> Result<GestureOutcome, GestureError> {
        match event {
            GestureEvent::Begin { token, origin } => {
                if let Some(p) = &self.pending {
                    return Err(GestureError::MoveInProgress(p.token));
                }
                self.pending = Some(self.engine.begin_move(token, origin)?);
                Ok(GestureOutcome::Began)
            }
            GestureEvent::Over { candidate } => {
                let pending = self.pending.as_ref().ok_or(GestureError::NoActiveMove)?;
                let mut next = self.engine.preview_move(pending, candidate)?;
                if let Preview::Rejected(PlacementError::SlotOccupied { slot, occupant }) = next.preview {
                    if self.policy == OccupiedPolicy::BounceToPool {
                        next.preview = self.bounce_preview(&next, slot, occupant, candidate);
                    }
                }
                let preview = next.preview.clone();
                self.pending = Some(next);
                Ok(GestureOutcome::Previewed(preview))
            }
            GestureEvent::Drop { destination } => {
                let pending = self.pending.take().ok_or(GestureError::NoActiveMove)?;
                self.drop_on(pending, destination)
            }
            GestureEvent::Cancel => {
                let pending = self.pending.take().ok_or(GestureError::NoActiveMove)?;
                self.engine.cancel_move(pending);
                Ok(GestureOutcome::Cancelled)
            }
        }
    }

    /// The state `drop_on` would reach by bouncing `occupant`, computed on copies.
    fn bounce_preview(&self, pending: &PendingMove, slot: usize, occupant: TokenId, destination: Location) -> Preview {
        let state = self.engine.current_state();
        let back = Location::Pool(state.pool().len());
        match state
            .apply(occupant, Location::Slot(slot), back)
            .and_then(|evicted| evicted.apply(pending.token, pending.origin, destination))
        {
            Ok(next) => Preview::Accepted(next),
            Err(e) => Preview::Rejected(e),
        }
    }

    fn drop_on(&mut self, pending: PendingMove, destination: Location) -> Result<GestureOutcome, GestureError> {
        let (token, origin) = (pending.token, pending.origin);
        let committed = self.engine.commit_move(pending, destination).map(|_| ());
        match committed {
            Ok(()) => Ok(GestureOutcome::Committed),
            Err(PlacementError::SlotOccupied { slot, occupant }) if self.policy == OccupiedPolicy::BounceToPool => {
                // Appending keeps every existing pool position, so `origin` stays valid.
                let back = Location::Pool(self.engine.current_state().pool().len());
                let evict = self.engine.begin_move(occupant, Location::Slot(slot))?;
                self.engine.commit_move(evict, back)?;
                let retry = self.engine.begin_move(token, origin)?;
                self.engine.commit_move(retry, destination)?;
                debug!("bounced {occupant} from slot {slot} for {token}");
                Ok(GestureOutcome::Bounced { occupant })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Serializes events from several producers (e.g. multiple pointers) onto the
/// single writer. Producers clone the sender; the owner drains on its own thread.
pub struct MutationQueue {
    tx: Sender<GestureEvent>,
    rx: Receiver<GestureEvent>,
}

impl Default for MutationQueue {
    fn default() -> Self { Self::new() }
}

impl MutationQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<GestureEvent> { self.tx.clone() }

    /// Applies every queued event in arrival order.
    pub fn drain(&self, driver: &mut GestureDriver) -> Vec<Result<GestureOutcome, GestureError>> {
        let out: Vec<_> = self.rx.try_iter().map(|ev| driver.apply(ev)).collect();
        if !out.is_empty() {
            info!("drained {} queued gesture events", out.len());
        }
        out
    }
}
