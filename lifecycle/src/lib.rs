//! # Lifecycle
//!
//! Liveness and single-shot ownership primitives for embedded editors.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Teardown is signalled, not inferred
//! - **Single-threaded**: Everything runs on the host's one logical thread
//! - **Late callbacks are no-ops**: A continuation checks liveness before acting
//! - **No async runtime required**: Continuations are plain closures
//!
//! ## Core Concepts
//!
//! - `LivenessSource`: Owned by an instance, signals teardown
//! - `LivenessToken`: Cloned into every continuation the instance registers
//! - `TeardownReason`: Why the instance stopped
//! - `HandleSlot`: A cell written exactly once, then taken on teardown

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Reason an instance was torn down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeardownReason {
    /// The hosting component was unmounted
    Unmounted,
    /// The owner was dropped without an explicit unmount
    Dropped,
}

impl fmt::Display for TeardownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeardownReason::Unmounted => write!(f, "unmounted"),
            TeardownReason::Dropped => write!(f, "dropped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LivenessState {
    Live,
    TornDown(TeardownReason),
}

/// Errors related to lifecycle primitives
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("instance torn down: {reason}")]
    TornDown { reason: TeardownReason },

    #[error("slot already holds a value")]
    SlotOccupied,

    #[error("slot closed after teardown")]
    SlotClosed,
}

/// A cloneable view of an instance's liveness
///
/// Tokens are cheap to clone and are captured by continuations that may
/// fire after the owning instance is gone.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    state: Rc<RefCell<LivenessState>>,
}

impl LivenessToken {
    /// Returns true while the owning instance has not been torn down
    pub fn is_live(&self) -> bool {
        matches!(*self.state.borrow(), LivenessState::Live)
    }

    /// Returns the teardown reason, if torn down
    pub fn reason(&self) -> Option<TeardownReason> {
        match &*self.state.borrow() {
            LivenessState::Live => None,
            LivenessState::TornDown(reason) => Some(reason.clone()),
        }
    }

    /// Returns an error if the owning instance has been torn down
    pub fn ensure_live(&self) -> Result<(), LifecycleError> {
        match self.reason() {
            Some(reason) => Err(LifecycleError::TornDown { reason }),
            None => Ok(()),
        }
    }
}

/// The owning side of an instance's liveness
///
/// ## Example
///
/// ```
/// use lifecycle::{LivenessSource, TeardownReason};
///
/// let source = LivenessSource::new();
/// let token = source.token();
/// assert!(token.is_live());
///
/// source.tear_down(TeardownReason::Unmounted);
/// assert!(!token.is_live());
/// ```
#[derive(Debug)]
pub struct LivenessSource {
    state: Rc<RefCell<LivenessState>>,
}

impl LivenessSource {
    /// Creates a live source
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(LivenessState::Live)),
        }
    }

    /// Creates a token observing this source
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            state: self.state.clone(),
        }
    }

    /// Marks the instance torn down
    ///
    /// The first reason wins; later calls are ignored.
    pub fn tear_down(&self, reason: TeardownReason) {
        let mut state = self.state.borrow_mut();
        if matches!(*state, LivenessState::Live) {
            *state = LivenessState::TornDown(reason);
        }
    }

    /// Returns true while not torn down
    pub fn is_live(&self) -> bool {
        matches!(*self.state.borrow(), LivenessState::Live)
    }
}

impl Default for LivenessSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
enum SlotState<T> {
    Empty,
    Filled(T),
    Closed,
}

/// A single-shot ownership cell
///
/// Written exactly once by its producer, read any number of times, and
/// taken exactly once on teardown. After `take` the slot is closed and
/// rejects further writes.
#[derive(Debug)]
pub struct HandleSlot<T> {
    state: SlotState<T>,
}

impl<T: Clone> HandleSlot<T> {
    /// Creates an empty slot
    pub fn new() -> Self {
        Self {
            state: SlotState::Empty,
        }
    }

    /// Stores the value
    pub fn fill(&mut self, value: T) -> Result<(), LifecycleError> {
        match self.state {
            SlotState::Empty => {
                self.state = SlotState::Filled(value);
                Ok(())
            }
            SlotState::Filled(_) => Err(LifecycleError::SlotOccupied),
            SlotState::Closed => Err(LifecycleError::SlotClosed),
        }
    }

    /// Returns a clone of the stored value
    pub fn get(&self) -> Option<T> {
        match &self.state {
            SlotState::Filled(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Removes the value and closes the slot
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, SlotState::Closed) {
            SlotState::Filled(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone> Default for HandleSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
