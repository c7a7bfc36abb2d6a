//! Gesture interpretation for the editing surface and the selection handles.
//!
//! The editing surface runs one state machine per touch sequence:
//! `Idle -> Pressing -> {Tapped | LongPressed | Cancelled} -> Idle`.
//! Each handle runs its own `Idle -> Dragging -> Idle` machine, and handle
//! touches never reach the surface machine.

mod handle;
mod surface;

pub use handle::HandleDrag;
pub use surface::SurfaceGestures;

/// Where the surface machine is within the current touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No finger down.
    #[default]
    Idle,
    /// Finger down, long-press timer armed.
    Pressing,
    /// The long-press fired; waiting for the finger to lift.
    LongPressed,
    /// The finger moved past the tolerance; the widget handles the pan.
    Cancelled,
}

/// How a finished touch sequence was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Lifted before the long-press delay without moving.
    Tapped,
    LongPressed,
    /// Became a scroll or pan.
    Cancelled,
    /// A second finger joined; not our gesture.
    Aborted,
}
