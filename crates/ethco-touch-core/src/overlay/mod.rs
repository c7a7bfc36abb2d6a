//! Overlay state for the selection handles and the floating toolbar.
//!
//! - [`OverlayState`] mirrors what is currently rendered.
//! - [`OverlayIntent`] is the one channel from gesture classification to
//!   rendering: whether the toolbar is forced open.
//! - [`OverlayContext`] owns both plus the collaborators, and hosts the
//!   synchronizer that recomputes the layout from live widget state.

mod context;
mod handles;
mod intent;
mod state;
mod sync;

pub use context::OverlayContext;
pub use handles::{HandleKind, HandleState};
pub use intent::OverlayIntent;
pub use state::{OverlayState, ToolbarState};
pub use sync::toolbar_anchor;
