//! Ethco Touch Core
//!
//! Platform-agnostic touch selection logic for the Ethco editor: the gesture
//! state machines that turn raw touches into selection changes, and the
//! overlay synchronizer that keeps selection handles and the floating toolbar
//! attached to the editor's selection.

pub mod actions;
pub mod config;
pub mod gesture;
pub mod host;
pub mod overlay;
pub mod selection;
pub mod session;

pub use actions::{ToolbarAction, ToolbarActions};
pub use config::{ConfigError, OverlayConfig};
pub use gesture::{GestureOutcome, GesturePhase, HandleDrag, SurfaceGestures};
pub use host::{
    BoxFuture, EditorHost, Listener, ManualPlatform, MemoryEditor, MemorySurface, OverlaySurface,
    Platform, PlatformError, PlatformResult, Subscription, TimerId,
};
pub use overlay::{
    HandleKind, HandleState, OverlayContext, OverlayIntent, OverlayState, ToolbarState,
    toolbar_anchor,
};
pub use selection::{EditRange, HitTarget, Position, SelectionSnapshot, WordRange};
pub use session::OverlaySession;
