//! Folio Core
//!
//! Foundational primitives shared by the folio crates:
//!
//! - **Geometry**: points, sizes, rects and colors in document space
//! - **Targets**: opaque handles to renderable regions and the `Geometry` query
//! - **Events**: passive listener registry for scroll, resize, pointer and keys
//! - **Frame Loop**: cancellable per-frame callback chains
//! - **Context**: the single-writer scroll/pointer snapshot read once per tick
//! - **Draw Context**: canvas drawing surface with a recording implementation
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ScrollState, Size};
//!
//! let scroll = ScrollState::new(800.0, Size::new(1280.0, 800.0), 2400.0);
//! assert_eq!(scroll.progress_percent(), 50.0);
//! ```

pub mod context;
pub mod draw;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod target;

pub use context::{FrameSnapshot, ScrollState};
pub use draw::{DrawCommand, DrawContext, RecordingContext, Stroke};
pub use error::{FolioError, Result};
pub use events::{Event, EventCallback, EventDispatcher, EventType, KeyCode, ListenerId};
pub use frame::{FrameCallback, FrameControl, FrameInfo, FrameLoop, FrameRequestId};
pub use geometry::{Color, Point, Rect, Size, Vec2};
pub use target::{Geometry, TargetId};
