//! Ring Core - Platform-agnostic Logic und Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die komplette Event- und State-Logik des Signal-Rings:
//! Entprellung, Topic-Routing, lokale Farbauswahl und Frame-Rendering.

#![no_std]

pub mod debounce;
pub mod render;
pub mod router;
pub mod selector;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use debounce::{ButtonLatches, EdgeLatch, DEBOUNCE_MS};
pub use render::{map_physical, FrameBuffer};
pub use router::{route, Router};
pub use selector::{on_color_event, on_pattern_event};
pub use traits::{LedError, RingWriter};
pub use types::{ButtonEvent, ButtonSource, DirtyFlags, LogicalState, RoutedUpdate, StateTable};
