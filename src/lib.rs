//! `canopy_rust` - Retained-mode compositor for a graphical boot picker
//!
//! Widgets live in an arena tree and are drawn into a premultiplied BGRA
//! frame buffer through a small dirty-rectangle queue. The picker view on
//! top of it lays out a scrolling row of boot entries, a selector, scroll
//! arrows, and shutdown/restart buttons, and turns keyboard and pointer
//! input into a boot decision.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for easing math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow picker::PickerWidget etc
#![allow(clippy::struct_excessive_bools)] // Session state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod anim;
pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod picker;
pub mod platform;
pub mod renderer;
pub mod view;
pub mod widget;

// Re-export core types at crate root
pub use buffer::{ClipRect, FrameBuffer, Image};
pub use color::Pixel;
pub use config::{Metrics, ViewConfig};
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, emit_event, emit_log, set_event_callback, set_log_callback,
};

// Re-export input types
pub use input::{FrameInput, KeyCode, KeyEvent, KeyModifiers, Keystroke, PickerKey, PointerSample};

// Re-export picker types
pub use picker::{IconKind, IconVariant, LabelKind, Theme};
pub use platform::{BootEntryInfo, EntryType, PickerAttributes, Platform};
pub use renderer::{DirtyRegion, RenderStats};
pub use view::{BootPickerView, Control, ViewOutcome, ViewState};
