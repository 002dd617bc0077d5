// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Editor: the live card layout editing session.
//!
//! This crate owns the mutable state of one open layout designer: the placed
//! component list, the two-tier selection, the drag/resize gesture state,
//! per-component style editing, canvas-size selection, and load/save against
//! the [`cardstock_layout`] document model. It is headless: pointer and
//! keyboard events arrive as plain method calls, and the host owns widget
//! rendering and event plumbing.
//!
//! ## State machine
//!
//! The editor is `Idle` except while a resize gesture is in flight
//! (`Idle → Resizing → Idle`). Entering a gesture snapshots the component's
//! frame as a fixed baseline and acquires global pointer capture through a
//! [`CaptureHost`]; every move recomputes the frame from that baseline, and
//! exit — whether a normal pointer-up, [`EditorSession::close`], or dropping
//! the session mid-gesture — releases capture exactly once. See the
//! [`resize`] module for the geometry algebra and [`capture`] for the
//! scoped-listener model.
//!
//! All other operations are synchronous in-memory transforms guarded by
//! no-ops rather than errors: a style setter without a selection does
//! nothing, an unknown canvas preset key leaves the canvas alone, loading a
//! document with no components never wipes work in progress.
//!
//! ## Minimal example
//!
//! ```
//! use cardstock_editor::{EditorSession, ResizeDirection};
//! use cardstock_layout::{FieldDefinition, FieldType};
//! use kurbo::Point;
//!
//! let fields = vec![FieldDefinition {
//!     name: "title".into(),
//!     label: "Title".into(),
//!     ty: FieldType::Text,
//!     required: true,
//!     options: None,
//!     placeholder: None,
//! }];
//! let mut editor = EditorSession::new(fields);
//!
//! editor.add_component("title", FieldType::Text);
//! let id = editor.selected_component_id().unwrap().to_owned();
//!
//! // Drag the south-east handle 40px right and 20px down.
//! let dir = ResizeDirection::from_token("se").unwrap();
//! editor.begin_resize(&id, dir, Point::new(220.0, 60.0));
//! editor.resize_moved(Point::new(260.0, 80.0));
//! editor.end_resize();
//!
//! assert_eq!(editor.components()[0].size.width, 240.0);
//! assert_eq!(editor.components()[0].size.height, 60.0);
//! ```

pub mod capture;
pub mod resize;
mod session;

pub use capture::{CaptureHost, NoopCapture};
pub use resize::{MIN_HEIGHT, MIN_WIDTH, ResizeDirection, ResizeSession, resized_frame};
pub use session::{
    DEFAULT_GRID_SIZE, EditorSession, FieldSlot, OPAQUE_BACKGROUND, default_size,
};
