// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Layout: the serializable card layout document and canvas presets.
//!
//! This crate is the data contract between the layout editor and every
//! consumer of a layout: the live preview, the export renderer, and the
//! external schema-storage collaborator that persists documents. It contains
//! no geometry math and no editing logic; those live in `cardstock_editor`
//! and `cardstock_render`.
//!
//! The core type is [`CardLayout`]: a fixed-size canvas plus an ordered list
//! of placed, optionally styled field boxes ([`LayoutComponent`]). Component
//! order is paint order; the first component is the bottom of the stack.
//!
//! ## Persisted shape
//!
//! Documents serialize to JSON with camelCase keys, and optional fields are
//! omitted entirely when absent rather than written as `null`. That omission
//! is semantic for [`ComponentStyle::background_color`]: an absent key means
//! "transparent", which is distinct from an explicit (even empty) value.
//!
//! There is no schema-version field; evolution of the persisted shape is out
//! of scope for this crate.
//!
//! ## Minimal example
//!
//! ```
//! use cardstock_layout::{CardLayout, LayoutComponent, FieldType, Position, Dimensions};
//!
//! let layout = CardLayout {
//!     id: "layout-1".into(),
//!     name: "Card Layout".into(),
//!     canvas: Dimensions { width: 744.0, height: 1038.0 },
//!     components: vec![LayoutComponent {
//!         id: "component-1".into(),
//!         field_id: "title".into(),
//!         ty: FieldType::Text,
//!         position: Position { x: 20.0, y: 20.0 },
//!         size: Dimensions { width: 200.0, height: 40.0 },
//!         style: None,
//!     }],
//!     grid_size: Some(10.0),
//!     created_at: "2026-01-01T00:00:00.000Z".into(),
//!     updated_at: "2026-01-01T00:00:00.000Z".into(),
//! };
//!
//! let json = layout.to_json().unwrap();
//! let back = CardLayout::from_json(&json).unwrap();
//! assert_eq!(back.components.len(), 1);
//! ```

mod model;
pub mod presets;

pub use model::{
    CardLayout, ComponentStyle, Dimensions, DocumentError, DynamicItem, FieldDefinition,
    FieldType, FontWeight, LayoutComponent, Position, TextAlign,
};
pub use presets::CanvasSize;
