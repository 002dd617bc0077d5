// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Render: a pure renderer from layout documents to visual trees.
//!
//! [`CardRenderer::render`] maps a (data item, field schema, layout
//! document) triple to a flat list of absolutely positioned, style-resolved
//! boxes — one [`RenderedField`] per placed component, in document order
//! (paint order, first = bottom). The function is deterministic and
//! side-effect-free, so the on-screen preview pane and the off-screen export
//! pipeline produce pixel-identical output from the same document.
//!
//! This crate resolves *what to paint*, not *how to paint it*: frames are
//! [`kurbo::Rect`]s, colors are resolved [`peniko::Color`]s, and text content
//! is a plain string. Rasterization belongs to a backend consuming this
//! output.
//!
//! ## Resolution rules
//!
//! Each style attribute present on a component is applied over a fixed
//! default (Arial, 25px, normal weight, left-aligned, black text, 8px
//! padding). A border exists only when `borderWidth > 0`. A background
//! exists only when the `backgroundColor` key is present and parses; an
//! absent key means transparent. Looking up a field the item does not carry
//! yields the empty string, never an error and never a `"null"` literal.
//!
//! ## Example
//!
//! ```
//! use cardstock_layout::{CardLayout, Dimensions, FieldType, LayoutComponent, Position};
//! use cardstock_render::CardRenderer;
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
//!     grid_size: None,
//!     created_at: "2026-01-01T00:00:00.000Z".into(),
//!     updated_at: "2026-01-01T00:00:00.000Z".into(),
//! };
//!
//! let item = serde_json::json!({ "title": "Goblin Raider" })
//!     .as_object()
//!     .unwrap()
//!     .clone();
//!
//! let renderer = CardRenderer::new(vec![]);
//! let card = renderer.render(&item, &layout);
//! assert_eq!(card.fields[0].content, "Goblin Raider");
//! ```

use core::fmt;

use kurbo::{Rect, Size};
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use cardstock_layout::{
    CardLayout, ComponentStyle, DynamicItem, FieldDefinition, FontWeight, LayoutComponent,
    TextAlign,
};

/// Default font family for components without a `fontFamily` override.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 25.0;

/// Default inner padding in pixels.
pub const DEFAULT_PADDING: f64 = 8.0;

/// Border color applied when a component has a border width but no color.
const DEFAULT_BORDER_COLOR: &str = "#000";

/// Resolved text styling for one rendered field.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedText {
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Text color.
    pub color: Color,
}

/// A resolved border: present only when the component's border width is
/// positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
}

impl fmt::Display for Border {
    /// Formats as a CSS border shorthand, e.g. `2px solid rgb(0, 0, 0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px solid {}", self.width, self.color.to_rgba8())
    }
}

/// One absolutely positioned, style-resolved box in the visual tree.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedField {
    /// Id of the originating layout component.
    pub component_id: String,
    /// Schema field the box displays.
    pub field_id: String,
    /// Display label from the schema, when the schema defines the field.
    pub label: Option<String>,
    /// Box frame in canvas coordinates. Unclamped, exactly as stored.
    pub frame: Rect,
    /// Stringified field value; empty when the item lacks the field.
    pub content: String,
    /// Resolved text styling.
    pub text: ResolvedText,
    /// Background fill; `None` means transparent.
    pub background: Option<Color>,
    /// Border, when the component has a positive border width.
    pub border: Option<Border>,
    /// Inner padding in pixels.
    pub padding: f64,
}

/// The rendered card: a white surface plus fields in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCard {
    /// Canvas dimensions in pixels.
    pub bounds: Size,
    /// Card surface color.
    pub background: Color,
    /// Rendered fields, bottom first.
    pub fields: Vec<RenderedField>,
}

/// Stateless renderer carrying the owning schema's field definitions.
///
/// The schema contributes display labels; content and styling come from the
/// item and the document alone.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    fields: Vec<FieldDefinition>,
}

impl CardRenderer {
    /// Creates a renderer for a category schema's fields.
    #[must_use]
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Renders `layout` filled with `item`'s values into a visual tree.
    ///
    /// Deterministic and side-effect-free: the same inputs always produce an
    /// equal [`RenderedCard`].
    #[must_use]
    pub fn render(&self, item: &DynamicItem, layout: &CardLayout) -> RenderedCard {
        RenderedCard {
            bounds: Size::new(layout.canvas.width, layout.canvas.height),
            background: Color::WHITE,
            fields: layout
                .components
                .iter()
                .map(|component| self.render_component(item, component))
                .collect(),
        }
    }

    fn render_component(&self, item: &DynamicItem, component: &LayoutComponent) -> RenderedField {
        let style = component.style.as_ref();
        RenderedField {
            component_id: component.id.clone(),
            field_id: component.field_id.clone(),
            label: self
                .fields
                .iter()
                .find(|f| f.name == component.field_id)
                .map(|f| f.label.clone()),
            frame: Rect::new(
                component.position.x,
                component.position.y,
                component.position.x + component.size.width,
                component.position.y + component.size.height,
            ),
            content: field_value(item, &component.field_id),
            text: resolve_text(style),
            background: style
                .and_then(|s| s.background_color.as_deref())
                .and_then(parse_css_color),
            border: resolve_border(style),
            padding: style.and_then(|s| s.padding).unwrap_or(DEFAULT_PADDING),
        }
    }
}

/// Stringifies `item[name]`.
///
/// Absent and null values become the empty string; strings pass through
/// unquoted; everything else uses its JSON text form. Never fails.
#[must_use]
pub fn field_value(item: &DynamicItem, name: &str) -> String {
    match item.get(name) {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
    }
}

fn resolve_text(style: Option<&ComponentStyle>) -> ResolvedText {
    ResolvedText {
        font_family: style
            .and_then(|s| s.font_family.clone())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned()),
        font_size: style.and_then(|s| s.font_size).unwrap_or(DEFAULT_FONT_SIZE),
        weight: style.and_then(|s| s.font_weight).unwrap_or(FontWeight::Normal),
        align: style.and_then(|s| s.text_align).unwrap_or(TextAlign::Left),
        color: style
            .and_then(|s| s.color.as_deref())
            .and_then(parse_css_color)
            .unwrap_or(Color::BLACK),
    }
}

fn resolve_border(style: Option<&ComponentStyle>) -> Option<Border> {
    let style = style?;
    let width = style.border_width.unwrap_or(0.0);
    if width <= 0.0 {
        return None;
    }
    let color = style
        .border_color
        .as_deref()
        .and_then(parse_css_color)
        .or_else(|| parse_css_color(DEFAULT_BORDER_COLOR))?;
    Some(Border { width, color })
}

/// Parses a CSS color string into an sRGB [`Color`].
///
/// Empty and unparseable strings yield `None`; callers choose the fallback.
fn parse_css_color(css: &str) -> Option<Color> {
    parse_color(css.trim())
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}
