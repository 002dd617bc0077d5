// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document model types and their persisted JSON shape.

use serde::{Deserialize, Serialize};

/// A point on the canvas in pixels, relative to the canvas origin (top-left).
///
/// Positions are intentionally unclamped: a component may sit partly or
/// entirely outside the canvas, and may have negative coordinates. Consumers
/// render what they are given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate in pixels.
    pub x: f64,
    /// Y coordinate in pixels.
    pub y: f64,
}

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// The kind of data a placed field holds.
///
/// This covers both the schema vocabulary (`dropdown`) and the layout
/// vocabulary (`select`); documents may carry either. Unknown types are a
/// decode error, since documents are only ever produced by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Numeric value.
    Number,
    /// Multi-line text.
    Textarea,
    /// Enumerated value chosen from schema options.
    Dropdown,
    /// Enumerated value (layout-side spelling of `Dropdown`).
    Select,
    /// Boolean flag.
    Checkbox,
    /// Image reference.
    Image,
}

/// CSS-style font weight, string-encoded at rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal weight (400-equivalent).
    #[serde(rename = "normal")]
    Normal,
    /// Bold weight (700-equivalent).
    #[serde(rename = "bold")]
    Bold,
    /// Lighter than the inherited weight.
    #[serde(rename = "lighter")]
    Lighter,
    /// Numeric weight 100.
    #[serde(rename = "100")]
    W100,
    /// Numeric weight 200.
    #[serde(rename = "200")]
    W200,
    /// Numeric weight 300.
    #[serde(rename = "300")]
    W300,
    /// Numeric weight 400.
    #[serde(rename = "400")]
    W400,
    /// Numeric weight 500.
    #[serde(rename = "500")]
    W500,
    /// Numeric weight 600.
    #[serde(rename = "600")]
    W600,
    /// Numeric weight 700.
    #[serde(rename = "700")]
    W700,
    /// Numeric weight 800.
    #[serde(rename = "800")]
    W800,
    /// Numeric weight 900.
    #[serde(rename = "900")]
    W900,
}

/// Horizontal text alignment within a component box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center horizontally.
    Center,
    /// Align to the right edge.
    Right,
}

/// Optional per-component visual styling overrides.
///
/// Every field is optional; consumers apply each present value over a fixed
/// default. `background_color` is tri-state: an *absent* key means
/// transparent, which is why it must be removed (not emptied) when the user
/// toggles transparency on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStyle {
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels. Must be positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Horizontal text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Text color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background color as a CSS color string. Absent means transparent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Border color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border width in pixels. Zero or absent means no border.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Inner padding in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

/// One placed, optionally styled field box within a layout document.
///
/// `id` is opaque and unique within a document; uniqueness is enforced by the
/// generating editor (timestamp plus random suffix), not validated here.
/// `field_id` is a foreign key into the owning schema's field list and is
/// likewise not validated against the schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutComponent {
    /// Unique identifier for this component instance.
    pub id: String,
    /// Name of the schema field this component displays.
    pub field_id: String,
    /// Kind of field, used for default sizing and rendering hints.
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Top-left corner relative to the canvas origin. Unclamped.
    pub position: Position,
    /// Box size in pixels. The interactive resize path enforces the 50x30
    /// minimum; direct construction does not.
    pub size: Dimensions,
    /// Styling overrides, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ComponentStyle>,
}

/// The serializable description of where fields are placed on a card canvas.
///
/// A new snapshot is produced on every editor save; documents are never
/// mutated in place once emitted. `components` order is paint order (first =
/// bottom). Timestamps are ISO-8601 strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLayout {
    /// Unique identifier for this layout.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Canvas size in pixels. Preset metadata is not persisted, only the
    /// literal dimensions.
    pub canvas: Dimensions,
    /// Placed components in paint order.
    pub components: Vec<LayoutComponent>,
    /// Snap grid size in pixels (default 10). Stored for the grid overlay;
    /// drag and resize outputs are not snapped to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<f64>,
    /// Creation timestamp, ISO-8601.
    pub created_at: String,
    /// Last-modified timestamp, ISO-8601.
    pub updated_at: String,
}

/// Error decoding or encoding a persisted layout document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The persisted JSON did not match the document schema.
    #[error("failed to decode layout document: {0}")]
    Decode(#[source] serde_json::Error),
    /// The document could not be serialized.
    #[error("failed to encode layout document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CardLayout {
    /// Decodes a document from its persisted JSON form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Decode)
    }

    /// Encodes the document to its persisted JSON form.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Encode)
    }
}

/// Definition of one field in the owning category schema.
///
/// This is the inbound shape used to populate the editor's field-placement
/// toolbar; the editor does not persist it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name; components reference this via `field_id`.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Field kind.
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Whether the field is required by the schema.
    pub required: bool,
    /// Choices for dropdown fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Placeholder text for entry forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A schema-less data item: a field-name to value mapping.
pub type DynamicItem = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    fn component(style: Option<ComponentStyle>) -> LayoutComponent {
        LayoutComponent {
            id: "component-1".into(),
            field_id: "cost".into(),
            ty: FieldType::Number,
            position: Position { x: 20.0, y: 20.0 },
            size: Dimensions {
                width: 100.0,
                height: 40.0,
            },
            style,
        }
    }

    #[test]
    fn component_keys_are_camel_case() {
        let json = serde_json::to_value(component(None)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("fieldId"));
        assert!(obj.contains_key("type"));
        assert_eq!(json["type"], "number");
    }

    #[test]
    fn absent_background_color_key_is_omitted() {
        let style = ComponentStyle {
            color: Some("#ff0000".into()),
            ..ComponentStyle::default()
        };
        let json = serde_json::to_value(component(Some(style))).unwrap();
        let style_obj = json["style"].as_object().unwrap();
        assert!(style_obj.contains_key("color"));
        assert!(
            !style_obj.contains_key("backgroundColor"),
            "absent background must omit the key, not write null"
        );
    }

    #[test]
    fn present_empty_background_is_distinct_from_absent() {
        let style = ComponentStyle {
            background_color: Some(String::new()),
            ..ComponentStyle::default()
        };
        let json = serde_json::to_value(component(Some(style))).unwrap();
        assert_eq!(json["style"]["backgroundColor"], "");
    }

    #[test]
    fn font_weight_numeric_strings_round_trip() {
        let json = serde_json::to_value(FontWeight::W700).unwrap();
        assert_eq!(json, "700");
        let back: FontWeight = serde_json::from_value(json).unwrap();
        assert_eq!(back, FontWeight::W700);
    }

    #[test]
    fn document_round_trips_preserving_component_order() {
        let mut second = component(None);
        second.id = "component-2".into();
        second.field_id = "title".into();
        let layout = CardLayout {
            id: "layout-1".into(),
            name: "Card Layout".into(),
            canvas: Dimensions {
                width: 744.0,
                height: 1038.0,
            },
            components: vec![component(None), second],
            grid_size: Some(10.0),
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-02T00:00:00.000Z".into(),
        };

        let back = CardLayout::from_json(&layout.to_json().unwrap()).unwrap();
        assert_eq!(back, layout);
        assert_eq!(back.components[0].field_id, "cost");
        assert_eq!(back.components[1].field_id, "title");
    }

    #[test]
    fn missing_grid_size_decodes_as_none() {
        let json = r#"{
            "id": "layout-1",
            "name": "Card Layout",
            "canvas": { "width": 700, "height": 1000 },
            "components": [],
            "createdAt": "2026-01-01T00:00:00.000Z",
            "updatedAt": "2026-01-01T00:00:00.000Z"
        }"#;
        let layout = CardLayout::from_json(json).unwrap();
        assert_eq!(layout.grid_size, None);
        assert!(layout.components.is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = CardLayout::from_json("{").unwrap_err();
        assert!(matches!(err, DocumentError::Decode(_)));
    }
}
