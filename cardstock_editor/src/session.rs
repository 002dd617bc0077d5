// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live, mutable layout editing session.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use chrono::{SecondsFormat, Utc};
use kurbo::Point;
use tracing::debug;
use uuid::Uuid;

use cardstock_layout::presets::{self, CanvasSize};
use cardstock_layout::{
    CardLayout, ComponentStyle, Dimensions, FieldDefinition, FieldType, FontWeight,
    LayoutComponent, Position, TextAlign,
};

use crate::capture::{CaptureGuard, CaptureHost, NoopCapture};
use crate::resize::{ResizeDirection, ResizeSession};

/// Background color applied when transparency is toggled back off.
pub const OPAQUE_BACKGROUND: &str = "#ffffff";

/// Default grid size in pixels for a fresh session.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// One entry in the field-placement toolbar: a schema field plus whether the
/// current component list already places it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    /// Field name; becomes `field_id` on placement.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Field kind.
    pub ty: FieldType,
    /// Whether any placed component references this field. Duplicate
    /// placements are still permitted; this is a display hint only.
    pub is_used: bool,
}

/// Owns all mutable state of one open layout designer.
///
/// The session is single-threaded and event-driven: every operation is a
/// synchronous transform of in-memory state, triggered by a discrete input
/// event, and guarded by no-ops rather than errors (missing selection,
/// unknown preset key, empty load list). Component mutations replace the
/// list with a new list differing at one id; components are never aliased or
/// mutated in place.
///
/// On [`EditorSession::save`] the session assembles an immutable
/// [`CardLayout`] snapshot and hands it to the caller; persisting it is the
/// caller's job, as is deciding what to do with unsaved changes when the
/// session is closed without saving.
///
/// ## Example
///
/// ```
/// use cardstock_editor::EditorSession;
/// use cardstock_layout::{FieldDefinition, FieldType};
///
/// let fields = vec![FieldDefinition {
///     name: "title".into(),
///     label: "Title".into(),
///     ty: FieldType::Text,
///     required: true,
///     options: None,
///     placeholder: None,
/// }];
///
/// let mut editor = EditorSession::new(fields);
/// editor.add_component("title", FieldType::Text);
/// let layout = editor.save();
/// assert_eq!(layout.components.len(), 1);
/// assert_eq!(layout.created_at, layout.updated_at);
/// ```
pub struct EditorSession {
    fields: Vec<FieldDefinition>,
    existing: Option<CardLayout>,
    canvas: CanvasSize,
    components: Vec<LayoutComponent>,
    selected: Option<String>,
    panel_open: bool,
    resize: Option<ResizeSession>,
    grid_size: f64,
    show_grid: bool,
    capture: Rc<dyn CaptureHost>,
}

impl EditorSession {
    /// Creates a fresh session with no placed components and the default
    /// canvas preset, using a no-op pointer-capture host.
    #[must_use]
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self::with_capture_host(fields, Rc::new(NoopCapture))
    }

    /// Creates a fresh session whose resize gestures acquire pointer capture
    /// through `capture`.
    #[must_use]
    pub fn with_capture_host(fields: Vec<FieldDefinition>, capture: Rc<dyn CaptureHost>) -> Self {
        Self {
            fields,
            existing: None,
            canvas: presets::default_preset(),
            components: Vec::new(),
            selected: None,
            panel_open: false,
            resize: None,
            grid_size: DEFAULT_GRID_SIZE,
            show_grid: true,
            capture,
        }
    }

    /// Creates a session, loading `existing` when one is provided.
    #[must_use]
    pub fn open(fields: Vec<FieldDefinition>, existing: Option<&CardLayout>) -> Self {
        let mut session = Self::new(fields);
        if let Some(layout) = existing {
            session.load_existing(layout);
        }
        session
    }

    /// Placed components in paint order (first = bottom).
    #[must_use]
    pub fn components(&self) -> &[LayoutComponent] {
        &self.components
    }

    /// Id of the selected component, if any.
    #[must_use]
    pub fn selected_component_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected component, if the selection refers to a live component.
    #[must_use]
    pub fn selected_component(&self) -> Option<&LayoutComponent> {
        let id = self.selected.as_deref()?;
        self.components.iter().find(|c| c.id == id)
    }

    /// Whether the properties panel is open.
    #[must_use]
    pub fn properties_panel_open(&self) -> bool {
        self.panel_open
    }

    /// The active canvas size (selected preset or synthesized custom entry).
    #[must_use]
    pub fn canvas_size(&self) -> &CanvasSize {
        &self.canvas
    }

    /// Snap grid size in pixels.
    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Whether the grid overlay is shown.
    #[must_use]
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// The in-flight resize session, if a gesture is active.
    #[must_use]
    pub fn active_resize(&self) -> Option<&ResizeSession> {
        self.resize.as_ref()
    }

    /// The field-placement toolbar: every schema field with an `is_used`
    /// flag derived from the current component list.
    #[must_use]
    pub fn available_fields(&self) -> Vec<FieldSlot> {
        let used: HashSet<&str> = self.components.iter().map(|c| c.field_id.as_str()).collect();
        self.fields
            .iter()
            .map(|field| FieldSlot {
                id: field.name.clone(),
                label: field.label.clone(),
                ty: field.ty,
                is_used: used.contains(field.name.as_str()),
            })
            .collect()
    }

    /// Appends a new component bound to `field_id` and selects it.
    ///
    /// The component gets a generated unique id, a fixed offset from the
    /// canvas origin so it never lands exactly at (0,0), and the default
    /// size for its field type. Placing the same field twice is permitted.
    pub fn add_component(&mut self, field_id: &str, ty: FieldType) {
        let component = LayoutComponent {
            id: generate_component_id(),
            field_id: field_id.to_owned(),
            ty,
            position: Position { x: 20.0, y: 20.0 },
            size: default_size(ty),
            style: None,
        };
        debug!(component_id = %component.id, field_id, "component added");
        self.selected = Some(component.id.clone());
        self.components.push(component);
    }

    /// Deletes the selected component, clears the selection, and closes the
    /// properties panel. No-op when nothing is selected.
    ///
    /// Keyboard delete maps directly onto this; it needs no session state
    /// beyond the current selection.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        self.components.retain(|c| c.id != id);
        self.panel_open = false;
        debug!(component_id = %id, "component removed");
    }

    /// Plain-click selection: highlights `id` without opening the
    /// properties panel.
    pub fn select_for_highlight(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
    }

    /// Secondary-activation selection: highlights `id` and opens the
    /// properties panel.
    pub fn select_for_properties(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
        self.panel_open = true;
    }

    /// Background click: clears the selection and closes the panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.panel_open = false;
    }

    /// Completes a free-form drag of `id`, replacing its position with the
    /// reported absolute position.
    ///
    /// No clamping to canvas bounds and no grid snapping is applied; only
    /// the dragged component changes and list order is untouched.
    pub fn drag_ended(&mut self, id: &str, dropped_at: Point) {
        self.replace_component(id, |c| LayoutComponent {
            position: Position {
                x: dropped_at.x,
                y: dropped_at.y,
            },
            ..c.clone()
        });
    }

    /// Enters a resize gesture on `id` from the handle tagged `direction`.
    ///
    /// Snapshots the component's size and position as the gesture baseline
    /// and acquires pointer capture for the duration of the session. No-op
    /// if a gesture is already active or `id` does not name a component.
    pub fn begin_resize(&mut self, id: &str, direction: ResizeDirection, pointer: Point) {
        if self.resize.is_some() {
            return;
        }
        let Some(component) = self.components.iter().find(|c| c.id == id) else {
            return;
        };
        debug!(component_id = %id, ?direction, "resize session started");
        self.resize = Some(ResizeSession::new(
            id.to_owned(),
            direction,
            pointer,
            component.position,
            component.size,
            CaptureGuard::acquire(self.capture.clone()),
        ));
    }

    /// Pointer-move during a resize gesture: recomputes the component's
    /// frame from the baseline snapshot. No-op when no gesture is active.
    pub fn resize_moved(&mut self, pointer: Point) {
        let Some(session) = &self.resize else {
            return;
        };
        let (position, size) = session.frame_at(pointer);
        let id = session.component_id().to_owned();
        self.replace_component(&id, |c| LayoutComponent {
            position,
            size,
            ..c.clone()
        });
    }

    /// Pointer-up: exits the resize gesture and releases pointer capture.
    /// No-op when no gesture is active.
    pub fn end_resize(&mut self) {
        if self.resize.take().is_some() {
            debug!("resize session ended");
        }
    }

    /// Sets the selected component's font family.
    pub fn set_font_family(&mut self, family: &str) {
        let family = family.to_owned();
        self.update_selected_style(move |style| style.font_family = Some(family));
    }

    /// Sets the selected component's font size in pixels.
    pub fn set_font_size(&mut self, size: f64) {
        self.update_selected_style(move |style| style.font_size = Some(size));
    }

    /// Sets the selected component's font weight.
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.update_selected_style(move |style| style.font_weight = Some(weight));
    }

    /// Sets the selected component's text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.update_selected_style(move |style| style.text_align = Some(align));
    }

    /// Sets the selected component's text color (CSS color string).
    pub fn set_text_color(&mut self, color: &str) {
        let color = color.to_owned();
        self.update_selected_style(move |style| style.color = Some(color));
    }

    /// Sets the selected component's background color (CSS color string).
    pub fn set_background_color(&mut self, color: &str) {
        let color = color.to_owned();
        self.update_selected_style(move |style| style.background_color = Some(color));
    }

    /// Toggles the selected component's transparent background.
    ///
    /// Enabling transparency removes the background key entirely (absence
    /// means transparent); disabling it sets the explicit opaque default
    /// [`OPAQUE_BACKGROUND`].
    pub fn set_background_transparent(&mut self, transparent: bool) {
        self.update_selected_style(move |style| {
            style.background_color = if transparent {
                None
            } else {
                Some(OPAQUE_BACKGROUND.to_owned())
            };
        });
    }

    /// Sets the selected component's border color (CSS color string).
    pub fn set_border_color(&mut self, color: &str) {
        let color = color.to_owned();
        self.update_selected_style(move |style| style.border_color = Some(color));
    }

    /// Sets the selected component's border width in pixels. Zero means no
    /// border.
    pub fn set_border_width(&mut self, width: f64) {
        self.update_selected_style(move |style| style.border_width = Some(width));
    }

    /// Sets the selected component's inner padding in pixels.
    pub fn set_padding(&mut self, padding: f64) {
        self.update_selected_style(move |style| style.padding = Some(padding));
    }

    /// Adopts the canvas preset registered under `key`; unknown keys leave
    /// the canvas unchanged.
    pub fn change_canvas_size(&mut self, key: &str) {
        if let Some(preset) = presets::preset_for(key) {
            self.canvas = preset;
        }
    }

    /// Toggles the grid overlay.
    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Sets the snap grid size in pixels.
    ///
    /// The value is stored and persisted with the document; drag and resize
    /// outputs are not snapped to it.
    pub fn set_grid_size(&mut self, size: f64) {
        self.grid_size = size;
    }

    /// Loads an existing document into the session.
    ///
    /// The document's canvas becomes the matching named preset when one
    /// exists, otherwise a synthesized custom size carrying the literal
    /// dimensions. The component list is replaced wholesale only when the
    /// incoming list is non-empty, so a redundant load event cannot wipe a
    /// list the user is already building. A stored grid size is adopted when
    /// present.
    pub fn load_existing(&mut self, layout: &CardLayout) {
        self.canvas = presets::match_preset(layout.canvas.width, layout.canvas.height)
            .unwrap_or_else(|| presets::custom(layout.canvas.width, layout.canvas.height));
        if !layout.components.is_empty() {
            self.components = layout.components.clone();
            self.selected = None;
            self.panel_open = false;
        }
        if let Some(grid) = layout.grid_size {
            self.grid_size = grid;
        }
        debug!(layout_id = %layout.id, components = layout.components.len(), "layout loaded");
        self.existing = Some(layout.clone());
    }

    /// Assembles and returns a new [`CardLayout`] snapshot of the session.
    ///
    /// When editing an existing document its id, name, and creation
    /// timestamp are preserved; otherwise fresh ones are generated and
    /// `created_at` equals `updated_at`. Components are emitted as-is,
    /// including unclamped or overlapping placements. The caller persists
    /// the document; the session does not.
    pub fn save(&self) -> CardLayout {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let layout = CardLayout {
            id: self
                .existing
                .as_ref()
                .map(|e| e.id.clone())
                .unwrap_or_else(|| format!("layout-{}", Utc::now().timestamp_millis())),
            name: self
                .existing
                .as_ref()
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "Card Layout".to_owned()),
            canvas: Dimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            },
            components: self.components.clone(),
            grid_size: Some(self.grid_size),
            created_at: self
                .existing
                .as_ref()
                .map(|e| e.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        };
        debug!(layout_id = %layout.id, components = layout.components.len(), "layout saved");
        layout
    }

    /// Tears the session down, ending any in-flight resize gesture so its
    /// pointer capture is released.
    ///
    /// Dropping the session has the same effect; `close` exists for hosts
    /// that keep the session alive after the designer is dismissed.
    pub fn close(&mut self) {
        self.resize = None;
        debug!("editor closed");
    }

    /// Replaces the component list with a new list in which only the
    /// component with `id` differs.
    fn replace_component(&mut self, id: &str, f: impl Fn(&LayoutComponent) -> LayoutComponent) {
        self.components = self
            .components
            .iter()
            .map(|c| if c.id == id { f(c) } else { c.clone() })
            .collect();
    }

    /// Shallow-merges one attribute change into the selected component's
    /// style. No-op when nothing is selected.
    fn update_selected_style(&mut self, f: impl FnOnce(&mut ComponentStyle)) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        let mut f = Some(f);
        self.components = self
            .components
            .iter()
            .map(|c| {
                if c.id == id {
                    let mut component = c.clone();
                    let mut style = component.style.take().unwrap_or_default();
                    if let Some(f) = f.take() {
                        f(&mut style);
                    }
                    component.style = Some(style);
                    component
                } else {
                    c.clone()
                }
            })
            .collect();
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("canvas", &self.canvas)
            .field("components", &self.components.len())
            .field("selected", &self.selected)
            .field("panel_open", &self.panel_open)
            .field("resizing", &self.resize.is_some())
            .field("grid_size", &self.grid_size)
            .field("show_grid", &self.show_grid)
            .finish_non_exhaustive()
    }
}

/// Default size for a newly placed component of the given field type.
///
/// Unrecognized combinations fall back to the dropdown-sized default.
#[must_use]
pub fn default_size(ty: FieldType) -> Dimensions {
    let (width, height) = match ty {
        FieldType::Text => (200.0, 40.0),
        FieldType::Number => (100.0, 40.0),
        FieldType::Textarea => (250.0, 100.0),
        FieldType::Image => (150.0, 150.0),
        FieldType::Dropdown | FieldType::Select | FieldType::Checkbox => (150.0, 40.0),
    };
    Dimensions { width, height }
}

/// Generates a component id unique within a document: wall-clock millis plus
/// a random suffix.
fn generate_component_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "component-{}-{}",
        Utc::now().timestamp_millis(),
        &suffix[..9]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition {
                name: "title".into(),
                label: "Title".into(),
                ty: FieldType::Text,
                required: true,
                options: None,
                placeholder: None,
            },
            FieldDefinition {
                name: "cost".into(),
                label: "Cost".into(),
                ty: FieldType::Number,
                required: false,
                options: None,
                placeholder: None,
            },
        ]
    }

    #[test]
    fn add_component_selects_and_uses_type_default_size() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("cost", FieldType::Number);

        let component = editor.selected_component().unwrap();
        assert_eq!(component.field_id, "cost");
        assert_eq!(component.position, Position { x: 20.0, y: 20.0 });
        assert_eq!(
            component.size,
            Dimensions {
                width: 100.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn duplicate_field_placements_get_distinct_ids() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("cost", FieldType::Number);
        editor.add_component("cost", FieldType::Number);

        let components = editor.components();
        assert_eq!(components.len(), 2);
        assert_ne!(components[0].id, components[1].id);
        assert!(components.iter().all(|c| c.field_id == "cost"));
        assert!(
            components
                .iter()
                .all(|c| c.size == Dimensions { width: 100.0, height: 40.0 })
        );
    }

    #[test]
    fn remove_selected_is_a_noop_without_selection() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);
        editor.clear_selection();

        editor.remove_selected();
        assert_eq!(editor.components().len(), 1);
    }

    #[test]
    fn remove_selected_clears_selection_and_panel() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);
        let id = editor.selected_component_id().unwrap().to_owned();
        editor.select_for_properties(&id);
        assert!(editor.properties_panel_open());

        editor.remove_selected();
        assert!(editor.components().is_empty());
        assert_eq!(editor.selected_component_id(), None);
        assert!(!editor.properties_panel_open());
    }

    #[test]
    fn two_tier_selection() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);
        let id = editor.selected_component_id().unwrap().to_owned();
        editor.clear_selection();

        editor.select_for_highlight(&id);
        assert_eq!(editor.selected_component_id(), Some(id.as_str()));
        assert!(!editor.properties_panel_open());

        editor.select_for_properties(&id);
        assert!(editor.properties_panel_open());

        editor.clear_selection();
        assert_eq!(editor.selected_component_id(), None);
        assert!(!editor.properties_panel_open());
    }

    #[test]
    fn drag_ended_moves_only_the_dragged_component() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);
        editor.add_component("cost", FieldType::Number);
        let first = editor.components()[0].id.clone();
        let second = editor.components()[1].id.clone();

        editor.drag_ended(&first, Point::new(-15.0, 900.0));

        assert_eq!(
            editor.components()[0].position,
            Position { x: -15.0, y: 900.0 },
            "positions are unclamped"
        );
        assert_eq!(editor.components()[1].position, Position { x: 20.0, y: 20.0 });
        // Z-order (list order) is unaffected by dragging.
        assert_eq!(editor.components()[0].id, first);
        assert_eq!(editor.components()[1].id, second);
    }

    #[test]
    fn style_setters_noop_without_selection() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);
        editor.clear_selection();

        editor.set_font_size(32.0);
        assert_eq!(editor.components()[0].style, None);
    }

    #[test]
    fn style_setters_merge_shallowly() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);

        editor.set_font_family("Georgia");
        editor.set_font_size(32.0);
        editor.set_text_align(TextAlign::Center);

        let style = editor.components()[0].style.as_ref().unwrap();
        assert_eq!(style.font_family.as_deref(), Some("Georgia"));
        assert_eq!(style.font_size, Some(32.0));
        assert_eq!(style.text_align, Some(TextAlign::Center));
        assert_eq!(style.color, None);
    }

    #[test]
    fn transparent_toggle_removes_then_restores_background() {
        let mut editor = EditorSession::new(schema());
        editor.add_component("title", FieldType::Text);

        editor.set_background_color("#ff00ff");
        editor.set_background_transparent(true);
        let style = editor.components()[0].style.as_ref().unwrap();
        assert_eq!(style.background_color, None, "absence means transparent");

        editor.set_background_transparent(false);
        let style = editor.components()[0].style.as_ref().unwrap();
        assert_eq!(style.background_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn change_canvas_size_ignores_unknown_keys() {
        let mut editor = EditorSession::new(schema());
        let before = editor.canvas_size().clone();
        editor.change_canvas_size("poker");
        assert_eq!(editor.canvas_size(), &before);

        editor.change_canvas_size("trading");
        assert_eq!(editor.canvas_size().width, 750.0);
        assert_eq!(editor.canvas_size().height, 1050.0);
    }

    #[test]
    fn available_fields_tracks_used_set() {
        let mut editor = EditorSession::new(schema());
        let slots = editor.available_fields();
        assert!(slots.iter().all(|s| !s.is_used));

        editor.add_component("cost", FieldType::Number);
        let slots = editor.available_fields();
        assert!(!slots.iter().find(|s| s.id == "title").unwrap().is_used);
        assert!(slots.iter().find(|s| s.id == "cost").unwrap().is_used);

        editor.remove_selected();
        let slots = editor.available_fields();
        assert!(slots.iter().all(|s| !s.is_used));
    }

    #[test]
    fn grid_toggles_and_resizes_without_snapping_positions() {
        let mut editor = EditorSession::new(schema());
        assert!(editor.show_grid());
        editor.toggle_grid();
        assert!(!editor.show_grid());

        editor.set_grid_size(25.0);
        editor.add_component("title", FieldType::Text);
        let id = editor.components()[0].id.clone();
        editor.drag_ended(&id, Point::new(33.0, 47.0));
        // Stored grid size does not snap drag output.
        assert_eq!(editor.components()[0].position, Position { x: 33.0, y: 47.0 });
        assert_eq!(editor.grid_size(), 25.0);
    }

    #[test]
    fn unknown_field_type_fallback_is_dropdown_sized() {
        assert_eq!(
            default_size(FieldType::Checkbox),
            Dimensions {
                width: 150.0,
                height: 40.0
            }
        );
        assert_eq!(default_size(FieldType::Select), default_size(FieldType::Dropdown));
    }

    #[test]
    fn generated_ids_have_the_documented_shape() {
        let id = generate_component_id();
        let mut parts = id.splitn(3, '-');
        assert_eq!(parts.next(), Some("component"));
        let millis: i64 = parts.next().unwrap().parse().unwrap();
        assert!(millis > 0, "timestamp part must be wall-clock millis");
        assert_eq!(parts.next().unwrap().len(), 9);
    }
}
