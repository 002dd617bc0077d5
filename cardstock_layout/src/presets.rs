// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named canonical canvas sizes for common card formats.
//!
//! All dimensions are in pixels at 300 DPI for print quality. The table is
//! pure data: lookups have no side effects and cannot fail beyond returning
//! `None` for unknown keys.
//!
//! Loading an existing document goes the other way: [`match_preset`] decides
//! whether stored dimensions correspond to a named preset, and [`custom`]
//! synthesizes an entry carrying the literal dimensions when they do not, so
//! loaded sizes are never silently altered.

/// A named canvas width/height pairing.
///
/// Invariant: `width > 0` and `height > 0` for every entry this module
/// produces.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels at 300 DPI.
    pub width: f64,
    /// Height in pixels at 300 DPI.
    pub height: f64,
    /// Display name of the format.
    pub name: String,
}

/// Preset keys in display order, for building a size-selection menu.
pub const PRESET_KEYS: &[&str] = &["tarot", "trading", "usGame", "bridge", "mini", "mtg"];

/// Key of the preset a fresh editing session starts with.
pub const DEFAULT_PRESET: &str = "mtg";

/// Returns the preset registered under `key`, or `None` for unknown keys.
#[must_use]
pub fn preset_for(key: &str) -> Option<CanvasSize> {
    let (width, height, name) = match key {
        "tarot" => (825.0, 1425.0, "Tarot"),
        "trading" => (750.0, 1050.0, "Trading"),
        "usGame" => (660.0, 1029.0, "US Game"),
        "bridge" => (675.0, 1050.0, "Bridge"),
        "mini" => (525.0, 750.0, "Mini"),
        "mtg" => (744.0, 1038.0, "Magic: The Gathering"),
        _ => return None,
    };
    Some(CanvasSize {
        width,
        height,
        name: name.to_owned(),
    })
}

/// Returns the canvas size a fresh editing session starts with.
#[must_use]
pub fn default_preset() -> CanvasSize {
    CanvasSize {
        width: 744.0,
        height: 1038.0,
        name: "Magic: The Gathering".to_owned(),
    }
}

/// Finds a preset whose width and height both exactly equal the given values.
///
/// Used when loading a document to decide whether to display its canvas as a
/// named preset or as a synthesized [`custom`] entry.
#[must_use]
pub fn match_preset(width: f64, height: f64) -> Option<CanvasSize> {
    PRESET_KEYS
        .iter()
        .filter_map(|key| preset_for(key))
        .find(|preset| preset.width == width && preset.height == height)
}

/// Synthesizes a "Custom" canvas size carrying the given literal dimensions.
#[must_use]
pub fn custom(width: f64, height: f64) -> CanvasSize {
    CanvasSize {
        width,
        height,
        name: "Custom".to_owned(),
    }
}
