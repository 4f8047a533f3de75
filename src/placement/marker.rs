//! Marker styling by category
//!
//! Categories are free text, so classification is a case-insensitive
//! keyword match with a plain restaurant marker as the fallback.

use serde::Serialize;

/// Colour and icon name used when drawing a record on a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

const EXACT_COLORS: &[(&str, &str)] = &[
    ("pizzerie", "red"),
    ("bistro", "blue"),
    ("restaurant", "green"),
    ("restaurant italian", "orange"),
    ("italian restaurant", "orange"),
    ("italian bistro", "purple"),
    ("restaurant românesc", "darkgreen"),
    ("restaurant japonez", "pink"),
    ("restaurant asiatic", "pink"),
    ("restaurant mediteranean", "cadetblue"),
    ("restaurant internațional", "darkblue"),
    ("restaurant libanez", "beige"),
    ("restaurant/bistro", "lightblue"),
    ("pizzerie/bistro", "lightred"),
    ("restaurant/bar", "darkpurple"),
];

impl MarkerStyle {
    /// Style for a free-text category
    pub fn for_type(kind: &str) -> Self {
        let kind = kind.trim().to_lowercase();
        Self {
            color: color_for(&kind),
            icon: icon_for(&kind),
        }
    }
}

fn color_for(kind: &str) -> &'static str {
    if let Some((_, color)) = EXACT_COLORS.iter().find(|(name, _)| *name == kind) {
        return *color;
    }

    if kind.contains("pizz") {
        "red"
    } else if kind.contains("bistro") {
        "blue"
    } else if kind.contains("italian") {
        "orange"
    } else if kind.contains("japonez") || kind.contains("asiatic") {
        "pink"
    } else if kind.contains("românesc") {
        "darkgreen"
    } else {
        "green"
    }
}

fn icon_for(kind: &str) -> &'static str {
    if kind.contains("pizz") {
        "pizza-slice"
    } else if kind.contains("bistro") {
        "coffee"
    } else if kind.contains("bar") {
        "glass-martini"
    } else if kind.contains("japonez") || kind.contains("sushi") {
        "fish"
    } else {
        "utensils"
    }
}
