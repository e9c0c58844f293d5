//! Data model for per-menu-item icon settings and the compiled icon dataset.
//!
//! Everything here is pure data: the compiled `IconRecord` shape, the
//! six-field `ItemSettings` record with its canonical defaults, and the
//! merge logic applied when loading a stored record that may be partial,
//! malformed, or absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a navigation menu item, owned by the host platform.
pub type ItemId = u64;

/// One entry in the compiled icon dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: String,
    pub unicode: String,
    pub style: IconStyle,
}

/// Icon-font class family an icon id resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconStyle {
    #[serde(rename = "fas")]
    Solid,
    #[serde(rename = "fab")]
    Brand,
}

impl IconStyle {
    pub const fn class(self) -> &'static str {
        match self {
            IconStyle::Solid => "fas",
            IconStyle::Brand => "fab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    #[default]
    Before,
    After,
}

impl IconPosition {
    pub const fn as_str(self) -> &'static str {
        match self {
            IconPosition::Before => "before",
            IconPosition::After => "after",
        }
    }

    /// Parses a submitted token; anything unrecognized is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "before" => Some(IconPosition::Before),
            "after" => Some(IconPosition::After),
            _ => None,
        }
    }
}

/// Vertical alignment of the icon. Stored and merged, but not currently
/// rendered; reserved for presentational CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl IconAlign {
    pub const fn as_str(self) -> &'static str {
        match self {
            IconAlign::Top => "top",
            IconAlign::Middle => "middle",
            IconAlign::Bottom => "bottom",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "top" => Some(IconAlign::Top),
            "middle" => Some(IconAlign::Middle),
            "bottom" => Some(IconAlign::Bottom),
            _ => None,
        }
    }
}

/// The icon configuration of one menu item.
///
/// A record always carries exactly these six fields; stored records that
/// predate newer fields are completed through [`ItemSettings::merge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSettings {
    /// True hides the visible title text when an icon is rendered.
    pub label: bool,
    pub position: IconPosition,
    pub align: IconAlign,
    /// Icon size in em units; always positive.
    pub size: f64,
    /// Icon class as picked in the admin UI; empty means "no icon".
    pub icon: String,
    /// CSS color; empty means "inherit".
    pub color: String,
}

impl Default for ItemSettings {
    fn default() -> Self {
        Self {
            label: false,
            position: IconPosition::Before,
            align: IconAlign::Middle,
            size: 1.0,
            icon: String::new(),
            color: String::new(),
        }
    }
}

impl ItemSettings {
    /// Completes a partial record with canonical defaults.
    ///
    /// Pure and total: fields absent from `partial` take their default,
    /// everything else is kept as-is.
    pub fn merge(partial: PartialSettings) -> Self {
        let defaults = Self::default();

        Self {
            label: partial.label.unwrap_or(defaults.label),
            position: partial.position.unwrap_or(defaults.position),
            align: partial.align.unwrap_or(defaults.align),
            size: partial.size.unwrap_or(defaults.size),
            icon: partial.icon.unwrap_or(defaults.icon),
            color: partial.color.unwrap_or(defaults.color),
        }
    }

    /// A record where every field is at its default is treated as "no
    /// configuration" and is deleted instead of stored.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A stored record as read back from the metadata store: every field
/// optional, unknown keys already dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSettings {
    pub label: Option<bool>,
    pub position: Option<IconPosition>,
    pub align: Option<IconAlign>,
    pub size: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl PartialSettings {
    /// Reads a raw stored value, tolerating records written by older
    /// versions (integer label flags, stringly-typed sizes) and degrading
    /// any field it cannot interpret to "absent". Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        Self {
            label: map.get("label").and_then(flag_from_value),
            position: map
                .get("position")
                .and_then(Value::as_str)
                .and_then(IconPosition::from_token),
            align: map.get("align").and_then(Value::as_str).and_then(IconAlign::from_token),
            size: map.get("size").and_then(size_from_value),
            icon: map.get("icon").and_then(Value::as_str).map(str::to_owned),
            color: map.get("color").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

fn flag_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        Value::String(text) => text.trim().parse::<i64>().ok().map(|n| n != 0),
        _ => None,
    }
}

fn size_from_value(value: &Value) -> Option<f64> {
    let size = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (size > 0.0).then_some(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_of_empty_partial_yields_defaults() {
        let merged = ItemSettings::merge(PartialSettings::default());
        assert_eq!(merged, ItemSettings::default());
    }

    #[test]
    fn merge_overrides_only_present_fields() {
        let partial = PartialSettings::from_value(&json!({ "icon": "coffee" }));
        let merged = ItemSettings::merge(partial);

        assert_eq!(merged.icon, "coffee");
        assert_eq!(merged.position, IconPosition::Before);
        assert_eq!(merged.align, IconAlign::Middle);
        assert_eq!(merged.size, 1.0);
        assert!(!merged.label);
        assert!(merged.color.is_empty());
    }

    #[test]
    fn merge_drops_unknown_fields() {
        let partial = PartialSettings::from_value(&json!({ "bogus": "x" }));
        assert_eq!(ItemSettings::merge(partial), ItemSettings::default());
    }

    #[test]
    fn merge_is_idempotent() {
        let partial = PartialSettings::from_value(&json!({
            "label": 1,
            "position": "after",
            "size": "1.5",
            "icon": "star",
        }));
        let merged = ItemSettings::merge(partial);

        let stored = serde_json::to_value(&merged).expect("settings serialize");
        let remerged = ItemSettings::merge(PartialSettings::from_value(&stored));

        assert_eq!(remerged, merged);
    }

    #[test]
    fn legacy_field_encodings_are_accepted() {
        let partial = PartialSettings::from_value(&json!({
            "label": "1",
            "size": "2",
        }));

        assert_eq!(partial.label, Some(true));
        assert_eq!(partial.size, Some(2.0));
    }

    #[test]
    fn malformed_stored_values_degrade_to_absent() {
        let partial = PartialSettings::from_value(&json!({
            "label": [],
            "position": "sideways",
            "align": 7,
            "size": "not-a-number",
        }));

        assert_eq!(partial, PartialSettings::default());

        let scalar = PartialSettings::from_value(&json!("garbage"));
        assert_eq!(scalar, PartialSettings::default());
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        assert_eq!(size_from_value(&json!(0)), None);
        assert_eq!(size_from_value(&json!(-2.5)), None);
        assert_eq!(size_from_value(&json!(1.5)), Some(1.5));
    }

    #[test]
    fn all_default_record_is_empty() {
        assert!(ItemSettings::default().is_empty());

        let configured =
            ItemSettings { icon: "star".to_owned(), ..ItemSettings::default() };
        assert!(!configured.is_empty());
    }

    #[test]
    fn icon_style_serializes_to_class_names() {
        assert_eq!(serde_json::to_string(&IconStyle::Solid).unwrap(), "\"fas\"");
        assert_eq!(serde_json::to_string(&IconStyle::Brand).unwrap(), "\"fab\"");
        assert_eq!(IconStyle::Solid.class(), "fas");
    }
}
