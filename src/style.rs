//! Creation-time style overrides for window surfaces.
//!
//! Overrides map a property name to either a pixel number or a literal
//! string. Geometry properties (`left`, `top`, `right`, `bottom`, `width`,
//! `height`) feed the surface [`Geometry`]; anything else is carried through
//! as an opaque attribute for the renderer.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::geometry::{Geometry, Length};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("invalid length literal: {0:?}")]
    InvalidLength(String),
    #[error("unknown geometry property: {0:?}")]
    UnknownProperty(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Px(f64),
    Literal(String),
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Px(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Px(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Literal(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Literal(value)
    }
}

impl StyleValue {
    /// Render the value the way it would be written into a style sheet:
    /// numbers gain a `px` unit, literals pass through unchanged.
    pub fn to_css(&self) -> String {
        match self {
            StyleValue::Px(px) => format!("{px}px"),
            StyleValue::Literal(raw) => raw.clone(),
        }
    }

    /// `Ok(None)` for `auto`, which unsets the property.
    pub fn to_length(&self) -> Result<Option<Length>, StyleError> {
        match self {
            StyleValue::Px(px) => Ok(Some(Length::px(*px))),
            StyleValue::Literal(raw) if raw.trim().eq_ignore_ascii_case("auto") => Ok(None),
            StyleValue::Literal(raw) => raw.parse::<Length>().map(Some),
        }
    }
}

/// Ordered property → value overrides, as supplied with a window request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    entries: BTreeMap<String, StyleValue>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries.get(property)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply geometry properties onto `geometry` and return the remaining
    /// attributes, rendered as strings.
    ///
    /// Geometry values that fail to parse are kept as attributes so a
    /// renderer that understands them still sees them.
    pub fn apply(&self, geometry: &mut Geometry) -> BTreeMap<String, String> {
        let mut extra = BTreeMap::new();
        for (property, value) in self.iter() {
            let parsed = value
                .to_length()
                .and_then(|length| set_geometry_property(geometry, property, length));
            match parsed {
                Ok(()) => {}
                Err(StyleError::UnknownProperty(_)) => {
                    tracing::debug!(property, "keeping non-geometry style attribute");
                    extra.insert(property.to_string(), value.to_css());
                }
                Err(err) => {
                    tracing::warn!(property, error = %err, "ignoring geometry override");
                    extra.insert(property.to_string(), value.to_css());
                }
            }
        }
        extra
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleOverrides {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut overrides = StyleOverrides::new();
        for (property, value) in iter {
            overrides.set(property, value);
        }
        overrides
    }
}

fn set_geometry_property(
    geometry: &mut Geometry,
    property: &str,
    length: Option<Length>,
) -> Result<(), StyleError> {
    let slot = match property {
        "left" => &mut geometry.left,
        "top" => &mut geometry.top,
        "right" => &mut geometry.right,
        "bottom" => &mut geometry.bottom,
        "width" => &mut geometry.width,
        "height" => &mut geometry.height,
        other => return Err(StyleError::UnknownProperty(other.to_string())),
    };
    *slot = length;
    Ok(())
}
