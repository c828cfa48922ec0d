// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color value normalization.
//!
//! Any property whose name contains `color` has its (first) argument passed
//! through [`normalize_color`] before the setter sees it.

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;

/// Returns `true` if values of `property` are color-normalized.
#[must_use]
pub fn is_color_property(property: &str) -> bool {
    property.to_ascii_lowercase().contains("color")
}

/// Resolves a textual color specification to a color handle.
///
/// Accepts everything the CSS color syntax does, including `#rgb`,
/// `#rrggbb`, `#rrggbbaa` hex codes and named colors.
///
/// ```rust
/// use understory_declare::resolve_color;
///
/// let red = resolve_color("#ff0000").unwrap();
/// assert_eq!(red.to_rgba8().r, 255);
/// assert!(resolve_color("not a color").is_none());
/// ```
#[must_use]
pub fn resolve_color(spec: &str) -> Option<Color> {
    parse_color(spec).ok().map(|c| c.to_alpha_color::<Srgb>())
}

/// Normalizes a color argument for `property`.
///
/// Color handles, palette indices and absent values pass through unchanged;
/// strings are resolved with [`resolve_color`]. Anything else, including an
/// unparseable string, is an [`InvalidColorValue`](ConfigError::InvalidColorValue).
pub fn normalize_color(property: &str, value: &Value) -> ConfigResult<Value> {
    match value {
        Value::None | Value::Int(_) | Value::Color(_) => Ok(value.clone()),
        Value::Str(spec) => resolve_color(spec)
            .map(Value::Color)
            .ok_or_else(|| invalid(property, value)),
        _ => Err(invalid(property, value)),
    }
}

/// Applies color normalization to a declaration value.
///
/// Scalars are normalized directly; for positional lists only the first
/// element is. Values of non-color properties are returned unchanged.
pub(crate) fn normalize_args(property: &str, value: &Value) -> ConfigResult<Value> {
    if !is_color_property(property) {
        return Ok(value.clone());
    }
    match value {
        Value::List(items) => {
            let mut items = items.clone();
            if let Some(first) = items.first_mut() {
                *first = normalize_color(property, first)?;
            }
            Ok(Value::List(items))
        }
        scalar => normalize_color(property, scalar),
    }
}

fn invalid(property: &str, value: &Value) -> ConfigError {
    ConfigError::InvalidColorValue {
        property: property.to_owned(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_properties_by_substring() {
        assert!(is_color_property("linecolor"));
        assert!(is_color_property("FillColorAlpha"));
        assert!(!is_color_property("linewidth"));
    }

    #[test]
    fn hex_strings_resolve() {
        let v = normalize_color("color", &Value::from("#ff0000")).unwrap();
        let Value::Color(c) = v else {
            panic!("expected a color, got {v:?}");
        };
        let rgba = c.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 255));
    }

    #[test]
    fn handles_indices_and_none_pass_through() {
        let blue = Value::Color(Color::from_rgba8(0, 0, 255, 255));
        assert_eq!(normalize_color("color", &blue).unwrap(), blue);
        assert_eq!(
            normalize_color("color", &Value::Int(632)).unwrap(),
            Value::Int(632)
        );
        assert_eq!(normalize_color("color", &Value::None).unwrap(), Value::None);
    }

    #[test]
    fn other_kinds_are_rejected() {
        for bad in [Value::Float(1.0), Value::Bool(true), Value::from("nope")] {
            let err = normalize_color("linecolor", &bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidColorValue { ref property, .. } if property == "linecolor"),
                "unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn only_first_positional_argument_is_normalized() {
        let args = Value::List(vec![Value::from("#00ff00"), Value::Float(0.5)]);
        let out = normalize_args("linecoloralpha", &args).unwrap();
        let items = out.args();
        assert!(matches!(items[0], Value::Color(_)));
        assert_eq!(items[1], Value::Float(0.5));
    }

    #[test]
    fn non_color_properties_untouched() {
        let v = Value::from("#00ff00");
        assert_eq!(normalize_args("title", &v).unwrap(), v);
    }
}
