// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic property values.
//!
//! This module provides [`Value`], the argument type flowing through
//! declarations and templates, and [`FromValue`], which converts a positional
//! argument into a typed setter parameter.

use core::fmt;

use peniko::Color;

/// A dynamically typed property value.
///
/// A [`List`](Self::List) passed to a declaration is the ordered list of
/// positional setter arguments. Every other variant is a single argument.
/// [`None`](Self::None) marks an absent value; declaring it is a no-op.
///
/// # Example
///
/// ```rust
/// use understory_declare::Value;
///
/// let size: Value = 10.into();
/// assert_eq!(size, Value::Int(10));
///
/// let range = Value::from(vec![0.0, 1.5]);
/// assert_eq!(range.args().len(), 2);
/// assert_eq!(size.args().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// An integer, also used for palette color indices.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string, also used for textual color specifications.
    Str(String),
    /// A resolved color handle.
    Color(Color),
    /// Positional arguments.
    List(Vec<Self>),
}

impl Value {
    /// Returns a short name for the kind of this value, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Color(_) => "color",
            Self::List(_) => "list",
        }
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the string payload, if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the positional arguments this value stands for.
    ///
    /// A list yields its elements; any other value yields itself.
    #[must_use]
    pub fn args(&self) -> &[Self] {
        match self {
            Self::List(items) => items,
            other => core::slice::from_ref(other),
        }
    }

    /// Converts a JSON value into a property value.
    ///
    /// `null` becomes [`Value::None`] and arrays become lists. Integers that
    /// fit in `i64` become [`Value::Int`], other numbers [`Value::Float`].
    /// Objects have no property value equivalent and yield `None`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        Some(match json {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64()?),
            },
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect::<Option<_>>()?)
            }
            serde_json::Value::Object(_) => return None,
        })
    }
}

// Colors compare by their 8-bit RGBA rendering.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a.to_rgba8() == b.to_rgba8(),
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Color(c) => {
                let rgba = c.to_rgba8();
                write!(
                    f,
                    "#{:02x}{:02x}{:02x}{:02x}",
                    rgba.r, rgba.g, rgba.b, rgba.a
                )
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A normalized color argument: either a resolved handle or a palette index.
///
/// This is the parameter type for setters of color-valued properties, which
/// receive their argument after [color normalization](crate::normalize_color).
#[derive(Copy, Clone, Debug)]
pub enum ColorRef {
    /// A resolved RGBA color.
    Rgba(Color),
    /// An index into a host palette.
    Index(i64),
}

impl PartialEq for ColorRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rgba(a), Self::Rgba(b)) => a.to_rgba8() == b.to_rgba8(),
            (Self::Index(a), Self::Index(b)) => a == b,
            _ => false,
        }
    }
}

/// Conversion from a positional [`Value`] argument into a setter parameter.
pub trait FromValue: Sized {
    /// Name of the accepted kind, used in [`InvalidArgument`](crate::ConfigError::InvalidArgument).
    const KIND: &'static str;

    /// Converts `value`, returning `None` if it has the wrong kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const KIND: &'static str = "any";

    fn from_value(value: &Self) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const KIND: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const KIND: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const KIND: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| Self::try_from(i).ok())
    }
}

impl FromValue for u32 {
    const KIND: &'static str = "unsigned int";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| Self::try_from(i).ok())
    }
}

impl FromValue for f64 {
    const KIND: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const KIND: &'static str = "float";

    #[expect(clippy::cast_possible_truncation, reason = "f32 parameters are lossy by choice")]
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|x| x as f32)
    }
}

impl FromValue for String {
    const KIND: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Color {
    const KIND: &'static str = "color";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromValue for ColorRef {
    const KIND: &'static str = "color or palette index";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Color(c) => Some(Self::Rgba(*c)),
            Value::Int(i) => Some(Self::Index(*i)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const KIND: &'static str = T::KIND;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const KIND: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(x.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<ColorRef> for Value {
    fn from(c: ColorRef) -> Self {
        match c {
            ColorRef::Rgba(c) => Self::Color(c),
            ColorRef::Index(i) => Self::Int(i),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn args_of_scalar_and_list() {
        let scalar = Value::Int(3);
        assert_eq!(scalar.args(), &[Value::Int(3)]);

        let list = Value::from(vec![1, 2]);
        assert_eq!(list.args(), &[Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn float_accepts_int() {
        assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
        assert_eq!(i64::from_value(&Value::Float(2.0)), None);
    }

    #[test]
    fn option_maps_none() {
        assert_eq!(Option::<i64>::from_value(&Value::None), Some(None));
        assert_eq!(Option::<i64>::from_value(&Value::Int(4)), Some(Some(4)));
        assert_eq!(Option::<i64>::from_value(&Value::Bool(true)), None);
    }

    #[test]
    fn narrow_ints_reject_overflow() {
        assert_eq!(i32::from_value(&Value::Int(i64::MAX)), None);
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(u32::from_value(&Value::Int(7)), Some(7));
    }

    #[test]
    fn color_ref_from_handle_or_index() {
        let red = Color::from_rgba8(255, 0, 0, 255);
        assert_eq!(
            ColorRef::from_value(&Value::Color(red)),
            Some(ColorRef::Rgba(red))
        );
        assert_eq!(
            ColorRef::from_value(&Value::Int(2)),
            Some(ColorRef::Index(2))
        );
        assert_eq!(ColorRef::from_value(&Value::from("#ff0000")), None);
    }

    #[test]
    fn from_json_shapes() {
        let v = Value::from_json(&json!([1, 2.5, null, "x", true])).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::None,
                Value::from("x"),
                Value::Bool(true),
            ])
        );
        assert_eq!(Value::from_json(&json!({ "a": 1 })), None);
        assert_eq!(Value::from_json(&json!([{ "a": 1 }])), None);
    }

    #[test]
    fn display_renders_colors_as_hex() {
        let v = Value::from(vec![Value::Color(Color::from_rgba8(255, 0, 16, 255)), Value::Int(2)]);
        assert_eq!(v.to_string(), "[#ff0010ff, 2]");
    }
}
