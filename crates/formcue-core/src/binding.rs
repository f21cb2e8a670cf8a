#![forbid(unsafe_code)]

//! Logical field identity and bind-time constraint parameters.
//!
//! A [`BindingKey`] names one validated value: the owning form plus the field
//! name. Several physical elements can share a key (radio buttons in one
//! group), so everything that must exist once per value is keyed by it.
//!
//! [`ConstraintParameters`] are captured from the element's declared
//! attributes exactly once, when the element is bound. They feed the `{0}`
//! placeholder of the matching message template.

use core::fmt;
use std::collections::BTreeMap;

use crate::state::ConstraintName;

/// Stable identity of one logical field: `form["field"]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingKey {
    pub form: String,
    pub field: String,
}

impl BindingKey {
    #[must_use]
    pub fn new(form: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            field: field.into(),
        }
    }

    /// Scope path in the `form["field"]` notation.
    #[must_use]
    pub fn scope_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[\"{}\"]", self.form, self.field)
    }
}

/// A single declared constraint bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            // Whole floats print without a fractional part: `5.0` -> `5`.
            Self::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{value:.0}")
            }
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Raw attributes declared on an input element.
///
/// Names are normalized on insert so `ng-minlength`, `data-ng-minlength` and
/// `ngMinlength` all address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttributes {
    values: BTreeMap<String, String>,
}

impl ElementAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, normalizing its name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(normalize_attribute_name(name), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up an attribute by (any spelling of) its name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&normalize_attribute_name(name))
            .map(String::as_str)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ElementAttributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Normalize `data-ng-min_length` / `x-ng:minlength` style names to camelCase.
fn normalize_attribute_name(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix("data-")
        .or_else(|| name.strip_prefix("x-"))
        .unwrap_or(name);

    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if matches!(ch, '-' | '_' | ':') {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Declared constraint bounds, keyed by constraint name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintParameters {
    values: BTreeMap<ConstraintName, ParamValue>,
}

/// Attribute name, constraint name, and whether the bound is integral.
const PARAMETER_ATTRIBUTES: &[(&str, &str, bool)] = &[
    ("ngMinlength", "minlength", true),
    ("ngMaxlength", "maxlength", true),
    ("min", "min", false),
    ("max", "max", false),
];

impl ConstraintParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract `minlength`, `maxlength`, `min` and `max` bounds.
    ///
    /// Length bounds are parsed as integers, range bounds as floats, both
    /// from the longest numeric prefix of the value. Values without a
    /// numeric prefix are skipped.
    #[must_use]
    pub fn from_attributes(attrs: &ElementAttributes) -> Self {
        let mut params = Self::new();
        for &(attribute, constraint, integral) in PARAMETER_ATTRIBUTES {
            let Some(raw) = attrs.get(attribute) else {
                continue;
            };
            let parsed = if integral {
                parse_leading_int(raw).map(ParamValue::Int)
            } else {
                parse_leading_float(raw).map(ParamValue::Float)
            };
            match parsed {
                Some(value) => params.insert(constraint, value),
                None => crate::trace!(attribute, raw, "skipping non-numeric constraint bound"),
            }
        }
        params
    }

    pub fn insert(&mut self, constraint: impl Into<ConstraintName>, value: ParamValue) {
        self.values.insert(constraint.into(), value);
    }

    #[must_use]
    pub fn with(mut self, constraint: impl Into<ConstraintName>, value: ParamValue) -> Self {
        self.insert(constraint, value);
        self
    }

    #[must_use]
    pub fn get(&self, constraint: &str) -> Option<ParamValue> {
        self.values.get(constraint).copied()
    }

    /// Positional message arguments for `constraint` (empty or one element).
    #[must_use]
    pub fn positional(&self, constraint: &str) -> Vec<String> {
        self.get(constraint)
            .map(|value| vec![value.to_string()])
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    raw[..end].parse().ok()
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            saw_digit = true;
        }
        end = frac_end;
    }
    if !saw_digit {
        return None;
    }
    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    raw[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One logical field plus its bind-time parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBinding {
    pub key: BindingKey,
    pub parameters: ConstraintParameters,
}

impl InputBinding {
    #[must_use]
    pub fn new(form: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            key: BindingKey::new(form, field),
            parameters: ConstraintParameters::new(),
        }
    }

    /// Bind a field, capturing its declared constraint bounds.
    #[must_use]
    pub fn from_attributes(
        form: impl Into<String>,
        field: impl Into<String>,
        attrs: &ElementAttributes,
    ) -> Self {
        Self {
            key: BindingKey::new(form, field),
            parameters: ConstraintParameters::from_attributes(attrs),
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: ConstraintParameters) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn key(&self) -> &BindingKey {
        &self.key
    }
}
