//! Request contract types.
//!
//! A [`Contract`] describes the accepted shape of one API operation: which
//! fields must be present, which may be present, and what each of them must
//! look like. Contracts are plain data; validation lives in
//! `api_contracts_validator`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a field.
///
/// Tags are parsed leniently: a tag nobody recognizes becomes
/// [`FieldType::Unsupported`] so the defect can be reported against the
/// offending field instead of failing the whole definition file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Free-form text with optional length bounds
    String,
    /// `local@domain.tld` shaped text
    Email,
    /// Canonical 8-4-4-4-12 hexadecimal identifier
    Uuid,
    /// Calendar date in `YYYY-MM-DD` form
    Date,
    /// Integral number
    Int,
    /// Any number
    Number,
    /// One of a fixed set of upper-case tokens
    Enum,
    /// Unrecognized tag, kept verbatim
    Unsupported(String),
}

impl FieldType {
    /// Returns the tag as written in contract definitions.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Email => "email",
            FieldType::Uuid => "uuid",
            FieldType::Date => "date",
            FieldType::Int => "int",
            FieldType::Number => "number",
            FieldType::Enum => "enum",
            FieldType::Unsupported(tag) => tag,
        }
    }

    /// True for every tag except [`FieldType::Unsupported`].
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Unsupported(_))
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "email" => FieldType::Email,
            "uuid" => FieldType::Uuid,
            "date" => FieldType::Date,
            "int" => FieldType::Int,
            "number" => FieldType::Number,
            "enum" => FieldType::Enum,
            other => FieldType::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_zero_usize(n: &usize) -> bool {
    *n == 0
}

fn is_zero_f64(n: &f64) -> bool {
    *n == 0.0
}

/// Shape and constraints of a single field.
///
/// All bounds use `0` as a sentinel for "no bound". A bound of exactly zero
/// is therefore not expressible: `min_value = 0` does not reject negative
/// numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Declared type tag
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Minimum trimmed length in code points (`string` only)
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub min_length: usize,

    /// Maximum trimmed length in code points (`string` only)
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub max_length: usize,

    /// Minimum numeric value (`int` and `number`)
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub min_value: f64,

    /// Maximum numeric value (`int` and `number`)
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub max_value: f64,

    /// Allowed upper-case tokens (`enum` only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldSpec {
    /// Creates an unconstrained spec of the given type.
    pub fn new(field_type: impl Into<FieldType>) -> Self {
        Self {
            field_type: field_type.into(),
            min_length: 0,
            max_length: 0,
            min_value: 0.0,
            max_value: 0.0,
            options: Vec::new(),
        }
    }

    /// A `string` field.
    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    /// An `email` field.
    pub fn email() -> Self {
        Self::new(FieldType::Email)
    }

    /// A `uuid` field.
    pub fn uuid() -> Self {
        Self::new(FieldType::Uuid)
    }

    /// A `date` field.
    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    /// An `int` field.
    pub fn int() -> Self {
        Self::new(FieldType::Int)
    }

    /// A `number` field.
    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    /// An `enum` field with the given options.
    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldType::Enum).options(options)
    }

    /// Sets the minimum length (`0` = unbounded).
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    /// Sets the maximum length (`0` = unbounded).
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    /// Sets the minimum value (`0` = unbounded).
    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = min;
        self
    }

    /// Sets the maximum value (`0` = unbounded).
    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = max;
        self
    }

    /// Replaces the enum options.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Active length bounds, with sentinels mapped to `None`.
    pub fn length_bounds(&self) -> (Option<usize>, Option<usize>) {
        (
            (self.min_length != 0).then_some(self.min_length),
            (self.max_length != 0).then_some(self.max_length),
        )
    }

    /// Active value bounds, with sentinels mapped to `None`.
    pub fn value_bounds(&self) -> (Option<f64>, Option<f64>) {
        (
            (self.min_value != 0.0).then_some(self.min_value),
            (self.max_value != 0.0).then_some(self.max_value),
        )
    }
}

/// The accepted shape of one API operation.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{Contract, FieldSpec};
///
/// let contract = Contract::builder("banks.create")
///     .method("POST")
///     .uri("/banks")
///     .required("name", FieldSpec::string().min_length(2).max_length(100))
///     .required("type", FieldSpec::enumeration(["PRIVATE", "GOVERNMENT"]))
///     .build();
///
/// assert_eq!(contract.required.len(), 2);
/// assert!(contract.optional.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique operation name (e.g. `banks.create`)
    pub name: String,

    /// HTTP method of the guarded operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// URI template of the guarded operation (e.g. `/banks/{id}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields that must be present and non-null
    #[serde(default)]
    pub required: BTreeMap<String, FieldSpec>,

    /// Fields that may be absent or null
    #[serde(default)]
    pub optional: BTreeMap<String, FieldSpec>,
}

impl Contract {
    /// Starts building a contract for the named operation.
    pub fn builder(name: impl Into<String>) -> crate::ContractBuilder {
        crate::ContractBuilder::new(name)
    }

    /// Looks up a field in either the required or the optional set.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.required.get(name).or_else(|| self.optional.get(name))
    }

    /// True if the field is declared in either set.
    pub fn declares(&self, name: &str) -> bool {
        self.required.contains_key(name) || self.optional.contains_key(name)
    }

    /// Total number of declared fields.
    pub fn field_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    /// Iterates over every declared field, required first.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldSpec)> {
        self.required.iter().chain(self.optional.iter())
    }

    /// Returns the `{param}` placeholders of the URI template, in order.
    pub fn uri_params(&self) -> Vec<&str> {
        let Some(uri) = self.uri.as_deref() else {
            return Vec::new();
        };

        uri.split('{')
            .skip(1)
            .filter_map(|rest| rest.split_once('}').map(|(param, _)| param))
            .filter(|param| !param.is_empty())
            .collect()
    }

    /// `METHOD URI` label used in logs and listings.
    pub fn route(&self) -> Option<String> {
        match (&self.method, &self.uri) {
            (Some(method), Some(uri)) => Some(format!("{} {}", method, uri)),
            _ => None,
        }
    }
}
