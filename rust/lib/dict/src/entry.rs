use std::fmt;

use crate::document::DictionaryDocument;

/// A single value in an OpenFOAM dictionary.
///
/// Scalars are kept as the raw text between the key and the terminating `;`.
/// Numeric and boolean readings are views over that text, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Scalar(String),
    Dict(DictionaryDocument),
}

impl Entry {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Entry::Scalar(value) => Some(value),
            Entry::Dict(_) => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictionaryDocument> {
        match self {
            Entry::Dict(doc) => Some(doc),
            Entry::Scalar(_) => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut DictionaryDocument> {
        match self {
            Entry::Dict(doc) => Some(doc),
            Entry::Scalar(_) => None,
        }
    }

    pub fn into_dict(self) -> Option<DictionaryDocument> {
        match self {
            Entry::Dict(doc) => Some(doc),
            Entry::Scalar(_) => None,
        }
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Entry::Dict(_))
    }

    /// Read the scalar as a floating point number (`1e-6`, `0.1`, `1000`).
    pub fn as_float(&self) -> Option<f64> {
        self.as_scalar()?.trim().parse().ok()
    }

    /// Read the scalar as an OpenFOAM switch.
    ///
    /// Accepts `true on yes y` and `false off no n none`; anything else is `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()?.trim() {
            "true" | "on" | "yes" | "y" => Some(true),
            "false" | "off" | "no" | "n" | "none" => Some(false),
            _ => None,
        }
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Scalar(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Scalar(value)
    }
}

impl From<DictionaryDocument> for Entry {
    fn from(doc: DictionaryDocument) -> Self {
        Entry::Dict(doc)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Scalar(value) => f.write_str(value),
            Entry::Dict(doc) => f.write_str(&doc.to_body_string()),
        }
    }
}
