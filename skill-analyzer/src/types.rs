use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{Error, Result};

/// Scalar fields are carried as raw JSON so that whatever the API sends
/// (string, number, ...) is re-emitted in the same form.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DisplayName {
    pub display_name: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub label: Option<Value>,
}

/// A job posting as returned by the search API.
/// Every field may be missing or `null`, unknown fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawJob {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<String>,
    pub created: Option<Value>,
    pub company: Option<DisplayName>,
    pub location: Option<DisplayName>,
    pub category: Option<Category>,
}

impl RawJob {
    /// Interpret one element of the API `results` array.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_indexed_value(0, value)
    }

    pub(crate) fn from_indexed_value(index: usize, value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::NotARecord {
                index,
                found: json_kind(value),
            });
        }
        RawJob::deserialize(value).map_err(|source| Error::MalformedJob { index, source })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The persisted form of a job posting, annotated with the skills found in its description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NormalizedJob {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub company: Option<Value>,
    pub location: Option<Value>,
    pub created: Option<Value>,
    pub category: Option<Value>,
    #[serde(default)]
    pub description: String,
    /// sorted, never contains a name outside the vocabulary used to build it
    #[serde(default)]
    pub skills: BTreeSet<String>,
}
