use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adzuna::Result;

/// One page of search results.
/// `results` holds the job records untouched, they are interpreted downstream.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SearchResponse {
    pub count: Option<u64>,
    pub mean: Option<f64>,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl SearchResponse {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}
