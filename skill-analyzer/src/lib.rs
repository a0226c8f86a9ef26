pub mod api;
pub mod extractor;
pub mod normalizer;
pub mod report;
pub mod types;
pub mod vocabulary;

pub use api::{Error, Result};
pub use extractor::extract_skills;
pub use normalizer::{normalize, normalize_all};
pub use types::{NormalizedJob, RawJob};
pub use vocabulary::Vocabulary;
