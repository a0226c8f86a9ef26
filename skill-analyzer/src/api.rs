use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Skill name must not be empty")]
    EmptySkillName,
    #[error("Skill '{0}' has no variants")]
    NoVariants(String),
    #[error("Skill '{0}' has an empty variant")]
    EmptyVariant(String),
    #[error("Skill '{0}' is defined more than once")]
    DuplicateSkill(String),
    #[error("Job record {index} is not a JSON object, found {found}")]
    NotARecord { index: usize, found: &'static str },
    #[error("Job record {index} is malformed: '{source}'")]
    MalformedJob {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
    #[error("File error: '{0}'")]
    IoError(#[from] std::io::Error),
}
