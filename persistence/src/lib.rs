pub mod files;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use store::{connect, MongoStore, SkillStore};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File error: '{0}'")]
    IoError(#[from] std::io::Error),
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
    #[error("Database error: '{0}'")]
    Database(#[from] mongodb::error::Error),
    #[error("There are no processed files in '{0}'")]
    NoProcessedFiles(PathBuf),
}
