use std::path::{Path, PathBuf};

use job_scraper::adzuna::client::DEFAULT_COUNTRY;
use skill_analyzer::Vocabulary;

use crate::error::{Error, Result};

const DEFAULT_DATA_DIR: &str = "data";

/// Settings read from the environment, after `.env` has been loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_country: String,
    pub data_dir: PathBuf,
    pub mongodb_connection_url: Option<String>,
    pub database: Option<String>,
    pub vocabulary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            adzuna_app_id: var("ADZUNA_APP_ID"),
            adzuna_app_key: var("ADZUNA_APP_KEY"),
            adzuna_country: var("ADZUNA_COUNTRY").unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
            data_dir: var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            mongodb_connection_url: var("MONGODB_CONNECTION_URL"),
            database: var("DATABASE"),
            vocabulary_path: var("VOCABULARY_PATH").map(PathBuf::from),
        }
    }

    pub fn adzuna_credentials(&self) -> Result<(&str, &str)> {
        match (&self.adzuna_app_id, &self.adzuna_app_key) {
            (Some(id), Some(key)) => Ok((id.as_str(), key.as_str())),
            _ => Err(Error::MissingAdzunaCredentials),
        }
    }

    pub fn mongodb(&self) -> Result<(&str, &str)> {
        match (&self.mongodb_connection_url, &self.database) {
            (Some(url), Some(database)) => Ok((url.as_str(), database.as_str())),
            _ => Err(Error::MissingDatabase),
        }
    }

    /// The vocabulary file given on the command line wins over `VOCABULARY_PATH`,
    /// without either the built-in table is used.
    pub fn vocabulary(&self, path: Option<&Path>) -> Result<Vocabulary> {
        match path.or(self.vocabulary_path.as_deref()) {
            Some(path) => Ok(Vocabulary::from_file(path)?),
            None => Ok(Vocabulary::builtin()),
        }
    }
}
