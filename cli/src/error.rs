use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing ADZUNA_APP_ID or ADZUNA_APP_KEY in .env")]
    MissingAdzunaCredentials,
    #[error("Missing MONGODB_CONNECTION_URL or DATABASE in .env")]
    MissingDatabase,
    #[error(transparent)]
    Scraper(#[from] job_scraper::adzuna::Error),
    #[error(transparent)]
    Analyzer(#[from] skill_analyzer::Error),
    #[error(transparent)]
    Persistence(#[from] persistence::Error),
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
}
