use std::path::{Path, PathBuf};

use job_scraper::adzuna::{Client, SearchResponse};
use persistence::{files, SkillStore};
use serde::Serialize;
use skill_analyzer::report::{count_skills, Count};
use skill_analyzer::{normalize_all, NormalizedJob, Vocabulary};

use crate::error::Result;

pub const DEFAULT_SEARCH_TERM: &str = "software engineer intern";
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 50;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

impl From<Count> for SkillCount {
    fn from(count: Count) -> Self {
        Self {
            skill: count.key,
            count: count.count,
        }
    }
}

/// What a fetch run produced, printed as JSON when the run completes.
#[derive(Serialize, Debug)]
pub struct SearchSummary {
    pub search_id: Option<String>,
    pub search_term: String,
    pub job_count: usize,
    pub raw_file: PathBuf,
    pub processed_file: PathBuf,
    pub skills: Vec<SkillCount>,
}

/// Normalize the `results` of a saved search response into `out_path`.
/// Nothing is written unless every record normalizes.
pub fn parse_raw_file(
    raw_path: &Path,
    out_path: &Path,
    vocabulary: &Vocabulary,
) -> Result<Vec<NormalizedJob>> {
    let data = files::read_json(raw_path)?;
    let page = SearchResponse::from_value(&data)?;
    log::info!(
        "parsing {} raw jobs from {}",
        page.results.len(),
        raw_path.display()
    );
    let jobs = normalize_all(&page.results, vocabulary)?;
    files::write_jobs(out_path, &jobs)?;
    Ok(jobs)
}

pub async fn fetch(
    client: &Client,
    data_dir: &Path,
    vocabulary: &Vocabulary,
    what: &str,
    page: u32,
    results_per_page: u32,
    store: Option<&dyn SkillStore>,
) -> Result<SearchSummary> {
    let data = client.fetch_jobs(page, what, results_per_page).await?;
    let raw_file = files::save_raw_results(data_dir, &data, what)?;
    let processed_file = files::processed_path(data_dir);
    let jobs = parse_raw_file(&raw_file, &processed_file, vocabulary)?;

    let counts = count_skills(&jobs).ranked();
    let search_id = match store {
        Some(store) => Some(store.record_search(what, jobs.len(), &counts).await?),
        None => None,
    };
    Ok(SearchSummary {
        search_id,
        search_term: what.to_owned(),
        job_count: jobs.len(),
        raw_file,
        processed_file,
        skills: counts.into_iter().map(SkillCount::from).collect(),
    })
}
