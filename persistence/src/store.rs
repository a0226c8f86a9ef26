use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::UpdateOptions;
use serde::{Deserialize, Serialize};
use skill_analyzer::report::Count;

use crate::Result;

const SKILLS: &str = "skills";
const SEARCHES: &str = "searches";
const SEARCH_SKILLS: &str = "search_skills";

/// Remote home of the skill dimension and of per-search skill counts.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Insert every skill name that is not stored yet, returns how many were new.
    async fn upsert_skills(&self, skills: &[String]) -> Result<usize>;

    /// Record one search run and its skill counts, returns the id of the search.
    async fn record_search(
        &self,
        search_term: &str,
        job_count: usize,
        counts: &[Count],
    ) -> Result<String>;
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SkillRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SearchRow {
    #[serde(rename = "_id")]
    id: ObjectId,
    search_term: String,
    job_count: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl SearchRow {
    fn new(search_term: &str, job_count: usize) -> Self {
        Self {
            id: ObjectId::new(),
            search_term: search_term.to_owned(),
            job_count: job_count as i64,
            created_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SearchSkillRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    search_id: ObjectId,
    skill: String,
    count: i64,
}

pub async fn connect(mongodb_connection_url: &str, database_name: &str) -> Result<mongodb::Database> {
    let client = mongodb::Client::with_uri_str(mongodb_connection_url).await?;
    Ok(client.database(database_name))
}

#[derive(Clone)]
pub struct MongoStore {
    db: mongodb::Database,
}

impl MongoStore {
    pub fn new(db: mongodb::Database) -> Self {
        Self { db }
    }

    fn upsert() -> UpdateOptions {
        UpdateOptions::builder().upsert(true).build()
    }
}

#[async_trait]
impl SkillStore for MongoStore {
    async fn upsert_skills(&self, skills: &[String]) -> Result<usize> {
        let collection = self.db.collection::<SkillRow>(SKILLS);
        let mut inserted = 0;
        for name in skills {
            let result = collection
                .update_one(
                    doc! { "name": name.as_str() },
                    doc! { "$setOnInsert": { "name": name.as_str() } },
                    Self::upsert(),
                )
                .await?;
            if result.upserted_id.is_some() {
                inserted += 1;
            }
        }
        log::info!(
            "upserted {} skills, {} were new",
            skills.len(),
            inserted
        );
        Ok(inserted)
    }

    async fn record_search(
        &self,
        search_term: &str,
        job_count: usize,
        counts: &[Count],
    ) -> Result<String> {
        let search = SearchRow::new(search_term, job_count);
        write_search(self, &search, counts).await?;
        log::info!(
            "recorded {} skill counts for search {} ('{}')",
            counts.len(),
            search.id,
            search_term
        );
        Ok(search.id.to_hex())
    }
}

/// The individual writes behind [`SkillStore::record_search`].
#[async_trait]
trait SearchWriter: Send + Sync {
    async fn write_counts(&self, search_id: ObjectId, counts: &[Count]) -> Result<()>;
    async fn insert_search(&self, search: &SearchRow) -> Result<()>;
    async fn discard_counts(&self, search_id: ObjectId) -> Result<()>;
}

#[async_trait]
impl SearchWriter for MongoStore {
    async fn write_counts(&self, search_id: ObjectId, counts: &[Count]) -> Result<()> {
        let collection = self.db.collection::<SearchSkillRow>(SEARCH_SKILLS);
        for Count { key, count } in counts {
            collection
                .update_one(
                    doc! { "search_id": search_id, "skill": key.as_str() },
                    doc! { "$set": { "count": *count as i64 } },
                    Self::upsert(),
                )
                .await?;
        }
        Ok(())
    }

    async fn insert_search(&self, search: &SearchRow) -> Result<()> {
        self.db
            .collection::<SearchRow>(SEARCHES)
            .insert_one(search, None)
            .await?;
        Ok(())
    }

    async fn discard_counts(&self, search_id: ObjectId) -> Result<()> {
        self.db
            .collection::<SearchSkillRow>(SEARCH_SKILLS)
            .delete_many(doc! { "search_id": search_id }, None)
            .await?;
        Ok(())
    }
}

/// Counts are written before the search row, so a search is only visible once
/// all of its counts are. On failure the counts written so far are removed.
async fn write_search<W: SearchWriter + ?Sized>(
    writer: &W,
    search: &SearchRow,
    counts: &[Count],
) -> Result<()> {
    let written = match writer.write_counts(search.id, counts).await {
        Ok(()) => writer.insert_search(search).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        log::error!("recording search {} failed: {}", search.id, e);
        if let Err(cleanup) = writer.discard_counts(search.id).await {
            log::error!("could not discard counts of search {}: {}", search.id, cleanup);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;
    use mongodb::bson::{to_document, Bson};
    use std::sync::Mutex;

    /// Records every write, and fails `write_counts` after `fail_after` counts.
    #[derive(Default)]
    struct FakeWriter {
        fail_after: Option<usize>,
        counts: Mutex<Vec<(ObjectId, String)>>,
        searches: Mutex<Vec<ObjectId>>,
    }

    #[async_trait]
    impl SearchWriter for FakeWriter {
        async fn write_counts(&self, search_id: ObjectId, counts: &[Count]) -> Result<()> {
            let mut written = self.counts.lock().unwrap();
            for (i, count) in counts.iter().enumerate() {
                if self.fail_after == Some(i) {
                    return Err(Error::IoError(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "write failed",
                    )));
                }
                written.push((search_id, count.key.clone()));
            }
            Ok(())
        }

        async fn insert_search(&self, search: &SearchRow) -> Result<()> {
            self.searches.lock().unwrap().push(search.id);
            Ok(())
        }

        async fn discard_counts(&self, search_id: ObjectId) -> Result<()> {
            self.counts.lock().unwrap().retain(|(id, _)| *id != search_id);
            Ok(())
        }
    }

    fn counts() -> Vec<Count> {
        ["python", "go", "rust"]
            .iter()
            .map(|key| Count {
                key: key.to_string(),
                count: 1,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_write_search_records_counts_and_search() {
        let writer = FakeWriter::default();
        let search = SearchRow::new("rust", 3);
        write_search(&writer, &search, &counts()).await.unwrap();
        assert_eq!(*writer.searches.lock().unwrap(), vec![search.id]);
        let written = writer.counts.lock().unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|(id, _)| *id == search.id));
    }

    #[tokio::test]
    async fn test_failed_count_leaves_no_search_behind() {
        let writer = FakeWriter {
            fail_after: Some(1),
            ..Default::default()
        };
        let search = SearchRow::new("rust", 3);
        let result = write_search(&writer, &search, &counts()).await;
        assert!(result.is_err());
        assert!(writer.searches.lock().unwrap().is_empty());
        assert!(writer.counts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_search_row_document() {
        let row = SearchRow::new("software engineer intern", 50);
        let document = to_document(&row).unwrap();
        assert_eq!(document.get("_id"), Some(&Bson::ObjectId(row.id)));
        assert_eq!(
            document.get_str("search_term").unwrap(),
            "software engineer intern"
        );
        assert_eq!(document.get_i64("job_count").unwrap(), 50);
        assert!(matches!(document.get("created_at"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_skill_row_without_id() {
        let row = SkillRow {
            id: None,
            name: "rust".to_owned(),
        };
        let document = to_document(&row).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "rust");
    }
}
