use persistence::SkillStore;
use skill_analyzer::Vocabulary;

use crate::error::Result;

/// Make sure every canonical skill of the vocabulary has a row in the store.
pub async fn seed(store: &dyn SkillStore, vocabulary: &Vocabulary) -> Result<usize> {
    let skills = vocabulary.skills().map(String::from).collect::<Vec<_>>();
    let inserted = store.upsert_skills(&skills).await?;
    log::info!("seeded {} skills, {} new", skills.len(), inserted);
    Ok(inserted)
}
