use serde_json::Value;

use crate::api::Result;
use crate::extractor::extract_skills;
use crate::types::{NormalizedJob, RawJob};
use crate::vocabulary::Vocabulary;

pub fn normalize(raw: &RawJob, vocabulary: &Vocabulary) -> NormalizedJob {
    let description = raw.description.clone().unwrap_or_default();
    let skills = extract_skills(Some(&description), vocabulary);
    NormalizedJob {
        id: raw.id.clone(),
        title: raw.title.clone(),
        company: raw.company.as_ref().and_then(|c| c.display_name.clone()),
        location: raw.location.as_ref().and_then(|l| l.display_name.clone()),
        created: raw.created.clone(),
        category: raw.category.as_ref().and_then(|c| c.label.clone()),
        description,
        skills,
    }
}

/// Normalize every element of an API `results` array, keeping input order.
///
/// Duplicate ids are passed through. The first record that is not a
/// well-formed job fails the whole batch.
pub fn normalize_all(raws: &[Value], vocabulary: &Vocabulary) -> Result<Vec<NormalizedJob>> {
    let jobs = raws
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let raw = RawJob::from_indexed_value(index, value)?;
            Ok(normalize(&raw, vocabulary))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!(
        "normalized {} jobs, {} with at least one skill",
        jobs.len(),
        jobs.iter().filter(|job| !job.skills.is_empty()).count()
    );
    Ok(jobs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::Error;
    use serde_json::json;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new([
            ("python", vec!["python", "py"]),
            ("go", vec!["go", "golang"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let raw = RawJob::from_value(&json!({
            "id": "1",
            "title": "Backend Intern",
            "description": "We need a Python dev who also knows Go tooling.",
            "created": "2024-05-01T12:00:00Z",
            "company": {"display_name": "Acme"},
            "location": {"display_name": "Vancouver, British Columbia"},
            "category": {"label": "IT Jobs"}
        }))
        .unwrap();
        let job = normalize(&raw, &vocabulary());
        assert_eq!(job.id, Some(json!("1")));
        assert_eq!(job.company, Some(json!("Acme")));
        assert_eq!(job.location, Some(json!("Vancouver, British Columbia")));
        assert_eq!(job.category, Some(json!("IT Jobs")));
        assert_eq!(job.skills.iter().collect::<Vec<_>>(), vec!["go", "python"]);
    }

    #[test]
    fn test_normalize_missing_description() {
        let job = normalize(&RawJob::default(), &vocabulary());
        assert_eq!(job.description, "");
        assert!(job.skills.is_empty());
        assert_eq!(job.company, None);
        assert_eq!(job.location, None);
        assert_eq!(job.category, None);
    }

    #[test]
    fn test_serialized_field_order() {
        let job = normalize(&RawJob::default(), &vocabulary());
        let json = serde_json::to_string(&job).unwrap();
        assert_eq!(
            json,
            r#"{"id":null,"title":null,"company":null,"location":null,"created":null,"category":null,"description":"","skills":[]}"#
        );
    }

    #[test]
    fn test_normalize_all_preserves_order_and_duplicates() {
        let raws = vec![
            json!({"id": 7, "description": "golang"}),
            json!({"id": 3}),
            json!({"id": 7, "description": "python"}),
        ];
        let jobs = normalize_all(&raws, &vocabulary()).unwrap();
        assert_eq!(jobs.len(), raws.len());
        let ids = jobs
            .iter()
            .map(|job| job.id.as_ref().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["7", "3", "7"]);
        assert!(jobs[0].skills.contains("go"));
        assert!(jobs[1].skills.is_empty());
        assert!(jobs[2].skills.contains("python"));
    }

    #[test]
    fn test_normalize_all_empty_batch() {
        assert!(normalize_all(&[], &vocabulary()).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_all_passes_scalars_through() {
        let raws = vec![json!({
            "id": "1",
            "title": 12345,
            "created": 1714560000,
            "location": {"display_name": 7},
            "description": "python"
        })];
        let jobs = normalize_all(&raws, &vocabulary()).unwrap();
        assert_eq!(jobs[0].title, Some(json!(12345)));
        assert_eq!(jobs[0].created, Some(json!(1714560000)));
        assert_eq!(jobs[0].location, Some(json!(7)));
        assert!(jobs[0].skills.contains("python"));

        let json = serde_json::to_value(&jobs[0]).unwrap();
        assert_eq!(json["title"], json!(12345));
        assert_eq!(json["created"], json!(1714560000));
    }

    #[test]
    fn test_normalize_all_fails_fast() {
        let raws = vec![json!({"id": 1}), json!(null), json!([1, 2])];
        let err = normalize_all(&raws, &vocabulary()).unwrap_err();
        assert!(matches!(err, Error::NotARecord { index: 1, found: "null" }));

        let raws = vec![json!({"id": 1}), json!({"location": "Toronto"})];
        let err = normalize_all(&raws, &vocabulary()).unwrap_err();
        assert!(matches!(err, Error::MalformedJob { index: 1, .. }));

        let raws = vec![json!({"id": 1}), json!({"description": 12})];
        let err = normalize_all(&raws, &vocabulary()).unwrap_err();
        assert!(matches!(err, Error::MalformedJob { index: 1, .. }));
    }
}
