use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::types::NormalizedJob;

pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const TOP_SKILLS: usize = 20;
pub const TOP_LOCATIONS: usize = 10;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Count {
    pub key: String,
    pub count: usize,
}

/// Occurrence counter that remembers the order keys were first seen in.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    counts: IndexMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        *self.counts.entry(key.to_owned()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(key, &count)| (key.as_str(), count))
    }

    /// The `n` largest counts; equal counts keep their first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<Count> {
        let mut ranked = self
            .counts
            .iter()
            .map(|(key, &count)| Count {
                key: key.clone(),
                count,
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// Every entry, ranked like [`Tally::most_common`].
    pub fn ranked(&self) -> Vec<Count> {
        self.most_common(self.counts.len())
    }
}

/// One count per job for every distinct skill it lists.
pub fn count_skills(jobs: &[NormalizedJob]) -> Tally {
    let mut tally = Tally::new();
    for job in jobs {
        job.skills.iter().for_each(|skill| tally.add(skill));
    }
    tally
}

/// Strings count as themselves, other JSON values by their JSON text.
/// Missing and falsy locations (`null`, `""`, `0`, `false`, empty containers) are unknown.
fn location_key(location: Option<&Value>) -> String {
    match location {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | None | Some(Value::String(_)) | Some(Value::Bool(false)) => {
            UNKNOWN_LOCATION.to_owned()
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => UNKNOWN_LOCATION.to_owned(),
        Some(Value::Array(a)) if a.is_empty() => UNKNOWN_LOCATION.to_owned(),
        Some(Value::Object(o)) if o.is_empty() => UNKNOWN_LOCATION.to_owned(),
        Some(other) => other.to_string(),
    }
}

pub fn count_locations(jobs: &[NormalizedJob]) -> Tally {
    let mut tally = Tally::new();
    for job in jobs {
        tally.add(&location_key(job.location.as_ref()));
    }
    tally
}

pub fn render_report(jobs: &[NormalizedJob]) -> String {
    let mut out = format!("Top {} skills:\n", TOP_SKILLS);
    for Count { key, count } in count_skills(jobs).most_common(TOP_SKILLS) {
        out.push_str(&format!("{:15} {}\n", key, count));
    }
    out.push_str(&format!("\nTop {} locations:\n", TOP_LOCATIONS));
    for Count { key, count } in count_locations(jobs).most_common(TOP_LOCATIONS) {
        out.push_str(&format!("{:30} {}\n", key, count));
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn job(skills: &[&str], location: Option<&str>) -> NormalizedJob {
        NormalizedJob {
            id: None,
            title: None,
            company: None,
            location: location.map(Value::from),
            created: None,
            category: None,
            description: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_count_skills_per_job() {
        let jobs = vec![
            job(&["python"], Some("Toronto")),
            job(&["go", "python"], Some("Toronto")),
        ];
        let tally = count_skills(&jobs);
        assert_eq!(tally.get("python"), 2);
        assert_eq!(tally.get("go"), 1);
        assert_eq!(tally.get("rust"), 0);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_missing_location_is_unknown() {
        let tally = count_locations(&[job(&[], None)]);
        assert_eq!(tally.get(UNKNOWN_LOCATION), 1);
        assert_eq!(tally.len(), 1);

        let tally = count_locations(&[job(&[], Some("")), job(&[], Some("Ottawa"))]);
        assert_eq!(tally.get(UNKNOWN_LOCATION), 1);
        assert_eq!(tally.get("Ottawa"), 1);
    }

    #[test]
    fn test_non_string_location_counts_by_json_text() {
        let mut jobs = vec![job(&[], None), job(&[], None), job(&[], None)];
        jobs[0].location = Some(json!(7));
        jobs[1].location = Some(json!(0));
        jobs[2].location = Some(json!(false));
        let tally = count_locations(&jobs);
        assert_eq!(tally.get("7"), 1);
        assert_eq!(tally.get(UNKNOWN_LOCATION), 2);
    }

    #[test]
    fn test_most_common_ties_keep_first_seen_order() {
        let mut tally = Tally::new();
        for key in ["b", "a", "c", "a", "c", "d"] {
            tally.add(key);
        }
        let keys = tally
            .most_common(3)
            .into_iter()
            .map(|c| c.key)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "c", "b"]);
        assert_eq!(tally.ranked().len(), 4);
        assert_eq!(tally.iter().next(), Some(("b", 1)));
    }

    #[test]
    fn test_render_report() {
        let jobs = vec![
            job(&["python"], Some("Toronto, Ontario")),
            job(&["go", "python"], None),
        ];
        let report = render_report(&jobs);
        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Top 20 skills:");
        assert_eq!(lines[1], format!("{:15} 2", "python"));
        assert_eq!(lines[2], format!("{:15} 1", "go"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Top 10 locations:");
        assert_eq!(lines[5], format!("{:30} 1", "Toronto, Ontario"));
        assert_eq!(lines[6], format!("{:30} 1", UNKNOWN_LOCATION));
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&[]);
        assert_eq!(report, "Top 20 skills:\n\nTop 10 locations:\n");
    }
}
