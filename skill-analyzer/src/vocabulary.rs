use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::{Error, Result};

const BUILTIN_SKILLS: [(&str, &[&str]); 35] = [
    ("python", &["python", "py"]),
    ("java", &["java"]),
    ("javascript", &["javascript", "js", "ecmascript"]),
    ("typescript", &["typescript", "ts"]),
    ("c++", &["c++", "cpp"]),
    ("c#", &["c#", "c-sharp", "c sharp"]),
    ("go", &["go", "golang"]),
    ("rust", &["rust"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("angular", &["angular", "angularjs", "angular.js"]),
    ("vue", &["vue", "vuejs", "vue.js"]),
    ("node", &["node", "nodejs", "node.js"]),
    ("express", &["express", "expressjs", "express.js"]),
    ("spring", &["spring", "springboot", "spring boot"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("sql", &["sql"]),
    ("postgres", &["postgres", "postgresql", "psql"]),
    ("mysql", &["mysql"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("redis", &["redis"]),
    ("aws", &["aws", "amazon web services"]),
    ("azure", &["azure", "microsoft azure"]),
    ("gcp", &["gcp", "google cloud", "google cloud platform"]),
    ("docker", &["docker"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("spa", &["spa", "single page application"]),
    ("microservices", &["microservices", "microservice"]),
    ("rest", &["rest", "restful", "rest api"]),
    ("graphql", &["graphql", "graph ql"]),
    ("pandas", &["pandas"]),
    ("numpy", &["numpy", "np"]),
    ("pyspark", &["pyspark"]),
    ("spark", &["spark", "apache spark"]),
    ("hadoop", &["hadoop", "apache hadoop"]),
];

/// A canonical skill and the lower-case substrings that count as evidence for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub variants: Vec<String>,
}

/// Immutable skill table driving extraction.
///
/// Skills keep the order they were defined in. Variants of different skills may
/// overlap, a text can then match several skills at once.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Vocabulary {
    skills: Vec<Skill>,
}

impl Vocabulary {
    pub fn new<I, N, V, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = entries
            .into_iter()
            .map(|(name, variants)| Skill {
                name: name.into(),
                variants: variants
                    .into_iter()
                    .map(|v| v.as_ref().to_lowercase())
                    .collect(),
            })
            .collect();
        Self::from_skills(skills)
    }

    pub fn builtin() -> Self {
        let skills = BUILTIN_SKILLS
            .iter()
            .map(|(name, variants)| Skill {
                name: (*name).to_owned(),
                variants: variants.iter().map(|v| (*v).to_owned()).collect(),
            })
            .collect();
        Self { skills }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let skills: Vec<Skill> = serde_json::from_str(json)?;
        let skills = skills
            .into_iter()
            .map(|skill| Skill {
                variants: skill.variants.iter().map(|v| v.to_lowercase()).collect(),
                name: skill.name,
            })
            .collect();
        Self::from_skills(skills)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_json_str(&json)?;
        log::info!(
            "loaded vocabulary with {} skills from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    fn from_skills(skills: Vec<Skill>) -> Result<Self> {
        validate(&skills)?;
        Ok(Self { skills })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    /// Canonical skill names, in definition order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.name.as_str())
    }

    pub fn variants(&self, name: &str) -> Option<&[String]> {
        self.skills
            .iter()
            .find(|skill| skill.name == name)
            .map(|skill| skill.variants.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn validate(skills: &[Skill]) -> Result<()> {
    let mut seen = HashSet::with_capacity(skills.len());
    for skill in skills {
        if skill.name.is_empty() {
            return Err(Error::EmptySkillName);
        }
        if skill.variants.is_empty() {
            return Err(Error::NoVariants(skill.name.clone()));
        }
        if skill.variants.iter().any(String::is_empty) {
            return Err(Error::EmptyVariant(skill.name.clone()));
        }
        if !seen.insert(skill.name.as_str()) {
            return Err(Error::DuplicateSkill(skill.name.clone()));
        }
    }
    Ok(())
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
