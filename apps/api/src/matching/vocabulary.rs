//! Skill vocabulary — the closed set of canonical skills plus alias table.
//!
//! Built once at startup and shared read-only (inside `SkillMatcher`) by every request.

use std::collections::{BTreeSet, HashMap};

/// Canonical skills recognised in job descriptions, grouped by area.
const CANONICAL_SKILLS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "go", "golang", "c++", "c#", "rust", "kotlin",
    "swift", "scala", "ruby", "php",
    // Frameworks & libraries
    "react", "react.js", "reactjs", "next.js", "nextjs", "node", "node.js", "express", "django",
    "flask", "fastapi", "spring", "spring boot", "angular", "vue", "svelte", "tailwind",
    "bootstrap", "redux",
    // Data & ML
    "pandas", "numpy", "scikit-learn", "sklearn", "tensorflow", "pytorch", "mlflow", "xgboost",
    "lightgbm", "large language models",
    // Cloud & DevOps
    "aws", "gcp", "azure", "docker", "kubernetes", "terraform", "ansible", "github actions",
    "gitlab ci", "jenkins",
    // Databases
    "postgres", "postgresql", "mysql", "mongodb", "redis", "dynamodb", "elasticsearch",
    "snowflake", "bigquery",
    // Other
    "grpc", "rest", "graphql", "apache kafka", "kafka", "rabbitmq", "spark", "hadoop", "airflow",
];

/// Informal surface forms mapped to exactly one canonical skill.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("k8s", "kubernetes"),
    ("gcloud", "gcp"),
    ("google cloud", "gcp"),
    ("amazon web services", "aws"),
    ("ms azure", "azure"),
    ("llm", "large language models"),
    ("llms", "large language models"),
];

/// Immutable skill vocabulary. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: BTreeSet<String>,
    aliases: HashMap<String, String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from explicit skill and alias lists. Skills and alias keys are
    /// lowercased so lookups against tokenizer output line up.
    pub fn new<S, A>(skills: S, aliases: A) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: IntoIterator<Item = (String, String)>,
    {
        Self {
            skills: skills
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            aliases: aliases
                .into_iter()
                .map(|(alias, canonical)| (alias.to_lowercase(), canonical.to_lowercase()))
                .collect(),
        }
    }

    /// The built-in technical skill vocabulary.
    pub fn builtin() -> Self {
        Self::new(
            CANONICAL_SKILLS.iter(),
            ALIASES
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string())),
        )
    }

    /// Canonical skills in sorted order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Resolves an alias to its canonical skill; unknown terms pass through unchanged.
    pub fn resolve<'a>(&'a self, term: &'a str) -> &'a str {
        self.aliases.get(term).map(String::as_str).unwrap_or(term)
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
