//! Level profile registry.
//!
//! Each cognitive level carries a keyword set, an ordered list of phrase
//! patterns, a set of leading verbs, a weight, and a complexity threshold.
//! The built-in table is compiled once per process and never mutated. A
//! custom table can be loaded from TOML and validated into its own registry.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::level::CognitiveLevel;

struct BuiltinLevel {
    level: CognitiveLevel,
    keywords: &'static [&'static str],
    patterns: &'static [&'static str],
    leading_verbs: &'static [&'static str],
    weight: f64,
    complexity_threshold: f64,
}

const BUILTIN_LEVELS: [BuiltinLevel; 6] = [
    BuiltinLevel {
        level: CognitiveLevel::Remembering,
        keywords: &[
            "recall",
            "list",
            "define",
            "identify",
            "name",
            "state",
            "recognize",
            "select",
            "match",
            "memorize",
            "what is the",
            "what are the",
            "who was",
            "when did",
            "where is",
        ],
        // Anchored so that only plain factual requests match.
        patterns: &[
            r"^what is the (name|value|date|capital|definition)",
            r"^what are the (three|four|key) (steps|parts|types)",
            r"^who (is|was) (the|a)",
            r"^when did (the|.*) (happen|occur|start)",
            r"^where is (the|.*) (located|found)",
            r"^name (all|the|three)",
            r"^list (the|all|three)",
            r"^define",
            r"^what was the (first|last|result)",
        ],
        leading_verbs: &["is", "are", "was", "were", "did", "does", "has", "have"],
        weight: 1.0,
        complexity_threshold: 0.2,
    },
    BuiltinLevel {
        level: CognitiveLevel::Understanding,
        keywords: &[
            "explain",
            "summarize",
            "interpret",
            "paraphrase",
            "classify",
            "describe",
            "discuss",
            "restate",
            "translate",
            "outline",
            "main idea",
            "in your own words",
            "difference between",
        ],
        patterns: &[
            r"explain (why|how)",
            r"summarize",
            r"what does (.*) mean",
            r"in your own words",
            r"how would you describe",
            r"what is the main idea",
            r"what is the purpose of",
            r"give an example of",
            r"what can you infer from",
            r"how does (.*) work",
            r"how (.*) works",
            r"why is (.*) important",
            r"how would you explain (.*)",
            r"what happens when",
            r"what is the difference between",
            r"what are the differences between",
            r"distinguish between",
            r"how is (.*) different from",
        ],
        leading_verbs: &[
            "explain",
            "describe",
            "summarize",
            "interpret",
            "discuss",
            "paraphrase",
            "distinguish",
            "breakdown",
        ],
        weight: 1.2,
        complexity_threshold: 0.4,
    },
    BuiltinLevel {
        level: CognitiveLevel::Applying,
        keywords: &[
            "use",
            "apply",
            "implement",
            "solve",
            "demonstrate",
            "show how",
            "employ",
            "illustrate",
            "execute",
            "calculate",
            "model",
        ],
        patterns: &[
            r"how would you use (.*) to",
            r"what would happen if",
            r"how would you solve (this|the following) problem",
            r"demonstrate how (to|you)",
            r"apply (the|this) (principle|rule|law) (to|for)",
            r"solve for",
            r"use (.*) to (show|demonstrate|solve)",
            r"calculate the",
            r"perform (the|a) (calculation|procedure|experiment)",
            r"carry out (the|this) (task|process)",
        ],
        leading_verbs: &["use", "apply", "solve", "demonstrate", "implement", "calculate"],
        weight: 1.3,
        complexity_threshold: 0.5,
    },
    BuiltinLevel {
        level: CognitiveLevel::Analyzing,
        keywords: &[
            "analyze",
            "compare",
            "contrast",
            "differentiate",
            "examine",
            "investigate",
            "categorize",
            "organize",
            "deduce",
            "distinguish",
            "relationship",
            "cause",
            "effect",
            "similarities between",
        ],
        patterns: &[
            r"what are the similarities between",
            r"compare and contrast",
            r"analyze (how|why)",
            r"why do you think",
            r"what evidence supports",
            r"how is (.*) related to",
            r"what factors contribute to",
            r"break down",
            r"examine the causes of",
            r"what is the relationship between",
            r"why is (.*) different from",
            r"how would you categorize (.*)",
            r"what components make up (.*)",
            r"what is the underlying cause of",
            r"how does (.*) influence (.*)",
            r"what assumptions underlie (.*)",
        ],
        leading_verbs: &[
            "analyze",
            "compare",
            "contrast",
            "examine",
            "investigate",
            "categorize",
            "differentiate",
        ],
        weight: 1.4,
        complexity_threshold: 0.7,
    },
    BuiltinLevel {
        level: CognitiveLevel::Evaluating,
        keywords: &[
            "evaluate",
            "judge",
            "critique",
            "justify",
            "defend",
            "argue",
            "assess",
            "rate",
            "recommend",
            "appraise",
            "prioritize",
            "opinion",
            "do you agree",
        ],
        patterns: &[
            r"do you agree (with|that)",
            r"what is your opinion (on|about)",
            r"how effective (is|was)",
            r"justify your (answer|position)",
            r"defend your (position|argument)",
            r"critique (the|this)",
            r"evaluate (the|this) (decision|method)",
            r"which is (better|more effective)",
            r"what would you recommend",
            r"assess the (value|validity)",
            r"rate the importance of",
            r"which option (is|would be) best",
            r"how would you improve (.*)",
            r"do the benefits outweigh the risks",
        ],
        leading_verbs: &[
            "evaluate",
            "judge",
            "critique",
            "justify",
            "defend",
            "assess",
            "recommend",
        ],
        weight: 1.5,
        complexity_threshold: 0.8,
    },
    BuiltinLevel {
        level: CognitiveLevel::Creating,
        keywords: &[
            "create",
            "design",
            "develop",
            "generate",
            "produce",
            "hypothesize",
            "plan",
            "construct",
            "invent",
            "compose",
            "formulate",
            "propose",
            "what if",
        ],
        patterns: &[
            r"how would you design",
            r"what would you create",
            r"can you propose (an|a)",
            r"develop a (plan|model|solution)",
            r"create a (solution|product|story)",
            r"hypothesize what would happen if",
            r"design (a|an)",
            r"invent (a|an)",
            r"compose (a|an)",
            r"formulate a (theory|plan)",
            r"what if you could",
            r"how would you modify (.*) to",
            r"what new (method|model|idea) could",
            r"develop an alternative to (.*)",
        ],
        leading_verbs: &[
            "create",
            "design",
            "develop",
            "propose",
            "invent",
            "hypothesize",
            "construct",
        ],
        weight: 1.6,
        complexity_threshold: 0.9,
    },
];

static BUILTIN: Lazy<ProfileRegistry> = Lazy::new(|| {
    ProfileRegistry::from_table(&builtin_table()).expect("built-in level profiles are valid")
});

/// Serializable definition of one level, as found in a profile table file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Level name or code; see [`CognitiveLevel`]'s `FromStr`.
    pub level: String,
    pub weight: f64,
    pub complexity_threshold: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub leading_verbs: Vec<String>,
}

/// A full table of level definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    #[serde(default)]
    pub levels: Vec<LevelSpec>,
}

/// The built-in table, in editable form.
pub fn builtin_table() -> ProfileTable {
    let to_strings =
        |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
    ProfileTable {
        levels: BUILTIN_LEVELS
            .iter()
            .map(|b| LevelSpec {
                level: b.level.name().to_string(),
                weight: b.weight,
                complexity_threshold: b.complexity_threshold,
                keywords: to_strings(b.keywords),
                patterns: to_strings(b.patterns),
                leading_verbs: to_strings(b.leading_verbs),
            })
            .collect(),
    }
}

/// A keyword together with its word-boundary matcher.
#[derive(Debug, Clone)]
pub struct Keyword {
    pub text: String,
    matcher: Regex,
}

impl Keyword {
    fn new(level: CognitiveLevel, text: &str) -> Result<Self, ClassifyError> {
        let source = format!(r"\b{}\b", regex::escape(text));
        let matcher = Regex::new(&source).map_err(|e| ClassifyError::InvalidPattern {
            level,
            pattern: text.to_string(),
            source: e,
        })?;
        Ok(Self {
            text: text.to_string(),
            matcher,
        })
    }

    /// Word-boundary match against an already normalized string.
    pub fn is_match(&self, clean: &str) -> bool {
        self.matcher.is_match(clean)
    }
}

/// Compiled, read-only profile for one level.
#[derive(Debug, Clone)]
pub struct LevelProfile {
    pub level: CognitiveLevel,
    pub keywords: Vec<Keyword>,
    pub patterns: Vec<Regex>,
    pub leading_verbs: Vec<String>,
    pub weight: f64,
    pub complexity_threshold: f64,
}

impl LevelProfile {
    fn compile(level: CognitiveLevel, spec: &LevelSpec) -> Result<Self, ClassifyError> {
        if !spec.weight.is_finite() || spec.weight <= 0.0 {
            return Err(ClassifyError::InvalidWeight {
                level,
                weight: spec.weight,
            });
        }
        if !(0.0..=1.0).contains(&spec.complexity_threshold) {
            return Err(ClassifyError::InvalidThreshold {
                level,
                threshold: spec.complexity_threshold,
            });
        }

        let keywords = spec
            .keywords
            .iter()
            .map(|k| Keyword::new(level, &k.to_lowercase()))
            .collect::<Result<Vec<_>, _>>()?;

        let patterns = spec
            .patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ClassifyError::InvalidPattern {
                    level,
                    pattern: p.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            level,
            keywords,
            patterns,
            leading_verbs: spec.leading_verbs.iter().map(|v| v.to_lowercase()).collect(),
            weight: spec.weight,
            complexity_threshold: spec.complexity_threshold,
        })
    }

    pub fn has_leading_verb(&self, word: &str) -> bool {
        self.leading_verbs.iter().any(|v| v == word)
    }

    fn to_spec(&self) -> LevelSpec {
        LevelSpec {
            level: self.level.name().to_string(),
            weight: self.weight,
            complexity_threshold: self.complexity_threshold,
            keywords: self.keywords.iter().map(|k| k.text.clone()).collect(),
            patterns: self.patterns.iter().map(|p| p.as_str().to_string()).collect(),
            leading_verbs: self.leading_verbs.clone(),
        }
    }
}

/// One compiled profile per level, indexed by [`CognitiveLevel::index`].
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<LevelProfile>,
}

impl ProfileRegistry {
    /// The process-wide built-in registry.
    pub fn builtin() -> &'static ProfileRegistry {
        &BUILTIN
    }

    /// Validate and compile a table. Every level must appear exactly once.
    pub fn from_table(table: &ProfileTable) -> Result<Self, ClassifyError> {
        let mut slots: [Option<LevelProfile>; 6] = Default::default();

        for spec in &table.levels {
            let level: CognitiveLevel = spec.level.parse()?;
            let slot = &mut slots[level.index()];
            if slot.is_some() {
                return Err(ClassifyError::DuplicateLevel(level));
            }
            *slot = Some(LevelProfile::compile(level, spec)?);
        }

        let profiles = CognitiveLevel::ALL
            .into_iter()
            .zip(slots)
            .map(|(level, slot)| slot.ok_or(ClassifyError::MissingLevel(level)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { profiles })
    }

    /// Load and compile a TOML profile table.
    pub fn load(path: &Path) -> Result<Self> {
        let table = load_profile_table(path)?;
        Self::from_table(&table)
            .with_context(|| format!("invalid profile table: {}", path.display()))
    }

    pub fn profile(&self, level: CognitiveLevel) -> &LevelProfile {
        &self.profiles[level.index()]
    }

    /// Profiles in level order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelProfile> {
        self.profiles.iter()
    }

    pub fn to_table(&self) -> ProfileTable {
        ProfileTable {
            levels: self.profiles.iter().map(LevelProfile::to_spec).collect(),
        }
    }
}

/// Read a profile table from a TOML file.
pub fn load_profile_table(path: &Path) -> Result<ProfileTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile table: {}", path.display()))?;
    parse_profile_table_str(&content, path)
}

/// Parse a TOML profile table (useful for testing).
pub fn parse_profile_table_str(content: &str, source_path: &Path) -> Result<ProfileTable> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_weights_and_thresholds() {
        let registry = ProfileRegistry::builtin();
        let expected = [
            (CognitiveLevel::Remembering, 1.0, 0.2),
            (CognitiveLevel::Understanding, 1.2, 0.4),
            (CognitiveLevel::Applying, 1.3, 0.5),
            (CognitiveLevel::Analyzing, 1.4, 0.7),
            (CognitiveLevel::Evaluating, 1.5, 0.8),
            (CognitiveLevel::Creating, 1.6, 0.9),
        ];
        for (level, weight, threshold) in expected {
            let profile = registry.profile(level);
            assert_eq!(profile.level, level);
            assert_eq!(profile.weight, weight);
            assert_eq!(profile.complexity_threshold, threshold);
        }
    }

    #[test]
    fn builtin_list_sizes() {
        let registry = ProfileRegistry::builtin();
        let remembering = registry.profile(CognitiveLevel::Remembering);
        assert_eq!(remembering.keywords.len(), 15);
        assert_eq!(remembering.patterns.len(), 9);
        assert_eq!(remembering.leading_verbs.len(), 8);
        assert_eq!(
            registry.profile(CognitiveLevel::Understanding).patterns.len(),
            18
        );
        assert_eq!(registry.profile(CognitiveLevel::Analyzing).patterns.len(), 16);
        assert_eq!(registry.profile(CognitiveLevel::Creating).keywords.len(), 13);
    }

    #[test]
    fn keyword_respects_word_boundaries() {
        let registry = ProfileRegistry::builtin();
        let applying = registry.profile(CognitiveLevel::Applying);
        let use_kw = applying.keywords.iter().find(|k| k.text == "use").unwrap();
        assert!(use_kw.is_match("how would you use a lever"));
        assert!(!use_kw.is_match("the house is red"));
    }

    #[test]
    fn table_roundtrips_through_registry() {
        let table = builtin_table();
        let registry = ProfileRegistry::from_table(&table).unwrap();
        assert_eq!(registry.to_table(), table);
    }

    #[test]
    fn rejects_missing_level() {
        let mut table = builtin_table();
        table.levels.pop();
        let err = ProfileRegistry::from_table(&table).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::MissingLevel(CognitiveLevel::Creating)
        ));
    }

    #[test]
    fn rejects_duplicate_level() {
        let mut table = builtin_table();
        table.levels[1].level = "remember".into();
        let err = ProfileRegistry::from_table(&table).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::DuplicateLevel(CognitiveLevel::Remembering)
        ));
    }

    #[test]
    fn rejects_bad_weight_threshold_and_pattern() {
        let mut table = builtin_table();
        table.levels[2].weight = 0.0;
        assert!(matches!(
            ProfileRegistry::from_table(&table),
            Err(ClassifyError::InvalidWeight { .. })
        ));

        let mut table = builtin_table();
        table.levels[3].complexity_threshold = 1.5;
        assert!(matches!(
            ProfileRegistry::from_table(&table),
            Err(ClassifyError::InvalidThreshold { .. })
        ));

        let mut table = builtin_table();
        table.levels[4].patterns.push("(unclosed".into());
        assert!(matches!(
            ProfileRegistry::from_table(&table),
            Err(ClassifyError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn parse_toml_table() {
        let toml_str = toml::to_string(&builtin_table()).unwrap();
        let table = parse_profile_table_str(&toml_str, &PathBuf::from("profiles.toml")).unwrap();
        assert_eq!(table.levels.len(), 6);
        assert_eq!(table.levels[5].level, "Creating");
    }

    #[test]
    fn load_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.toml");
        std::fs::write(&path, toml::to_string(&builtin_table()).unwrap()).unwrap();
        let registry = ProfileRegistry::load(&path).unwrap();
        assert_eq!(registry.profile(CognitiveLevel::Evaluating).weight, 1.5);

        let missing = dir.path().join("nope.toml");
        assert!(ProfileRegistry::load(&missing).is_err());
    }
}
