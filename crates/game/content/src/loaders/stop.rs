//! Stop-condition text overrides.
//!
//! The RON file maps rule names to `(prompt, explanation)` pairs:
//!
//! ```ron
//! {
//!     "independent_villages": ("Should {player} halt at free villages?", "{feature} is unclaimed."),
//! }
//! ```
//!
//! `{player}` and `{feature}` are substituted when the text is shown.

use std::collections::BTreeMap;
use std::path::Path;

use explore_core::{StopRule, StopTemplate, StopTemplates};

use crate::loaders::{LoadResult, read_file};

type TemplatesRon = BTreeMap<String, (String, String)>;

/// Loader for stop-condition templates from RON files.
pub struct StopTemplateLoader;

impl StopTemplateLoader {
    pub fn load(path: &Path) -> LoadResult<StopTemplates> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StopTemplates> {
        let raw: TemplatesRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stop templates RON: {}", e))?;

        raw.into_iter()
            .map(|(name, (prompt, explanation))| {
                let rule: StopRule = name
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Unknown stop rule '{}'", name))?;
                if prompt.trim().is_empty() {
                    anyhow::bail!("Empty prompt for stop rule '{}'", name);
                }
                Ok((rule, StopTemplate::new(prompt, explanation)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_case_insensitive() {
        let templates = StopTemplateLoader::parse(
            r#"{
                "Independent_Villages": ("{player}: free villages?", "{feature} is free."),
                "immortals": ("{player}: immortals?", "{feature}!"),
            }"#,
        )
        .unwrap();

        assert_eq!(templates.len(), 2);
        assert_eq!(
            templates[&StopRule::IndependentVillages].explanation,
            "{feature} is free."
        );
        assert!(templates.contains_key(&StopRule::Immortals));
    }

    #[test]
    fn unknown_rules_are_rejected() {
        let error = StopTemplateLoader::parse(r#"{ "dragons": ("a", "b") }"#).unwrap_err();
        assert!(error.to_string().contains("dragons"));
    }

    #[test]
    fn empty_prompts_are_rejected() {
        assert!(StopTemplateLoader::parse(r#"{ "own_villages": ("  ", "b") }"#).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stops.ron");
        std::fs::write(&path, r#"{ "active_towns": ("towns?", "reached {feature}") }"#).unwrap();

        let templates = StopTemplateLoader::load(&path).unwrap();
        assert_eq!(templates[&StopRule::ActiveTowns].prompt, "towns?");
    }
}
