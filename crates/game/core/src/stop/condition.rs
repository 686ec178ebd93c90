use std::collections::BTreeMap;

use crate::state::{FeatureKind, Mover, PlayerId, SettlementKind, TileFeature};

/// Placeholder replaced by the acting player in prompt templates.
pub const PLAYER_PLACEHOLDER: &str = "{player}";
/// Placeholder replaced by the matched feature in explanation templates.
pub const FEATURE_PLACEHOLDER: &str = "{feature}";

/// The stop rules, declared in evaluation priority order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StopRule {
    OthersFortresses,
    ActiveTowns,
    InactiveTowns,
    IndependentVillages,
    OthersVillages,
    OwnVillages,
    OthersUnits,
    IndependentUnits,
    Immortals,
}

impl StopRule {
    /// Every rule, highest priority first.
    pub const PRIORITY: [StopRule; 9] = [
        StopRule::OthersFortresses,
        StopRule::ActiveTowns,
        StopRule::InactiveTowns,
        StopRule::IndependentVillages,
        StopRule::OthersVillages,
        StopRule::OwnVillages,
        StopRule::OthersUnits,
        StopRule::IndependentUnits,
        StopRule::Immortals,
    ];

    /// Whether `feature` triggers this rule for `mover`. The mover never
    /// matches itself.
    pub fn matches(self, feature: &TileFeature, mover: &Mover) -> bool {
        if feature.id == mover.id {
            return false;
        }
        let player = mover.owner;
        let owner = feature.owner;
        match &feature.kind {
            FeatureKind::Settlement(settlement) => match (self, settlement.kind) {
                (StopRule::OthersFortresses, SettlementKind::Fortress) => !owner.is_player(player),
                (StopRule::ActiveTowns, SettlementKind::Town) => settlement.active,
                (StopRule::InactiveTowns, SettlementKind::Town) => !settlement.active,
                (StopRule::IndependentVillages, SettlementKind::Village) => owner.is_independent(),
                (StopRule::OthersVillages, SettlementKind::Village) => {
                    owner.is_other_player(player)
                }
                (StopRule::OwnVillages, SettlementKind::Village) => owner.is_player(player),
                _ => false,
            },
            FeatureKind::Unit(unit) => match self {
                StopRule::OthersUnits => owner.is_other_player(player),
                StopRule::IndependentUnits => owner.is_independent(),
                StopRule::Immortals => unit.immortal,
                _ => false,
            },
            _ => false,
        }
    }

    pub fn default_templates(self) -> StopTemplate {
        let (prompt, explanation) = match self {
            StopRule::OthersFortresses => (
                "Should {player} stop at fortresses held by others?",
                "{feature} is a fortress held by someone else.",
            ),
            StopRule::ActiveTowns => (
                "Should {player} stop at active towns?",
                "reached {feature}.",
            ),
            StopRule::InactiveTowns => (
                "Should {player} stop at abandoned towns?",
                "found {feature}.",
            ),
            StopRule::IndependentVillages => (
                "Should {player} stop at independent villages?",
                "{feature} is an independent village.",
            ),
            StopRule::OthersVillages => (
                "Should {player} stop at villages of other players?",
                "{feature} belongs to another player.",
            ),
            StopRule::OwnVillages => (
                "Should {player} stop at their own villages?",
                "arrived at {feature}.",
            ),
            StopRule::OthersUnits => (
                "Should {player} stop when meeting units of other players?",
                "met {feature}.",
            ),
            StopRule::IndependentUnits => (
                "Should {player} stop when meeting independent units?",
                "met {feature}.",
            ),
            StopRule::Immortals => (
                "Should {player} stop when meeting an immortal?",
                "{feature} is immortal.",
            ),
        };
        StopTemplate::new(prompt, explanation)
    }
}

/// Prompt/explanation text pair bound to a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopTemplate {
    pub prompt: String,
    pub explanation: String,
}

impl StopTemplate {
    pub fn new(prompt: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            explanation: explanation.into(),
        }
    }
}

/// Replacement templates keyed by rule; rules not present keep their defaults.
pub type StopTemplates = BTreeMap<StopRule, StopTemplate>;

/// A rule bound to its text, remembering the last feature it matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopCondition {
    rule: StopRule,
    template: StopTemplate,
    matched: Option<TileFeature>,
}

impl StopCondition {
    pub fn new(rule: StopRule) -> Self {
        Self::with_template(rule, rule.default_templates())
    }

    pub fn with_template(rule: StopRule, template: StopTemplate) -> Self {
        Self {
            rule,
            template,
            matched: None,
        }
    }

    pub fn rule(&self) -> StopRule {
        self.rule
    }

    pub fn matched(&self) -> Option<&TileFeature> {
        self.matched.as_ref()
    }

    /// Configuration question for `player`.
    pub fn prompt(&self, player: PlayerId) -> String {
        self.template
            .prompt
            .replace(PLAYER_PLACEHOLDER, &player.to_string())
    }

    /// Checks `features` and remembers the first match, forgetting any earlier one.
    pub fn check(&mut self, features: &[TileFeature], mover: &Mover) -> bool {
        self.matched = features
            .iter()
            .find(|feature| self.rule.matches(feature, mover))
            .cloned();
        self.matched.is_some()
    }

    /// Explanation for the current match, if any.
    pub fn explanation(&self) -> Option<String> {
        let feature = self.matched.as_ref()?;
        Some(
            self.template
                .explanation
                .replace(FEATURE_PLACEHOLDER, &feature.description()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::state::{FeatureId, Owner};

    fn scout() -> Mover {
        Mover::new(FeatureId::Persistent(1), PlayerId(1), "scout", "Ilsa")
    }

    fn village(id: u64, owner: Owner) -> TileFeature {
        TileFeature::settlement(
            FeatureId::Persistent(id),
            owner,
            SettlementKind::Village,
            "Ashford",
            60,
            6,
        )
    }

    #[test]
    fn village_rules_split_by_owner() {
        let mover = scout();
        let independent = village(10, Owner::Independent);
        let rival = village(11, Owner::Player(PlayerId(2)));
        let own = village(12, Owner::Player(PlayerId(1)));

        assert!(StopRule::IndependentVillages.matches(&independent, &mover));
        assert!(!StopRule::IndependentVillages.matches(&rival, &mover));
        assert!(StopRule::OthersVillages.matches(&rival, &mover));
        assert!(!StopRule::OthersVillages.matches(&own, &mover));
        assert!(StopRule::OwnVillages.matches(&own, &mover));
    }

    #[test]
    fn mover_never_matches_itself() {
        let mover = scout();
        let mut myself =
            TileFeature::unit(mover.id, Owner::Player(PlayerId(2)), "Ilsa", "scout", 0);
        if let FeatureKind::Unit(unit) = &mut myself.kind {
            unit.immortal = true;
        }
        assert!(!StopRule::Immortals.matches(&myself, &mover));
        assert!(!StopRule::OthersUnits.matches(&myself, &mover));
    }

    #[test]
    fn explanation_names_the_matched_feature() {
        let mover = scout();
        let mut condition = StopCondition::new(StopRule::IndependentVillages);
        assert_eq!(condition.explanation(), None);

        assert!(condition.check(&[village(10, Owner::Independent)], &mover));
        assert_eq!(
            condition.explanation().as_deref(),
            Some("village Ashford is an independent village.")
        );

        assert!(!condition.check(&[], &mover));
        assert_eq!(condition.matched(), None);
    }

    #[test]
    fn prompt_names_the_player() {
        let condition = StopCondition::new(StopRule::Immortals);
        assert_eq!(
            condition.prompt(PlayerId(3)),
            "Should player 3 stop when meeting an immortal?"
        );
    }

    #[test]
    fn rule_names_parse_case_insensitively() {
        assert_eq!(
            StopRule::from_str("Independent_Villages"),
            Ok(StopRule::IndependentVillages)
        );
        assert_eq!(StopRule::OthersFortresses.to_string(), "others_fortresses");
        assert!(StopRule::from_str("dragons").is_err());
    }

    #[test]
    fn priority_follows_declaration_order() {
        use strum::IntoEnumIterator;
        assert!(StopRule::iter().eq(StopRule::PRIORITY));
        assert!(StopRule::PRIORITY.is_sorted());
    }
}
