use tracing::{debug, info};

use super::{StopCondition, StopEngineError, StopRule, StopTemplates};
use crate::env::MapView;
use crate::state::{Mover, PlayerId, Point, TileFeature};
use crate::surface::{Abort, DrivingSurface};

/// Configuration state of the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Unconfigured,
    /// The conditions `player` asked for, in priority order.
    Configured {
        player: PlayerId,
        enabled: Vec<StopCondition>,
    },
}

/// Decides whether automated route-following halts at a point.
///
/// Preferences are asked once per acting player, the first time they are
/// needed, and kept until the acting player changes.
#[derive(Clone, Debug, Default)]
pub struct StopConditionEngine {
    state: EngineState,
    templates: StopTemplates,
}

impl StopConditionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text of the given rules.
    #[must_use]
    pub fn with_templates(mut self, templates: StopTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_configured_for(&self, player: PlayerId) -> bool {
        matches!(
            self.state,
            EngineState::Configured { player: configured, .. } if configured == player
        )
    }

    /// Rules enabled for the configured player, or `None` while unconfigured.
    pub fn enabled_rules(&self) -> Option<Vec<StopRule>> {
        match &self.state {
            EngineState::Unconfigured => None,
            EngineState::Configured { enabled, .. } => {
                Some(enabled.iter().map(StopCondition::rule).collect())
            }
        }
    }

    /// Forgets the stored preferences when `player` is not the one they belong to.
    pub fn set_acting_player(&mut self, player: PlayerId) {
        match self.state {
            EngineState::Configured {
                player: configured, ..
            } if configured != player => {
                debug!(previous = %configured, acting = %player, "stop conditions reset");
                self.state = EngineState::Unconfigured;
            }
            _ => {}
        }
    }

    fn condition(&self, rule: StopRule) -> StopCondition {
        match self.templates.get(&rule) {
            Some(template) => StopCondition::with_template(rule, template.clone()),
            None => StopCondition::new(rule),
        }
    }

    /// Asks `player` about every rule in priority order.
    ///
    /// A cancelled question leaves the engine unconfigured.
    pub fn configure(
        &mut self,
        player: PlayerId,
        surface: &mut dyn DrivingSurface,
    ) -> Result<(), Abort> {
        let mut enabled = Vec::new();
        for rule in StopRule::PRIORITY {
            let condition = self.condition(rule);
            if surface.confirm(&condition.prompt(player))? {
                enabled.push(condition);
            }
        }

        info!(%player, enabled = enabled.len(), "stop conditions configured");
        self.state = EngineState::Configured { player, enabled };
        Ok(())
    }

    /// Explanation of the highest-priority enabled condition matching `point`.
    ///
    /// # Errors
    ///
    /// Returns `StopEngineError::NotConfigured` unless [`configure`](Self::configure)
    /// already ran for the mover's owner.
    pub fn evaluate(
        &mut self,
        map: &(impl MapView + ?Sized),
        point: Point,
        mover: &Mover,
    ) -> Result<Option<String>, StopEngineError> {
        let EngineState::Configured { player, enabled } = &mut self.state else {
            return Err(StopEngineError::NotConfigured(mover.owner));
        };
        if *player != mover.owner {
            return Err(StopEngineError::NotConfigured(mover.owner));
        }

        Ok(first_explanation(enabled, map.features(point), mover))
    }

    /// Configures on first use for the mover's owner, then evaluates every
    /// feature recorded at `point`.
    pub fn should_stop(
        &mut self,
        map: &(impl MapView + ?Sized),
        point: Point,
        mover: &Mover,
        surface: &mut dyn DrivingSurface,
    ) -> Result<Option<String>, Abort> {
        self.should_stop_among(map.features(point), mover, surface)
    }

    /// Like [`should_stop`](Self::should_stop), but only `features` are
    /// considered, e.g. the ones the mover just noticed.
    pub fn should_stop_among(
        &mut self,
        features: &[TileFeature],
        mover: &Mover,
        surface: &mut dyn DrivingSurface,
    ) -> Result<Option<String>, Abort> {
        self.set_acting_player(mover.owner);
        if !self.is_configured_for(mover.owner) {
            self.configure(mover.owner, surface)?;
        }
        match &mut self.state {
            EngineState::Configured { enabled, .. } => {
                Ok(first_explanation(enabled, features, mover))
            }
            EngineState::Unconfigured => Ok(None),
        }
    }
}

fn first_explanation(
    enabled: &mut [StopCondition],
    features: &[TileFeature],
    mover: &Mover,
) -> Option<String> {
    let mut explanation = None;
    for condition in enabled {
        // Every condition is re-checked so none keeps a stale match.
        if condition.check(features, mover) && explanation.is_none() {
            explanation = condition.explanation();
        }
    }
    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, MapDimensions};
    use crate::state::{FeatureId, Owner, SettlementKind, Terrain};
    use crate::stop::StopTemplate;
    use crate::surface::{Answer, ScriptedSurface};

    fn scout(owner: u32) -> Mover {
        Mover::new(FeatureId::Persistent(1), PlayerId(owner), "scout", "Ilsa")
    }

    /// Enables exactly the rules listed, answering no to the rest.
    fn answers_enabling(rules: &[StopRule]) -> Vec<Answer> {
        StopRule::PRIORITY
            .iter()
            .map(|rule| Answer::Confirm(rules.contains(rule)))
            .collect()
    }

    fn crossroads() -> (GridMap, Point) {
        let mut map = GridMap::new(MapDimensions::new(3, 3), Terrain::Plains);
        let point = Point::new(1, 1);
        map.place(
            point,
            TileFeature::settlement(
                FeatureId::Persistent(20),
                Owner::Independent,
                SettlementKind::Village,
                "Ashford",
                60,
                6,
            ),
        )
        .unwrap();
        map.place(
            point,
            TileFeature::settlement(
                FeatureId::Persistent(21),
                Owner::Player(PlayerId(4)),
                SettlementKind::Town,
                "Varn",
                400,
                4,
            ),
        )
        .unwrap();
        (map, point)
    }

    #[test]
    fn higher_priority_condition_wins() {
        let (map, point) = crossroads();
        let mover = scout(1);
        let mut surface = ScriptedSurface::new(answers_enabling(&[
            StopRule::ActiveTowns,
            StopRule::IndependentVillages,
        ]));
        let mut engine = StopConditionEngine::new();

        let explanation = engine
            .should_stop(&map, point, &mover, &mut surface)
            .unwrap();
        assert_eq!(explanation.as_deref(), Some("reached town Varn (player 4)."));
    }

    #[test]
    fn disabled_conditions_never_match() {
        let (map, point) = crossroads();
        let mover = scout(1);
        let mut surface = ScriptedSurface::new(answers_enabling(&[StopRule::Immortals]));
        let mut engine = StopConditionEngine::new();

        assert_eq!(engine.should_stop(&map, point, &mover, &mut surface), Ok(None));
        assert_eq!(engine.enabled_rules(), Some(vec![StopRule::Immortals]));
    }

    #[test]
    fn only_the_given_features_are_considered() {
        let (map, point) = crossroads();
        let mover = scout(1);
        let mut surface = ScriptedSurface::new(answers_enabling(&[
            StopRule::ActiveTowns,
            StopRule::IndependentVillages,
        ]));
        let mut engine = StopConditionEngine::new();

        let village: Vec<_> = map
            .features(point)
            .iter()
            .filter(|feature| feature.owner.is_independent())
            .cloned()
            .collect();
        let explanation = engine
            .should_stop_among(&village, &mover, &mut surface)
            .unwrap();
        assert_eq!(
            explanation.as_deref(),
            Some("village Ashford is an independent village.")
        );
        assert_eq!(engine.should_stop_among(&[], &mover, &mut surface), Ok(None));
    }

    #[test]
    fn asks_once_per_player() {
        let (map, point) = crossroads();
        let mover = scout(1);
        let mut surface = ScriptedSurface::new(answers_enabling(&[]));
        let mut engine = StopConditionEngine::new();

        engine.should_stop(&map, point, &mover, &mut surface).unwrap();
        engine.should_stop(&map, point, &mover, &mut surface).unwrap();
        assert_eq!(surface.questions().len(), StopRule::PRIORITY.len());
    }

    #[test]
    fn player_change_discards_previous_answers() {
        let (map, point) = crossroads();
        let mut surface = ScriptedSurface::new(
            answers_enabling(&[StopRule::IndependentVillages])
                .into_iter()
                .chain(answers_enabling(&[])),
        );
        let mut engine = StopConditionEngine::new();

        let first = engine.should_stop(&map, point, &scout(1), &mut surface).unwrap();
        assert!(first.is_some());

        let second = engine.should_stop(&map, point, &scout(2), &mut surface).unwrap();
        assert_eq!(second, None);
        assert!(engine.is_configured_for(PlayerId(2)));
        assert_eq!(surface.questions().len(), 2 * StopRule::PRIORITY.len());
        assert!(surface.questions()[StopRule::PRIORITY.len()].contains("player 2"));
    }

    #[test]
    fn cancel_during_configuration_aborts_and_stays_unconfigured() {
        let (map, point) = crossroads();
        let mut surface = ScriptedSurface::new([Answer::Confirm(true), Answer::Confirm(false)]);
        let mut engine = StopConditionEngine::new();

        assert_eq!(engine.should_stop(&map, point, &scout(1), &mut surface), Err(Abort));
        assert_eq!(engine.state(), &EngineState::Unconfigured);
    }

    #[test]
    fn evaluating_before_configuration_is_a_precondition_failure() {
        let (map, point) = crossroads();
        let mut engine = StopConditionEngine::new();

        assert_eq!(
            engine.evaluate(&map, point, &scout(1)),
            Err(StopEngineError::NotConfigured(PlayerId(1)))
        );
    }

    #[test]
    fn template_overrides_replace_text() {
        let (map, point) = crossroads();
        let mut templates = StopTemplates::new();
        templates.insert(
            StopRule::IndependentVillages,
            StopTemplate::new("{player}: halt at free villages?", "halted near {feature}"),
        );
        let mut engine = StopConditionEngine::new().with_templates(templates);
        let mut surface =
            ScriptedSurface::new(answers_enabling(&[StopRule::IndependentVillages]));

        let explanation = engine
            .should_stop(&map, point, &scout(1), &mut surface)
            .unwrap();
        assert_eq!(explanation.as_deref(), Some("halted near village Ashford"));
        assert!(surface.questions().contains(&"player 1: halt at free villages?".to_owned()));
    }
}
