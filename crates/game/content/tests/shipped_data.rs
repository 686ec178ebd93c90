//! The data files shipped with the crate load and drive the demo world.
#![cfg(feature = "loaders")]

use std::path::PathBuf;

use explore_content::{ConfigLoader, DemoWorld, LinePlanner, StopTemplateLoader, WildlifeTables};
use explore_core::{
    Answer, Direction, ExplorationSession, ExploreEnv, MovementCostModel, PcgRng,
    Report, ScriptedSurface, StepOutcome, StopConditionEngine, StopRule, WorldMaps,
};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn shipped_rules_are_valid() {
    let rules = ConfigLoader::load(&data("explore.toml")).unwrap();
    assert_eq!(rules.seed, 20260519);
    assert_eq!(rules.costs.swamp, 5);
}

#[test]
fn shipped_templates_cover_known_rules() {
    let templates = StopTemplateLoader::load(&data("stop_templates.ron")).unwrap();
    assert!(templates.contains_key(&StopRule::IndependentVillages));
    assert!(templates.values().all(|t| t.prompt.contains("{player}")));
}

#[test]
fn scout_walks_the_road_east() {
    let rules = ConfigLoader::load(&data("explore.toml")).unwrap();
    let mut world = DemoWorld::build(2).unwrap();
    let mut copies = world.subordinates();
    let planner = LinePlanner::new(&world.master, &MovementCostModel::new(&rules));
    let wildlife = WildlifeTables::for_map(&world.master);
    let env = ExploreEnv::new(&rules, &PcgRng)
        .with_planner(&planner)
        .with_wildlife(&wildlife);

    let mut surface = ScriptedSurface::new([
        Answer::Points(3),
        Answer::step(Direction::East),
        Answer::step(Direction::East),
        Answer::step(Direction::East),
    ]);
    let mut session = ExplorationSession::new(world.mover.clone(), &rules);
    let mut stops = StopConditionEngine::new();
    let outcome = {
        let mut maps = WorldMaps::new(&mut world.master);
        for copy in &mut copies {
            maps = maps.with_subordinate(copy);
        }
        assert_eq!(session.start(&mut surface), StepOutcome::Continue);
        session
            .run_until_idle(&mut maps, &env, &mut stops, &mut surface)
            .unwrap()
    };

    // Road relief brings each plains step down to a single point.
    assert_eq!(outcome, StepOutcome::Exhausted);
    assert_eq!(session.steps_taken(), 3);
    assert!(
        surface
            .reports()
            .iter()
            .any(|report| matches!(report, Report::Exhausted))
    );
    assert_eq!(surface.remaining_answers(), 0);
}
