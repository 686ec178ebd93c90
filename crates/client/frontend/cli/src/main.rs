//! `explore` binary: walk a scout across the demo world from the terminal.

use std::io;

use anyhow::{Context, Result};
use explore_cli::{CliConfig, LineSurface, logging};
use explore_content::{ConfigLoader, DemoWorld, LinePlanner, StopTemplateLoader, WildlifeTables};
use explore_core::{
    ExplorationSession, ExploreConfig, ExploreEnv, MapView, MovementCostModel, PcgRng,
    StepOutcome, StopConditionEngine, WorldMaps,
};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let rules = match &config.rules_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ExploreConfig::default(),
    };
    let mut stops = StopConditionEngine::new();
    if let Some(path) = &config.stop_templates_path {
        stops = stops.with_templates(StopTemplateLoader::load(path)?);
    }

    let mut world = DemoWorld::build(config.players).context("Failed to build the demo world")?;
    let mut copies = world.subordinates();
    let planner = LinePlanner::new(&world.master, &MovementCostModel::new(&rules));
    let wildlife = WildlifeTables::for_map(&world.master);
    let rng = PcgRng;
    let env = ExploreEnv::new(&rules, &rng)
        .with_planner(&planner)
        .with_wildlife(&wildlife);

    tracing::info!(
        players = world.players.len(),
        seed = rules.seed,
        "Starting exploration"
    );

    let stdin = io::stdin();
    let mut surface = LineSurface::new(stdin.lock(), io::stdout());
    let mut session = ExplorationSession::new(world.mover.clone(), &rules);
    {
        let mut maps = WorldMaps::new(&mut world.master);
        for copy in &mut copies {
            maps = maps.with_subordinate(copy);
        }

        loop {
            match session.start(&mut surface) {
                StepOutcome::Aborted => break,
                StepOutcome::Exhausted => continue,
                StepOutcome::Continue => {}
            }
            if session.run_until_idle(&mut maps, &env, &mut stops, &mut surface)?
                == StepOutcome::Aborted
            {
                break;
            }
        }
    }

    let known: usize = copies
        .first()
        .map(|copy| copy.feature_count())
        .unwrap_or_default();
    let at = world.master.locate(world.mover.id);
    tracing::info!(steps = session.steps_taken(), known, ?at, "Exploration finished");
    println!(
        "{} took {} steps; player {} knows of {} features.",
        world.mover.name,
        session.steps_taken(),
        world.mover.owner,
        known
    );

    Ok(())
}
