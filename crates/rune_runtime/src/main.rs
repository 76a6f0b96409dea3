//! Rune Engine Runtime
//!
//! Headless host: loads settings, spawns the scene, loads the script module
//! and drives a fixed number of frames with scripted input.
//!
//! Usage: `rune [settings.json]`

use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use rune_core::time::FrameClock;
use rune_core::{EntityId, World};
use rune_script::{ScriptEngine, ScriptModule, TracingSink};
use rune_services::{InputSystem, Settings};
use tracing::Level;

fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => {
            Settings::load(Path::new(&path)).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };

    let level: Level = settings
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Rune Engine v{}", rune_core::VERSION);

    let world = run(&settings, ScriptEngine::new(Rc::new(TracingSink)))?;
    for (id, record) in world.iter() {
        tracing::info!(
            entity = %id,
            name = %record.name,
            translation = ?record.transform.translation,
            "final state"
        );
    }

    Ok(())
}

/// Script modules this host can load, by name.
fn script_module(name: &str) -> Option<ScriptModule> {
    match name {
        rune_sandbox::MODULE => Some(rune_sandbox::module()),
        _ => None,
    }
}

fn spawn_scene(settings: &Settings, world: &mut World) -> Result<Vec<(EntityId, String)>> {
    let mut scripted = Vec::new();
    for entity in &settings.scene {
        let id = match entity.id {
            Some(id) => world
                .spawn_with_id(id, entity.name.clone())
                .with_context(|| format!("spawning '{}'", entity.name))?,
            None => world
                .spawn(entity.name.clone())
                .with_context(|| format!("spawning '{}'", entity.name))?,
        };
        world.set_translation(id, entity.translation)?;
        if let Some(class) = &entity.script {
            scripted.push((id, class.clone()));
        }
    }
    tracing::info!(entities = world.len(), scripted = scripted.len(), "scene spawned");
    Ok(scripted)
}

fn run(settings: &Settings, mut engine: ScriptEngine) -> Result<World> {
    let Some(module) = script_module(&settings.module) else {
        bail!("unknown script module '{}'", settings.module);
    };
    engine.load_module(module)?;

    let mut world = World::new();
    for (id, class) in spawn_scene(settings, &mut world)? {
        engine
            .instantiate(&world, &settings.module, &class, id)
            .with_context(|| format!("attaching {class} to entity {id}"))?;
    }

    let sim = &settings.simulation;
    let mut input = InputSystem::new();
    let mut clock = FrameClock::new(sim.max_delta_seconds);

    for frame in 0..sim.frames {
        input.new_frame();
        input.clear();
        for hold in settings.input.iter().filter(|hold| hold.is_active(frame)) {
            input.key_pressed(hold.key);
        }

        let time = match sim.delta_seconds {
            Some(delta) => clock.advance(delta),
            None => clock.tick(),
        };
        let report = engine.update(&mut world, &input, time.delta)?;
        tracing::trace!(frame, delta = time.delta, ?report, "frame");
    }

    tracing::info!(
        frames = clock.frame_count(),
        elapsed = ?clock.total_time(),
        "simulation finished"
    );
    Ok(world)
}
