//! Storefront Siege - Entry Point
//!
//! Interactive driver for the simulation core: spawns creeps, advances
//! ticks, applies tower damage, and prints the population and score after
//! each commit. Rendering, input handling and maps live in the host game;
//! this loop exists to poke the core by hand.

use std::collections::VecDeque;
use std::io::{self, Write};

use storefront_siege::behaviours::CreepFactory;
use storefront_siege::core::config::SimulationConfig;
use storefront_siege::core::error::Result;
use storefront_siege::core::types::{CreepKind, TowerKind, Vec2};
use storefront_siege::creep::SpawnRequest;
use storefront_siege::events::Broadcast;
use storefront_siege::signals::Signal;
use storefront_siege::simulation::{Coordinator, Scheduler};

const TICK_SECONDS: f32 = 0.1;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("storefront_siege=debug")
        .init();

    tracing::info!("Storefront Siege starting...");

    let channel = Broadcast::new();
    let tile_size = Signal::new(Vec2::new(32.0, 32.0));
    let mut scheduler = Scheduler::subscribe(&channel);
    let factory = CreepFactory::new(
        &channel,
        tile_size.reader(),
        Box::new(Broadcast::new()),
        "assets/creep.png",
        SimulationConfig::default(),
    );
    let mut coordinator = Coordinator::new(channel, factory);

    println!("\n=== STOREFRONT SIEGE ===");
    println!("Commands:");
    println!("  tick / t                 - Advance one tick");
    println!("  run <n>                  - Advance n ticks");
    println!("  spawn <customer|hobo|auditor>");
    println!("  hit <idx> <advert|clerk|security> <amount>");
    println!("  status / s               - Show population and score");
    println!("  export                   - Dump the population as JSON");
    println!("  quit / q                 - Exit");
    println!();

    loop {
        display_status(&coordinator);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["tick"] | ["t"] => {
                coordinator.tick(TICK_SECONDS);
                scheduler.run(TICK_SECONDS);
            }
            ["run", n] => {
                if let Ok(n) = n.parse::<u32>() {
                    for _ in 0..n {
                        coordinator.tick(TICK_SECONDS);
                        scheduler.run(TICK_SECONDS);
                    }
                } else {
                    println!("usage: run <n>");
                }
            }
            ["spawn", kind] => match parse_kind(kind) {
                Some(kind) => {
                    coordinator.request_spawn(SpawnRequest {
                        kind,
                        position: Vec2::new(4.0, 4.0),
                        waypoints: Some(VecDeque::from([Vec2::new(4.0, 1.0), Vec2::new(8.0, 1.0)])),
                        goal: Vec2::new(8.0, 7.0),
                    });
                    println!("Spawn requested ({kind:?}); commits at the next tick boundary");
                }
                None => println!("unknown creep kind: {kind}"),
            },
            ["hit", idx, tower, amount] => {
                apply_hit(&coordinator, idx, tower, amount);
            }
            ["export"] => {
                println!("{}", export_population(&coordinator)?);
            }
            ["status"] | ["s"] => {
                for (i, creep) in coordinator.creeps().iter().enumerate() {
                    let p = creep.position();
                    println!(
                        "  [{i}] {:?} at ({:.2}, {:.2}) hp {:.1} value {:.1} {:?}",
                        creep.attributes().kind,
                        p.x,
                        p.y,
                        creep.attributes().health,
                        creep.value(),
                        creep.state(),
                    );
                }
            }
            _ => println!("unrecognized command: {input}"),
        }
    }

    tracing::info!("goodbye");
    Ok(())
}

/// Serializable view of one live creep, for the `export` command
#[derive(serde::Serialize)]
struct CreepSnapshot {
    id: storefront_siege::core::types::CreepId,
    kind: CreepKind,
    position: Vec2,
    health: f32,
    value: f32,
    state: storefront_siege::creep::CreepState,
}

fn export_population(coordinator: &Coordinator) -> Result<String> {
    let snapshots: Vec<CreepSnapshot> = coordinator
        .creeps()
        .iter()
        .map(|creep| CreepSnapshot {
            id: creep.id(),
            kind: creep.attributes().kind,
            position: creep.position(),
            health: creep.attributes().health,
            value: creep.value(),
            state: creep.state(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&snapshots)?)
}

fn display_status(coordinator: &Coordinator) {
    println!(
        "tick {} | population {} (+{} pending) | asset value {:.1}",
        coordinator.current_tick(),
        coordinator.population(),
        coordinator.pending_spawn_count(),
        coordinator.score(),
    );
}

fn parse_kind(word: &str) -> Option<CreepKind> {
    match word {
        "customer" => Some(CreepKind::Customer),
        "hobo" => Some(CreepKind::Hobo),
        "auditor" => Some(CreepKind::Auditor),
        _ => None,
    }
}

fn apply_hit(coordinator: &Coordinator, idx: &str, tower: &str, amount: &str) {
    let tower = match tower {
        "advert" => TowerKind::Advert,
        "clerk" => TowerKind::Clerk,
        "security" => TowerKind::Security,
        _ => {
            println!("unknown tower kind: {tower}");
            return;
        }
    };
    let (Ok(idx), Ok(amount)) = (idx.parse::<usize>(), amount.parse::<f32>()) else {
        println!("usage: hit <idx> <tower> <amount>");
        return;
    };
    match coordinator.creeps().get(idx) {
        Some(creep) => {
            if let Err(err) = coordinator.apply_damage(creep.id(), tower, amount) {
                println!("damage failed: {err}");
            }
        }
        None => println!("no creep at index {idx}"),
    }
}
