//! EcoSim headless driver
//!
//! Seeds a world and runs it for a fixed number of ticks, logging the
//! population curve. Doubles as a benchmark for the tick loop.

use simulation::SimulationWorld;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("EcoSim engine starting...");

    let mut world = SimulationWorld::new(80, 60);
    world.seed();
    info!(census = ?world.census(), "world seeded");

    let ticks: u32 = 500;
    let start = std::time::Instant::now();
    for _ in 0..ticks {
        let report = world.tick();
        if report.tick % 50 == 0 {
            info!(
                tick = report.tick,
                plants = report.census.vegetation,
                herbivores = report.census.herbivores,
                carnivores = report.census.carnivores,
                births = report.births,
                deaths = report.deaths,
                "population sample"
            );
        }
    }
    let elapsed = start.elapsed();

    info!(
        "run complete: {:?} total, {:?} per tick, {} entities alive",
        elapsed,
        elapsed / ticks,
        world.entity_count()
    );

    Ok(())
}
