//! EcoSim Simulation Engine
//!
//! Closed-ecosystem simulation on a bounded 2D grid: regrowing vegetation,
//! herbivores and carnivores, advanced by discrete global ticks. An external
//! rendering/control layer reads entity state between ticks and writes
//! configuration; the engine itself runs headless.

pub mod components;
pub mod config;
pub mod grid;
pub mod runner;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use runner::SimulationRunner;
pub use world::{EntitySnapshot, SimulationWorld, TickReport};
