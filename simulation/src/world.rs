//! Simulation world - main orchestrator.
//!
//! Owns the entity registry (a `hecs::World` arena) and the spatial grid of
//! handles, and is the only mutation path for either, so an entity
//! registered here always appears in exactly its own cell's occupant set
//! exactly once. Drives the global tick: vegetation spawning first, then one
//! update per live entity against live grid state, so moves made early in a
//! tick are visible to entities processed later in the same tick.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::components::{Census, FoodValue, Position, ReproductionClock, Species, Vitals};
use crate::config::SimulationConfig;
use crate::grid::{Grid, CARDINALS};
use crate::systems;

pub struct SimulationWorld {
    pub(crate) world: World,
    pub(crate) grid: Grid,
    config: SimulationConfig,
    tick: u64,
}

/// Summary of one tick, handed to the observability layer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub spawned_vegetation: u32,
    pub births: u32,
    pub deaths: u32,
    pub census: Census,
}

/// Position, species and health of one live entity, as a renderer reads them.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySnapshot {
    pub position: Position,
    pub species: Species,
    pub health: f32,
}

impl SimulationWorld {
    /// World of the given dimensions with default configuration.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, SimulationConfig::default())
    }

    pub fn with_config(width: i32, height: i32, config: SimulationConfig) -> Self {
        Self {
            world: World::new(),
            grid: Grid::new(width, height),
            config,
            tick: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    /// Ticks elapsed since construction or the last reset.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Parameters are read fresh each tick, so writes here take effect on
    /// the next `tick()` call.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    // ========================================================================
    // Registry + grid mutation (the single dual-index path)
    // ========================================================================

    /// Spawn vegetation with default stats at (x, y). Returns `None` when
    /// the coordinates are out of bounds.
    pub fn spawn_vegetation(&mut self, x: i32, y: i32) -> Option<Entity> {
        if !self.grid.in_bounds(x, y) {
            return None;
        }
        let entity = self.world.spawn(systems::vegetation::bundle(x, y));
        self.grid.insert(x, y, entity);
        Some(entity)
    }

    /// Spawn a herbivore with default stats at (x, y).
    pub fn spawn_herbivore(&mut self, x: i32, y: i32) -> Option<Entity> {
        if !self.grid.in_bounds(x, y) {
            return None;
        }
        let entity = self.world.spawn(systems::herbivore::bundle(x, y));
        self.grid.insert(x, y, entity);
        Some(entity)
    }

    /// Spawn a carnivore with default stats at (x, y).
    pub fn spawn_carnivore(&mut self, x: i32, y: i32) -> Option<Entity> {
        if !self.grid.in_bounds(x, y) {
            return None;
        }
        let entity = self.world.spawn(systems::carnivore::bundle(x, y));
        self.grid.insert(x, y, entity);
        Some(entity)
    }

    /// Remove an entity from registry and grid. Calling this on an entity
    /// that is already gone is a no-op, not an error.
    pub fn remove_entity(&mut self, entity: Entity) {
        if let Some(pos) = self.position(entity) {
            self.grid.remove(pos.x, pos.y, entity);
        }
        let _ = self.world.despawn(entity);
    }

    /// Move an entity to (new_x, new_y). Out-of-bounds targets are ignored.
    /// The sole path by which positions change; it tolerates the entity
    /// already being absent from its old cell.
    pub fn move_entity(&mut self, entity: Entity, new_x: i32, new_y: i32) {
        if !self.grid.in_bounds(new_x, new_y) {
            return;
        }
        let Some(old) = self.position(entity) else {
            return;
        };
        self.grid.remove(old.x, old.y, entity);
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            pos.x = new_x;
            pos.y = new_y;
        }
        self.grid.insert(new_x, new_y, entity);
    }

    /// Transfer the eaten entity's food value to the eater's health and
    /// remove the eaten entity from the world.
    pub fn consume(&mut self, eater: Entity, eaten: Entity) {
        let food = self
            .world
            .get::<&FoodValue>(eaten)
            .map(|f| f.0)
            .unwrap_or(0.0);
        if let Ok(mut vitals) = self.world.get::<&mut Vitals>(eater) {
            vitals.health += food;
        }
        self.remove_entity(eaten);
    }

    // ========================================================================
    // Spatial queries
    // ========================================================================

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn species(&self, entity: Entity) -> Option<Species> {
        self.world.get::<&Species>(entity).ok().map(|s| *s)
    }

    pub fn health(&self, entity: Entity) -> Option<f32> {
        self.world.get::<&Vitals>(entity).ok().map(|v| v.health)
    }

    /// Manhattan distance between two live entities.
    pub fn distance(&self, a: Entity, b: Entity) -> Option<i32> {
        Some(self.position(a)?.manhattan(self.position(b)?))
    }

    /// Nearest entity whose species matches the predicate, by Manhattan
    /// distance over a linear registry scan. Never returns `origin` itself;
    /// ties go to the first minimum found in scan order.
    pub fn find_nearest(
        &self,
        origin: Entity,
        predicate: impl Fn(Species) -> bool,
    ) -> Option<Entity> {
        let origin_pos = self.position(origin)?;
        let mut nearest: Option<(Entity, i32)> = None;
        for (other, (pos, species)) in self.world.query::<(&Position, &Species)>().iter() {
            if other == origin || !predicate(*species) {
                continue;
            }
            let dist = origin_pos.manhattan(*pos);
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((other, dist));
            }
        }
        nearest.map(|(entity, _)| entity)
    }

    /// First empty in-bounds cell among the 4 cardinal neighbors of (x, y),
    /// examined in random order.
    pub fn find_empty_adjacent(&self, x: i32, y: i32) -> Option<Position> {
        let mut directions = CARDINALS;
        directions.shuffle(&mut rand::thread_rng());
        for (dx, dy) in directions {
            let (nx, ny) = (x + dx, y + dy);
            if self.grid.in_bounds(nx, ny) && self.grid.occupants(nx, ny).is_empty() {
                return Some(Position::new(nx, ny));
            }
        }
        None
    }

    /// Occupants of a cell, or an empty slice when out of bounds.
    pub fn occupants(&self, x: i32, y: i32) -> &[Entity] {
        self.grid.occupants(x, y)
    }

    /// First occupant of (x, y) whose species matches the predicate.
    pub fn first_at(
        &self,
        x: i32,
        y: i32,
        predicate: impl Fn(Species) -> bool,
    ) -> Option<Entity> {
        self.grid
            .occupants(x, y)
            .iter()
            .copied()
            .find(|&e| self.species(e).is_some_and(&predicate))
    }

    /// Whether any animal occupies (x, y). Animals block each other;
    /// vegetation never blocks.
    pub fn has_animal_at(&self, x: i32, y: i32) -> bool {
        self.first_at(x, y, Species::is_animal).is_some()
    }

    // ========================================================================
    // Aggregate queries
    // ========================================================================

    pub fn entity_count(&self) -> usize {
        self.world.query::<&Species>().iter().count()
    }

    pub(crate) fn count_where(&self, predicate: impl Fn(Species) -> bool) -> usize {
        self.world
            .query::<&Species>()
            .iter()
            .filter(|(_, s)| predicate(**s))
            .count()
    }

    /// Per-species head count by registry scan.
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (_, species) in self.world.query::<&Species>().iter() {
            match species {
                Species::Vegetation => census.vegetation += 1,
                Species::Herbivore => census.herbivores += 1,
                Species::Carnivore => census.carnivores += 1,
            }
        }
        census
    }

    /// Snapshot of every live entity for a renderer.
    pub fn snapshot(&self) -> Vec<EntitySnapshot> {
        self.world
            .query::<(&Position, &Species, &Vitals)>()
            .iter()
            .map(|(_, (position, species, vitals))| EntitySnapshot {
                position: *position,
                species: *species,
                health: vitals.health,
            })
            .collect()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Populate the world with the configured seed counts at uniformly
    /// random cells. Overlapping placements are allowed.
    pub fn seed(&mut self) {
        let mut rng = rand::thread_rng();
        let (width, height) = (self.grid.width(), self.grid.height());
        let counts = (
            self.config.initial_plants,
            self.config.initial_herbivores,
            self.config.initial_carnivores,
        );
        for _ in 0..counts.0 {
            self.spawn_vegetation(rng.gen_range(0..width), rng.gen_range(0..height));
        }
        for _ in 0..counts.1 {
            self.spawn_herbivore(rng.gen_range(0..width), rng.gen_range(0..height));
        }
        for _ in 0..counts.2 {
            self.spawn_carnivore(rng.gen_range(0..width), rng.gen_range(0..height));
        }
        debug!(census = ?self.census(), "world seeded");
    }

    /// Clear every entity and rewind the tick counter, keeping dimensions
    /// and configuration.
    pub fn reset(&mut self) {
        self.world.clear();
        self.grid.clear();
        self.tick = 0;
    }

    /// Advance the simulation by one step.
    ///
    /// Order per tick: (1) every currently empty cell may sprout vegetation;
    /// (2) a snapshot of the live registry is walked once, skipping entities
    /// removed earlier in the same tick, gating each herbivore on the live
    /// herbivore count against `max_herbivores` (a gated herbivore neither
    /// ages, decays, moves, feeds nor reproduces, but stays alive and
    /// counted), and otherwise dispatching to the species' own tick routine.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut rng = rand::thread_rng();

        // 1) Vegetation spawning.
        let spawn_rate = self.config.plant_spawn_rate;
        let mut spawned = 0u32;
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if self.grid.occupants(x, y).is_empty() && rng.gen::<f64>() < spawn_rate {
                    self.spawn_vegetation(x, y);
                    spawned += 1;
                }
            }
        }

        // 2) Update each entity from a snapshot of the live registry.
        let roster: Vec<(Entity, Species)> = self
            .world
            .query::<&Species>()
            .iter()
            .map(|(entity, species)| (entity, *species))
            .collect();
        let live_before = roster.len() as u32;
        let mut births = 0u32;

        for (entity, species) in roster {
            if !self.world.contains(entity) {
                continue; // removed earlier this tick
            }
            match species {
                Species::Vegetation => systems::vegetation::tick_vegetation(self, entity),
                Species::Herbivore => {
                    if self.count_where(Species::is_herbivore) >= self.config.max_herbivores {
                        continue;
                    }
                    births += systems::herbivore::tick_herbivore(self, entity);
                }
                Species::Carnivore => {
                    births += systems::carnivore::tick_carnivore(self, entity);
                }
            }
        }

        let census = self.census();
        let deaths = (live_before + births).saturating_sub(census.total());
        debug!(tick = self.tick, spawned, births, deaths, "tick complete");

        TickReport {
            tick: self.tick,
            spawned_vegetation: spawned,
            births,
            deaths,
            census,
        }
    }

    /// Stamp an animal's reproduction clock to `now`.
    pub(crate) fn stamp_reproduction(&mut self, entity: Entity, now: u64) {
        if let Ok(mut clock) = self.world.get::<&mut ReproductionClock>(entity) {
            clock.stamp(now);
        }
    }
}
