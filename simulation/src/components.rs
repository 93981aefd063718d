//! ECS components shared by every species in the ecosystem.

use serde::{Deserialize, Serialize};

// ============================================================================
// Spatial Components
// ============================================================================

/// Integer grid coordinate, bounded by world width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// One greedy step toward `target`: signum on each axis, so the step may
    /// be diagonal when both coordinates differ.
    pub fn step_toward(&self, target: Position) -> (i32, i32) {
        (
            self.x + (target.x - self.x).signum(),
            self.y + (target.y - self.y).signum(),
        )
    }

    /// One step directly away from `threat` (signum per axis).
    pub fn step_away(&self, threat: Position) -> (i32, i32) {
        (
            self.x + (self.x - threat.x).signum(),
            self.y + (self.y - threat.y).signum(),
        )
    }
}

// ============================================================================
// Species
// ============================================================================

/// Closed set of species inhabiting the world. Behavior is dispatched on this
/// tag; spatial queries take a predicate over it rather than inspecting
/// concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Vegetation,
    Herbivore,
    Carnivore,
}

impl Species {
    pub fn is_vegetation(self) -> bool {
        matches!(self, Species::Vegetation)
    }

    pub fn is_herbivore(self) -> bool {
        matches!(self, Species::Herbivore)
    }

    pub fn is_carnivore(self) -> bool {
        matches!(self, Species::Carnivore)
    }

    /// Animals move and block other animals from entering their cell;
    /// vegetation does neither.
    pub fn is_animal(self) -> bool {
        matches!(self, Species::Herbivore | Species::Carnivore)
    }
}

// ============================================================================
// Lifecycle Components
// ============================================================================

/// Shared lifecycle state: health drops to zero or age reaches lifespan and
/// the entity is removed from the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub age: u32,
    pub lifespan: u32,
}

impl Vitals {
    pub fn new(health: f32, lifespan: u32) -> Self {
        Self {
            health,
            age: 0,
            lifespan,
        }
    }

    /// True once either death threshold has been crossed.
    pub fn expired(&self) -> bool {
        self.age >= self.lifespan || self.health <= 0.0
    }
}

/// Health granted to whoever consumes this entity, fixed at spawn and
/// independent of current health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoodValue(pub f32);

/// Ticks-since-last-meal counter, animals only. Increments every tick and
/// resets to zero on feeding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hunger(pub u32);

/// Tracks when an animal last reproduced, in ticks. `None` means it never
/// has and is immediately eligible.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReproductionClock {
    pub last_tick: Option<u64>,
}

impl ReproductionClock {
    /// Whether the cooldown window has fully elapsed by `now`.
    pub fn ready(&self, now: u64, cooldown_ticks: u64) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now.saturating_sub(last) >= cooldown_ticks,
        }
    }

    pub fn stamp(&mut self, now: u64) {
        self.last_tick = Some(now);
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Per-species head count, sampled by scanning the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub vegetation: u32,
    pub herbivores: u32,
    pub carnivores: u32,
}

impl Census {
    pub fn total(&self) -> u32 {
        self.vegetation + self.herbivores + self.carnivores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(2, 3);
        let b = Position::new(5, 1);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_step_toward_is_unit_per_axis() {
        let from = Position::new(4, 4);
        assert_eq!(from.step_toward(Position::new(9, 4)), (5, 4));
        assert_eq!(from.step_toward(Position::new(0, 0)), (3, 3)); // diagonal
        assert_eq!(from.step_toward(from), (4, 4));
    }

    #[test]
    fn test_step_away_mirrors_threat() {
        let from = Position::new(4, 4);
        assert_eq!(from.step_away(Position::new(6, 4)), (3, 4));
        assert_eq!(from.step_away(Position::new(3, 5)), (5, 3));
    }

    #[test]
    fn test_reproduction_clock_ready() {
        let mut clock = ReproductionClock::default();
        assert!(clock.ready(0, 40));

        clock.stamp(10);
        assert!(!clock.ready(30, 40));
        assert!(clock.ready(50, 40));
    }

    #[test]
    fn test_expired_thresholds() {
        let mut vitals = Vitals::new(5.0, 100);
        assert!(!vitals.expired());

        vitals.health = 0.0;
        assert!(vitals.expired());

        vitals.health = 5.0;
        vitals.age = 100;
        assert!(vitals.expired());
    }

    #[test]
    fn test_census_total() {
        let census = Census {
            vegetation: 3,
            herbivores: 2,
            carnivores: 1,
        };
        assert_eq!(census.total(), 6);
    }
}
