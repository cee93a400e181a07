//! Simulation islands: union-find grouping of contacting bodies, and the
//! activation bookkeeping deciding who sleeps.

pub use self::simulation_island_manager::{IslandCallback, SimulationIslandManager};

mod simulation_island_manager;
