//! Deterministic lane simulation
//!
//! Everything that happens between "ball released" and "next ball ready":
//! - Fixed timestep only
//! - Seeded RNG only
//! - Delays measured on the simulated clock, never wall time

pub mod lane;
pub mod physics;
pub mod resolver;
pub mod schedule;
pub mod scripted;
pub mod state;
pub mod tick;

pub use lane::SimpleLane;
pub use physics::LanePhysics;
pub use resolver::ThrowResolver;
pub use schedule::Scheduler;
pub use scripted::{Ending, ScriptedLane, ScriptedThrow};
pub use state::{GameEvent, PendingAction, ThrowResult, ThrowState};
pub use tick::{TickInput, tick};
