// readonly_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod components;
pub mod store;
pub mod transforms;
