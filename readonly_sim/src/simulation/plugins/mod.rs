// readonly_sim/src/simulation/plugins/mod.rs

pub mod readonly;
pub mod world;
