// readonly_core/src/lib.rs

// This file defines the public modules of the library.
pub mod binding;
pub mod bridge;
pub mod config;
pub mod error;
pub mod messages;
pub mod normalize;
pub mod prelude;
pub mod reporter;
pub mod reporting;
pub mod transport;
pub mod types;
