// Event planner library
// Exports all modules for the CLI, tests and benches

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
