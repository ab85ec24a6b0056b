//! ProFT: a coaching backend for coaches, their clients and prescribed workouts.
//!
//! Workout metrics (total tempo, time under tension, rest and density) are
//! derived server-side in [`metrics`] and never trusted from the client.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod version;
