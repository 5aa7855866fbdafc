//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a cache is served.
//!
//! # Tasks
//! - Size-cap sweep: evicts the oldest entry once a persistent namespace
//!   reaches its maximum size

mod sweep;

pub use sweep::{spawn_sweep_task, spawn_sweep_task_every};
