//! Seeded script generation from a fixed template pool.

pub mod generator;
pub mod pool;
