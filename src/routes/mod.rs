//! Route handlers not owned by a feature module

pub mod health;
