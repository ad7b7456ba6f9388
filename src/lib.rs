//! Realms of Eldoria - automatic stack battles between hero armies and creatures

pub mod battle;
pub mod core;
pub mod creature;
pub mod hero;
pub mod scenario;
