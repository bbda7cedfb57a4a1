//! API endpoint handlers. Blocking analysis work runs in `spawn_blocking`.

pub mod analysis;
pub mod health;
pub mod logs;
pub mod symptoms;
