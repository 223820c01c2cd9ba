//! Infrastructure layer - Repository, hashing and service implementations

pub mod auth;
pub mod logging;
pub mod model;
pub mod prediction;
pub mod user;
