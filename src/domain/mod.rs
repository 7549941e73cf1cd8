// Domain layer - Data shapes and pure transforms
pub mod contact;
pub mod country;
pub mod dashboard;
pub mod history;
pub mod map;
pub mod slot;
pub mod world;
