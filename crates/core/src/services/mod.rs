pub mod backends;
pub mod ordinals;
pub mod provider;
pub mod registry;
pub mod report;
