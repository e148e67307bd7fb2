pub mod analytics;
pub mod recommendations;
