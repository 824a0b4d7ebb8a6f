pub mod analytics;
pub mod chart;
pub mod dataset;
pub mod portfolio;
pub mod series;
pub mod settings;
pub mod summary;
