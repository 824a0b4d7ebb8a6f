pub mod correlation_service;
pub mod series_service;
pub mod summary_service;
pub mod weighting_service;
