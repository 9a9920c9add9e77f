pub mod alignment_service;
pub mod change_service;
pub mod chart_service;
pub mod fetch_service;
