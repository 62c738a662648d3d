pub mod aggregate;
pub mod api_types;
pub mod config;
pub mod fetch;
pub mod filters;
pub mod models;
pub mod orchestrator;
pub mod query;
pub mod refdata;
pub mod viz_export;
