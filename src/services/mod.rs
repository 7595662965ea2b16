pub mod export_service;

pub use export_service::{export_all, export_by_sources};
