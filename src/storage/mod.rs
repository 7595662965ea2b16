pub mod store;
pub mod timu_id;

pub use store::{TimuStore, UpsertOutcome};
