pub mod loaders;
pub mod question;

pub use loaders::{list_import_files, load_json_questions};
pub use question::{ExportQuestion, JsonQuestion, ParsedQuestion, TimuRecord};
