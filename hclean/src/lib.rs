pub mod backup;
pub mod document;
pub mod environment;
pub mod errors;
pub mod persist;
pub mod size;
pub mod trimmer;

pub use document::{ConfigDocument, ProjectEntry};
pub use size::check_size;
pub use trimmer::{TrimSummary, trim, trim_document};
