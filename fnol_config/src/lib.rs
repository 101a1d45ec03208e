mod schema;

pub use schema::{Config, DocumentConfig, ExtractionConfig, OutputConfig, PenaltiesConfig};
