mod types;

pub use types::{AppConfig, SourceKind};
