mod handlers;
mod types;

pub use handlers::{get_snapshot, ingest_reading};
pub use types::{IngestRequest, IngestResponse, SnapshotResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_get_snapshot, __path_ingest_reading};
