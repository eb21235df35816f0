//! 型定義

pub mod endpoint;
pub mod snapshot;
pub mod status;

pub use endpoint::Endpoint;
pub use snapshot::Snapshot;
pub use status::HealthStatus;
