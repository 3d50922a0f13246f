pub mod health;
pub mod root;

pub use health::{DatabaseStatus, HealthReport, HealthStatus};
pub use root::RootInfo;
