pub mod paths;
pub mod tracing;
