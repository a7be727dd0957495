pub mod debug;
pub(crate) mod tracing;
