mod bearer;
mod cors_layer;
mod tracing_layer;

pub use bearer::*;
pub use cors_layer::*;
pub use tracing_layer::*;
