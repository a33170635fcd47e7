pub mod api;
pub mod roles;
pub mod join_flow;

pub use api::*;
pub use roles::*;
pub use join_flow::*;
