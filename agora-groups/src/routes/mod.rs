pub mod create;
pub mod health;
pub mod join;
pub mod validate_code;
