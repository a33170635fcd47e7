pub mod health;
pub mod send;
