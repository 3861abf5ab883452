pub mod acquire;
pub mod clean;
pub mod standings;
