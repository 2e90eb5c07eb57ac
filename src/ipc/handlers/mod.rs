pub mod auth;
pub mod core;
pub mod fees;
pub mod results;
pub mod students;
pub mod teachers;
