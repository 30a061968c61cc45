pub mod audit;
pub mod generation;
pub mod reason_code;
pub mod user;
