pub mod alignment;
pub mod engine;
pub mod reference;
pub mod scorer;
pub mod types;
