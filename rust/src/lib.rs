pub mod facade;

// Re-export main types and functions
pub use facade::*;
