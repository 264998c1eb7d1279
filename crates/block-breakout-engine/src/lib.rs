pub mod breakout;
pub mod models;

// Re-export key types for easier usage
pub use breakout::*;
pub use models::*;
