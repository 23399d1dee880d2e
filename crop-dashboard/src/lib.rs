pub mod charts;
pub mod config;
pub mod env;
pub mod export;
pub mod external;
pub mod models;
pub mod ui;

pub use charts::*;
pub use config::*;
pub use models::*;
