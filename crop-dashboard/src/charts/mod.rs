pub mod chart_config;
pub mod ranking;
pub mod renderer;
pub mod series;

pub use chart_config::*;
pub use ranking::*;
pub use renderer::*;
pub use series::*;
