pub mod crop_counts;
pub mod prediction;
pub mod severity;

pub use crop_counts::*;
pub use prediction::*;
pub use severity::*;
