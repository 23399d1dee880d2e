pub mod alerts;
pub mod effects;
pub mod format;
pub mod forms;
pub mod notifications;
pub mod refresh;

pub use alerts::*;
pub use effects::*;
pub use format::*;
pub use forms::*;
pub use notifications::*;
pub use refresh::*;
