pub mod analysis_handlers;
pub mod record_handlers;
pub mod system_handlers;

pub use analysis_handlers::*;
pub use record_handlers::*;
pub use system_handlers::*;
