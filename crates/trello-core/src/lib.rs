pub mod config;
pub mod error;
pub mod result;
pub mod selection;

pub use config::{is_enabled, TrelloConfig};
pub use error::TrelloError;
pub use result::TrelloResult;
pub use selection::ActiveSelection;
