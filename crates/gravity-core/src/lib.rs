pub mod calc;
pub mod constants;
pub mod direction;
pub mod effect;
pub mod error;
pub mod handlers;
pub mod host;
pub mod listener;
pub mod mapper;
pub mod mass;
pub mod orchestrator;
pub mod orientation;
pub mod refresh;
pub mod settings;

pub use direction::*;
pub use error::{GravityError, Result};
pub use handlers::*;
pub use host::*;
pub use listener::*;
pub use mapper::*;
pub use mass::*;
pub use orchestrator::*;
pub use orientation::*;
pub use refresh::*;
pub use settings::*;
