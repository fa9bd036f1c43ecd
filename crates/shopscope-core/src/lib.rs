pub mod actions;
pub mod answers;
pub mod config;
pub mod reducer;
pub mod state;
pub mod steps;
pub mod submission;

pub use actions::*;
pub use answers::*;
pub use reducer::*;
pub use state::*;
pub use steps::*;
pub use submission::*;

pub use config::Config;
pub use config::ConfigError;
