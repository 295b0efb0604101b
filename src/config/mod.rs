pub mod schema;
pub mod loader;

pub use schema::{Config, GenerationConfig, InputConfig};
pub use loader::{load_config, merge_with_cli_args};
