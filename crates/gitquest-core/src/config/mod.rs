//! Configuration for challenge builds.
//!
//! Lookup order:
//! - an explicit `--config` file
//! - `<repo>/.gitquest.toml`
//! - `<config_dir>/gitquest/config.toml`
//! - built-in defaults

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_quest_toml, parse_quest_toml_str, to_toml};
pub use paths::{PROJECT_CONFIG_FILE, global_config_path, project_config_path};
pub use schema::{DEFAULT_MIN_FREE_BYTES, QuestConfig};
pub use store::ConfigStore;
