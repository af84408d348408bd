//! cluster-core — cluster deployment config parsing.
//!
//! Reads the line-oriented `~/.cluster` file into a typed [`ClusterConfig`]:
//! scalar settings, plugin lists, CRAQ addresses and the [`NodeSpec`]s that
//! `cluster-planner` balances deployments across.

pub mod config;
pub mod craq;
pub mod error;
pub mod node;
pub mod text;

pub use config::{ClusterConfig, ConfigKey, DEFAULT_CONFIG_FILE, PluginConfig, UnknownKey, default_path};
pub use craq::{CraqNode, parse_craq_nodes};
pub use error::{ConfigError, ConfigResult, FormatError};
pub use node::NodeSpec;
pub use text::{parse_bool, remove_comment};
