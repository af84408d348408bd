//! `~/.cluster` configuration parser.
//!
//! The file is line oriented: `key = value`, with `#` starting a comment.
//! Lines without `=` are skipped and unrecognized keys are ignored so that
//! older and newer config files keep loading.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::craq::{CraqNode, format_craq_nodes, parse_craq_nodes};
use crate::error::{ConfigError, ConfigResult, FormatError};
use crate::node::NodeSpec;
use crate::text::{parse_bool, remove_comment, split_list};

/// File name of the per-user config, relative to the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".cluster";

/// The closed set of keys understood in a cluster config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Headnode,
    Timeserver,
    PackDir,
    Node,
    Repository,
    Branch,
    CodeDir,
    OsegCodeDir,
    Port,
    Unique,
    Ccache,
    Zookeeper,
    ZookeeperAddr,
    CraqNodes,
    Plugins,
    SpacePlugins,
    CsegPlugins,
    SimohPlugins,
    AnalysisPlugins,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 19] = [
        ConfigKey::Headnode,
        ConfigKey::Timeserver,
        ConfigKey::PackDir,
        ConfigKey::Node,
        ConfigKey::Repository,
        ConfigKey::Branch,
        ConfigKey::CodeDir,
        ConfigKey::OsegCodeDir,
        ConfigKey::Port,
        ConfigKey::Unique,
        ConfigKey::Ccache,
        ConfigKey::Zookeeper,
        ConfigKey::ZookeeperAddr,
        ConfigKey::CraqNodes,
        ConfigKey::Plugins,
        ConfigKey::SpacePlugins,
        ConfigKey::CsegPlugins,
        ConfigKey::SimohPlugins,
        ConfigKey::AnalysisPlugins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Headnode => "headnode",
            ConfigKey::Timeserver => "timeserver",
            ConfigKey::PackDir => "pack_dir",
            ConfigKey::Node => "node",
            ConfigKey::Repository => "repository",
            ConfigKey::Branch => "branch",
            ConfigKey::CodeDir => "code_dir",
            ConfigKey::OsegCodeDir => "oseg_code_dir",
            ConfigKey::Port => "port",
            ConfigKey::Unique => "unique",
            ConfigKey::Ccache => "ccache",
            ConfigKey::Zookeeper => "zookeeper",
            ConfigKey::ZookeeperAddr => "zookeeper_addr",
            ConfigKey::CraqNodes => "craq_nodes",
            ConfigKey::Plugins => "plugins",
            ConfigKey::SpacePlugins => "space_plugins",
            ConfigKey::CsegPlugins => "cseg_plugins",
            ConfigKey::SimohPlugins => "simoh_plugins",
            ConfigKey::AnalysisPlugins => "analysis_plugins",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized config key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for ConfigKey {
    type Err = UnknownKey;

    /// Keys match case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Plugin name lists, one per subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginConfig {
    /// `plugins`
    pub core: Vec<String>,
    /// `space_plugins`
    pub space: Vec<String>,
    /// `cseg_plugins`
    pub cseg: Vec<String>,
    /// Default-only; there is no key for it.
    pub pinto: Vec<String>,
    /// `simoh_plugins`
    pub simoh: Vec<String>,
    /// `analysis_plugins`
    pub analysis: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        let weights = "weight-exp,weight-sqr,weight-const";
        Self {
            core: split_list("tcpsst,servermap-tabular,core-local"),
            space: split_list(&format!(
                "{weights},space-craq,space-local,space-standard,space-master-pinto"
            )),
            cseg: split_list(weights),
            pinto: Vec::new(),
            simoh: split_list(weights),
            analysis: split_list(weights),
        }
    }
}

/// A parsed cluster configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterConfig {
    pub headnode: String,
    pub timeserver: Option<String>,
    pub repository: String,
    pub branch: String,
    pub code_dir: String,
    pub pack_dir: String,
    pub oseg_code_dir: String,
    /// First port handed out to deployed services.
    pub port_base: u16,
    /// Tag character distinguishing concurrent deployments.
    pub unique: Option<char>,
    pub ccache: bool,
    pub zookeeper: String,
    pub zookeeper_addr: String,
    pub craq_nodes: Vec<CraqNode>,
    pub plugins: PluginConfig,
    /// Nodes in file order.
    pub nodes: Vec<NodeSpec>,
    /// Last computed deployment plan. Derived from `nodes`.
    pub deploy_nodes: Vec<NodeSpec>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            headnode: "bogus@bogus".to_string(),
            timeserver: None,
            repository: "git://github.com/sirikata/sirikata.git".to_string(),
            branch: "master".to_string(),
            code_dir: "cbr".to_string(),
            pack_dir: String::new(),
            oseg_code_dir: "oseg.git".to_string(),
            port_base: 6666,
            unique: None,
            ccache: false,
            zookeeper: String::new(),
            zookeeper_addr: String::new(),
            craq_nodes: Vec::new(),
            plugins: PluginConfig::default(),
            nodes: Vec::new(),
            deploy_nodes: Vec::new(),
        }
    }
}

/// `~/.cluster`, or an error if there is no home directory.
pub fn default_path() -> ConfigResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDir)
}

impl ClusterConfig {
    /// Defaults overlaid with the contents of `path`.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::default();
        config.parse(path)?;
        Ok(config)
    }

    /// Load `~/.cluster`. A missing file is [`ConfigError::NotFound`] so the
    /// caller can decide whether to fall back to [`ClusterConfig::default`].
    pub fn from_default_path() -> ConfigResult<Self> {
        Self::from_existing(default_path()?)
    }

    /// Load [`DEFAULT_CONFIG_FILE`] from `home`.
    pub fn from_default_in(home: &Path) -> ConfigResult<Self> {
        Self::from_existing(home.join(DEFAULT_CONFIG_FILE))
    }

    fn from_existing(path: PathBuf) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        Self::from_file(&path)
    }

    /// Parse `path` over the current values.
    pub fn parse(&mut self, path: &Path) -> ConfigResult<()> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content)?;
        info!(path = %path.display(), nodes = self.nodes.len(), "loaded cluster config");
        Ok(())
    }

    /// Parse config text over the current values.
    ///
    /// Only keys present in `content` change; `nodes` and `deploy_nodes`
    /// always start empty. On error `self` is left untouched.
    pub fn parse_str(&mut self, content: &str) -> ConfigResult<()> {
        let mut next = self.clone();
        next.nodes.clear();
        next.deploy_nodes.clear();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let Some((key, value)) = remove_comment(raw).split_once('=') else {
                continue;
            };
            let key = key.trim();
            match key.parse::<ConfigKey>() {
                Ok(key) => next
                    .apply(key, value)
                    .map_err(|kind| ConfigError::Format { line: line_no, kind })?,
                Err(_) => debug!(key, line = line_no, "ignoring unrecognized key"),
            }
        }

        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: ConfigKey, value: &str) -> Result<(), FormatError> {
        let text = value.trim();
        match key {
            ConfigKey::Headnode => self.headnode = text.to_string(),
            ConfigKey::Timeserver => self.timeserver = Some(text.to_string()),
            ConfigKey::PackDir => self.pack_dir = text.to_string(),
            ConfigKey::Node => self.nodes.push(text.parse()?),
            ConfigKey::Repository => self.repository = text.to_string(),
            ConfigKey::Branch => self.branch = text.to_string(),
            ConfigKey::CodeDir => self.code_dir = text.to_string(),
            ConfigKey::OsegCodeDir => self.oseg_code_dir = text.to_string(),
            ConfigKey::Port => {
                self.port_base = text.parse().map_err(|_| FormatError::InvalidInteger {
                    key: key.as_str(),
                    value: text.to_string(),
                })?;
            }
            ConfigKey::Unique => {
                let mut chars = text.chars();
                let first = chars.next().ok_or(FormatError::EmptyUnique)?;
                if chars.next().is_some() {
                    warn!(value = text, unique = %first, "unique is a string, using its first character");
                }
                self.unique = Some(first);
            }
            ConfigKey::Ccache => self.ccache = parse_bool(value),
            ConfigKey::Zookeeper => self.zookeeper = text.to_string(),
            ConfigKey::ZookeeperAddr => self.zookeeper_addr = text.to_string(),
            ConfigKey::CraqNodes => self.craq_nodes = parse_craq_nodes(value)?,
            ConfigKey::Plugins => self.plugins.core = split_list(value),
            ConfigKey::SpacePlugins => self.plugins.space = split_list(value),
            ConfigKey::CsegPlugins => self.plugins.cseg = split_list(value),
            ConfigKey::SimohPlugins => self.plugins.simoh = split_list(value),
            ConfigKey::AnalysisPlugins => self.plugins.analysis = split_list(value),
        }
        Ok(())
    }

    /// Render every keyed field in config-file syntax.
    ///
    /// Parsing the output over [`ClusterConfig::default`] reproduces this
    /// config, except for `deploy_nodes` and `plugins.pinto`.
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        for key in ConfigKey::ALL {
            let name = key.as_str();
            if key == ConfigKey::Node {
                for node in &self.nodes {
                    out.push_str(&format!("{name} = {node}\n"));
                }
            } else if let Some(value) = self.value_of(key) {
                out.push_str(&format!("{name} = {value}\n"));
            }
        }
        out
    }

    /// Single-valued setting for `key`; `None` when unset or repeatable.
    fn value_of(&self, key: ConfigKey) -> Option<String> {
        let value = match key {
            ConfigKey::Node => return None,
            ConfigKey::Timeserver => return self.timeserver.clone(),
            ConfigKey::Unique => return self.unique.map(String::from),
            ConfigKey::Headnode => self.headnode.clone(),
            ConfigKey::PackDir => self.pack_dir.clone(),
            ConfigKey::Repository => self.repository.clone(),
            ConfigKey::Branch => self.branch.clone(),
            ConfigKey::CodeDir => self.code_dir.clone(),
            ConfigKey::OsegCodeDir => self.oseg_code_dir.clone(),
            ConfigKey::Port => self.port_base.to_string(),
            ConfigKey::Ccache => self.ccache.to_string(),
            ConfigKey::Zookeeper => self.zookeeper.clone(),
            ConfigKey::ZookeeperAddr => self.zookeeper_addr.clone(),
            ConfigKey::CraqNodes => format_craq_nodes(&self.craq_nodes),
            ConfigKey::Plugins => self.plugins.core.join(","),
            ConfigKey::SpacePlugins => self.plugins.space.join(","),
            ConfigKey::CsegPlugins => self.plugins.cseg.join(","),
            ConfigKey::SimohPlugins => self.plugins.simoh.join(","),
            ConfigKey::AnalysisPlugins => self.plugins.analysis.join(","),
        };
        Some(value)
    }
}
