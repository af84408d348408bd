//! Cluster node descriptors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::error::FormatError;

/// One deployable cluster node, parsed from a `user@host[:count]` literal.
///
/// `reuse_count` is how many deployment slots this node may fill in one
/// balanced round. It is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeSpec {
    user: String,
    host: String,
    reuse_count: u32,
}

impl NodeSpec {
    pub fn new(user: impl Into<String>, host: impl Into<String>, reuse_count: u32) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            reuse_count: reuse_count.max(1),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn reuse_count(&self) -> u32 {
        self.reuse_count
    }

    /// `user@host`, the form handed to ssh and rsync.
    pub fn login(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

impl FromStr for NodeSpec {
    type Err = FormatError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (user, rest) = spec
            .split_once('@')
            .ok_or_else(|| FormatError::MissingAt(spec.to_string()))?;

        let (host, reuse_count) = match rest.split_once(':') {
            Some((host, count)) => (host, parse_reuse_count(spec, count)),
            None => (rest, 1),
        };

        Ok(Self::new(user, host, reuse_count))
    }
}

/// Malformed or zero counts fall back to 1.
fn parse_reuse_count(spec: &str, count: &str) -> u32 {
    match count.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            warn!(node = spec, count, "invalid reuse count, using 1");
            1
        }
    }
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.reuse_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_count() {
        let node: NodeSpec = "ewen@meru01:3".parse().unwrap();
        assert_eq!(node.user, "ewen");
        assert_eq!(node.host, "meru01");
        assert_eq!(node.reuse_count, 3);
    }

    #[test]
    fn parse_without_count_defaults_to_one() {
        let node: NodeSpec = "ewen@meru01".parse().unwrap();
        assert_eq!(node.host, "meru01");
        assert_eq!(node.reuse_count, 1);
    }

    #[test]
    fn missing_at_is_format_error() {
        let err = "meru01:3".parse::<NodeSpec>().unwrap_err();
        assert_eq!(err, FormatError::MissingAt("meru01:3".to_string()));
    }

    #[test]
    fn splits_on_first_separators_only() {
        let node: NodeSpec = "a@b@c:2:9".parse().unwrap();
        assert_eq!(node.user, "a");
        assert_eq!(node.host, "b@c");
        // "2:9" is not a number.
        assert_eq!(node.reuse_count, 1);
    }

    #[test]
    fn malformed_or_zero_count_defaults_to_one() {
        assert_eq!("u@h:abc".parse::<NodeSpec>().unwrap().reuse_count, 1);
        assert_eq!("u@h:0".parse::<NodeSpec>().unwrap().reuse_count, 1);
        assert_eq!("u@h:".parse::<NodeSpec>().unwrap().reuse_count, 1);
    }

    #[test]
    fn display_and_login() {
        let node = NodeSpec::new("u", "h", 2);
        assert_eq!(node.to_string(), "u@h:2");
        assert_eq!(node.login(), "u@h");
        assert_eq!(node.to_string().parse::<NodeSpec>().unwrap(), node);
    }

    #[test]
    fn new_clamps_zero_capacity() {
        assert_eq!(NodeSpec::new("u", "h", 0).reuse_count, 1);
    }
}
