//! Planning directly against a loaded [`ClusterConfig`].

use cluster_core::{ClusterConfig, NodeSpec};

use crate::error::PlannerResult;
use crate::planner;

/// Generate a plan from a config's nodes and cache it on the config.
pub trait PlanDeployment {
    /// On success the previous plan is replaced; on error it is left as is.
    fn generate_deployment(&mut self, count: usize, repeat: bool) -> PlannerResult<&[NodeSpec]>;
}

impl PlanDeployment for ClusterConfig {
    fn generate_deployment(&mut self, count: usize, repeat: bool) -> PlannerResult<&[NodeSpec]> {
        self.deploy_nodes = planner::generate_deployment(&self.nodes, count, repeat)?;
        Ok(&self.deploy_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerError;

    #[test]
    fn plan_is_cached_and_overwritten() {
        let mut config = ClusterConfig::default();
        config
            .parse_str("node = u@a\nnode = u@b:2\n")
            .unwrap();

        assert_eq!(config.generate_deployment(3, true).unwrap().len(), 3);
        assert_eq!(config.deploy_nodes.len(), 3);

        config.generate_deployment(1, true).unwrap();
        assert_eq!(config.deploy_nodes, vec![NodeSpec::new("u", "a", 1)]);
    }

    #[test]
    fn no_nodes_keeps_previous_plan() {
        let mut config = ClusterConfig::default();
        config.deploy_nodes = vec![NodeSpec::new("u", "old", 1)];

        assert_eq!(
            config.generate_deployment(2, true),
            Err(PlannerError::NoNodes)
        );
        assert_eq!(config.deploy_nodes.len(), 1);
    }
}
