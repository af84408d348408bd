//! cluster-planner — balanced deployment lists across cluster nodes.
//!
//! Given the [`NodeSpec`](cluster_core::NodeSpec)s from a cluster config and
//! a target size, produces an ordered list that favors nodes with larger
//! reuse counts in proportion to those counts.
//!
//! # Components
//!
//! - **`planner`** — capacity buckets and the balanced round-robin order
//! - **`ext`** — plan-and-cache on a `ClusterConfig`

pub mod error;
pub mod ext;
pub mod planner;

pub use error::{PlannerError, PlannerResult};
pub use ext::PlanDeployment;
pub use planner::{CapacityBuckets, generate_deployment, usage_counts};
