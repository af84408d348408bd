//! `cluster deploy` — generate a balanced deployment list.

use anyhow::{Context, Result};
use cluster_core::{ClusterConfig, NodeSpec};
use cluster_planner::{PlanDeployment, usage_counts};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct PlanReport {
    count: usize,
    repeat: bool,
    nodes: Vec<String>,
    usage: Vec<NodeUsage>,
}

#[derive(Debug, Serialize)]
struct NodeUsage {
    node: String,
    slots: usize,
}

pub fn deploy(mut config: ClusterConfig, count: usize, repeat: bool, format: &str) -> Result<()> {
    let plan = config
        .generate_deployment(count, repeat)
        .context("generating deployment")?;
    info!(count = plan.len(), "deployment plan ready");
    println!("{}", render(plan, repeat, format)?);
    Ok(())
}

pub fn render(plan: &[NodeSpec], repeat: bool, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(&report(plan, repeat))?),
        _ => Ok(format_plan(plan)),
    }
}

fn report(plan: &[NodeSpec], repeat: bool) -> PlanReport {
    PlanReport {
        count: plan.len(),
        repeat,
        nodes: plan.iter().map(NodeSpec::login).collect(),
        usage: usage_counts(plan)
            .into_iter()
            .map(|(node, slots)| NodeUsage {
                node: node.to_string(),
                slots,
            })
            .collect(),
    }
}

fn format_plan(plan: &[NodeSpec]) -> String {
    let mut out = format!("Deployment ({} slots):\n", plan.len());
    for (i, node) in plan.iter().enumerate() {
        out.push_str(&format!("  {:>3}. {}\n", i + 1, node.login()));
    }

    out.push_str("\nPer node:\n");
    for (node, slots) in usage_counts(plan) {
        out.push_str(&format!("  {:<30} x{slots}\n", node.to_string()));
    }
    out
}
