//! `cluster show` — print the parsed config.

use anyhow::Result;
use cluster_core::ClusterConfig;

pub fn show(config: &ClusterConfig, format: &str) -> Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

pub fn render(config: &ClusterConfig, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        _ => Ok(format_config(config)),
    }
}

fn format_config(config: &ClusterConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("Head node:      {}\n", config.headnode));
    if let Some(ts) = &config.timeserver {
        out.push_str(&format!("Time server:    {ts}\n"));
    }
    out.push_str(&format!("Repository:     {} ({})\n", config.repository, config.branch));
    out.push_str(&format!("Code directory: {}\n", config.code_dir));
    out.push_str(&format!("Base port:      {}\n", config.port_base));
    if let Some(unique) = config.unique {
        out.push_str(&format!("Unique tag:     {unique}\n"));
    }
    out.push_str(&format!("ccache:         {}\n", if config.ccache { "on" } else { "off" }));

    out.push_str(&format!("\nNodes ({}):\n", config.nodes.len()));
    for node in &config.nodes {
        out.push_str(&format!("  • {node}\n"));
    }

    if !config.craq_nodes.is_empty() {
        out.push_str("\nCRAQ nodes:\n");
        for craq in &config.craq_nodes {
            out.push_str(&format!("  • {craq}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClusterConfig {
        let mut config = ClusterConfig::default();
        config
            .parse_str("node = ewen@meru01:2\nnode = ewen@meru02\ncode_dir = sirikata\n")
            .unwrap();
        config
    }

    #[test]
    fn test_text_lists_nodes() {
        let out = render(&sample(), "text").unwrap();
        assert!(out.contains("Nodes (2):"));
        assert!(out.contains("ewen@meru01:2"));
        assert!(out.contains("ewen@meru02:1"));
        assert!(out.contains("Code directory: sirikata"));
        assert!(!out.contains("CRAQ"));
    }

    #[test]
    fn test_json_is_parseable() {
        let out = render(&sample(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["nodes"][0]["reuse_count"], 2);
        assert_eq!(value["port_base"], 6666);
    }
}
