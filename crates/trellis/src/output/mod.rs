//! Output formatting for CLI commands.
//!
//! Human-readable text with color for terminals, pretty JSON for
//! programmatic use. Both forms print the same compiled graph; text mode
//! additionally warns when the link structure is cyclic.

use crate::error::Result;
use crate::graph::{CompiledGraph, GraphNode};
use colored::Colorize;

/// How command output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text with color.
    Text,

    /// Pretty-printed JSON.
    Json,
}

/// Print the compiled graph in the given mode.
pub fn print_graph(graph: &CompiledGraph, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => print_graph_json(graph),
        OutputMode::Text => {
            print_graph_text(graph);
            Ok(())
        }
    }
}

fn print_graph_json(graph: &CompiledGraph) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(graph)?);
    Ok(())
}

fn print_graph_text(graph: &CompiledGraph) {
    if graph.is_empty() {
        println!("Empty graph: no items discovered");
        return;
    }

    println!(
        "{} item(s), {} link(s)",
        graph.nodes.len(),
        graph.edges.len()
    );

    let mut nodes: Vec<&GraphNode> = graph.nodes.iter().collect();
    nodes.sort_by(|a, b| a.key.cmp(&b.key));
    for node in nodes {
        println!("  {}", format_node(node));
    }

    if !graph.edges.is_empty() {
        println!();
        let mut edges: Vec<_> = graph.edges.iter().collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        for edge in edges {
            println!(
                "  {} {} {}",
                edge.source.cyan(),
                format!("-[{}]->", edge.label).dimmed(),
                edge.target.cyan()
            );
        }
    }

    if graph.has_cycles() {
        println!();
        println!("{}", "warning: link structure contains a cycle".yellow());
    }
}

fn format_node(node: &GraphNode) -> String {
    let key = if node.root {
        node.key.bold().to_string()
    } else {
        node.key.cyan().to_string()
    };

    let mut line = key;
    if node.status.is_empty() {
        line.push_str(&format!(" {}", "(not fetched)".dimmed()));
    } else {
        line.push_str(&format!(" [{}]", node.status.dimmed()));
    }
    if node.flagged {
        line.push_str(&format!(" {}", "flagged".red()));
    }
    if node.root {
        line.push_str(&format!(" {}", "(root)".dimmed()));
    }
    line
}
