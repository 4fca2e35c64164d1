use crate::dump::ParsedDump;
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use std::collections::HashMap;

/// A directed graph of the label transitions learned by a model.
///
/// Nodes are labels, edges carry transition weights. Labels that take part in
/// no transition still get a node, so isolated labels stay visible.
pub struct TransitionGraph {
    pub graph: StableGraph<String, f64>,

    /// Label name -> node, for O(1) lookups while linking edges
    pub label_index: HashMap<String, NodeIndex>,
}

impl TransitionGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            label_index: HashMap::new(),
        }
    }

    /// Adds a label node, returning the existing node if the label is known.
    pub fn add_label(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.label_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.label_index.insert(label.to_string(), idx);
        idx
    }

    pub fn build_from_dump(dump: &ParsedDump) -> Self {
        let mut graph = Self::new();

        for (label, _) in dump.labels_by_id() {
            graph.add_label(label);
        }

        for ((from, to), &weight) in &dump.transitions {
            let from_idx = graph.add_label(from);
            let to_idx = graph.add_label(to);
            graph.graph.add_edge(from_idx, to_idx, weight);
        }

        graph
    }

    /// Outgoing transitions of a label with their weights
    pub fn outgoing(&self, label: &str) -> Vec<(&str, f64)> {
        let Some(&node_idx) = self.label_index.get(label) else {
            return Vec::new();
        };
        let mut edges: Vec<(&str, f64)> = self
            .graph
            .edges_directed(node_idx, Direction::Outgoing)
            .filter_map(|edge| {
                self.graph
                    .node_weight(edge.target())
                    .map(|to| (to.as_str(), *edge.weight()))
            })
            .collect();
        edges.sort_by(|a, b| a.0.cmp(b.0));
        edges
    }

    /// Export to DOT format for Graphviz
    pub fn to_dot(&self) -> String {
        let mut dot = "digraph Transitions {\n".to_string();
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=ellipse];\n\n");

        let mut nodes: Vec<&String> = self
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect();
        nodes.sort();
        for label in nodes {
            dot.push_str(&format!("  \"{}\";\n", escape(label)));
        }

        dot.push('\n');

        let mut edges: Vec<(&str, &str, f64)> = self
            .graph
            .edge_indices()
            .filter_map(|edge_idx| {
                let (from_idx, to_idx) = self.graph.edge_endpoints(edge_idx)?;
                Some((
                    self.graph.node_weight(from_idx)?.as_str(),
                    self.graph.node_weight(to_idx)?.as_str(),
                    *self.graph.edge_weight(edge_idx)?,
                ))
            })
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        for (from, to, weight) in edges {
            let color = if weight >= 0.0 { "darkgreen" } else { "red" };
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{:.3}\", color=\"{}\"];\n",
                escape(from),
                escape(to),
                weight,
                color
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        let mut strongest: Option<(String, String, f64)> = None;
        let mut weakest: Option<(String, String, f64)> = None;
        let mut self_loops = 0;

        for edge_idx in self.graph.edge_indices() {
            let Some((from_idx, to_idx)) = self.graph.edge_endpoints(edge_idx) else {
                continue;
            };
            if from_idx == to_idx {
                self_loops += 1;
            }
            let (Some(from), Some(to), Some(&weight)) = (
                self.graph.node_weight(from_idx),
                self.graph.node_weight(to_idx),
                self.graph.edge_weight(edge_idx),
            ) else {
                continue;
            };
            if strongest.as_ref().is_none_or(|s| weight > s.2) {
                strongest = Some((from.clone(), to.clone(), weight));
            }
            if weakest.as_ref().is_none_or(|w| weight < w.2) {
                weakest = Some((from.clone(), to.clone(), weight));
            }
        }

        GraphStats {
            total_labels: self.graph.node_count(),
            total_transitions: self.graph.edge_count(),
            self_loops,
            strongest,
            weakest,
        }
    }
}

impl Default for TransitionGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub total_labels: usize,
    pub total_transitions: usize,
    pub self_loops: usize,
    pub strongest: Option<(String, String, f64)>,
    pub weakest: Option<(String, String, f64)>,
}
