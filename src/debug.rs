//! a debug tree/policy printer, kept separate from the hot traversal path.
//! grounded in the original source's `PrintTree`/`PrintPolicy` console
//! dump, reimplemented over a `petgraph` arena built by walking a
//! [`GameNode`] to a bounded depth.

use crate::mccfr::{Edge, GameNode, Player, Profile};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

pub struct DebugTree {
    graph: DiGraph<String, Edge>,
    root: NodeIndex,
}

impl DebugTree {
    /// builds a small tree rooted at `node`, expanding policy-bearing nodes
    /// up to `max_depth` edges deep. chance nodes are expanded through
    /// their most probable child only, to keep the dump readable.
    pub fn build(node: &GameNode, profile: &Profile, max_depth: usize) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(label(node, profile));
        let mut tree = Self { graph, root };
        tree.expand(node, profile, tree.root, max_depth);
        tree
    }

    fn expand(&mut self, node: &GameNode, profile: &Profile, parent: NodeIndex, depth: usize) {
        if depth == 0 || node.is_terminal() {
            return;
        }
        match node.player() {
            Player::Chance => {
                let children = node.chance_children();
                if let Some((child, _)) = children
                    .into_iter()
                    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                {
                    let index = self.graph.add_node(label(&child, profile));
                    self.graph.add_edge(parent, index, Edge::Opponent(b'?'));
                    self.expand(&child, profile, index, depth - 1);
                }
            }
            _ => {
                for edge in node.policy_edges() {
                    let child = node.apply(edge);
                    let index = self.graph.add_node(label(&child, profile));
                    self.graph.add_edge(parent, index, edge);
                    self.expand(&child, profile, index, depth - 1);
                }
            }
        }
    }

    /// renders the tree as indented text, matching the original source's
    /// console-dump style more than a graphical layout.
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        self.print_node(self.root, 0, &mut out);
        out
    }

    fn print_node(&self, node: NodeIndex, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.graph[node]);
        out.push('\n');
        for child in self.graph.neighbors_directed(node, Direction::Outgoing) {
            self.print_node(child, depth + 1, out);
        }
    }
}

fn label(node: &GameNode, profile: &Profile) -> String {
    let history = String::from_utf8_lossy(node.history()).into_owned();
    match profile.average_strategy_at(node.history()) {
        Some(strategy) => format!("{history} {strategy:?}"),
        None => history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_prints_a_small_tree() {
        let root = GameNode::root(6);
        let profile = Profile::new();
        let tree = DebugTree::build(&root, &profile, 2);
        let text = tree.print_tree();
        assert!(!text.is_empty());
    }
}
