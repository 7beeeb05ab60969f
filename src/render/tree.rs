// src/render/tree.rs
// =============================================================================
// Draws a flat list of file paths as an indented directory tree:
//
//   ["a/b.txt", "a/c.txt", "d.txt"]
//
//   ├─ a
//   │  ├─ b.txt
//   │  └─ c.txt
//   └─ d.txt
//
// Paths are first inserted into a `FileTree` (a trie keyed by path segment),
// then the trie is walked depth-first. Children live in a BTreeMap, so the
// output is sorted and does not depend on the order of the input paths.
// =============================================================================

use std::collections::BTreeMap;

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const PIPE_INDENT: &str = "│  ";
const BLANK_INDENT: &str = "   ";

// One node of the tree. The root node has no name of its own; every other
// node is named by the key under which its parent stores it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileTree {
    children: BTreeMap<String, FileTree>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds one slash-delimited path, creating intermediate nodes as needed
    //
    // Empty segments ("a//b", trailing "/") are skipped so they never show
    // up as blank lines
    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.entry(segment.to_string()).or_default();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    // Number of nodes below this one (directories and files)
    pub fn node_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.node_count())
            .sum()
    }

    // Renders the subtree below this node, one line per node
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.node_count());
        self.render_into("", &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, prefix: &str, lines: &mut Vec<String>) {
        let last_index = self.children.len().saturating_sub(1);

        for (index, (name, child)) in self.children.iter().enumerate() {
            let is_last = index == last_index;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, name));

            if !child.is_empty() {
                let extension = if is_last { BLANK_INDENT } else { PIPE_INDENT };
                child.render_into(&format!("{}{}", prefix, extension), lines);
            }
        }
    }
}

// Renders at most `limit` of the given paths as a tree
//
// Paths past the limit are ignored here; reporting how many were left out
// is the caller's job
pub fn render_tree<S: AsRef<str>>(paths: &[S], limit: usize) -> String {
    let mut tree = FileTree::new();
    for path in paths.iter().take(limit) {
        tree.insert(path.as_ref());
    }
    tree.render()
}
