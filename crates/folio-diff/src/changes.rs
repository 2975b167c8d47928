//! Added/removed path summaries between two trees.

use std::collections::HashSet;

use folio_tree::{walk, Node};

/// Paths present in only one of the two trees.
///
/// Both lists are in the pre-order of the tree they come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangesSummary {
    /// Paths in the live tree but not the baseline.
    pub added: Vec<String>,
    /// Paths in the baseline but not the live tree.
    pub removed: Vec<String>,
}

impl ChangesSummary {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Full path of every node under `root` (inclusive), pre-order.
pub fn collect_paths(root: &Node) -> Vec<String> {
    let mut paths = Vec::new();
    walk(root, |path, _node| paths.push(path.to_string()));
    paths
}

/// Summarize which paths were added to or removed from `baseline`.
///
/// With no baseline every live path is added. A path that exists on both
/// sides is unchanged regardless of kind or content.
pub fn changes_summary(live: &Node, baseline: Option<&Node>) -> ChangesSummary {
    let live_paths = collect_paths(live);
    let base_paths = baseline.map(collect_paths).unwrap_or_default();

    let live_set: HashSet<&str> = live_paths.iter().map(String::as_str).collect();
    let base_set: HashSet<&str> = base_paths.iter().map(String::as_str).collect();

    let added = live_paths
        .iter()
        .filter(|p| !base_set.contains(p.as_str()))
        .cloned()
        .collect();
    let removed = base_paths
        .iter()
        .filter(|p| !live_set.contains(p.as_str()))
        .cloned()
        .collect();

    ChangesSummary { added, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_tree::NamespaceTree;
    use folio_types::BlobRef;

    fn file(name: &str) -> Node {
        Node::file(name, BlobRef::new("blob").unwrap()).unwrap()
    }

    #[test]
    fn collect_paths_is_pre_order() {
        let mut tree = NamespaceTree::new();
        tree.insert("root", Node::folder("a").unwrap());
        tree.insert("root/a", file("x"));
        tree.insert("root", file("b"));
        assert_eq!(
            collect_paths(tree.root()),
            vec!["root", "root/a", "root/a/x", "root/b"]
        );
    }

    #[test]
    fn sibling_swap_is_one_add_one_remove() {
        let mut base = NamespaceTree::new();
        base.insert("root", file("a"));
        base.insert("root", file("b"));

        let mut live = NamespaceTree::new();
        live.insert("root", file("a"));
        live.insert("root", file("c"));

        let summary = changes_summary(live.root(), Some(base.root()));
        assert_eq!(summary.added, vec!["root/c"]);
        assert_eq!(summary.removed, vec!["root/b"]);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn identical_trees_have_no_changes() {
        let mut tree = NamespaceTree::new();
        tree.insert("root", Node::folder("docs").unwrap());
        tree.insert("root/docs", file("a.pdf"));
        let copy = tree.root().clone();

        let summary = changes_summary(tree.root(), Some(&copy));
        assert!(summary.is_empty());
        assert_eq!(summary.len(), 0);
    }

    #[test]
    fn no_baseline_adds_everything() {
        let mut live = NamespaceTree::new();
        live.insert("root", file("a"));
        let summary = changes_summary(live.root(), None);
        assert_eq!(summary.added, vec!["root", "root/a"]);
        assert!(summary.removed.is_empty());
    }

    #[test]
    fn removed_subtree_lists_every_descendant() {
        let mut base = NamespaceTree::new();
        base.insert("root", Node::folder("old").unwrap());
        base.insert("root/old", file("one"));
        base.insert("root/old", file("two"));

        let live = NamespaceTree::new();
        let summary = changes_summary(live.root(), Some(base.root()));
        assert!(summary.added.is_empty());
        assert_eq!(
            summary.removed,
            vec!["root/old", "root/old/one", "root/old/two"]
        );
    }

    #[test]
    fn kind_change_at_same_path_is_unchanged() {
        let mut base = NamespaceTree::new();
        base.insert("root", file("thing"));
        let mut live = NamespaceTree::new();
        live.insert("root", Node::folder("thing").unwrap());

        assert!(changes_summary(live.root(), Some(base.root())).is_empty());
    }
}
