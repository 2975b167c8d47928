//! Pre-order traversal with the full path threaded through the walk.

use crate::node::Node;
use crate::path::SEPARATOR;

/// Visit every node under `root` (inclusive) in pre-order.
///
/// The visitor receives each node's full slash-joined path from the root,
/// with the root's own name as the first segment. A folder is visited before
/// its children, and children in insertion order.
pub fn walk<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&str, &'a Node),
{
    let mut path = root.name().to_string();
    walk_inner(root, &mut path, &mut visit);
}

fn walk_inner<'a, F>(node: &'a Node, path: &mut String, visit: &mut F)
where
    F: FnMut(&str, &'a Node),
{
    visit(path, node);
    for child in node.children() {
        let saved = path.len();
        path.push(SEPARATOR);
        path.push_str(child.name());
        walk_inner(child, path, visit);
        path.truncate(saved);
    }
}
