//! Slash-delimited path handling and name-based resolution.
//!
//! Resolution is shared by the live tree and by the diff engine (which
//! resolves paths against a baseline copy), so it is exposed here as free
//! functions over a root [`Node`].

use crate::node::Node;

/// Separator between node names in a path.
pub const SEPARATOR: char = '/';

/// Non-empty segments of `path`, in order.
pub fn segments(path: &str) -> impl Iterator<Item = &str> + '_ {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Segments to walk below `root`: a leading segment equal to the root's own
/// name identifies the root itself and is dropped.
fn walk_segments<'p>(root: &Node, path: &'p str) -> impl Iterator<Item = &'p str> {
    let mut parts = segments(path).peekable();
    if parts.peek() == Some(&root.name()) {
        parts.next();
    }
    parts
}

/// Resolve `path` starting at `root`.
///
/// Empty segments are ignored. A leading segment equal to the root's name is
/// skipped; every following segment must match a child name exactly
/// (case-sensitive). Returns `None` on the first miss or when a segment
/// would descend into a file.
pub fn resolve<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let mut node = root;
    for part in walk_segments(root, path) {
        node = node.as_folder()?.child(part)?;
    }
    Some(node)
}

/// Mutable twin of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Node, path: &str) -> Option<&'a mut Node> {
    let parts: Vec<&str> = walk_segments(root, path).collect();
    let mut node = root;
    for part in parts {
        node = node.as_folder_mut()?.child_mut(part)?;
    }
    Some(node)
}

/// Split `path` into its parent path and leaf name.
///
/// Returns `None` when the path has no segments.
pub fn split_parent(path: &str) -> Option<(String, &str)> {
    let mut parts: Vec<&str> = segments(path).collect();
    let leaf = parts.pop()?;
    Some((parts.join("/"), leaf))
}

/// Append a child name to a parent path.
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches(SEPARATOR);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FolderNode, ROOT_NAME};
    use folio_types::BlobRef;

    fn sample() -> Node {
        let mut work = FolderNode::new("work").unwrap();
        work.add_child(Node::file("abc.pdf", BlobRef::new("b1").unwrap()).unwrap())
            .unwrap();
        let mut user = FolderNode::new("talib").unwrap();
        user.add_child(Node::Folder(work)).unwrap();

        let mut root = Node::root();
        root.as_folder_mut().unwrap().add_child(Node::Folder(user)).unwrap();
        root
    }

    #[test]
    fn segments_skip_empty_parts() {
        let parts: Vec<&str> = segments("//root//a/b/").collect();
        assert_eq!(parts, vec!["root", "a", "b"]);
    }

    #[test]
    fn empty_path_and_root_name_resolve_to_root() {
        let root = sample();
        assert!(std::ptr::eq(resolve(&root, "").unwrap(), &root));
        assert!(std::ptr::eq(resolve(&root, ROOT_NAME).unwrap(), &root));
        assert!(std::ptr::eq(resolve(&root, "/root/").unwrap(), &root));
    }

    #[test]
    fn leading_root_name_is_optional() {
        let root = sample();
        let with = resolve(&root, "root/talib/work/abc.pdf").unwrap();
        let without = resolve(&root, "talib/work/abc.pdf").unwrap();
        assert!(std::ptr::eq(with, without));
        assert_eq!(with.name(), "abc.pdf");
    }

    #[test]
    fn resolution_is_case_sensitive() {
        let root = sample();
        assert!(resolve(&root, "root/Talib").is_none());
    }

    #[test]
    fn cannot_descend_into_file() {
        let root = sample();
        assert!(resolve(&root, "root/talib/work/abc.pdf/more").is_none());
    }

    #[test]
    fn only_leading_segment_is_treated_as_root() {
        let mut root = Node::root();
        root.as_folder_mut()
            .unwrap()
            .add_child(Node::folder(ROOT_NAME).unwrap())
            .unwrap();

        let inner = resolve(&root, "root/root").unwrap();
        assert!(!std::ptr::eq(inner, &root));
        assert!(resolve(&root, "root/root/root").is_none());
    }

    #[test]
    fn resolve_mut_reaches_same_node() {
        let mut root = sample();
        let node = resolve_mut(&mut root, "root/talib/work").unwrap();
        assert_eq!(node.name(), "work");
        assert!(resolve_mut(&mut root, "root/nobody").is_none());
    }

    #[test]
    fn split_parent_cases() {
        assert_eq!(split_parent("root/a/b.txt"), Some(("root/a".to_string(), "b.txt")));
        assert_eq!(split_parent("b.txt"), Some((String::new(), "b.txt")));
        assert_eq!(split_parent("/"), None);
        assert_eq!(split_parent(""), None);
    }

    #[test]
    fn join_cases() {
        assert_eq!(join("root", "a"), "root/a");
        assert_eq!(join("root/", "a"), "root/a");
        assert_eq!(join("", "a"), "a");
    }
}
