//! Collision-safe sibling naming.
//!
//! When a name is already taken in a folder the new node is renamed rather
//! than overwriting the existing sibling: `a.txt` becomes `a_copy.txt`, then
//! `a_copy2.txt`, `a_copy3.txt`, and so on. File names keep their extension
//! (everything from the last `.`); folder names are suffixed as a whole.

use std::collections::HashSet;

use crate::node::NodeKind;

const COPY_SUFFIX: &str = "_copy";

/// Pick the first name not present in `siblings`.
///
/// Returns `name` unchanged when it is free. Otherwise tries `_copy`,
/// `_copy2`, `_copy3`, ... in order. With `n` siblings at most `n + 1`
/// candidates can be taken, so the search always ends within `n + 2` tries.
pub fn unique_name<'a, I>(name: &str, kind: NodeKind, siblings: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = siblings.into_iter().collect();
    if !taken.contains(name) {
        return name.to_string();
    }

    let (base, ext) = match kind {
        NodeKind::File => split_extension(name),
        NodeKind::Folder => (name, ""),
    };

    // Candidate n (n >= 1) is base + "_copy" + (n > 1 ? n : "") + ext.
    (1..=taken.len() + 1)
        .map(|n| candidate(base, ext, n))
        .find(|c| !taken.contains(c.as_str()))
        .unwrap_or_else(|| candidate(base, ext, taken.len() + 2))
}

fn candidate(base: &str, ext: &str, n: usize) -> String {
    if n == 1 {
        format!("{base}{COPY_SUFFIX}{ext}")
    } else {
        format!("{base}{COPY_SUFFIX}{n}{ext}")
    }
}

/// Split at the last `.`; the extension keeps its dot.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}
