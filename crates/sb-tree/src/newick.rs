//! Newick writers.
//!
//! The annotated form tags every segment with its state:
//!
//! ```text
//! ((a[&type="active"]:0.3)[&type="dormant"]:0.2,b[&type="active"]:0.5)4[&type="active"]:0;
//! ```
//!
//! Here leaf `a` spent 0.3 active, switched to dormant and spent 0.2 more
//! before coalescing.  A lineage with `k` changes is wrapped in `k`
//! unlabelled single-child groups, innermost first, each tagged with the
//! state it switched into and carrying the length until the next change (or
//! the parent).  The segment lengths of one lineage sum to its branch length.
//!
//! The collapsed form drops the single-child groups and the tags.

use std::fmt::Write;

use sb_core::NodeId;

use crate::{SeedbankTree, TreeError, TreeResult};

/// Annotated Newick for the whole tree, terminated by `;`.
///
/// # Errors
///
/// [`TreeError::NoRoot`] if the root has not been set.
pub fn to_newick(tree: &SeedbankTree) -> TreeResult<String> {
    let root = tree.root().ok_or(TreeError::NoRoot)?;
    let mut out = subtree_to_newick(tree, root);
    out.push(';');
    Ok(out)
}

/// Annotated Newick for the subtree under `id`, without the trailing `;`.
pub fn subtree_to_newick(tree: &SeedbankTree, id: NodeId) -> String {
    let mut out = String::new();
    write_annotated(tree, id, &mut out);
    out
}

/// Topology and branch lengths only: `label:length`, no state segments.
///
/// # Errors
///
/// [`TreeError::NoRoot`] if the root has not been set.
pub fn to_collapsed_newick(tree: &SeedbankTree) -> TreeResult<String> {
    let root = tree.root().ok_or(TreeError::NoRoot)?;
    let mut out = String::new();
    write_collapsed(tree, root, &mut out);
    out.push(';');
    Ok(out)
}

fn write_annotated(tree: &SeedbankTree, id: NodeId, out: &mut String) {
    let node = &tree[id];
    // Root: a single zero-length segment.
    let top = tree.parent_height(id).unwrap_or(node.height);
    let segments = node.segments(top);

    for _ in 1..segments.len() {
        out.push('(');
    }
    write_children(tree, node.children, out, write_annotated);
    push_label(&node.label, out);

    for (i, (state, start, end)) in segments.iter().enumerate() {
        if i > 0 {
            out.push(')');
        }
        let _ = write!(out, "[&type=\"{state}\"]:{}", end - start);
    }
}

fn write_collapsed(tree: &SeedbankTree, id: NodeId, out: &mut String) {
    let node = &tree[id];
    write_children(tree, node.children, out, write_collapsed);
    push_label(&node.label, out);
    let _ = write!(out, ":{}", tree.branch_length(id));
}

fn write_children(
    tree:     &SeedbankTree,
    children: Option<(NodeId, NodeId)>,
    out:      &mut String,
    write:    fn(&SeedbankTree, NodeId, &mut String),
) {
    if let Some((l, r)) = children {
        out.push('(');
        write(tree, l, out);
        out.push(',');
        write(tree, r, out);
        out.push(')');
    }
}

/// Bare label if safe, otherwise single-quoted with `'` doubled.
fn push_label(label: &str, out: &mut String) {
    if label.chars().all(is_plain_label_char) {
        out.push_str(label);
    } else {
        out.push('\'');
        out.push_str(&label.replace('\'', "''"));
        out.push('\'');
    }
}

pub(crate) fn is_plain_label_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '[' | ']' | '\'' | ':' | ';' | ',')
}
