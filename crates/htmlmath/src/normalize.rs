//! Rewrite passes that repair the artifacts of recognition.
//!
//! Recognition works one element at a time, so it leaves rows inside rows, brackets as loose
//! tokens and scripts without a base. The passes below fix these up, in the order given by
//! [`normalize`].

use std::mem;

use crate::tree::{Kind, Node, Payload};

const OPEN_FENCES: [char; 3] = ['(', '[', '{'];
const CLOSE_FENCES: [char; 3] = [')', ']', '}'];

/// Run all passes, each over the whole tree, in order.
///
/// Fences and scripts are repaired again for as long as [`fix_sub_sup`] changes something,
/// since moving a base or splicing a demoted script can bring brackets together. The result
/// is left unchanged by another call.
pub fn normalize(node: &mut Node) {
    remove_nested_rows(node);
    loop {
        match_fences(node);
        if !fix_sub_sup(node) {
            break;
        }
    }
}

/// Splice the children of every row that sits directly in another row into its parent.
pub fn remove_nested_rows(node: &mut Node) {
    if node.kind == Kind::Row {
        while has_row_child(node) {
            splice_row_children(node);
        }
    }
    for child in &mut node.children {
        remove_nested_rows(child);
    }
}

#[inline]
fn has_row_child(node: &Node) -> bool {
    node.children.iter().any(|child| child.kind == Kind::Row)
}

/// Replace each row child by its own children, one level deep.
fn splice_row_children(node: &mut Node) {
    let mut flat = Vec::with_capacity(node.children.len());
    for child in mem::take(&mut node.children) {
        if child.kind == Kind::Row {
            flat.extend(child.children);
        } else {
            flat.push(child);
        }
    }
    node.children = flat;
}

/// Pair up bracket tokens among siblings and wrap what they enclose in a fence.
///
/// The first closing bracket is matched with the nearest opening bracket before it, of any
/// type. Brackets without a partner stay as they are.
pub fn match_fences(node: &mut Node) {
    while let Some(pair) = find_fence_pair(&node.children) {
        let mut run: Vec<Node> = node.children.drain(pair.open..=pair.close).collect();
        run.pop();
        run.remove(0);
        node.children
            .insert(pair.open, Node::fence(pair.open_char, pair.close_char, run));
    }
    for child in &mut node.children {
        match_fences(child);
    }
}

struct FencePair {
    open: usize,
    close: usize,
    open_char: char,
    close_char: char,
}

/// The first closing bracket and the last opening bracket before it.
fn find_fence_pair(children: &[Node]) -> Option<FencePair> {
    let mut last_open = None;
    for (i, child) in children.iter().enumerate() {
        let Some(c) = child.as_single_char() else {
            continue;
        };
        if OPEN_FENCES.contains(&c) {
            last_open = Some((i, c));
        } else if CLOSE_FENCES.contains(&c) {
            if let Some((open, open_char)) = last_open {
                return Some(FencePair {
                    open,
                    close: i,
                    open_char,
                    close_char: c,
                });
            }
        }
    }
    None
}

/// Give every script its base, and demote scripts that cannot get one to plain rows.
///
/// A script that is missing its base takes the sibling right before it. A script that is the
/// first child has nothing to take and becomes a row, which is spliced into its parent if that
/// is a row too. Returns whether anything was changed.
pub fn fix_sub_sup(node: &mut Node) -> bool {
    let mut changed = false;
    if let Some(arity) = node.complete_script_arity() {
        if node.children.len() < arity {
            log::trace!("{} without a base demoted to row", <&str>::from(node.kind));
            node.kind = Kind::Row;
            node.payload = Payload::None;
            changed = true;
        }
    } else {
        let mut i = 1;
        while i < node.children.len() {
            let child = &node.children[i];
            let needs_base = child
                .complete_script_arity()
                .is_some_and(|arity| child.children.len() + 1 == arity);
            if needs_base {
                // The script moves into the base's slot; `i` then points past it.
                let base = node.children.remove(i - 1);
                node.children[i - 1].children.insert(0, base);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    for child in &mut node.children {
        changed |= fix_sub_sup(child);
    }
    // Children are done first, so their rows are already flat.
    if node.kind == Kind::Row && has_row_child(node) {
        splice_row_children(node);
    }
    changed
}
