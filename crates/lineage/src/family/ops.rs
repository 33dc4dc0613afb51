//! Whole-tree operations on a family document
//!
//! Every walk uses an explicit stack, so trees built in code may be deeper
//! than the layout would accept.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::PersonNode;
use crate::core::TreeError;

/// Find a person anywhere in the tree
pub fn find_person<'a>(root: &'a PersonNode, id: &str) -> Option<&'a PersonNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev().flatten());
    }
    None
}

/// Find a person anywhere in the tree for editing
pub fn find_person_mut<'a>(root: &'a mut PersonNode, id: &str) -> Option<&'a mut PersonNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter_mut().rev().flatten());
    }
    None
}

/// Detach a person (and everyone descending from them) from the tree
pub fn remove_person(root: &mut PersonNode, id: &str) -> Result<PersonNode, TreeError> {
    if root.id == id {
        return Err(TreeError::CannotRemoveRoot { id: id.to_string() });
    }

    fn take(root: &mut PersonNode, id: &str) -> Option<PersonNode> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let position = node
                .children
                .iter()
                .position(|c| matches!(c, Some(child) if child.id == id));
            if let Some(position) = position {
                return node.children.remove(position);
            }
            stack.extend(node.children.iter_mut().rev().flatten());
        }
        None
    }

    let removed = take(root, id).ok_or_else(|| TreeError::not_found(id))?;
    debug!(id, descendants = count_persons(&removed) - 1, "Removed person");
    Ok(removed)
}

/// Append a child under `parent_id`
///
/// Every id in the new subtree must be present and unused in the tree.
pub fn add_child(
    root: &mut PersonNode,
    parent_id: &str,
    child: PersonNode,
) -> Result<(), TreeError> {
    if !child.has_id() {
        return Err(TreeError::MissingId);
    }

    let existing = collect_ids(root);
    let mut incoming = vec![&child];
    while let Some(node) = incoming.pop() {
        if !node.has_id() {
            return Err(TreeError::MissingId);
        }
        if existing.contains(node.id.as_str()) {
            return Err(TreeError::DuplicateId {
                id: node.id.clone(),
            });
        }
        incoming.extend(node.children.iter().flatten());
    }

    let parent = find_person_mut(root, parent_id).ok_or_else(|| TreeError::not_found(parent_id))?;
    debug!(parent_id, child_id = %child.id, "Added child");
    parent.children.push(Some(child));
    Ok(())
}

/// Persons from the root down to `id`, both ends included
fn path_to<'a>(root: &'a PersonNode, id: &str) -> Option<Vec<&'a PersonNode>> {
    let mut path: Vec<&PersonNode> = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, level)) = stack.pop() {
        path.truncate(level);
        path.push(node);
        if node.id == id {
            return Some(path);
        }
        stack.extend(
            node.children
                .iter()
                .rev()
                .flatten()
                .filter(|child| child.has_id())
                .map(|child| (child, level + 1)),
        );
    }
    None
}

fn collect_ids(root: &PersonNode) -> HashSet<&str> {
    let mut ids = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.has_id() {
            ids.insert(node.id.as_str());
        }
        stack.extend(node.children.iter().flatten());
    }
    ids
}

fn count_persons(root: &PersonNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter().flatten());
    }
    count
}

/// Ids that occur more than once, in the order their repeats are met
pub fn duplicate_ids(root: &PersonNode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.has_id() && !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id) {
            duplicates.push(node.id.clone());
        }
        stack.extend(node.children.iter().rev().flatten());
    }
    duplicates
}

/// Counts describing a family document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Persons with an id
    pub persons: usize,
    pub spouses: usize,
    /// Number of generations below and including the root
    pub generations: usize,
    /// `null` children plus children without an id
    pub malformed: usize,
}

/// Count persons, spouses, generations and malformed entries
pub fn stats(root: &PersonNode) -> TreeStats {
    let mut stats = TreeStats::default();
    if !root.has_id() {
        stats.malformed = 1;
        return stats;
    }

    let mut stack = vec![(root, 0usize)];
    while let Some((node, level)) = stack.pop() {
        stats.persons += 1;
        stats.generations = stats.generations.max(level + 1);
        if node.has_spouse() {
            stats.spouses += 1;
        }
        for child in &node.children {
            match child {
                Some(child) if child.has_id() => stack.push((child, level + 1)),
                _ => stats.malformed += 1,
            }
        }
    }
    stats
}

/// The part of the tree around one person
///
/// Keeps the line of ancestors from the root down to the person, the
/// person's siblings (without their descendants) and everything that
/// descends from the person. Returns `None` when the id is not in the tree.
pub fn branch(root: &PersonNode, id: &str) -> Option<PersonNode> {
    let mut path = path_to(root, id)?;
    let target = path.pop()?;
    let mut built = target.clone();

    if let Some(parent) = path.pop() {
        let mut family = parent.without_children();
        family.children = parent
            .valid_children()
            .map(|child| {
                if std::ptr::eq(child, target) {
                    Some(built.clone())
                } else {
                    Some(child.without_children())
                }
            })
            .collect();
        built = family;
    }

    while let Some(ancestor) = path.pop() {
        let mut line = ancestor.without_children();
        line.children = vec![Some(built)];
        built = line;
    }

    Some(built)
}
