//! Hierarchical category selection with derived tri-state parents.
//!
//! Only leaf names are ever stored in a selection. Parent state is computed on
//! read from the selection and the tree, never cached on the node.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CategoryNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: vec![] }
    }

    pub fn parent(name: impl Into<String>, children: Vec<CategoryNode>) -> Self {
        Self { name: name.into(), children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of all leaves below this node, in tree order.
    /// A node without children has no descendant leaves.
    pub fn descendant_leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        for child in &self.children {
            if child.is_leaf() {
                leaves.push(child.name.as_str());
            } else {
                leaves.extend(child.descendant_leaves());
            }
        }
        leaves
    }
}

/// Tri-state of `node` given the selected leaves. A leaf reports its own
/// membership; a parent without leaves is always unchecked.
pub fn compute_parent_state(node: &CategoryNode, selected: &BTreeSet<String>) -> SelectionState {
    if node.is_leaf() {
        return if selected.contains(&node.name) { SelectionState::Checked } else { SelectionState::Unchecked };
    }
    let leaves = node.descendant_leaves();
    let picked = leaves.iter().filter(|leaf| selected.contains(**leaf)).count();
    match picked {
        0 => SelectionState::Unchecked,
        n if n == leaves.len() => SelectionState::Checked,
        _ => SelectionState::Indeterminate,
    }
}

/// Selects every descendant leaf unless all of them are already selected, in
/// which case all of them are deselected. A node without children is a no-op.
pub fn toggle_parent(node: &CategoryNode, selected: &BTreeSet<String>) -> BTreeSet<String> {
    let leaves = node.descendant_leaves();
    if leaves.is_empty() {
        return selected.clone();
    }
    let mut next = selected.clone();
    if compute_parent_state(node, selected) == SelectionState::Checked {
        for leaf in leaves {
            next.remove(leaf);
        }
    } else {
        next.extend(leaves.into_iter().map(str::to_string));
    }
    next
}

pub fn toggle_leaf(name: &str, selected: &BTreeSet<String>) -> BTreeSet<String> {
    let mut next = selected.clone();
    if !next.remove(name) {
        next.insert(name.to_string());
    }
    next
}

/// The full category tree supplied by the taxonomy collaborator. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    pub roots: Vec<CategoryNode>,
}

impl CategoryTaxonomy {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn find(&self, name: &str) -> Option<&CategoryNode> {
        fn walk<'a>(nodes: &'a [CategoryNode], name: &str) -> Option<&'a CategoryNode> {
            for node in nodes {
                if node.name == name {
                    return Some(node);
                }
                if let Some(found) = walk(&node.children, name) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, name)
    }

    /// Keeps only names that are leaves of this taxonomy.
    pub fn retain_leaves(&self, selected: &BTreeSet<String>) -> BTreeSet<String> {
        selected
            .iter()
            .filter(|name| self.find(name).is_some_and(CategoryNode::is_leaf))
            .cloned()
            .collect()
    }
}

/// Which parents are unfolded in the category panel. View-local, never
/// part of the query state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    pub fn toggle(&mut self, name: &str) {
        if !self.expanded.remove(name) {
            self.expanded.insert(name.to_string());
        }
    }

    /// A parent whose leaves were just all selected is unfolded so the
    /// selection is visible.
    pub fn after_parent_toggle(&mut self, node: &CategoryNode, selected_after: &BTreeSet<String>) {
        if compute_parent_state(node, selected_after) == SelectionState::Checked {
            self.expanded.insert(node.name.clone());
        }
    }
}

/// Label for the collapsed category picker, with Russian plural forms.
pub fn selection_summary(count: usize) -> String {
    if count == 0 {
        return "Выберите категории".to_string();
    }
    let (mod10, mod100) = (count % 10, count % 100);
    if mod10 == 1 && mod100 != 11 {
        format!("Выбрана {count} категория")
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        format!("Выбраны {count} категории")
    } else {
        format!("Выбраны {count} категорий")
    }
}
