// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/tree.rs
//!
//! Static hotkey tree dispatcher
//!
//! A `HotkeyTree` is a nested mapping from keycodes to either another
//! mapping or a leaf holding one action or a list of actions. Dispatch walks
//! the tree one key at a time; the leaf reached by the last key provides
//! the handlers.
//!
//! # Validation
//! The shape of the tree is checked once, in `HotkeyTree::new`. After that
//! every branch is non-empty and every leaf has at least one action, so
//! dispatch never has to inspect node kinds beyond the tagged variants.
//!
//! # Example
//! ```toml
//! [hotkeys.LControl]
//! Escape = ["cancel", "notify"]
//!
//! [hotkeys.LAlt]
//! Backspace = "open-prompt"
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::action::{invoke, Action, HandlerList};
use crate::core::canonical::{canonicalize, SEPARATOR};
use crate::core::engine::{DispatchSource, Dispatcher};
use crate::core::error::DispatchError;
use crate::core::types::{KeySequence, Keycode};

/// Terminal value of a tree path
#[derive(Clone, Debug)]
pub enum Leaf {
    /// A single action
    Single(Action),
    /// Several actions, fired in list order
    List(HandlerList),
}

impl Leaf {
    /// Returns the handlers of this leaf as a list.
    pub fn handlers(&self) -> HandlerList {
        match self {
            Leaf::Single(action) => vec![action.clone()],
            Leaf::List(actions) => actions.clone(),
        }
    }
}

/// A node of the hotkey tree
#[derive(Clone, Debug)]
pub enum TreeNode {
    /// Nested mapping, one child per next key
    Branch(BTreeMap<Keycode, TreeNode>),
    /// End of a binding
    Leaf(Leaf),
}

impl TreeNode {
    /// Builds a branch from `(key, child)` pairs.
    pub fn branch(children: impl IntoIterator<Item = (Keycode, TreeNode)>) -> Self {
        TreeNode::Branch(children.into_iter().collect())
    }

    /// Builds a single-action leaf.
    pub fn action(action: Action) -> Self {
        TreeNode::Leaf(Leaf::Single(action))
    }

    /// Builds a list leaf.
    pub fn list(actions: HandlerList) -> Self {
        TreeNode::Leaf(Leaf::List(actions))
    }
}

/// Validated, read-only hotkey tree
#[derive(Clone, Debug)]
pub struct HotkeyTree {
    root: BTreeMap<Keycode, TreeNode>,
}

impl HotkeyTree {
    /// Validates `root` and wraps it as a tree.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedTreeNode` if:
    /// - the root is a leaf (a binding needs at least one key)
    /// - any branch, including the root, has no children
    /// - any list leaf is empty
    pub fn new(root: TreeNode) -> Result<Self, DispatchError> {
        let root = match root {
            TreeNode::Branch(children) => children,
            TreeNode::Leaf(_) => {
                return Err(malformed(&[], "root must be a key mapping, not an action"));
            }
        };

        let mut path = Vec::new();
        validate_branch(&root, &mut path)?;

        Ok(Self { root })
    }

    /// Builds a tree from a parsed configuration table.
    ///
    /// Table keys are key names; values are a nested table, an action name,
    /// or an array of action names. Action names are turned into actions by
    /// `resolver`.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedTreeNode` naming the offending path
    /// for unknown key names, unknown action names, and values of any other
    /// kind (numbers, booleans, nested arrays...).
    pub fn from_table<R>(table: &toml::Table, resolver: R) -> Result<Self, DispatchError>
    where
        R: Fn(&str) -> Option<Action>,
    {
        let mut path = Vec::new();
        let root = branch_from_table(table, &mut path, &resolver)?;
        Self::new(root)
    }

    /// Finds the handlers bound to `sequence`.
    ///
    /// # Errors
    ///
    /// * `EmptySequence` - `sequence` has no keys
    /// * `UnmatchedSequence` - the walk leaves the tree, reaches a leaf
    ///   before the last key, or stops on a branch
    pub fn lookup(&self, sequence: &KeySequence) -> Result<HandlerList, DispatchError> {
        if sequence.is_empty() {
            return Err(DispatchError::EmptySequence);
        }

        let unmatched = || DispatchError::UnmatchedSequence(sequence.clone());
        let last = sequence.len() - 1;
        let mut branch = &self.root;

        for (depth, key) in sequence.iter().enumerate() {
            match branch.get(key) {
                Some(TreeNode::Branch(children)) => branch = children,
                Some(TreeNode::Leaf(leaf)) if depth == last => return Ok(leaf.handlers()),
                Some(TreeNode::Leaf(_)) | None => return Err(unmatched()),
            }
        }

        // Sequence exhausted on an inner mapping
        Err(unmatched())
    }

    /// Looks up `sequence` and runs its handlers in order.
    ///
    /// Returns the number of handlers run.
    pub fn dispatch(&self, sequence: &KeySequence) -> Result<usize, DispatchError> {
        let handlers = self.lookup(sequence)?;
        let target = canonicalize(sequence)?;
        invoke(&target, &handlers)
    }

    /// Lists every binding path with its handlers, in key order.
    pub fn bindings(&self) -> Vec<(KeySequence, HandlerList)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_bindings(&self.root, &mut path, &mut out);
        out
    }

    /// Number of bindings (leaves) in the tree
    pub fn len(&self) -> usize {
        self.bindings().len()
    }

    /// Always false for a validated tree; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl Dispatcher for HotkeyTree {
    fn source(&self) -> DispatchSource {
        DispatchSource::Tree
    }

    fn resolve(&self, sequence: &KeySequence) -> Result<Option<HandlerList>, DispatchError> {
        match self.lookup(sequence) {
            Ok(handlers) => Ok(Some(handlers)),
            Err(DispatchError::UnmatchedSequence(_)) => {
                debug!(%sequence, "no static binding");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn malformed(path: &[String], reason: impl Into<String>) -> DispatchError {
    let path = if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(SEPARATOR)
    };
    DispatchError::MalformedTreeNode {
        path,
        reason: reason.into(),
    }
}

fn validate_branch(
    children: &BTreeMap<Keycode, TreeNode>,
    path: &mut Vec<String>,
) -> Result<(), DispatchError> {
    if children.is_empty() {
        return Err(malformed(path, "key mapping has no bindings"));
    }

    for (key, child) in children {
        path.push(key.name().to_string());
        match child {
            TreeNode::Branch(grandchildren) => validate_branch(grandchildren, path)?,
            TreeNode::Leaf(Leaf::List(actions)) if actions.is_empty() => {
                return Err(malformed(path, "action list is empty"));
            }
            TreeNode::Leaf(_) => {}
        }
        path.pop();
    }

    Ok(())
}

fn branch_from_table<R>(
    table: &toml::Table,
    path: &mut Vec<String>,
    resolver: &R,
) -> Result<TreeNode, DispatchError>
where
    R: Fn(&str) -> Option<Action>,
{
    let mut children = BTreeMap::new();

    for (name, value) in table {
        path.push(name.clone());

        let key: Keycode = name
            .parse()
            .map_err(|e| malformed(path, format!("{}", e)))?;
        let child = node_from_value(value, path, resolver)?;

        if children.insert(key, child).is_some() {
            return Err(malformed(path, format!("key '{}' is bound twice", key)));
        }

        path.pop();
    }

    Ok(TreeNode::Branch(children))
}

fn node_from_value<R>(
    value: &toml::Value,
    path: &mut Vec<String>,
    resolver: &R,
) -> Result<TreeNode, DispatchError>
where
    R: Fn(&str) -> Option<Action>,
{
    match value {
        toml::Value::Table(table) => branch_from_table(table, path, resolver),
        toml::Value::String(name) => Ok(TreeNode::action(resolve_action(name, path, resolver)?)),
        toml::Value::Array(items) => {
            let mut actions = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    toml::Value::String(name) => actions.push(resolve_action(name, path, resolver)?),
                    other => {
                        return Err(malformed(
                            path,
                            format!("action lists may only contain names, found {}", other.type_str()),
                        ));
                    }
                }
            }
            Ok(TreeNode::list(actions))
        }
        other => Err(malformed(
            path,
            format!(
                "expected a key mapping, an action name or a list of action names, found {}",
                other.type_str()
            ),
        )),
    }
}

fn resolve_action<R>(name: &str, path: &[String], resolver: &R) -> Result<Action, DispatchError>
where
    R: Fn(&str) -> Option<Action>,
{
    resolver(name).ok_or_else(|| malformed(path, format!("unknown action '{}'", name)))
}

fn collect_bindings(
    children: &BTreeMap<Keycode, TreeNode>,
    path: &mut Vec<Keycode>,
    out: &mut Vec<(KeySequence, HandlerList)>,
) {
    for (key, child) in children {
        path.push(*key);
        match child {
            TreeNode::Branch(grandchildren) => collect_bindings(grandchildren, path, out),
            TreeNode::Leaf(leaf) => out.push((KeySequence::new(path.clone()), leaf.handlers())),
        }
        path.pop();
    }
}
