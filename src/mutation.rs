//! Subtree extraction/insertion, crossover, and mutation.
//
// Copyright © 2026 the gbgp authors
//
// This file is part of gbgp.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
//
// OR
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use gbgp except in compliance with the License. You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the License for the specific language governing permissions and limitations under the License.

use std::collections::BTreeSet;
use std::fmt;

use crate::derivation::DerivationError;
use crate::grammar::Grammar;
use crate::rng::RandomNumberGenerator;
use crate::tree::{SyntaxTree, TreeNode};

/// A tree-mutation operation was asked to graft a subtree whose root
/// non-terminal doesn't match the slot it would occupy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatchError {
    expected: String,
    found: String,
}

impl TypeMismatchError {
    pub fn new(expected: String, found: String) -> Self {
        Self { expected, found }
    }
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected nonterminal \"{}\", found \"{}\"", self.expected, self.found)
    }
}

impl std::error::Error for TypeMismatchError {}

/// Indices (in this tree's pre-order enumeration) of every
/// [`TreeNode::NonTerminal`] node whose non-terminal has `nonterminal_id`.
pub fn nodes_of_kind(tree: &SyntaxTree, nonterminal_id: u32) -> Vec<usize> {
    tree.root()
        .preorder()
        .iter()
        .enumerate()
        .filter_map(|(i, node)| match node {
            TreeNode::NonTerminal(n) if n.nonterminal.id == nonterminal_id => Some(i),
            _ => None,
        })
        .collect()
}

fn node_at(node: &TreeNode, index: usize, counter: &mut usize) -> Option<TreeNode> {
    if *counter == index {
        return Some(node.clone());
    }
    *counter += 1;
    for child in node.children() {
        if let Some(found) = node_at(child, index, counter) {
            return Some(found);
        }
    }
    None
}

/// Extract a deep copy of the subtree rooted at pre-order index `index` as
/// its own [`SyntaxTree`].
pub fn subtree_at(tree: &SyntaxTree, index: usize) -> Option<SyntaxTree> {
    let mut counter = 0;
    node_at(tree.root(), index, &mut counter).map(SyntaxTree::new)
}

fn replace_at(node: &mut TreeNode, index: usize, counter: &mut usize, replacement: &TreeNode) -> bool {
    if *counter == index {
        *node = replacement.clone();
        return true;
    }
    *counter += 1;
    if node.is_terminal() {
        return false;
    }
    for child in node.children_mut() {
        if replace_at(child, index, counter, replacement) {
            return true;
        }
    }
    false
}

/// Replace the node at pre-order index `index` with a clone of
/// `replacement`'s root.
///
/// # Errors
/// [`TypeMismatchError`] if the two nodes' non-terminals differ; grafting
/// a subtree of the wrong kind would violate the parent rule's RHS
/// invariant (§3).
pub fn replace_subtree(tree: &mut SyntaxTree, index: usize, replacement: &SyntaxTree) -> Result<(), TypeMismatchError> {
    let target_label = {
        let mut counter = 0;
        node_at(tree.root(), index, &mut counter).map(|n| n.label().to_string())
    };
    if let Some(expected) = target_label {
        let found = replacement.root().label();
        if expected != found {
            return Err(TypeMismatchError::new(expected, found.to_string()));
        }
    }
    let mut counter = 0;
    replace_at(tree.root_mut(), index, &mut counter, replacement.root());
    Ok(())
}

/// Deep-copy `tree`.
pub fn clone_tree(tree: &SyntaxTree) -> SyntaxTree {
    tree.clone()
}

fn weighted_index(weights: &[f64], total: f64, draw: f64) -> usize {
    let point = draw * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if point < cumulative {
            return i;
        }
    }
    weights.len() - 1
}

/// Swap one random matching subtree between `a` and `b`, picking uniformly
/// among non-terminals common to both trees. If the trees share no
/// non-terminal, both parents are returned unchanged (cloned).
pub fn crossover<R: RandomNumberGenerator>(a: &SyntaxTree, b: &SyntaxTree, rng: &mut R) -> (SyntaxTree, SyntaxTree) {
    let ids_in_a: BTreeSet<u32> = a
        .root()
        .preorder()
        .iter()
        .filter_map(|n| match n {
            TreeNode::NonTerminal(nt) => Some(nt.nonterminal.id),
            _ => None,
        })
        .collect();
    let common: Vec<u32> = b
        .root()
        .preorder()
        .iter()
        .filter_map(|n| match n {
            TreeNode::NonTerminal(nt) if ids_in_a.contains(&nt.nonterminal.id) => Some(nt.nonterminal.id),
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if common.is_empty() {
        return (a.clone(), b.clone());
    }

    let chosen_id = common[rng.below(common.len())];
    let a_sites = nodes_of_kind(a, chosen_id);
    let b_sites = nodes_of_kind(b, chosen_id);
    let a_index = a_sites[rng.below(a_sites.len())];
    let b_index = b_sites[rng.below(b_sites.len())];

    let a_subtree = subtree_at(a, a_index).expect("a_index came from a's own preorder enumeration");
    let b_subtree = subtree_at(b, b_index).expect("b_index came from b's own preorder enumeration");

    let mut child_a = a.clone();
    let mut child_b = b.clone();
    replace_subtree(&mut child_a, a_index, &b_subtree).expect("swapped subtrees share a nonterminal by construction");
    replace_subtree(&mut child_b, b_index, &a_subtree).expect("swapped subtrees share a nonterminal by construction");

    (child_a, child_b)
}

/// Replace a random non-terminal subtree of `tree` with a freshly derived
/// one for the same non-terminal, honoring `max_depth` measured from that
/// node.
pub fn mutate<R: RandomNumberGenerator>(tree: &SyntaxTree, grammar: &Grammar, max_depth: usize, rng: &mut R) -> Result<SyntaxTree, DerivationError> {
    let sites = tree.root().preorder();
    let nonterminal_sites: Vec<usize> = sites
        .iter()
        .enumerate()
        .filter_map(|(i, n)| match n {
            TreeNode::NonTerminal(_) => Some(i),
            _ => None,
        })
        .collect();

    if nonterminal_sites.is_empty() {
        return Ok(tree.clone());
    }

    let index = nonterminal_sites[rng.below(nonterminal_sites.len())];
    let target = subtree_at(tree, index).expect("index came from this tree's own preorder enumeration");
    let target_nt = match target.root() {
        TreeNode::NonTerminal(n) => n.nonterminal.clone(),
        TreeNode::Terminal(_) => unreachable!("filtered to NonTerminal sites above"),
    };

    let new_subtree = crate::derivation::create_random_tree(grammar, max_depth, &target_nt, rng)?;
    let mut mutated = tree.clone();
    replace_subtree(&mut mutated, index, &new_subtree).expect("freshly derived subtree shares the target's nonterminal");
    Ok(mutated)
}

pub(crate) use weighted_index as weighted_pick_index;
