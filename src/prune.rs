//! Pattern-directed tree pruning (§4.6).
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

use std::fmt;

use crate::grammar::Grammar;
use crate::tree::{NonTerminalNode, PruneRule, SyntaxTree, TreeNode};

/// A prune pass exceeded its rewrite budget without reaching a fixpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PruneLoopError {
    budget: usize,
}

impl PruneLoopError {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }
}

impl fmt::Display for PruneLoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pruning exceeded its budget of {} rewrites without reaching a fixpoint", self.budget)
    }
}

impl std::error::Error for PruneLoopError {}

/// Try to rewrite `tree` in place using a single prune rule. Scans
/// pre-order and applies the first match found, if any.
///
/// Returns whether a rewrite happened.
pub fn prune(tree: &mut SyntaxTree, rule: &PruneRule) -> bool {
    prune_node(tree.root_mut(), rule)
}

fn prune_node(node: &mut TreeNode, rule: &PruneRule) -> bool {
    if rule.pattern().root().matches(node) {
        *node = instantiate(rule.replacement().root(), rule.pattern().root(), node);
        return true;
    }
    for child in node.children_mut() {
        if prune_node(child, rule) {
            return true;
        }
    }
    false
}

fn is_wildcard(node: &TreeNode) -> bool {
    match node {
        TreeNode::Terminal(t) => t.value.is_none(),
        TreeNode::NonTerminal(n) => n.rule.is_none() && n.children.is_empty(),
    }
}

fn collect_wildcard_paths(node: &TreeNode, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if is_wildcard(node) {
        out.push(path.clone());
        return;
    }
    for (i, child) in node.children().iter().enumerate() {
        path.push(i);
        collect_wildcard_paths(child, path, out);
        path.pop();
    }
}

fn node_at_path<'a>(node: &'a TreeNode, path: &[usize]) -> &'a TreeNode {
    match path.split_first() {
        None => node,
        Some((&i, rest)) => node_at_path(&node.children()[i], rest),
    }
}

/// Build a concrete node from `replacement`, substituting each wildcard
/// leaf in it with the subtree of `matched` that occupied the
/// corresponding position in `pattern` (both enumerated pre-order,
/// restricted to wildcards).
fn instantiate(replacement: &TreeNode, pattern: &TreeNode, matched: &TreeNode) -> TreeNode {
    let mut wildcard_paths = Vec::new();
    collect_wildcard_paths(pattern, &mut Vec::new(), &mut wildcard_paths);
    let bindings: Vec<TreeNode> = wildcard_paths.iter().map(|path| node_at_path(matched, path).clone()).collect();
    let mut next_binding = 0;
    instantiate_rec(replacement, &bindings, &mut next_binding)
}

fn instantiate_rec(node: &TreeNode, bindings: &[TreeNode], next_binding: &mut usize) -> TreeNode {
    if is_wildcard(node) {
        let bound = bindings[*next_binding].clone();
        *next_binding += 1;
        return bound;
    }
    match node {
        TreeNode::Terminal(_) => node.clone(),
        TreeNode::NonTerminal(n) => TreeNode::NonTerminal(NonTerminalNode {
            nonterminal: n.nonterminal.clone(),
            rule: n.rule.clone(),
            children: n.children.iter().map(|c| instantiate_rec(c, bindings, next_binding)).collect(),
        }),
    }
}

/// Repeatedly scan `tree` pre-order and apply the first matching prune
/// rule from `grammar`, until no rule matches (a fixpoint). Bounded by
/// `nodes * rule_count` rewrites to guarantee termination.
pub fn prune_tree(grammar: &Grammar, tree: &mut SyntaxTree) -> Result<(), PruneLoopError> {
    let rules = grammar.prune_rules();
    if rules.is_empty() {
        return Ok(());
    }
    let node_count = tree.root().preorder().len();
    let budget = node_count.saturating_mul(rules.len()).max(rules.len());
    let mut remaining = budget;

    loop {
        let mut rewritten = false;
        for rule in rules {
            if prune(tree, rule) {
                rewritten = true;
                break;
            }
        }
        if !rewritten {
            return Ok(());
        }
        if remaining == 0 {
            return Err(PruneLoopError::new(budget));
        }
        remaining -= 1;
    }
}
