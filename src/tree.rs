//! The derivation tree: simultaneously a parse tree (it records which rule
//! produced each node) and an expression tree (terminal values sit at the
//! leaves).
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
use std::rc::Rc;

use crate::grammar::ProductionRule;
use crate::symbol::{NonTerminal, Terminal};

/// A single node of a [`SyntaxTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Terminal(TerminalNode),
    NonTerminal(NonTerminalNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerminalNode {
    pub terminal: Terminal,
    /// `None` only ever appears in a [`PruneRule`] pattern, where it acts
    /// as a wildcard matching any value of `terminal`.
    pub value: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NonTerminalNode {
    pub nonterminal: NonTerminal,
    /// `None` only ever appears in a [`PruneRule`] pattern, where a
    /// rule-less node with no children acts as a wildcard matching any
    /// subtree of `nonterminal`.
    pub rule: Option<Rc<ProductionRule>>,
    pub children: Vec<TreeNode>,
}

impl PartialEq for NonTerminalNode {
    fn eq(&self, other: &Self) -> bool {
        self.nonterminal == other.nonterminal && self.rule == other.rule && self.children == other.children
    }
}

impl TreeNode {
    pub fn terminal(terminal: Terminal, value: String) -> Self {
        TreeNode::Terminal(TerminalNode {
            terminal,
            value: Some(value),
        })
    }

    pub fn nonterminal(nonterminal: NonTerminal, rule: Rc<ProductionRule>, children: Vec<TreeNode>) -> Self {
        TreeNode::NonTerminal(NonTerminalNode {
            nonterminal,
            rule: Some(rule),
            children,
        })
    }

    /// Build a wildcard placeholder for use in a [`PruneRule`] pattern: a
    /// non-terminal node with no rule and no children, matching any
    /// subtree rooted at `nonterminal`.
    pub fn wildcard_nonterminal(nonterminal: NonTerminal) -> Self {
        TreeNode::NonTerminal(NonTerminalNode {
            nonterminal,
            rule: None,
            children: Vec::new(),
        })
    }

    /// Build a wildcard placeholder matching any value of `terminal`.
    pub fn wildcard_terminal(terminal: Terminal) -> Self {
        TreeNode::Terminal(TerminalNode { terminal, value: None })
    }

    pub fn label(&self) -> &str {
        match self {
            TreeNode::Terminal(t) => &t.terminal.label,
            TreeNode::NonTerminal(n) => &n.nonterminal.label,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TreeNode::Terminal(_))
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Terminal(_) => &[],
            TreeNode::NonTerminal(n) => &n.children,
        }
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        match self {
            TreeNode::Terminal(_) => panic!("a terminal node has no children"),
            TreeNode::NonTerminal(n) => &mut n.children,
        }
    }

    /// `true` iff `self` (a pattern node, possibly wildcarded) matches
    /// `other` (a concrete tree node). This is deliberately distinct from
    /// [`PartialEq`]: wildcard semantics apply only here, to pruning, not
    /// to general structural equality (§3 vs §4.6 of the design notes).
    pub fn matches(&self, other: &TreeNode) -> bool {
        match (self, other) {
            (TreeNode::Terminal(p), TreeNode::Terminal(t)) => {
                p.terminal.id == t.terminal.id
                    && match &p.value {
                        None => true,
                        Some(v) => Some(v) == t.value.as_ref(),
                    }
            }
            (TreeNode::NonTerminal(p), TreeNode::NonTerminal(t)) => {
                if p.nonterminal.id != t.nonterminal.id {
                    return false;
                }
                if p.rule.is_none() && p.children.is_empty() {
                    return true;
                }
                p.children.len() == t.children.len() && p.children.iter().zip(t.children.iter()).all(|(a, b)| a.matches(b))
            }
            _ => false,
        }
    }

    /// Pre-order enumeration of this subtree (this node first, then each
    /// child's pre-order enumeration).
    pub fn preorder(&self) -> Vec<&TreeNode> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.preorder());
        }
        out
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Terminal(t) => write!(
                f,
                "type=Terminal, label={} , value={}",
                t.terminal.label,
                t.value.as_deref().unwrap_or("")
            ),
            TreeNode::NonTerminal(n) => write!(
                f,
                "type=NonTerminal, label={} , generatorPR={}",
                n.nonterminal.label,
                n.rule.as_ref().map(|r| r.text()).unwrap_or_else(|| "<none>".to_string())
            ),
        }
    }
}

/// A derivation tree. A tree owns its nodes exclusively; [`Clone`]
/// produces a deep copy, and structural equality compares recursively.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxTree {
    root: TreeNode,
}

impl SyntaxTree {
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut TreeNode {
        &mut self.root
    }

    pub fn into_root(self) -> TreeNode {
        self.root
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// A pattern-directed tree rewrite (§4.6): replace any subtree matching
/// `pattern` with an instantiation of `replacement`.
///
/// `pattern` and `replacement` must share the same root non-terminal
/// (checked at [`crate::grammar::Grammar`] construction).
#[derive(Clone, Debug)]
pub struct PruneRule {
    pattern: SyntaxTree,
    replacement: SyntaxTree,
}

impl PruneRule {
    pub fn new(pattern: SyntaxTree, replacement: SyntaxTree) -> Self {
        Self { pattern, replacement }
    }

    pub fn pattern(&self) -> &SyntaxTree {
        &self.pattern
    }

    pub fn replacement(&self) -> &SyntaxTree {
        &self.replacement
    }

    pub fn pattern_root(&self) -> &NonTerminal {
        match self.pattern.root() {
            TreeNode::NonTerminal(n) => &n.nonterminal,
            TreeNode::Terminal(_) => panic!("a prune rule's pattern root must be a nonterminal"),
        }
    }

    pub fn replacement_root(&self) -> &NonTerminal {
        match self.replacement.root() {
            TreeNode::NonTerminal(n) => &n.nonterminal,
            TreeNode::Terminal(_) => panic!("a prune rule's replacement root must be a nonterminal"),
        }
    }
}
