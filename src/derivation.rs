//! Random derivation of a [`SyntaxTree`] from a [`Grammar`].
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

use crate::grammar::{weighted_choice, Grammar};
use crate::rng::RandomNumberGenerator;
use crate::symbol::{NonTerminal, Symbol};
use crate::tree::{SyntaxTree, TreeNode};

/// Derivation encountered a non-terminal with no production rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoRuleError {
    nonterminal: String,
}

impl NoRuleError {
    pub fn new(nonterminal: String) -> Self {
        Self { nonterminal }
    }
}

impl fmt::Display for NoRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no production rule for nonterminal \"{}\"", self.nonterminal)
    }
}

impl std::error::Error for NoRuleError {}

/// Random derivation exceeded its iteration budget before reaching a
/// fully terminal tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationBudgetError {
    budget: usize,
}

impl DerivationBudgetError {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }
}

impl fmt::Display for DerivationBudgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "derivation exceeded its budget of {} expansions", self.budget)
    }
}

impl std::error::Error for DerivationBudgetError {}

/// Either of the two ways [`create_random_tree`] can fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DerivationError {
    NoRule(NoRuleError),
    Budget(DerivationBudgetError),
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationError::NoRule(e) => write!(f, "{}", e),
            DerivationError::Budget(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DerivationError {}

impl From<NoRuleError> for DerivationError {
    fn from(e: NoRuleError) -> Self {
        DerivationError::NoRule(e)
    }
}

impl From<DerivationBudgetError> for DerivationError {
    fn from(e: DerivationBudgetError) -> Self {
        DerivationError::Budget(e)
    }
}

/// Randomly derive a [`SyntaxTree`] from `grammar`, starting at
/// `start_symbol`, bounded by `max_depth`.
///
/// The depth bound is advisory: once a node's depth reaches `max_depth`,
/// derivation prefers a rule whose right-hand side is entirely terminal
/// if one exists, falling back to an ordinary weighted choice otherwise.
/// An iteration budget of `max_depth * 100` guards against grammars that
/// can never bottom out; exceeding it is a [`DerivationBudgetError`].
pub fn create_random_tree<R: RandomNumberGenerator>(
    grammar: &Grammar,
    max_depth: usize,
    start_symbol: &NonTerminal,
    rng: &mut R,
) -> Result<SyntaxTree, DerivationError> {
    let budget_total = max_depth.saturating_mul(100).max(100);
    let mut budget = budget_total;
    let root = expand(grammar, start_symbol, 0, max_depth, &mut budget, budget_total, rng)?;
    Ok(SyntaxTree::new(root))
}

#[allow(clippy::too_many_arguments)]
fn expand<R: RandomNumberGenerator>(
    grammar: &Grammar,
    nt: &NonTerminal,
    depth: usize,
    max_depth: usize,
    budget: &mut usize,
    budget_total: usize,
    rng: &mut R,
) -> Result<TreeNode, DerivationError> {
    if *budget == 0 {
        return Err(DerivationBudgetError::new(budget_total).into());
    }
    *budget -= 1;

    let candidates = grammar.rules_for(nt);
    if candidates.is_empty() {
        return Err(NoRuleError::new(nt.label.clone()).into());
    }

    let rule = if depth >= max_depth {
        candidates
            .iter()
            .find(|r| r.rhs.iter().all(|e| e.symbol().is_terminal()))
            .cloned()
            .unwrap_or_else(|| weighted_choice(candidates, rng))
    } else {
        grammar.choose_rule(nt, rng)?
    };

    let mut children = Vec::with_capacity(rule.rhs.len());
    for element in &rule.rhs {
        match element.symbol() {
            Symbol::Terminal(t) => {
                let idx = rng.below(t.values.len());
                children.push(TreeNode::terminal(t.clone(), t.values[idx].clone()));
            }
            Symbol::NonTerminal(child_nt) => {
                children.push(expand(grammar, child_nt, depth + 1, max_depth, budget, budget_total, rng)?);
            }
        }
    }

    Ok(TreeNode::nonterminal(nt.clone(), rule, children))
}
