//! Production rules and the grammar that indexes them.
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

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::eval::{EvaluationContext, EvaluationError};
use crate::rng::RandomNumberGenerator;
use crate::symbol::{NonTerminal, ProductionElement, Symbol};
use crate::tree::PruneRule;

/// A semantic action attached to a [`ProductionRule`].
///
/// Invoked with a view onto the node's [`EvaluationContext`] during
/// [`crate::eval::evaluate`]; must call [`EvaluationContext::set_result`].
pub type SemanticAction = Rc<dyn Fn(&mut dyn EvaluationContext) -> Result<(), EvaluationError>>;

/// A rewrite from one non-terminal to a sequence of symbols, optionally
/// annotated with a semantic action and a selection weight.
pub struct ProductionRule {
    pub lhs: NonTerminal,
    pub rhs: Vec<ProductionElement>,
    action: Option<SemanticAction>,
    pub weight: u32,
}

impl ProductionRule {
    /// Create a rule with no semantic action and the default weight (1).
    ///
    /// # Errors
    /// [`GrammarError`] if `rhs` is empty; a rule that produces nothing is
    /// never valid in any grammar.
    pub fn new(lhs: NonTerminal, rhs: Vec<ProductionElement>) -> Result<Self, GrammarError> {
        Self::build(lhs, rhs, None, 1)
    }

    /// Create a rule with a semantic action.
    pub fn with_action(lhs: NonTerminal, rhs: Vec<ProductionElement>, action: SemanticAction) -> Result<Self, GrammarError> {
        Self::build(lhs, rhs, Some(action), 1)
    }

    /// Create a rule with an explicit selection weight.
    pub fn with_weight(lhs: NonTerminal, rhs: Vec<ProductionElement>, weight: u32) -> Result<Self, GrammarError> {
        Self::build(lhs, rhs, None, weight)
    }

    /// Create a rule with both a semantic action and an explicit weight.
    pub fn with_action_and_weight(
        lhs: NonTerminal,
        rhs: Vec<ProductionElement>,
        action: SemanticAction,
        weight: u32,
    ) -> Result<Self, GrammarError> {
        Self::build(lhs, rhs, Some(action), weight)
    }

    fn build(lhs: NonTerminal, rhs: Vec<ProductionElement>, action: Option<SemanticAction>, weight: u32) -> Result<Self, GrammarError> {
        if rhs.is_empty() {
            let mut err = GrammarError::new();
            err.add(format!("production rule for \"{}\" has an empty right-hand side", lhs.label));
            return Err(err);
        }
        Ok(Self { lhs, rhs, action, weight })
    }

    pub fn action(&self) -> Option<&SemanticAction> {
        self.action.as_ref()
    }

    /// The rule's canonical text form: `"LHS -> sym1 sym2 ..."`.
    pub fn text(&self) -> String {
        let rhs_text = self.rhs.iter().map(|e| e.symbol().label()).collect::<Vec<_>>().join(" ");
        format!("{} -> {}", self.lhs.label, rhs_text)
    }
}

impl Clone for ProductionRule {
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            action: self.action.clone(),
            weight: self.weight,
        }
    }
}

impl fmt::Debug for ProductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductionRule")
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .field("weight", &self.weight)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl fmt::Display for ProductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl PartialEq for ProductionRule {
    /// Equality is LHS identifier plus RHS symbol-identifier sequence
    /// (§3); weight and the semantic action (not comparable, since
    /// closures aren't `PartialEq`) are not part of a rule's identity.
    fn eq(&self, other: &Self) -> bool {
        self.lhs.id == other.lhs.id
            && self.rhs.len() == other.rhs.len()
            && self.rhs.iter().zip(other.rhs.iter()).all(|(a, b)| a.symbol().id() == b.symbol().id())
    }
}

/// Structural problems detected when a [`Grammar`] is built: a rule whose
/// LHS never appears, or a prune rule whose pattern and replacement roots
/// disagree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrammarError {
    messages: Vec<String>,
}

impl GrammarError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: String) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grammar error:\n{}", self.messages.join("\n"))
    }
}

impl std::error::Error for GrammarError {}

/// A context-free grammar: a set of production rules indexed by
/// left-hand side, plus an optional set of tree-rewrite ([`PruneRule`])
/// rules.
#[derive(Clone, Debug)]
pub struct Grammar {
    rules: Vec<Rc<ProductionRule>>,
    rules_by_lhs: HashMap<u32, Vec<Rc<ProductionRule>>>,
    prune_rules: Vec<PruneRule>,
    start_symbol: NonTerminal,
}

impl Grammar {
    /// Build a grammar from a non-empty, ordered list of rules. The LHS of
    /// the first rule becomes the start symbol. Every non-terminal that
    /// appears on some RHS must have at least one rule with it as LHS, or
    /// [`GrammarError`] is returned.
    pub fn new(rules: Vec<ProductionRule>) -> Result<Self, GrammarError> {
        Self::with_prune_rules(rules, Vec::new())
    }

    /// Build a grammar together with a set of prune rules (§4.6).
    pub fn with_prune_rules(rules: Vec<ProductionRule>, prune_rules: Vec<PruneRule>) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            let mut err = GrammarError::new();
            err.add("a grammar must have at least one production rule".to_string());
            return Err(err);
        }
        let start_symbol = rules[0].lhs.clone();
        let rules: Vec<Rc<ProductionRule>> = rules.into_iter().map(Rc::new).collect();

        let mut rules_by_lhs: HashMap<u32, Vec<Rc<ProductionRule>>> = HashMap::new();
        for rule in &rules {
            rules_by_lhs.entry(rule.lhs.id).or_insert_with(Vec::new).push(Rc::clone(rule));
        }

        let mut err = GrammarError::new();
        for rule in &rules {
            for element in &rule.rhs {
                if let Symbol::NonTerminal(nt) = element.symbol() {
                    if !rules_by_lhs.contains_key(&nt.id) {
                        err.add(format!("the nonterminal \"{}\" has no production rule", nt.label));
                    }
                }
            }
        }
        for prune_rule in &prune_rules {
            if prune_rule.pattern_root() != prune_rule.replacement_root() {
                err.add(format!(
                    "prune rule pattern and replacement roots disagree: \"{}\" vs \"{}\"",
                    prune_rule.pattern_root().label,
                    prune_rule.replacement_root().label
                ));
            }
        }
        if !err.messages().is_empty() {
            return Err(err);
        }

        Ok(Self {
            rules,
            rules_by_lhs,
            prune_rules,
            start_symbol,
        })
    }

    pub fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    pub fn rules(&self) -> &[Rc<ProductionRule>] {
        &self.rules
    }

    pub fn prune_rules(&self) -> &[PruneRule] {
        &self.prune_rules
    }

    /// All rules whose LHS is `nt`, in declaration order.
    pub fn rules_for(&self, nt: &NonTerminal) -> &[Rc<ProductionRule>] {
        self.rules_by_lhs.get(&nt.id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Select one rule for `nt`, weighted by [`ProductionRule::weight`].
    pub fn choose_rule<R: RandomNumberGenerator>(&self, nt: &NonTerminal, rng: &mut R) -> Result<Rc<ProductionRule>, crate::derivation::NoRuleError> {
        let candidates = self.rules_for(nt);
        if candidates.is_empty() {
            return Err(crate::derivation::NoRuleError::new(nt.label.clone()));
        }
        Ok(weighted_choice(candidates, rng))
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", rule.text())?;
        }
        Ok(())
    }
}

/// Pick one rule from `candidates`, weighted by [`ProductionRule::weight`],
/// using the cumulative-weight-array technique: sum the weights into a
/// prefix array, draw a point in `[0, total)`, and take the first
/// candidate whose cumulative weight exceeds that point.
pub(crate) fn weighted_choice<R: RandomNumberGenerator>(candidates: &[Rc<ProductionRule>], rng: &mut R) -> Rc<ProductionRule> {
    let mut cumulative: Vec<f64> = Vec::with_capacity(candidates.len());
    let mut sum = 0.0;
    for rule in candidates {
        sum += rule.weight as f64;
        cumulative.push(sum);
    }
    let point = rng.next() * sum;
    for (i, &c) in cumulative.iter().enumerate() {
        if point < c {
            return Rc::clone(&candidates[i]);
        }
    }
    Rc::clone(&candidates[candidates.len() - 1])
}
