//! Expression synthesis and context-based evaluation.
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

use std::any::Any;
use std::fmt;

use crate::tree::{SyntaxTree, TreeNode};

/// The view a semantic action receives onto the node it is evaluating.
///
/// Hosts that need domain-specific state (e.g. variable bindings) embed a
/// [`BaseEvaluationContext`] as a field and delegate these methods to it —
/// Rust has no subclassing, so composition stands in for "subclass the
/// context" (§9). A semantic action only ever sees `&mut dyn
/// EvaluationContext`, so reaching those embedded fields back out needs a
/// downcast: [`as_any`](EvaluationContext::as_any) and
/// [`as_any_mut`](EvaluationContext::as_any_mut) hand back the concrete
/// host type through [`Any`], the same way the original's semantic
/// actions read `ctx.x`/`ctx.y` directly off their context subclass.
pub trait EvaluationContext: Any {
    /// The already-evaluated value of child `index` of the node currently
    /// being evaluated.
    fn semantic_value(&self, index: usize) -> &str;

    /// Called by [`evaluate`] before invoking a node's semantic action, to
    /// make that node's children's values visible via [`semantic_value`].
    fn set_semantic_values(&mut self, values: Vec<String>);

    /// Set the value of the node currently being evaluated. A semantic
    /// action must call this.
    fn set_result(&mut self, result: String);

    /// The most recently set result. After [`evaluate`] returns, this is
    /// the root's value.
    fn get_result(&self) -> &str;

    /// Type-erased view onto `self`. A semantic action downcasts this
    /// (`ctx.as_any().downcast_ref::<HostContext>()`) to reach domain
    /// fields the host embedded alongside [`BaseEvaluationContext`].
    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Mutable counterpart of [`as_any`](EvaluationContext::as_any).
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A ready-to-embed [`EvaluationContext`] implementation holding only the
/// state the core needs. Hosts compose their domain fields alongside it.
#[derive(Clone, Debug, Default)]
pub struct BaseEvaluationContext {
    semantic_values: Vec<String>,
    result: String,
}

impl BaseEvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvaluationContext for BaseEvaluationContext {
    fn semantic_value(&self, index: usize) -> &str {
        self.semantic_values.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    fn set_semantic_values(&mut self, values: Vec<String>) {
        self.semantic_values = values;
    }

    fn set_result(&mut self, result: String) {
        self.result = result;
    }

    fn get_result(&self) -> &str {
        &self.result
    }
}

/// A semantic action failed to produce a usable result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationError {
    message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation error: {}", self.message)
    }
}

impl std::error::Error for EvaluationError {}

/// Concatenate terminal values in left-to-right leaf order. No separators
/// are introduced; terminals that need them must encode them in their
/// values.
pub fn synthesize(tree: &SyntaxTree) -> String {
    synthesize_node(tree.root())
}

fn synthesize_node(node: &TreeNode) -> String {
    match node {
        TreeNode::Terminal(t) => t.value.clone().unwrap_or_default(),
        TreeNode::NonTerminal(n) => n.children.iter().map(synthesize_node).collect(),
    }
}

/// Evaluate `tree` under `context`, post-order. For each non-terminal
/// node, if its generating rule has no semantic action, its value
/// defaults to the concatenation of its children's values; otherwise the
/// action is invoked with the children's values made visible through
/// `context`.
///
/// After this returns `Ok`, `context.get_result()` holds the root's value.
pub fn evaluate(tree: &SyntaxTree, context: &mut dyn EvaluationContext) -> Result<(), EvaluationError> {
    let root_value = evaluate_node(tree.root(), context)?;
    context.set_result(root_value);
    Ok(())
}

fn evaluate_node(node: &TreeNode, context: &mut dyn EvaluationContext) -> Result<String, EvaluationError> {
    match node {
        TreeNode::Terminal(t) => Ok(t.value.clone().unwrap_or_default()),
        TreeNode::NonTerminal(n) => {
            let mut child_values = Vec::with_capacity(n.children.len());
            for child in &n.children {
                child_values.push(evaluate_node(child, context)?);
            }
            match n.rule.as_ref().and_then(|r| r.action()) {
                Some(action) => {
                    context.set_semantic_values(child_values);
                    context.set_result(String::new());
                    action(context)?;
                    Ok(context.get_result().to_string())
                }
                None => Ok(child_values.concat()),
            }
        }
    }
}

/// Synthesize `tree` to a string and hand it to `evaluator` — the escape
/// hatch for hosts that prefer to evaluate outside the core entirely.
pub fn external_evaluate<F: FnMut(&str) -> String>(tree: &SyntaxTree, mut evaluator: F) -> String {
    evaluator(&synthesize(tree))
}
