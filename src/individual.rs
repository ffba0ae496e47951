//! A syntax tree paired with a fitness scalar.
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

use crate::derivation::DerivationError;
use crate::grammar::Grammar;
use crate::rng::RandomNumberGenerator;
use crate::tree::SyntaxTree;

/// A syntax tree plus a floating-point fitness.
///
/// `fitness` starts as `None`; it is set once by
/// [`Individual::evaluate_fitness`] and read thereafter by a
/// [`crate::population::Population`]'s ranking.
#[derive(Clone, Debug)]
pub struct Individual {
    tree: SyntaxTree,
    fitness: Option<f64>,
}

impl Individual {
    pub fn new(tree: SyntaxTree) -> Self {
        Self { tree, fitness: None }
    }

    /// Derive a random individual from `grammar`'s start symbol.
    pub fn from_random<R: RandomNumberGenerator>(grammar: &Grammar, max_depth: usize, rng: &mut R) -> Result<Self, DerivationError> {
        let tree = crate::derivation::create_random_tree(grammar, max_depth, grammar.start_symbol(), rng)?;
        Ok(Self::new(tree))
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        &mut self.tree
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Evaluate and store fitness. `NaN` is treated as negative infinity
    /// so a ranking never breaks on a degenerate fitness function (§9).
    pub fn evaluate_fitness<F: Fn(&SyntaxTree) -> f64>(&mut self, fitness_fn: F) {
        let raw = fitness_fn(&self.tree);
        self.fitness = Some(if raw.is_nan() { f64::NEG_INFINITY } else { raw });
    }

    /// `NaN`-safe ordering key: unevaluated individuals rank last.
    pub(crate) fn fitness_or_min(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}
