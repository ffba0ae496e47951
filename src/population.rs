//! An ordered collection of [`Individual`]s with on-demand fitness
//! ranking.
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

use crate::individual::Individual;

/// An ordered collection of [`Individual`]s. Insertion order is
/// preserved; a ranking by fitness is computed on demand.
#[derive(Clone, Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Self {
        Self { individuals: Vec::new() }
    }

    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn add(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Indices into [`Population::individuals`], sorted by fitness
    /// descending; a stable sort, so ties keep their original relative
    /// order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| {
            self.individuals[b]
                .fitness_or_min()
                .partial_cmp(&self.individuals[a].fitness_or_min())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// The `(rank + 1)`-th best individual (`rank` 0 is the fittest).
    pub fn fittest_by_rank(&self, rank: usize) -> Option<&Individual> {
        self.ranking().get(rank).map(|&i| &self.individuals[i])
    }

    /// Keep only the top `n` individuals by fitness.
    pub fn prune_to(&mut self, n: usize) {
        let keep: Vec<usize> = self.ranking().into_iter().take(n).collect();
        let mut kept = Vec::with_capacity(keep.len());
        for i in keep {
            kept.push(self.individuals[i].clone());
        }
        self.individuals = kept;
    }
}
