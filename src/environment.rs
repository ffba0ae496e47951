//! The generational loop: select, crossover, mutate, prune, evaluate.
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

use crate::grammar::Grammar;
use crate::individual::Individual;
use crate::mutation::{crossover, mutate, weighted_pick_index};
use crate::population::Population;
use crate::prune::prune_tree;
use crate::rng::{FastrandRng, RandomNumberGenerator};
use crate::tree::SyntaxTree;

/// A fitness function: pure, may return `NaN` (treated as negative
/// infinity for ranking, per §9).
pub type FitnessFn = Rc<dyn Fn(&SyntaxTree) -> f64>;

/// An invalid combination of [`Environment`] construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentConfigError {
    message: String,
}

impl EnvironmentConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for EnvironmentConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid environment configuration: {}", self.message)
    }
}

impl std::error::Error for EnvironmentConfigError {}

/// The generational loop: select, crossover, mutate, prune, evaluate.
///
/// Single-threaded and cooperative: [`Environment::optimize`] runs one
/// generation to completion on the caller's thread. All stochastic
/// decisions draw from one owned [`RandomNumberGenerator`], in the order
/// specified by §5, so a seeded run is reproducible.
#[derive(Clone)]
pub struct Environment<R: RandomNumberGenerator = FastrandRng> {
    grammar: Grammar,
    fitness_fn: FitnessFn,
    population_size: usize,
    max_depth: usize,
    survivors_per_generation: usize,
    elites: usize,
    mutation_probability: f64,
    population: Population,
    generation: usize,
    rng: R,
}

impl<R: RandomNumberGenerator> fmt::Debug for Environment<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("population_size", &self.population_size)
            .field("max_depth", &self.max_depth)
            .field("survivors_per_generation", &self.survivors_per_generation)
            .field("elites", &self.elites)
            .field("mutation_probability", &self.mutation_probability)
            .field("generation", &self.generation)
            .field("population_len", &self.population.size())
            .finish()
    }
}

impl<R: RandomNumberGenerator> Environment<R> {
    /// Build an environment and seed its initial population of
    /// `population_size` random individuals, all evaluated against
    /// `fitness_fn`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grammar: Grammar,
        fitness_fn: FitnessFn,
        population_size: usize,
        max_depth: usize,
        survivors_per_generation: usize,
        elites: usize,
        mutation_probability: f64,
        mut rng: R,
    ) -> Result<Self, EnvironmentConfigError> {
        if population_size < 2 {
            return Err(EnvironmentConfigError::new("population_size must be at least 2"));
        }
        if survivors_per_generation < 1 || survivors_per_generation > population_size {
            return Err(EnvironmentConfigError::new("survivors_per_generation must be in [1, population_size]"));
        }
        if elites > survivors_per_generation {
            return Err(EnvironmentConfigError::new("elites must not exceed survivors_per_generation"));
        }
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(EnvironmentConfigError::new("mutation_probability must be in [0, 1]"));
        }

        let mut population = Population::new();
        for _ in 0..population_size {
            let mut individual = Individual::from_random(&grammar, max_depth, &mut rng).map_err(|e| EnvironmentConfigError::new(e.to_string()))?;
            individual.evaluate_fitness(|t| fitness_fn(t));
            population.add(individual);
        }

        Ok(Self {
            grammar,
            fitness_fn,
            population_size,
            max_depth,
            survivors_per_generation,
            elites,
            mutation_probability,
            population,
            generation: 0,
            rng,
        })
    }

    pub fn get_population(&self) -> &Population {
        &self.population
    }

    pub fn get_generation_number(&self) -> usize {
        self.generation
    }

    /// Advance the population by one generation: rank, select survivors
    /// (elites first, then fitness-proportional sampling of the rest
    /// without replacement), refill by crossover with probabilistic
    /// mutation and pruning, then evaluate and replace.
    pub fn optimize(&mut self) {
        let ranking = self.population.ranking();
        let survivor_indices = self.select_survivors(&ranking);
        let survivor_individuals: Vec<Individual> = survivor_indices.iter().map(|&i| self.population.individuals()[i].clone()).collect();

        let mut next_individuals: Vec<Individual> = Vec::with_capacity(self.population_size);
        for individual in survivor_individuals.iter().take(self.elites) {
            next_individuals.push(individual.clone());
        }

        let weights: Vec<f64> = survivor_individuals.iter().map(|ind| ind.fitness_or_min().max(0.0) + 1e-9).collect();
        let total: f64 = weights.iter().sum();

        while next_individuals.len() < self.population_size {
            let parent_a = &survivor_individuals[weighted_pick_index(&weights, total, self.rng.next())];
            let parent_b = &survivor_individuals[weighted_pick_index(&weights, total, self.rng.next())];

            let (mut child_a, mut child_b) = crossover(parent_a.tree(), parent_b.tree(), &mut self.rng);

            if self.rng.chance(self.mutation_probability) {
                if let Ok(mutated) = mutate(&child_a, &self.grammar, self.max_depth, &mut self.rng) {
                    child_a = mutated;
                }
            }
            if self.rng.chance(self.mutation_probability) {
                if let Ok(mutated) = mutate(&child_b, &self.grammar, self.max_depth, &mut self.rng) {
                    child_b = mutated;
                }
            }

            let _ = prune_tree(&self.grammar, &mut child_a);
            let _ = prune_tree(&self.grammar, &mut child_b);

            let mut individual_a = Individual::new(child_a);
            individual_a.evaluate_fitness(|t| (self.fitness_fn)(t));
            next_individuals.push(individual_a);

            if next_individuals.len() < self.population_size {
                let mut individual_b = Individual::new(child_b);
                individual_b.evaluate_fitness(|t| (self.fitness_fn)(t));
                next_individuals.push(individual_b);
            }
        }

        self.population = Population::from_individuals(next_individuals);
        self.generation += 1;
    }

    /// Run [`Environment::optimize`] for `n_generations` generations.
    pub fn run(&mut self, n_generations: usize) {
        for _ in 0..n_generations {
            self.optimize();
        }
    }

    fn select_survivors(&mut self, ranking: &[usize]) -> Vec<usize> {
        let mut survivors: Vec<usize> = ranking.iter().take(self.elites).cloned().collect();
        let mut pool: Vec<usize> = ranking.iter().skip(self.elites).cloned().collect();

        while survivors.len() < self.survivors_per_generation && !pool.is_empty() {
            let weights: Vec<f64> = pool.iter().map(|&i| self.population.individuals()[i].fitness_or_min().max(0.0) + 1e-9).collect();
            let total: f64 = weights.iter().sum();
            let chosen_pos = weighted_pick_index(&weights, total, self.rng.next());
            survivors.push(pool.remove(chosen_pos));
        }
        survivors
    }
}
