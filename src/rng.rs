//! The random number generator injected into every stochastic operation in
//! this crate: derivation, selection, crossover, and mutation.
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

/// A source of randomness used throughout grammar-based genetic
/// programming.
///
/// Implement this to plug in a seeded, deterministic, or mock generator
/// instead of the default [`FastrandRng`]. Every stochastic entry point in
/// this crate is generic over `R: RandomNumberGenerator` rather than
/// reaching for a process-global stream, so a caller owns exactly one RNG
/// per [`crate::Environment`] and controls its seed.
pub trait RandomNumberGenerator {
    /// Create a generator seeded from the operating system's entropy
    /// source. Used by callers that don't need reproducibility.
    fn new() -> Self
    where
        Self: Sized;

    /// Draw a number in the range `[0.0, 1.0)`.
    fn next(&mut self) -> f64;

    /// Draw a uniformly distributed index in `[0, bound)`. `bound` must be
    /// nonzero.
    fn below(&mut self, bound: usize) -> usize {
        ((self.next() * bound as f64) as usize).min(bound - 1)
    }

    /// Draw a boolean that is `true` with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next() < probability
    }
}

/// The default [`RandomNumberGenerator`], backed by the `fastrand` crate.
#[derive(Clone, Debug)]
pub struct FastrandRng {
    rng: fastrand::Rng,
}

impl FastrandRng {
    /// Create a generator seeded deterministically, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Re-seed an existing generator.
    pub fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }
}

impl RandomNumberGenerator for FastrandRng {
    fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    fn next(&mut self) -> f64 {
        self.rng.f64()
    }

    fn below(&mut self, bound: usize) -> usize {
        self.rng.usize(0..bound)
    }
}

impl fmt::Display for FastrandRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FastrandRng")
    }
}
