//! Grammar symbols: terminals, non-terminals, and the elements that appear
//! on the right-hand side of a production rule.
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

/// A leaf grammar symbol carrying one of a fixed set of string values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    pub id: u32,
    pub label: String,
    pub values: Vec<String>,
}

impl Terminal {
    /// Create a terminal with at least one possible value.
    ///
    /// # Panics
    /// Panics if `values` is empty; a terminal with no values can never be
    /// realized as a leaf.
    pub fn new(id: u32, label: impl Into<String>, values: Vec<String>) -> Self {
        assert!(!values.is_empty(), "a Terminal must have at least one value");
        Self {
            id,
            label: label.into(),
            values,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A symbol that must be expanded by a production rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NonTerminal {
    pub id: u32,
    pub label: String,
}

impl NonTerminal {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A grammar symbol: either a [`Terminal`] or a [`NonTerminal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub fn id(&self) -> u32 {
        match self {
            Symbol::Terminal(t) => t.id,
            Symbol::NonTerminal(n) => n.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Symbol::Terminal(t) => &t.label,
            Symbol::NonTerminal(n) => &n.label,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One element of a production rule's right-hand side.
///
/// Wraps a [`Symbol`]; kept distinct so a future extension can attach
/// per-position metadata without reshaping `Symbol` itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionElement(pub Symbol);

impl ProductionElement {
    pub fn new(symbol: Symbol) -> Self {
        Self(symbol)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.0
    }
}

impl From<Terminal> for ProductionElement {
    fn from(t: Terminal) -> Self {
        ProductionElement(Symbol::Terminal(t))
    }
}

impl From<NonTerminal> for ProductionElement {
    fn from(n: NonTerminal) -> Self {
        ProductionElement(Symbol::NonTerminal(n))
    }
}
