//! # Introduction
//! `gbgp` evolves populations of syntactically valid expressions drawn
//! from a user-supplied context-free grammar, in order to fit a
//! user-supplied fitness function — grammar-based genetic programming.
//!
//! A grammar is built from [`Terminal`]s, [`NonTerminal`]s, and
//! [`ProductionRule`]s; derivation and evolution produce [`SyntaxTree`]s,
//! which can be synthesized to a string, evaluated under a caller-defined
//! [`EvaluationContext`], mutated, and crossed over.
//!
//! # Example
//! A tiny arithmetic grammar, evolved to approximate a target function.
//!
//! ```rust
//! use gbgp::*;
//! use std::rc::Rc;
//!
//! let var = Terminal::new(1, "var", vec!["x".into(), "1".into()]);
//! let plus = Terminal::new(2, "Plus", vec!["+".into()]);
//!
//! let expr = NonTerminal::new(10, "EXPR");
//! let term = NonTerminal::new(11, "TERM");
//!
//! let rule_sum = ProductionRule::with_action(
//!     expr.clone(),
//!     vec![term.clone().into(), plus.into(), term.clone().into()],
//!     Rc::new(|ctx: &mut dyn EvaluationContext| {
//!         let n1: i64 = ctx.semantic_value(0).parse().unwrap_or(0);
//!         let n2: i64 = ctx.semantic_value(2).parse().unwrap_or(0);
//!         ctx.set_result((n1 + n2).to_string());
//!         Ok(())
//!     }),
//! ).unwrap();
//! let rule_pass = ProductionRule::new(expr.clone(), vec![term.clone().into()]).unwrap();
//! let rule_leaf = ProductionRule::with_action(
//!     term,
//!     vec![var.into()],
//!     Rc::new(|ctx: &mut dyn EvaluationContext| {
//!         let value = if ctx.semantic_value(0) == "x" { "2" } else { "1" };
//!         ctx.set_result(value.to_string());
//!         Ok(())
//!     }),
//! ).unwrap();
//!
//! let grammar = Grammar::new(vec![rule_sum, rule_pass, rule_leaf]).unwrap();
//!
//! let mut rng = DefaultRng::with_seed(1);
//! let tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();
//!
//! let mut ctx = BaseEvaluationContext::new();
//! evaluate(&tree, &mut ctx).unwrap();
//! let _ = ctx.get_result();
//! ```
//!
//! # License
//! `gbgp` is licensed under either of [MIT](http://opensource.org/licenses/MIT) or [Apache-2.0](http://www.apache.org/licenses/LICENSE-2.0) at your option.

mod derivation;
mod environment;
mod eval;
mod grammar;
mod individual;
mod mutation;
mod population;
mod prune;
mod rng;
mod symbol;
mod tree;

pub use derivation::{create_random_tree, DerivationBudgetError, DerivationError, NoRuleError};
pub use environment::{Environment, EnvironmentConfigError, FitnessFn};
pub use eval::{evaluate, external_evaluate, synthesize, BaseEvaluationContext, EvaluationContext, EvaluationError};
pub use grammar::{Grammar, GrammarError, ProductionRule, SemanticAction};
pub use individual::Individual;
pub use mutation::{clone_tree, crossover, mutate, nodes_of_kind, replace_subtree, subtree_at, TypeMismatchError};
pub use population::Population;
pub use prune::{prune, prune_tree, PruneLoopError};
pub use rng::{FastrandRng, RandomNumberGenerator};
pub use symbol::{NonTerminal, ProductionElement, Symbol, Terminal};
pub use tree::{NonTerminalNode, PruneRule, SyntaxTree, TerminalNode, TreeNode};

/// The default [`RandomNumberGenerator`] for [`Environment`] and
/// [`create_random_tree`].
pub type DefaultRng = FastrandRng;
