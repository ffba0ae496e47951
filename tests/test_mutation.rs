//! Tests for subtree extraction, crossover, and mutation.
//!
//! Copyright © 2026 the gbgp authors
//!
//! This file is part of gbgp.
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
//!
//! OR
//!
//! Licensed under the Apache License, Version 2.0 (the "License"); you may not use gbgp except in compliance with the License. You may obtain a copy of the License at
//!
//! http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software distributed under the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the License for the specific language governing permissions and limitations under the License.

extern crate gbgp;

use gbgp::*;

fn arithmetic_grammar() -> Grammar {
    let var = Terminal::new(1, "var", vec!["x".into(), "y".into(), "1".into()]);
    let plus = Terminal::new(2, "Plus", vec!["+".into()]);
    let times = Terminal::new(3, "Times", vec!["*".into()]);

    let expr = NonTerminal::new(6, "EXPR");
    let term = NonTerminal::new(7, "TERM");
    let factor = NonTerminal::new(8, "FACTOR");

    let rules = vec![
        ProductionRule::new(expr.clone(), vec![expr.clone().into(), plus.into(), term.clone().into()]).unwrap(),
        ProductionRule::new(expr.clone(), vec![term.clone().into()]).unwrap(),
        ProductionRule::new(term.clone(), vec![term.clone().into(), times.into(), factor.clone().into()]).unwrap(),
        ProductionRule::new(term, vec![factor.clone().into()]).unwrap(),
        ProductionRule::new(factor, vec![var.into()]).unwrap(),
    ];
    Grammar::new(rules).unwrap()
}

fn node_satisfies_its_rule(node: &TreeNode) -> bool {
    match node {
        TreeNode::Terminal(_) => true,
        TreeNode::NonTerminal(n) => {
            let rule = n.rule.as_ref().expect("a derived node always has a generating rule");
            rule.rhs.len() == n.children.len()
                && rule.rhs.iter().zip(n.children.iter()).all(|(element, child)| element.symbol().id() == child_symbol_id(child))
                && n.children.iter().all(node_satisfies_its_rule)
        }
    }
}

fn child_symbol_id(node: &TreeNode) -> u32 {
    match node {
        TreeNode::Terminal(t) => t.terminal.id,
        TreeNode::NonTerminal(n) => n.nonterminal.id,
    }
}

#[test]
fn nodes_of_kind_finds_every_occurrence_in_preorder() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(5);
    let tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let factor_sites = nodes_of_kind(&tree, 8);
    assert!(!factor_sites.is_empty());
    let preorder = tree.root().preorder();
    for &idx in &factor_sites {
        match preorder[idx] {
            TreeNode::NonTerminal(n) => assert_eq!(n.nonterminal.id, 8),
            TreeNode::Terminal(_) => panic!("index {} is not a FACTOR node", idx),
        }
    }
}

#[test]
fn subtree_at_extracts_a_deep_copy_of_the_indexed_node() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(9);
    let tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let factor_sites = nodes_of_kind(&tree, 8);
    let idx = factor_sites[0];
    let extracted = subtree_at(&tree, idx).unwrap();

    assert_eq!(extracted.root().label(), "FACTOR");
    assert!(node_satisfies_its_rule(extracted.root()));
}

#[test]
fn replace_subtree_grafts_a_matching_nonterminal() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(13);
    let mut tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let factor_sites = nodes_of_kind(&tree, 8);
    let idx = factor_sites[0];
    let replacement = create_random_tree(&grammar, 3, &NonTerminal::new(8, "FACTOR"), &mut rng).unwrap();

    replace_subtree(&mut tree, idx, &replacement).unwrap();
    assert!(node_satisfies_its_rule(tree.root()));
}

#[test]
fn replace_subtree_rejects_a_mismatched_nonterminal() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(17);
    let mut tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let term_sites = nodes_of_kind(&tree, 7);
    let idx = term_sites[0];
    let replacement = create_random_tree(&grammar, 3, &NonTerminal::new(8, "FACTOR"), &mut rng).unwrap();

    let err = replace_subtree(&mut tree, idx, &replacement).unwrap_err();
    assert_eq!(err.to_string(), "expected nonterminal \"TERM\", found \"FACTOR\"");
}

/// Property 5: both offspring of a crossover between two trees derived
/// from the same grammar still derive from that grammar.
#[test]
fn crossover_closure_holds_across_seeds() {
    let grammar = arithmetic_grammar();
    for seed in 0..15u64 {
        let mut rng = DefaultRng::with_seed(seed);
        let a = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();
        let b = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

        let (child_a, child_b) = crossover(&a, &b, &mut rng);
        assert!(node_satisfies_its_rule(child_a.root()), "seed {} produced an ill-formed child_a", seed);
        assert!(node_satisfies_its_rule(child_b.root()), "seed {} produced an ill-formed child_b", seed);
    }
}

#[test]
fn crossover_returns_unchanged_clones_when_no_nonterminal_is_shared() {
    let var_a = Terminal::new(1, "var", vec!["a".into()]);
    let start_a = NonTerminal::new(1, "A");
    let rules_a = vec![ProductionRule::new(start_a, vec![var_a.into()]).unwrap()];
    let grammar_a = Grammar::new(rules_a).unwrap();

    let var_b = Terminal::new(2, "var", vec!["b".into()]);
    let start_b = NonTerminal::new(2, "B");
    let rules_b = vec![ProductionRule::new(start_b, vec![var_b.into()]).unwrap()];
    let grammar_b = Grammar::new(rules_b).unwrap();

    let mut rng = DefaultRng::with_seed(1);
    let a = create_random_tree(&grammar_a, 2, grammar_a.start_symbol(), &mut rng).unwrap();
    let b = create_random_tree(&grammar_b, 2, grammar_b.start_symbol(), &mut rng).unwrap();

    let (child_a, child_b) = crossover(&a, &b, &mut rng);
    assert_eq!(child_a, a);
    assert_eq!(child_b, b);
}

#[test]
fn mutate_replaces_a_subtree_for_the_same_nonterminal() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(21);
    let tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let mutated = mutate(&tree, &grammar, 6, &mut rng).unwrap();
    assert!(node_satisfies_its_rule(mutated.root()));
}

/// Property 4: cloning is deep; mutating the clone never affects the
/// original.
#[test]
fn clone_tree_is_independent_of_the_source() {
    let grammar = arithmetic_grammar();
    let mut rng = DefaultRng::with_seed(25);
    let tree = create_random_tree(&grammar, 6, grammar.start_symbol(), &mut rng).unwrap();

    let mut cloned = clone_tree(&tree);
    assert_eq!(cloned, tree);

    let term_sites = nodes_of_kind(&cloned, 7);
    if let Some(&idx) = term_sites.first() {
        let replacement = create_random_tree(&grammar, 2, &NonTerminal::new(7, "TERM"), &mut rng).unwrap();
        replace_subtree(&mut cloned, idx, &replacement).unwrap();
        assert_ne!(cloned, tree);
    }
}
