//! Tests for the syntax tree and its nodes.
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

use std::rc::Rc;

use gbgp::*;

fn arithmetic_grammar() -> (Grammar, Terminal, Terminal, Terminal, NonTerminal, NonTerminal, NonTerminal) {
    let var = Terminal::new(1, "var", vec!["a".into(), "b".into(), "c".into()]);
    let plus = Terminal::new(2, "Plus", vec!["+".into()]);
    let times = Terminal::new(3, "Times", vec!["*".into()]);

    let expr = NonTerminal::new(6, "EXPR");
    let term = NonTerminal::new(7, "TERM");
    let factor = NonTerminal::new(8, "FACTOR");

    let rules = vec![
        ProductionRule::new(expr.clone(), vec![expr.clone().into(), plus.clone().into(), term.clone().into()]).unwrap(),
        ProductionRule::new(expr.clone(), vec![term.clone().into()]).unwrap(),
        ProductionRule::new(term.clone(), vec![term.clone().into(), times.clone().into(), factor.clone().into()]).unwrap(),
        ProductionRule::new(term.clone(), vec![factor.clone().into()]).unwrap(),
        ProductionRule::new(factor.clone(), vec![var.clone().into()]).unwrap(),
    ];
    let grammar = Grammar::new(rules).unwrap();
    (grammar, var, plus, times, expr, term, factor)
}

/// Scenario C: a hand-built tree for "c+b*b" synthesizes to that string.
#[test]
fn synthesize_hand_built_tree() {
    let (grammar, var, plus, times, expr, term, factor) = arithmetic_grammar();

    let rule_expr_plus = Rc::clone(&grammar.rules_for(&expr)[0]);
    let rule_expr_term = Rc::clone(&grammar.rules_for(&expr)[1]);
    let rule_term_times = Rc::clone(&grammar.rules_for(&term)[0]);
    let rule_term_factor = Rc::clone(&grammar.rules_for(&term)[1]);
    let rule_factor_var = Rc::clone(&grammar.rules_for(&factor)[0]);

    let leaf = |value: &str, rule: &Rc<ProductionRule>| {
        TreeNode::nonterminal(
            factor.clone(),
            Rc::clone(rule),
            vec![TreeNode::terminal(var.clone(), value.to_string())],
        )
    };

    let c_factor = leaf("c", &rule_factor_var);
    let c_term = TreeNode::nonterminal(term.clone(), Rc::clone(&rule_term_factor), vec![c_factor]);
    let c_expr = TreeNode::nonterminal(expr.clone(), Rc::clone(&rule_expr_term), vec![c_term]);

    let b_factor_1 = leaf("b", &rule_factor_var);
    let b_term_1 = TreeNode::nonterminal(term.clone(), Rc::clone(&rule_term_factor), vec![b_factor_1]);
    let b_factor_2 = leaf("b", &rule_factor_var);
    let b_times_b = TreeNode::nonterminal(
        term.clone(),
        Rc::clone(&rule_term_times),
        vec![b_term_1, TreeNode::terminal(times, "*".to_string()), b_factor_2],
    );

    let root = TreeNode::nonterminal(
        expr,
        rule_expr_plus,
        vec![c_expr, TreeNode::terminal(plus, "+".to_string()), b_times_b],
    );

    let tree = SyntaxTree::new(root);
    assert_eq!(synthesize(&tree), "c+b*b");
}

/// Scenario F: a non-terminal node's debug text names its label and
/// generating rule.
#[test]
fn nonterminal_node_display_names_its_generating_rule() {
    let (grammar, _var, _plus, _times, expr, term, _factor) = arithmetic_grammar();
    let rule_expr_term = Rc::clone(&grammar.rules_for(&expr)[1]);

    let expr_node = TreeNode::nonterminal(expr, rule_expr_term, vec![TreeNode::wildcard_nonterminal(term)]);

    assert_eq!(format!("{}", expr_node), "type=NonTerminal, label=EXPR , generatorPR=EXPR -> TERM");
}

#[test]
fn clone_is_deep_and_structurally_equal() {
    let (grammar, var, _plus, _times, _expr, _term, factor) = arithmetic_grammar();
    let rule = Rc::clone(&grammar.rules_for(&factor)[0]);
    let tree = SyntaxTree::new(TreeNode::nonterminal(factor, rule, vec![TreeNode::terminal(var, "a".to_string())]));

    let mut cloned = tree.clone();
    assert_eq!(tree, cloned);

    cloned.root_mut().children_mut()[0] = TreeNode::terminal(Terminal::new(1, "var", vec!["z".into()]), "z".to_string());
    assert_ne!(tree, cloned);
}

#[test]
fn matches_treats_a_wildcard_nonterminal_as_matching_any_subtree() {
    let (grammar, var, _plus, _times, _expr, _term, factor) = arithmetic_grammar();
    let rule = Rc::clone(&grammar.rules_for(&factor)[0]);
    let concrete = TreeNode::nonterminal(factor.clone(), rule, vec![TreeNode::terminal(var, "a".to_string())]);
    let wildcard = TreeNode::wildcard_nonterminal(factor);

    assert!(wildcard.matches(&concrete));
    // Structural equality is strict: a wildcard is not equal to a concrete node.
    assert_ne!(wildcard, concrete);
}
