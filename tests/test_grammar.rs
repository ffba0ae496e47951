//! Tests for production rules and grammar construction.
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

fn arithmetic_rules() -> Vec<ProductionRule> {
    let var = Terminal::new(1, "var", vec!["x".into(), "y".into(), "1".into()]);
    let plus = Terminal::new(2, "Plus", vec!["+".into()]);
    let times = Terminal::new(3, "Times", vec!["*".into()]);
    let lparen = Terminal::new(4, "LeftParenthesis", vec!["(".into()]);
    let rparen = Terminal::new(5, "RightParenthesis", vec![")".into()]);

    let expr = NonTerminal::new(6, "EXPR");
    let term = NonTerminal::new(7, "TERM");
    let factor = NonTerminal::new(8, "FACTOR");

    vec![
        ProductionRule::new(expr.clone(), vec![expr.clone().into(), plus.into(), term.clone().into()]).unwrap(),
        ProductionRule::new(expr.clone(), vec![term.clone().into()]).unwrap(),
        ProductionRule::new(term.clone(), vec![term.clone().into(), times.into(), factor.clone().into()]).unwrap(),
        ProductionRule::new(term, vec![factor.clone().into()]).unwrap(),
        ProductionRule::new(factor.clone(), vec![lparen.into(), expr.into(), rparen.into()]).unwrap(),
        ProductionRule::new(factor, vec![var.into()]).unwrap(),
    ]
}

#[test]
fn rule_text_matches_the_canonical_form() {
    let rules = arithmetic_rules();
    assert_eq!(rules[0].text(), "EXPR -> EXPR Plus TERM");
    assert_eq!(rules[1].text(), "EXPR -> TERM");
    assert_eq!(rules[2].text(), "TERM -> TERM Times FACTOR");
    assert_eq!(rules[3].text(), "TERM -> FACTOR");
    assert_eq!(rules[4].text(), "FACTOR -> LeftParenthesis EXPR RightParenthesis");
    assert_eq!(rules[5].text(), "FACTOR -> var");
}

#[test]
fn grammar_builds_from_a_consistent_rule_set() {
    let grammar = Grammar::new(arithmetic_rules()).unwrap();
    assert_eq!(grammar.start_symbol().label, "EXPR");
    assert_eq!(grammar.rules().len(), 6);
}

#[test]
fn grammar_rejects_a_dangling_nonterminal() {
    let expr = NonTerminal::new(1, "EXPR");
    let orphan = NonTerminal::new(2, "ORPHAN");
    let rule = ProductionRule::new(expr, vec![orphan.into()]).unwrap();
    let err = Grammar::new(vec![rule]).unwrap_err();
    assert!(err.to_string().contains("ORPHAN"));
}

#[test]
fn empty_rhs_is_rejected_at_rule_construction() {
    let expr = NonTerminal::new(1, "EXPR");
    assert!(ProductionRule::new(expr, vec![]).is_err());
}

#[test]
fn rules_for_returns_every_alternative_in_declaration_order() {
    let grammar = Grammar::new(arithmetic_rules()).unwrap();
    let term = NonTerminal::new(7, "TERM");
    let rules = grammar.rules_for(&term);
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].text(), "TERM -> TERM Times FACTOR");
    assert_eq!(rules[1].text(), "TERM -> FACTOR");
}
