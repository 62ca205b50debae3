//! The Collector: a single structured descent over the AST that discovers
//! every variable name so the Emitter can allocate all storage slots in
//! the function prologue before any use.
//!
//! LLVM requires every `alloca`'s uses to be dominated by the `alloca`
//! itself. Emitting all allocas in the entry block, ahead of any control
//! flow, is the simplest way to satisfy dominance without tracking
//! individual definition sites.

use std::collections::HashSet;

use crate::ast::{Block, Expression, Program, Statement};
use crate::core::Id;

/// The set of variable names discovered in a program. Collection order
/// matches first occurrence in source order; the spec only requires
/// membership, but a stable order keeps emitted `alloca`s reproducible.
#[derive(Debug, Default)]
pub struct VariableSet {
    order: Vec<Id>,
    seen: HashSet<Id>,
}

impl VariableSet {
    fn new() -> Self {
        VariableSet::default()
    }

    fn insert(&mut self, id: &Id) {
        if self.seen.insert(id.clone()) {
            self.order.push(id.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.order.iter()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Runs the Collector over a whole program.
pub fn collect(program: &Program) -> VariableSet {
    let mut vars = VariableSet::new();
    collect_block(&program.body, &mut vars);
    vars
}

fn collect_block(block: &Block, vars: &mut VariableSet) {
    for stmt in block {
        collect_statement(stmt, vars);
    }
}

fn collect_statement(stmt: &Statement, vars: &mut VariableSet) {
    match stmt {
        Statement::Assign { target, value } => {
            vars.insert(target);
            collect_expression(value, vars);
        }
        Statement::If {
            condition,
            then_block,
            else_block,
        } => {
            collect_expression(condition, vars);
            collect_block(then_block, vars);
            if let Some(else_block) = else_block {
                collect_block(else_block, vars);
            }
        }
        Statement::While { condition, body } => {
            collect_expression(condition, vars);
            collect_block(body, vars);
        }
        Statement::Print(id) => vars.insert(id),
        Statement::Input(id) => vars.insert(id),
    }
}

fn collect_expression(expr: &Expression, vars: &mut VariableSet) {
    match expr {
        Expression::Number(_) => {}
        Expression::VarRef(id) => vars.insert(id),
        Expression::BinOp { left, right, .. } => {
            collect_expression(left, vars);
            collect_expression(right, vars);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    fn id(s: &str) -> Id {
        Id::from(s)
    }

    #[test]
    fn collects_assign_and_rhs_varrefs() {
        let program = Program {
            name: id("P"),
            body: vec![
                Statement::Assign {
                    target: id("x"),
                    value: Expression::Number(1),
                },
                Statement::Assign {
                    target: id("y"),
                    value: Expression::BinOp {
                        left: Box::new(Expression::VarRef(id("x"))),
                        op: Operator::Add,
                        right: Box::new(Expression::Number(2)),
                    },
                },
            ],
        };
        let vars = collect(&program);
        assert_eq!(vars.len(), 2);
        assert!(vars.contains(&id("x")));
        assert!(vars.contains(&id("y")));
    }

    #[test]
    fn collects_through_nested_if_and_while() {
        let program = Program {
            name: id("P"),
            body: vec![Statement::While {
                condition: Expression::BinOp {
                    left: Box::new(Expression::VarRef(id("i"))),
                    op: Operator::Lt,
                    right: Box::new(Expression::Number(10)),
                },
                body: vec![Statement::If {
                    condition: Expression::VarRef(id("flag")),
                    then_block: vec![Statement::Input(id("n"))],
                    else_block: Some(vec![Statement::Print(id("n"))]),
                }],
            }],
        };
        let vars = collect(&program);
        for name in ["i", "flag", "n"] {
            assert!(vars.contains(&id(name)), "missing {name}");
        }
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn empty_program_has_no_variables() {
        let program = Program {
            name: id("P"),
            body: vec![],
        };
        assert!(collect(&program).is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::ast::{Expression, Operator, Program, Statement};
    use proptest::prelude::*;
    use std::collections::HashSet;

    const POOL: [&str; 4] = ["a", "b", "c", "d"];

    /// One touch of a variable somewhere in a generated block: either an
    /// assignment (`target = pool[rhs]`), a `Print`, or an `Input`.
    #[derive(Debug, Clone)]
    enum Touch {
        Assign { target: usize, rhs: usize },
        Print(usize),
        Input(usize),
    }

    fn arb_touch() -> impl Strategy<Value = Touch> {
        prop_oneof![
            (0..POOL.len(), 0..POOL.len())
                .prop_map(|(target, rhs)| Touch::Assign { target, rhs }),
            (0..POOL.len()).prop_map(Touch::Print),
            (0..POOL.len()).prop_map(Touch::Input),
        ]
    }

    fn build_block(touches: &[Touch]) -> (Block, HashSet<Id>) {
        let mut block = Vec::new();
        let mut expected = HashSet::new();
        for touch in touches {
            match touch {
                Touch::Assign { target, rhs } => {
                    let target_id = Id::from(POOL[*target]);
                    let rhs_id = Id::from(POOL[*rhs]);
                    expected.insert(target_id.clone());
                    expected.insert(rhs_id.clone());
                    block.push(Statement::Assign {
                        target: target_id,
                        value: Expression::BinOp {
                            left: Box::new(Expression::VarRef(rhs_id)),
                            op: Operator::Add,
                            right: Box::new(Expression::Number(0)),
                        },
                    });
                }
                Touch::Print(i) => {
                    let id = Id::from(POOL[*i]);
                    expected.insert(id.clone());
                    block.push(Statement::Print(id));
                }
                Touch::Input(i) => {
                    let id = Id::from(POOL[*i]);
                    expected.insert(id.clone());
                    block.push(Statement::Input(id));
                }
            }
        }
        (block, expected)
    }

    proptest! {
        /// The Collector finds exactly the variable names touched anywhere
        /// in a flat block, regardless of how many times or in what order
        /// each is touched — the Collector only cares about membership, not count.
        #[test]
        fn collects_exactly_the_touched_variables(touches in prop::collection::vec(arb_touch(), 0..12)) {
            let (body, expected) = build_block(&touches);
            let program = Program { name: Id::from("P"), body };
            let found: HashSet<Id> = collect(&program).iter().cloned().collect();
            prop_assert_eq!(found, expected);
        }

        /// Wrapping the same touches inside a `While` body changes nothing
        /// about which variables are found (the condition variable is
        /// additionally collected).
        #[test]
        fn collects_through_a_wrapping_while(
            touches in prop::collection::vec(arb_touch(), 0..8),
            cond_var in 0..POOL.len(),
        ) {
            let (body, mut expected) = build_block(&touches);
            let cond_id = Id::from(POOL[cond_var]);
            expected.insert(cond_id.clone());
            let program = Program {
                name: Id::from("P"),
                body: vec![Statement::While {
                    condition: Expression::VarRef(cond_id),
                    body,
                }],
            };
            let found: HashSet<Id> = collect(&program).iter().cloned().collect();
            prop_assert_eq!(found, expected);
        }
    }
}
