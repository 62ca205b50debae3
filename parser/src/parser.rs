//! The LL(1) recursive-descent parser. Consumes tokens with a single
//! symbol of lookahead and produces a `yalcc_dsl::ast::Program`, or fails
//! at the first mismatch with a single `SyntaxError` (no recovery).
//!
//! Function names and the rule numbers in their doc comments match the
//! grammar one-for-one so a mismatch is easy to locate.

use yalcc_dsl::ast::{Block, Expression, Operator, Program, Statement};
use yalcc_dsl::core::Id;
use yalcc_dsl::diagnostic::{Diagnostic, SyntaxError};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, Value};

/// Logs grammar-rule entry when the `trace` feature is enabled; compiled
/// out entirely otherwise so tracing costs nothing in a normal build.
#[cfg(feature = "trace")]
macro_rules! trace_rule {
    ($self:expr, $non_terminal:expr) => {
        log::trace!(
            "entering {} at {} (current: {:?})",
            $non_terminal,
            $self.current.loc,
            $self.current.kind
        )
    };
}
#[cfg(not(feature = "trace"))]
macro_rules! trace_rule {
    ($self:expr, $non_terminal:expr) => {};
}

/// Parses a complete YALCC program. This is the only entry point callers
/// need; everything else in this module is an implementation detail of
/// the grammar descent.
pub fn parse(source: &str) -> Result<Program, Diagnostic> {
    let mut parser = Parser::new(source)?;
    parser.program()
}

struct Parser<'s> {
    lexer: Lexer<'s>,
    current: Token,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Result<Self, Diagnostic> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next()?;
        Ok(Parser { lexer, current })
    }

    fn bump(&mut self) -> Result<Token, Diagnostic> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next()?);
        Ok(prev)
    }

    fn expect(&mut self, kind: TokenKind, non_terminal: &'static str) -> Result<Token, Diagnostic> {
        if self.current.kind == kind {
            self.bump()
        } else {
            Err(self.error(non_terminal, vec![kind.spelling()]))
        }
    }

    fn error(&self, non_terminal: &'static str, expected: Vec<&'static str>) -> Diagnostic {
        SyntaxError {
            at: self.current.loc,
            non_terminal,
            expected,
            got: self.current.display_value(),
        }
        .into()
    }

    /// [1] Program → `Prog` PROGNAME `Is` Code `End`
    fn program(&mut self) -> Result<Program, Diagnostic> {
        trace_rule!(self, "Program");
        self.expect(TokenKind::Prog, "Program")?;
        let name_tok = self.expect(TokenKind::ProgName, "Program")?;
        self.expect(TokenKind::Is, "Program")?;
        let body = self.code()?;
        self.expect(TokenKind::End, "Program")?;
        self.expect(TokenKind::Eos, "Program")?;
        Ok(Program {
            name: ident_of(name_tok),
            body,
        })
    }

    /// [2] Code → Instruction `;` Code
    /// [3] Code → ε    (FOLLOW = {End, Else})
    fn code(&mut self) -> Result<Block, Diagnostic> {
        trace_rule!(self, "Code");
        let mut stmts = Vec::new();
        while self.starts_instruction() {
            let stmt = self.instruction()?;
            self.expect(TokenKind::Semi, "Code")?;
            stmts.push(stmt);
        }
        Ok(stmts)
    }

    fn starts_instruction(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::VarName
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Input
        )
    }

    /// [4-8] Instruction → Assign | If | While | Output | Input
    fn instruction(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "Instruction");
        match self.current.kind {
            TokenKind::VarName => self.assign(),
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::Print => self.output(),
            TokenKind::Input => self.input(),
            _ => Err(self.error(
                "Instruction",
                vec!["<identifier>", "If", "While", "Print", "Input"],
            )),
        }
    }

    /// [9] Assign → VARNAME `=` ExprArith
    fn assign(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "Assign");
        let name_tok = self.expect(TokenKind::VarName, "Assign")?;
        self.expect(TokenKind::Assign, "Assign")?;
        let value = self.expr_arith()?;
        Ok(Statement::Assign {
            target: ident_of(name_tok),
            value,
        })
    }

    /// [10] ExprArith → Prod ExprArith'
    /// [11-13] folds the prime rules into a left-associative chain.
    fn expr_arith(&mut self) -> Result<Expression, Diagnostic> {
        trace_rule!(self, "ExprArith");
        let mut left = self.prod()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => Operator::Add,
                TokenKind::Minus => Operator::Sub,
                _ => break,
            };
            self.bump()?;
            let right = self.prod()?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// [14] Prod → Atom Prod'
    /// [15-17] folds the prime rules into a left-associative chain.
    fn prod(&mut self) -> Result<Expression, Diagnostic> {
        trace_rule!(self, "Prod");
        let mut left = self.atom()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Times => Operator::Mul,
                TokenKind::Divide => Operator::Div,
                _ => break,
            };
            self.bump()?;
            let right = self.atom()?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// [18-21] Atom → VARNAME | NUMBER | `(` ExprArith `)` | `-` Atom
    fn atom(&mut self) -> Result<Expression, Diagnostic> {
        trace_rule!(self, "Atom");
        match self.current.kind {
            TokenKind::VarName => {
                let tok = self.bump()?;
                Ok(Expression::VarRef(ident_of(tok)))
            }
            TokenKind::Number => {
                let tok = self.bump()?;
                Ok(Expression::Number(number_of(tok)))
            }
            TokenKind::LParen => {
                self.bump()?;
                let inner = self.expr_arith()?;
                self.expect(TokenKind::RParen, "Atom")?;
                Ok(inner)
            }
            TokenKind::Minus => {
                self.bump()?;
                let operand = self.atom()?;
                Ok(Expression::negate(operand))
            }
            _ => Err(self.error("Atom", vec!["<identifier>", "<number>", "(", "-"])),
        }
    }

    /// [22] If → `If` `{` Cond `}` `Then` Code IfTail
    /// [23-24] IfTail → `End` | `Else` Code `End`
    fn if_stmt(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "If");
        self.expect(TokenKind::If, "If")?;
        self.expect(TokenKind::LBrack, "If")?;
        let condition = self.cond()?;
        self.expect(TokenKind::RBrack, "If")?;
        self.expect(TokenKind::Then, "If")?;
        let then_block = self.code()?;
        match self.current.kind {
            TokenKind::End => {
                self.bump()?;
                Ok(Statement::If {
                    condition,
                    then_block,
                    else_block: None,
                })
            }
            TokenKind::Else => {
                self.bump()?;
                let else_block = self.code()?;
                self.expect(TokenKind::End, "IfTail")?;
                Ok(Statement::If {
                    condition,
                    then_block,
                    else_block: Some(else_block),
                })
            }
            _ => Err(self.error("IfTail", vec!["End", "Else"])),
        }
    }

    /// [25] Cond → SimpleCond Cond'
    /// [26] Cond' → `->` Cond    (right-associative)
    /// [27] Cond' → ε    (FOLLOW = {|, }})
    fn cond(&mut self) -> Result<Expression, Diagnostic> {
        trace_rule!(self, "Cond");
        let left = self.simple_cond()?;
        if self.current.kind == TokenKind::Implies {
            self.bump()?;
            let right = self.cond()?;
            Ok(Expression::BinOp {
                left: Box::new(left),
                op: Operator::Implies,
                right: Box::new(right),
            })
        } else {
            Ok(left)
        }
    }

    /// [28] SimpleCond → `|` Cond `|`    (transparent grouping)
    /// [29] SimpleCond → ExprArith Comp ExprArith
    fn simple_cond(&mut self) -> Result<Expression, Diagnostic> {
        trace_rule!(self, "SimpleCond");
        if self.current.kind == TokenKind::Pipe {
            self.bump()?;
            let inner = self.cond()?;
            self.expect(TokenKind::Pipe, "SimpleCond")?;
            Ok(inner)
        } else {
            let left = self.expr_arith()?;
            let op = self.comp()?;
            let right = self.expr_arith()?;
            Ok(Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            })
        }
    }

    /// [30-32] Comp → `==` | `<=` | `<`
    fn comp(&mut self) -> Result<Operator, Diagnostic> {
        trace_rule!(self, "Comp");
        match self.current.kind {
            TokenKind::Equal => {
                self.bump()?;
                Ok(Operator::Eq)
            }
            TokenKind::SmalEq => {
                self.bump()?;
                Ok(Operator::LtEq)
            }
            TokenKind::Smaller => {
                self.bump()?;
                Ok(Operator::Lt)
            }
            _ => Err(self.error("Comp", vec!["==", "<=", "<"])),
        }
    }

    /// [33] While → `While` `{` Cond `}` `Do` Code `End`
    fn while_stmt(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "While");
        self.expect(TokenKind::While, "While")?;
        self.expect(TokenKind::LBrack, "While")?;
        let condition = self.cond()?;
        self.expect(TokenKind::RBrack, "While")?;
        self.expect(TokenKind::Do, "While")?;
        let body = self.code()?;
        self.expect(TokenKind::End, "While")?;
        Ok(Statement::While { condition, body })
    }

    /// [34] Output → `Print` `(` VARNAME `)`
    fn output(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "Output");
        self.expect(TokenKind::Print, "Output")?;
        self.expect(TokenKind::LParen, "Output")?;
        let name_tok = self.expect(TokenKind::VarName, "Output")?;
        self.expect(TokenKind::RParen, "Output")?;
        Ok(Statement::Print(ident_of(name_tok)))
    }

    /// [35] Input → `Input` `(` VARNAME `)`
    fn input(&mut self) -> Result<Statement, Diagnostic> {
        trace_rule!(self, "Input");
        self.expect(TokenKind::Input, "Input")?;
        self.expect(TokenKind::LParen, "Input")?;
        let name_tok = self.expect(TokenKind::VarName, "Input")?;
        self.expect(TokenKind::RParen, "Input")?;
        Ok(Statement::Input(ident_of(name_tok)))
    }
}

/// `expect` only calls this on tokens it already confirmed carry an
/// identifier value, so the fallback branch is unreachable in practice.
fn ident_of(tok: Token) -> Id {
    match tok.value {
        Some(Value::Ident(s)) => Id::from(s),
        _ => unreachable!("token with kind ProgName/VarName always carries Value::Ident"),
    }
}

fn number_of(tok: Token) -> i32 {
    match tok.value {
        Some(Value::Number(n)) => n,
        _ => unreachable!("token with kind Number always carries Value::Number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Program {
        parse(src).unwrap_or_else(|e| panic!("expected {src:?} to parse, got {e}"))
    }

    fn err(src: &str) -> Diagnostic {
        parse(src).expect_err("expected a parse failure")
    }

    #[test]
    fn empty_program_body() {
        let p = ok("Prog P Is End");
        assert_eq!(p.name, Id::from("P"));
        assert!(p.body.is_empty());
    }

    #[test]
    fn assignment_with_precedence() {
        let p = ok("Prog P Is x = 1 + 2 * 3; End");
        assert_eq!(
            p.body,
            vec![Statement::Assign {
                target: Id::from("x"),
                value: Expression::BinOp {
                    left: Box::new(Expression::Number(1)),
                    op: Operator::Add,
                    right: Box::new(Expression::BinOp {
                        left: Box::new(Expression::Number(2)),
                        op: Operator::Mul,
                        right: Box::new(Expression::Number(3)),
                    }),
                },
            }]
        );
    }

    #[test]
    fn left_associative_subtraction() {
        let p = ok("Prog P Is x = a - b - c; End");
        // (a - b) - c
        match &p.body[0] {
            Statement::Assign { value, .. } => match value {
                Expression::BinOp { left, op: Operator::Sub, right } => {
                    assert!(matches!(**right, Expression::VarRef(_)));
                    assert!(matches!(**left, Expression::BinOp { op: Operator::Sub, .. }));
                }
                _ => panic!("expected outer Sub"),
            },
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn right_associative_implication() {
        let p = ok("Prog P Is If { a -> b -> c } Then x = 1; End End");
        match &p.body[0] {
            Statement::If { condition, .. } => match condition {
                Expression::BinOp { left, op: Operator::Implies, right } => {
                    assert!(matches!(**left, Expression::VarRef(_)));
                    assert!(matches!(**right, Expression::BinOp { op: Operator::Implies, .. }));
                }
                _ => panic!("expected outer Implies"),
            },
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn unary_minus_lowers_to_zero_minus_operand() {
        let p = ok("Prog P Is y = -x; End");
        match &p.body[0] {
            Statement::Assign { value, .. } => {
                assert_eq!(
                    *value,
                    Expression::BinOp {
                        left: Box::new(Expression::Number(0)),
                        op: Operator::Sub,
                        right: Box::new(Expression::VarRef(Id::from("x"))),
                    }
                );
            }
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn pipe_grouping_is_transparent() {
        let p = ok("Prog P Is If { |x == 1| -> x < 10 } Then Print(x); End End");
        match &p.body[0] {
            Statement::If { condition, .. } => {
                assert!(matches!(condition, Expression::BinOp { op: Operator::Implies, .. }));
            }
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn if_else_distinguishes_absent_from_empty_else() {
        let p1 = ok("Prog P Is If { x == 1 } Then Print(x); End End");
        assert!(matches!(
            &p1.body[0],
            Statement::If { else_block: None, .. }
        ));

        let p2 = ok("Prog P Is If { x == 1 } Then Print(x); Else End End");
        assert!(matches!(
            &p2.body[0],
            Statement::If { else_block: Some(b), .. } if b.is_empty()
        ));
    }

    #[test]
    fn print_and_input_take_only_a_variable() {
        let p = ok("Prog P Is Input(n); Print(n); End");
        assert_eq!(
            p.body,
            vec![
                Statement::Input(Id::from("n")),
                Statement::Print(Id::from("n")),
            ]
        );
    }

    #[test]
    fn while_loop() {
        let p = ok("Prog P Is While { x < 3 } Do x = x + 1; End End");
        assert!(matches!(&p.body[0], Statement::While { .. }));
    }

    #[test]
    fn trailing_plus_before_semicolon_is_a_syntax_error_at_the_semicolon() {
        let diag = err("Prog P Is x = 1 +; End");
        match diag {
            Diagnostic::Syntax(e) => {
                assert_eq!(e.got, ";");
                assert_eq!(e.non_terminal, "Atom");
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn missing_end_is_a_syntax_error() {
        let diag = err("Prog P Is x = 1;");
        assert!(matches!(diag, Diagnostic::Syntax(_)));
    }

    #[test]
    fn bad_first_token_reports_program() {
        let diag = err("Begin P Is End");
        match diag {
            Diagnostic::Syntax(e) => assert_eq!(e.non_terminal, "Program"),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }
}
