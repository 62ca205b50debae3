//! Walks a YALCC AST and lowers it to a complete LLVM IR text module.
//! This is the only function most callers need; `emit` holds the
//! low-level instruction builder this module drives.

use yalcc_dsl::ast::{Block, Expression, Operator, Program, Statement};
use yalcc_dsl::collector;

use crate::emit::{Emitter, Operand};
use crate::error::CodegenError;

/// Lowers `program` to a complete, self-contained LLVM IR module.
pub fn compile(program: &Program) -> Result<String, CodegenError> {
    let vars = collector::collect(program);
    for var in vars.iter() {
        if !var.is_llvm_safe() {
            return Err(CodegenError::UnsafeIdentifier(var.to_string()));
        }
    }

    let mut emitter = Emitter::new();
    emit_header(&mut emitter);

    emitter.raw("define i32 @main() {");
    emitter.label("entry");
    for var in vars.iter() {
        emitter.emit_alloca(var.as_str());
        emitter.emit_store_i32(&Operand::Literal(0), var.as_str());
    }

    lower_block(&program.body, &mut emitter);

    emitter.emit_ret_zero();
    emitter.raw("}");

    Ok(emitter.finish())
}

fn emit_header(emitter: &mut Emitter) {
    emitter.raw("; Target: LLVM IR");
    emitter.raw("declare i32 @printf(i8*, ...)");
    emitter.raw("declare i32 @scanf(i8*, ...)");
    emitter.raw(r#"@.strP = private unnamed_addr constant [4 x i8] c"%d\0A\00", align 1"#);
    emitter.raw(r#"@.strS = private unnamed_addr constant [3 x i8] c"%d\00", align 1"#);
    emitter.raw("");
}

fn lower_block(block: &Block, emitter: &mut Emitter) {
    for stmt in block {
        lower_statement(stmt, emitter);
    }
}

fn lower_statement(stmt: &Statement, emitter: &mut Emitter) {
    match stmt {
        Statement::Assign { target, value } => {
            let op = lower_expression(value, emitter);
            emitter.emit_store_i32(&op, target.as_str());
        }
        Statement::Print(id) => {
            let loaded = emitter.emit_load_i32(id.as_str());
            emitter.emit_call_printf(&loaded);
        }
        Statement::Input(id) => {
            emitter.emit_call_scanf(id.as_str());
        }
        Statement::If {
            condition,
            then_block,
            else_block,
        } => lower_if(condition, then_block, else_block.as_ref(), emitter),
        Statement::While { condition, body } => lower_while(condition, body, emitter),
    }
}

/// Allocates three fresh labels (`Lt`, `Lf`, `Lend`) regardless of whether
/// an else branch is present, so label numbering is stable across both
/// shapes: when there is no else, `Lf` is allocated but never emitted and
/// the false edge of the branch targets `Lend` directly.
fn lower_if(
    condition: &Expression,
    then_block: &Block,
    else_block: Option<&Block>,
    emitter: &mut Emitter,
) {
    let then_label = emitter.fresh_label();
    let false_label = emitter.fresh_label();
    let end_label = emitter.fresh_label();

    let cond_op = lower_expression(condition, emitter);

    match else_block {
        None => {
            emitter.emit_br_cond(&cond_op, &then_label, &end_label);
            emitter.label(&then_label);
            lower_block(then_block, emitter);
            emitter.emit_br(&end_label);
            emitter.label(&end_label);
        }
        Some(else_block) => {
            emitter.emit_br_cond(&cond_op, &then_label, &false_label);
            emitter.label(&then_label);
            lower_block(then_block, emitter);
            emitter.emit_br(&end_label);
            emitter.label(&false_label);
            lower_block(else_block, emitter);
            emitter.emit_br(&end_label);
            emitter.label(&end_label);
        }
    }
}

/// The condition is lowered inside `Lcond` (not the predecessor block) so
/// the loop-back edge is a valid back edge in SSA form.
fn lower_while(condition: &Expression, body: &Block, emitter: &mut Emitter) {
    let cond_label = emitter.fresh_label();
    let body_label = emitter.fresh_label();
    let end_label = emitter.fresh_label();

    emitter.emit_br(&cond_label);
    emitter.label(&cond_label);
    let cond_op = lower_expression(condition, emitter);
    emitter.emit_br_cond(&cond_op, &body_label, &end_label);
    emitter.label(&body_label);
    lower_block(body, emitter);
    emitter.emit_br(&cond_label);
    emitter.label(&end_label);
}

/// Child subexpressions are lowered left-before-right.
fn lower_expression(expr: &Expression, emitter: &mut Emitter) -> Operand {
    match expr {
        Expression::Number(n) => Operand::Literal(*n),
        Expression::VarRef(id) => emitter.emit_load_i32(id.as_str()),
        Expression::BinOp { left, op, right } => {
            let l = lower_expression(left, emitter);
            match op {
                Operator::Add => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_binop("add", &l, &r)
                }
                Operator::Sub => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_binop("sub", &l, &r)
                }
                Operator::Mul => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_binop("mul", &l, &r)
                }
                Operator::Div => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_binop("sdiv", &l, &r)
                }
                Operator::Eq => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_icmp("eq", &l, &r)
                }
                Operator::Lt => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_icmp("slt", &l, &r)
                }
                Operator::LtEq => {
                    let r = lower_expression(right, emitter);
                    emitter.emit_icmp("sle", &l, &r)
                }
                Operator::Implies => {
                    // Both sides are evaluated (no short-circuit); the
                    // language does not mandate one.
                    let not_l = emitter.emit_xor_i1(&l);
                    let r = lower_expression(right, emitter);
                    emitter.emit_or_i1(&not_l, &r)
                }
            }
        }
    }
}
