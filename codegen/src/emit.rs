//! Low-level LLVM IR text emitter.
//!
//! Accumulates IR text into a buffer and owns the two counters shared
//! across the whole function: one for unnamed SSA registers (`%1, %2, …`)
//! and one for jump targets (`label_1, label_2, …`). Both counters are
//! explicit, single-owned state threaded through `compile`, not global
//! mutable state, so two `Emitter`s can run side by side without stepping
//! on each other's register or label counters.

use std::fmt::Write as _;

/// An operand that can be used directly in an instruction: either a
/// register produced by a prior instruction, or a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(String),
    Literal(i32),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(r) => f.write_str(r),
            Operand::Literal(n) => write!(f, "{n}"),
        }
    }
}

/// Appends IR text to a buffer and allocates fresh registers and labels.
pub struct Emitter {
    buf: String,
    next_reg: u32,
    next_label: u32,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            buf: String::new(),
            next_reg: 1,
            next_label: 1,
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    /// Allocates a fresh SSA register name without emitting anything.
    pub fn fresh_reg(&mut self) -> String {
        let name = format!("%{}", self.next_reg);
        self.next_reg += 1;
        name
    }

    /// Allocates a fresh label name without emitting anything.
    pub fn fresh_label(&mut self) -> String {
        let name = format!("label_{}", self.next_label);
        self.next_label += 1;
        name
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        self.buf.write_fmt(args).expect("writing to a String cannot fail");
        self.buf.push('\n');
    }

    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn label(&mut self, name: &str) {
        self.line(format_args!("{name}:"));
    }

    pub fn emit_alloca(&mut self, var: &str) {
        self.line(format_args!("  %{var} = alloca i32"));
    }

    pub fn emit_store_i32(&mut self, value: &Operand, var: &str) {
        self.line(format_args!("  store i32 {value}, i32* %{var}"));
    }

    pub fn emit_load_i32(&mut self, var: &str) -> Operand {
        let reg = self.fresh_reg();
        self.line(format_args!("  {reg} = load i32, i32* %{var}"));
        Operand::Register(reg)
    }

    pub fn emit_binop(&mut self, opcode: &str, left: &Operand, right: &Operand) -> Operand {
        let reg = self.fresh_reg();
        self.line(format_args!("  {reg} = {opcode} i32 {left}, {right}"));
        Operand::Register(reg)
    }

    pub fn emit_icmp(&mut self, pred: &str, left: &Operand, right: &Operand) -> Operand {
        let reg = self.fresh_reg();
        self.line(format_args!("  {reg} = icmp {pred} i32 {left}, {right}"));
        Operand::Register(reg)
    }

    pub fn emit_xor_i1(&mut self, value: &Operand) -> Operand {
        let reg = self.fresh_reg();
        self.line(format_args!("  {reg} = xor i1 {value}, 1"));
        Operand::Register(reg)
    }

    pub fn emit_or_i1(&mut self, left: &Operand, right: &Operand) -> Operand {
        let reg = self.fresh_reg();
        self.line(format_args!("  {reg} = or i1 {left}, {right}"));
        Operand::Register(reg)
    }

    pub fn emit_br(&mut self, label: &str) {
        self.line(format_args!("  br label %{label}"));
    }

    pub fn emit_br_cond(&mut self, cond: &Operand, if_true: &str, if_false: &str) {
        self.line(format_args!(
            "  br i1 {cond}, label %{if_true}, label %{if_false}"
        ));
    }

    pub fn emit_call_printf(&mut self, value: &Operand) {
        self.line(format_args!(
            "  call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([4 x i8], [4 x i8]* @.strP, i64 0, i64 0), i32 {value})"
        ));
    }

    pub fn emit_call_scanf(&mut self, var: &str) {
        self.line(format_args!(
            "  call i32 (i8*, ...) @scanf(i8* getelementptr inbounds ([3 x i8], [3 x i8]* @.strS, i64 0, i64 0), i32* %{var})"
        ));
    }

    pub fn emit_ret_zero(&mut self) {
        self.line(format_args!("  ret i32 0"));
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::new()
    }
}
