//! Instruction Disassembler for LDmicro interpretable code.
//!
//! Converts typed instructions into the compiler's own listing notation for
//! debug tracing, logging, and test diagnostics. Relays are shown as
//! `bits[addr]` and integers as `int16s[addr]`, addresses in three hex digits.
//!
//! Conditional jumps are printed the way the compiler thinks of them,
//! `unless (test) jump TTT+1`, with `TTT` the stored target: execution resumes
//! one past it.
//!
//! # Usage
//!
//! ```
//! use ldvm_core::common::{BitAddr, JumpTarget};
//! use ldvm_core::isa::Instruction;
//! use ldvm_core::isa::disasm::disassemble;
//!
//! let inst = Instruction::JumpIfBitClear { bit: BitAddr(2), target: JumpTarget::from_encoded(7) };
//! assert_eq!(disassemble(&inst), "unless (bits[002] set) jump 007+1");
//! ```

use crate::isa::instruction::Instruction;

/// Disassembles one instruction into a single listing line (no pc prefix).
pub fn disassemble(inst: &Instruction) -> String {
    match *inst {
        // ── Relays ────────────────────────────────────────
        Instruction::SetBit { bit } => format!("{bit} := 1"),
        Instruction::ClearBit { bit } => format!("{bit} := 0"),
        Instruction::CopyBit { dst, src } => format!("{dst} := {src}"),

        // ── Integers ──────────────────────────────────────
        Instruction::SetInt { dst, value } => {
            format!("{dst} := {value} (0x{:04x})", value as u16)
        }
        Instruction::CopyInt { dst, src } => format!("{dst} := {src}"),
        Instruction::IncrementInt { var } => format!("({var})++"),
        Instruction::Arith { op, dst, lhs, rhs } => {
            format!("{dst} := {lhs} {} {rhs}", op.symbol())
        }

        // ── Conditionals ("unless") ───────────────────────
        Instruction::JumpIfBitClear { bit, target } => {
            format!("unless ({bit} set) jump {target}")
        }
        Instruction::JumpIfBitSet { bit, target } => {
            format!("unless ({bit} clear) jump {target}")
        }
        Instruction::JumpUnlessLess {
            var,
            literal,
            target,
        } => format!("unless ({var} < {literal}) jump {target}"),
        Instruction::JumpUnlessEqual { lhs, rhs, target } => {
            format!("unless ({lhs} == {rhs}) jump {target}")
        }
        Instruction::JumpUnlessGreater { lhs, rhs, target } => {
            format!("unless ({lhs} > {rhs}) jump {target}")
        }

        // ── Control ───────────────────────────────────────
        Instruction::Jump { target } => format!("jump {target}"),
        Instruction::EndOfProgram => "<end of program>".to_string(),
    }
}

/// Disassembles a program into listing lines, each prefixed with its `pc` as `%03x: `.
///
/// Stops after the first end-of-program marker, since nothing past it runs.
pub fn disassemble_program(program: &[Instruction]) -> Vec<String> {
    let mut lines = Vec::with_capacity(program.len());
    for (pc, inst) in program.iter().enumerate() {
        lines.push(format!("{pc:03x}: {}", disassemble(inst)));
        if inst.is_end() {
            break;
        }
    }
    lines
}

/// Renders a full program listing, one instruction per line.
pub fn listing(program: &[Instruction]) -> String {
    let mut out = disassemble_program(program).join("\n");
    out.push('\n');
    out
}
