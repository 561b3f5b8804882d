//! Turtle16 Assembly Instruction Definitions
//!
//! This module defines the instruction set and operand model for the
//! Turtle16 processor, as handed to the backend by the lowering stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Turtle16 opcodes
///
/// Mnemonics serialize in upper case (`"ADDI"`, `"CALLPTR"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    Nop,
    Hlt,

    // Memory
    Load,
    Store,
    Li,
    Liu,
    Lui,

    // Arithmetic and logic
    Cmp,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Not,
    Cmpi,
    Addi,
    Subi,
    Andi,
    Ori,
    Xori,
    Adc,
    Sbc,

    // Control flow
    Jmp,
    Jr,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bgt,
    Bltu,
    Bgtu,

    // Pseudo-instructions
    La,
    Call,
    Callptr,
    Enter,
    Leave,
    Ret,
    Break,
}

impl Opcode {
    /// Assembler mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Li => "LI",
            Opcode::Liu => "LIU",
            Opcode::Lui => "LUI",
            Opcode::Cmp => "CMP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Not => "NOT",
            Opcode::Cmpi => "CMPI",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Andi => "ANDI",
            Opcode::Ori => "ORI",
            Opcode::Xori => "XORI",
            Opcode::Adc => "ADC",
            Opcode::Sbc => "SBC",
            Opcode::Jmp => "JMP",
            Opcode::Jr => "JR",
            Opcode::Jalr => "JALR",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
            Opcode::Blt => "BLT",
            Opcode::Bgt => "BGT",
            Opcode::Bltu => "BLTU",
            Opcode::Bgtu => "BGTU",
            Opcode::La => "LA",
            Opcode::Call => "CALL",
            Opcode::Callptr => "CALLPTR",
            Opcode::Enter => "ENTER",
            Opcode::Leave => "LEAVE",
            Opcode::Ret => "RET",
            Opcode::Break => "BREAK",
        }
    }

    /// Conditional branches to a label
    pub fn is_conditional_branch(&self) -> bool {
        matches!(
            self,
            Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bgt | Opcode::Bltu | Opcode::Bgtu
        )
    }

    /// Instructions after which control may not fall through to the next
    /// instruction in the stream. These end a basic block.
    pub fn is_terminator(&self) -> bool {
        self.is_conditional_branch()
            || matches!(
                self,
                Opcode::Jmp
                    | Opcode::Jr
                    | Opcode::Jalr
                    | Opcode::Call
                    | Opcode::Callptr
                    | Opcode::Ret
                    | Opcode::Hlt
            )
    }

    /// The first operand is a destination register written by the instruction
    pub fn writes_first_operand(&self) -> bool {
        matches!(
            self,
            Opcode::Load
                | Opcode::Li
                | Opcode::Liu
                | Opcode::Lui
                | Opcode::Add
                | Opcode::Sub
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Not
                | Opcode::Addi
                | Opcode::Subi
                | Opcode::Andi
                | Opcode::Ori
                | Opcode::Xori
                | Opcode::Adc
                | Opcode::Sbc
                | Opcode::Jalr
                | Opcode::La
        )
    }

    /// Every register operand is read and none is written
    pub fn reads_all_operands(&self) -> bool {
        matches!(
            self,
            Opcode::Cmp | Opcode::Cmpi | Opcode::Store | Opcode::Jr | Opcode::Callptr
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Instruction operand
///
/// Register operands are kept apart from label references so that a branch
/// target or an address-of label can never be mistaken for a register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// Register name, virtual (`vr3`) or physical (`r0`, `fp`)
    Register(String),
    /// Branch target or address-of label
    Label(String),
    /// Immediate value
    Number(i32),
}

impl Operand {
    pub fn reg(name: &str) -> Self {
        Operand::Register(name.to_string())
    }

    pub fn label(name: &str) -> Self {
        Operand::Label(name.to_string())
    }

    pub fn num(value: i32) -> Self {
        Operand::Number(value)
    }

    /// Register name if this is a register operand
    pub fn as_register(&self) -> Option<&str> {
        match self {
            Operand::Register(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(name) => write!(f, "{}", name),
            Operand::Label(name) => write!(f, "{}", name),
            Operand::Number(value) => write!(f, "{}", value),
        }
    }
}

/// One entry of a linear instruction stream
///
/// Label declarations occupy a position in the stream like any instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsmInst {
    /// Label declaration
    Label(String),
    /// Machine or pseudo instruction
    Instruction {
        opcode: Opcode,
        #[serde(default)]
        operands: Vec<Operand>,
    },
}

impl AsmInst {
    pub fn label(name: &str) -> Self {
        AsmInst::Label(name.to_string())
    }

    pub fn op(opcode: Opcode, operands: Vec<Operand>) -> Self {
        AsmInst::Instruction { opcode, operands }
    }

    /// Instruction without operands (`RET`, `HLT`, ...)
    pub fn bare(opcode: Opcode) -> Self {
        AsmInst::Instruction {
            opcode,
            operands: Vec::new(),
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, AsmInst::Label(_))
    }

    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            AsmInst::Label(_) => None,
            AsmInst::Instruction { opcode, .. } => Some(*opcode),
        }
    }

    /// Operands in positional order; empty for labels
    pub fn operands(&self) -> &[Operand] {
        match self {
            AsmInst::Label(_) => &[],
            AsmInst::Instruction { operands, .. } => operands,
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode().is_some_and(|opcode| opcode.is_terminator())
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Label(name) => write!(f, "{}:", name),
            AsmInst::Instruction { opcode, operands } => {
                write!(f, "{}", opcode)?;
                for (i, operand) in operands.iter().enumerate() {
                    let separator = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}", separator, operand)?;
                }
                Ok(())
            }
        }
    }
}
