use crate::{constants, Offset, Word};
use num::traits::ToPrimitive;
use num::FromPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};
use std::fmt;

/// Machine instruction set.
///
/// The discriminants are the raw `cop` values; any raw value outside this
/// enumeration is an *unknown* operation, which is not the same thing as
/// [`Opcode::ILLOP`](enum.Opcode.html#variant.ILLOP).
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Opcode {
    /// Illegal operation, stops the machine.
    ILLOP,
    /// Does nothing.
    NOP,
    /// `R <- value` or `R <- data[addr]`. Updates the condition code.
    LOAD,
    /// `data[addr] <- R`. Immediate operands are rejected.
    STORE,
    /// `R <- R + value` or `R <- R + data[addr]`. Updates the condition code.
    ADD,
    /// `R <- R - value` or `R <- R - data[addr]`. Updates the condition code.
    SUB,
    /// `PC <- addr` when the condition holds. Immediate operands are rejected.
    BRANCH,
    /// Pushes the return address and jumps when the condition holds.
    CALL,
    /// Pops the return address into `PC`.
    RET,
    /// Pushes a value or a data cell onto the stack.
    PUSH,
    /// Pops the top of the stack into `data[addr]`. Immediate operands are rejected.
    POP,
    /// Orderly stop.
    HALT,
}

/// Branch and call conditions, stored in the `regcond` field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Condition {
    /// Always satisfied.
    NC,
    /// Last result was zero.
    EQ,
    /// Last result was not zero.
    NE,
    /// Last result was strictly positive.
    GT,
    /// Last result was positive or zero.
    GE,
    /// Last result was strictly negative.
    LT,
    /// Last result was negative or zero.
    LE,
}

/// The operand of an instruction, decoded from the payload field according
/// to the two mode bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand {
    /// A literal value carried by the instruction itself.
    Immediate(Word),
    /// A data address computed as `registers[rindex] + offset`.
    Indexed { rindex: u32, offset: Offset },
    /// A data address used verbatim.
    Absolute(u32),
}

/// One packed instruction word.
///
/// The raw form is kept for storage and disassembly; every consumer goes
/// through the field accessors or through [`operand`](#method.operand),
/// which selects the view the mode bits call for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    raw: u32,
}

impl Instruction {
    pub fn from_raw(raw: u32) -> Instruction {
        Instruction { raw }
    }

    pub fn raw(self) -> u32 {
        self.raw
    }

    /// The raw operation code field.
    pub fn cop(self) -> u32 {
        (self.raw & constants::COP_MASK) >> constants::COP_OFFSET
    }

    /// The operation, or `None` for an unknown `cop` value.
    pub fn opcode(self) -> Option<Opcode> {
        Opcode::from_u32(self.cop())
    }

    pub fn immediate(self) -> bool {
        self.raw & constants::IMMEDIATE_MASK != 0
    }

    pub fn indexed(self) -> bool {
        self.raw & constants::INDEXED_MASK != 0
    }

    /// The register index, or the condition tag for `BRANCH` and `CALL`.
    pub fn regcond(self) -> u32 {
        (self.raw & constants::REGCOND_MASK) >> constants::REGCOND_OFFSET
    }

    /// The condition tag, or `None` when `regcond` holds no valid tag.
    pub fn condition(self) -> Option<Condition> {
        Condition::from_u32(self.regcond())
    }

    /// Decodes the payload field under the view selected by the mode bits.
    pub fn operand(self) -> Operand {
        if self.immediate() {
            let mut value = (self.raw & constants::VALUE_MASK) >> constants::VALUE_OFFSET;
            if value & constants::VALUE_SIGN_MASK != 0 {
                value |= constants::VALUE_EXTENSION;
            }
            Operand::Immediate(value as Word)
        } else if self.indexed() {
            let rindex = (self.raw & constants::RINDEX_MASK) >> constants::RINDEX_OFFSET;
            let offset = ((self.raw & constants::OFFSET_MASK) >> constants::OFFSET_OFFSET) as u16;
            Operand::Indexed {
                rindex,
                offset: offset as Offset,
            }
        } else {
            Operand::Absolute((self.raw & constants::ADDRESS_MASK) >> constants::ADDRESS_OFFSET)
        }
    }
}

#[inline]
pub fn enum_to_u32<T: ToPrimitive + Copy>(val: T) -> u32 {
    val.to_u32().unwrap()
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);
impl_enum_display!(Condition);

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operand::Immediate(value) => write!(f, "#{}", value),
            Operand::Indexed { rindex, offset } => write!(f, "{}[R{:02}]", offset, rindex),
            Operand::Absolute(address) => write!(f, "@0x{:04x}", address),
        }
    }
}

/// Symbolic rendering, one instruction per line, used by the trace, the
/// program dump and the debugger. Rendering never fails: unknown operations
/// and out-of-range condition tags fall back to their numeric fields.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self.opcode() {
            Some(op) => op,
            None => return write!(f, "OP{}", self.cop()),
        };
        match op {
            Opcode::LOAD | Opcode::STORE | Opcode::ADD | Opcode::SUB => {
                write!(f, "{} R{:02}, {}", op, self.regcond(), self.operand())
            }
            Opcode::BRANCH | Opcode::CALL => match self.condition() {
                Some(cond) => write!(f, "{} {}, {}", op, cond, self.operand()),
                None => write!(f, "{} {}, {}", op, self.regcond(), self.operand()),
            },
            Opcode::PUSH | Opcode::POP => write!(f, "{} {}", op, self.operand()),
            Opcode::ILLOP | Opcode::NOP | Opcode::RET | Opcode::HALT => write!(f, "{}", op),
        }
    }
}

/// Constructs an absolute-mode instruction.
#[inline]
pub fn make_absolute_instruction(oc: Opcode, regcond: u32, address: u32) -> Instruction {
    Instruction::from_raw(
        ((enum_to_u32(oc) << constants::COP_OFFSET) & constants::COP_MASK)
            | ((regcond << constants::REGCOND_OFFSET) & constants::REGCOND_MASK)
            | ((address << constants::ADDRESS_OFFSET) & constants::ADDRESS_MASK),
    )
}

/// Constructs an indexed-mode instruction.
#[inline]
pub fn make_indexed_instruction(oc: Opcode, regcond: u32, rindex: u32, offset: Offset) -> Instruction {
    Instruction::from_raw(
        ((enum_to_u32(oc) << constants::COP_OFFSET) & constants::COP_MASK)
            | constants::INDEXED_MASK
            | ((regcond << constants::REGCOND_OFFSET) & constants::REGCOND_MASK)
            | ((rindex << constants::RINDEX_OFFSET) & constants::RINDEX_MASK)
            | ((((offset as u16) as u32) << constants::OFFSET_OFFSET) & constants::OFFSET_MASK),
    )
}

/// Constructs an immediate-mode instruction.
#[inline]
pub fn make_immediate_instruction(oc: Opcode, regcond: u32, value: Word) -> Instruction {
    Instruction::from_raw(
        ((enum_to_u32(oc) << constants::COP_OFFSET) & constants::COP_MASK)
            | constants::IMMEDIATE_MASK
            | ((regcond << constants::REGCOND_OFFSET) & constants::REGCOND_MASK)
            | (((value as u32) << constants::VALUE_OFFSET) & constants::VALUE_MASK),
    )
}

/// Constructs an operand-less instruction (`ILLOP`, `NOP`, `RET`, `HALT`).
#[inline]
pub fn make_plain_instruction(oc: Opcode) -> Instruction {
    make_absolute_instruction(oc, 0, 0)
}

/// Constructs an absolute-mode instruction.
#[macro_export]
macro_rules! instr_abs {
    ($opcode:ident, $regcond:expr, $address:expr) => {
        $crate::make_absolute_instruction($crate::Opcode::$opcode, $regcond, $address)
    };
}

/// Constructs an indexed-mode instruction.
#[macro_export]
macro_rules! instr_idx {
    ($opcode:ident, $regcond:expr, $rindex:expr, $offset:expr) => {
        $crate::make_indexed_instruction($crate::Opcode::$opcode, $regcond, $rindex, $offset)
    };
}

/// Constructs an immediate-mode instruction.
#[macro_export]
macro_rules! instr_imm {
    ($opcode:ident, $regcond:expr, $value:expr) => {
        $crate::make_immediate_instruction($crate::Opcode::$opcode, $regcond, $value)
    };
}

/// Constructs a `BRANCH` or `CALL` with a symbolic condition and an
/// absolute target.
#[macro_export]
macro_rules! instr_cond {
    ($opcode:ident, $cond:ident, $address:expr) => {
        $crate::make_absolute_instruction(
            $crate::Opcode::$opcode,
            $crate::enum_to_u32($crate::Condition::$cond),
            $address,
        )
    };
}

/// Constructs an operand-less instruction.
#[macro_export]
macro_rules! instr_op {
    ($opcode:ident) => {
        $crate::make_plain_instruction($crate::Opcode::$opcode)
    };
}
