pub mod constants;

mod debug;
mod error;
mod exec;
mod instruction;
mod machine;

pub use crate::error::{warning, ErrorKind, MachineError, Warning};
pub use crate::instruction::{
    enum_to_u32, make_absolute_instruction, make_immediate_instruction, make_indexed_instruction,
    make_plain_instruction, Condition, Instruction, Opcode, Operand,
};
pub use crate::machine::{ConditionCode, Machine};

/// Width of every register and data cell.
pub type Word = i32;

/// Signed displacement of an indexed operand.
pub type Offset = i16;
