use std::error::Error as StdError;
use std::fmt;

/// Fatal error classes. Every one of them stops the simulation; the
/// caller owns printing and process exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// Operation code outside the instruction set.
    Unknown,
    /// `ILLOP` executed, or a register index out of range.
    Illegal,
    /// Condition tag outside the condition table.
    Condition,
    /// Immediate mode on an operation that forbids it.
    Immediate,
    /// Reserved: instruction fetch past the end of the code segment.
    SegText,
    /// Data access outside `[0, dataend)`.
    SegData,
    /// Stack access outside `[dataend, datasize)`.
    SegStack,
}

impl ErrorKind {
    fn name(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "UNKNOWN",
            ErrorKind::Illegal => "ILLEGAL",
            ErrorKind::Condition => "CONDITION",
            ErrorKind::Immediate => "IMMEDIATE",
            ErrorKind::SegText => "SEGTEXT",
            ErrorKind::SegData => "SEGDATA",
            ErrorKind::SegStack => "SEGSTACK",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fatal error, tagged with the code address of the offending
/// instruction (the program counter captured at fetch).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MachineError {
    pub kind: ErrorKind,
    pub addr: u32,
}

impl MachineError {
    pub fn new(kind: ErrorKind, addr: u32) -> MachineError {
        MachineError { kind, addr }
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Erreur {} à l'adresse 0x{:x}.", self.kind, self.addr)
    }
}

impl StdError for MachineError {}

/// Non-fatal diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Warning {
    /// `HALT` executed.
    Halt,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Warning::Halt => f.write_str("HALT"),
        }
    }
}

/// Prints a warning. Unlike errors, warnings never stop the simulation.
pub fn warning(warn: Warning, addr: u32) {
    eprintln!("Warning {} à l'adresse 0x{:x}.", warn, addr);
}
