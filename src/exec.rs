use crate::error::{warning, ErrorKind, MachineError, Warning};
use crate::instruction::{Condition, Instruction, Opcode, Operand};
use crate::machine::{ConditionCode, Machine};
use crate::{constants, Word};

fn check_immediate(instr: Instruction, addr: u32) -> Result<(), MachineError> {
    if instr.immediate() {
        Err(MachineError::new(ErrorKind::Immediate, addr))
    } else {
        Ok(())
    }
}

fn check_register(reg: u32, addr: u32) -> Result<usize, MachineError> {
    if (reg as usize) < constants::NREGISTERS {
        Ok(reg as usize)
    } else {
        Err(MachineError::new(ErrorKind::Illegal, addr))
    }
}

/// Tests the instruction's condition tag against the current condition
/// code. The initial code `U` compares equal to none of `N`, `Z`, `P`,
/// so with `CC = U` only `NC` and `NE` hold.
fn condition_holds(
    instr: Instruction,
    cc: ConditionCode,
    addr: u32,
) -> Result<bool, MachineError> {
    let cond = instr
        .condition()
        .ok_or_else(|| MachineError::new(ErrorKind::Condition, addr))?;
    Ok(match cond {
        Condition::NC => true,
        Condition::EQ => cc == ConditionCode::Z,
        Condition::NE => cc != ConditionCode::Z,
        Condition::GT => cc == ConditionCode::P,
        Condition::GE => cc == ConditionCode::P || cc == ConditionCode::Z,
        Condition::LT => cc == ConditionCode::N,
        Condition::LE => cc == ConditionCode::N || cc == ConditionCode::Z,
    })
}

fn update_cc(machine: &mut Machine, reg: usize) {
    let value = machine.register(reg);
    machine.set_cc(if value < 0 {
        ConditionCode::N
    } else if value > 0 {
        ConditionCode::P
    } else {
        ConditionCode::Z
    });
}

/// Computes the effective data address of a non-immediate instruction and
/// checks it against the data region. The sum is formed in `i64` so that
/// `registers[rindex] + offset` cannot wrap before the bounds check.
///
/// Must not be called for an immediate operand.
fn resolve_address(
    machine: &Machine,
    instr: Instruction,
    addr: u32,
) -> Result<usize, MachineError> {
    let resolved = match instr.operand() {
        Operand::Absolute(address) => i64::from(address),
        Operand::Indexed { rindex, offset } => {
            let reg = check_register(rindex, addr)?;
            i64::from(machine.register(reg)) + i64::from(offset)
        }
        Operand::Immediate(_) => unreachable!("address resolution on an immediate operand"),
    };
    if resolved < 0 || resolved >= i64::from(machine.dataend()) {
        Err(MachineError::new(ErrorKind::SegData, addr))
    } else {
        Ok(resolved as usize)
    }
}

/// The source value of `LOAD`, `ADD`, `SUB` and `PUSH`: the immediate
/// itself, or the data cell at the resolved address.
fn operand_value(machine: &Machine, instr: Instruction, addr: u32) -> Result<Word, MachineError> {
    match instr.operand() {
        Operand::Immediate(value) => Ok(value),
        _ => Ok(machine.data()[resolve_address(machine, instr, addr)?]),
    }
}

/// Checks that `sp` designates a cell of the stack region
/// `[dataend, datasize)`.
fn check_stack(machine: &Machine, sp: Word, addr: u32) -> Result<usize, MachineError> {
    if i64::from(sp) < i64::from(machine.dataend()) || i64::from(sp) >= machine.datasize() as i64 {
        Err(MachineError::new(ErrorKind::SegStack, addr))
    } else {
        Ok(sp as usize)
    }
}

fn load(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    let reg = check_register(instr.regcond(), addr)?;
    let value = operand_value(machine, instr, addr)?;
    machine.set_register(reg, value);
    update_cc(machine, reg);
    Ok(())
}

fn store(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    let reg = check_register(instr.regcond(), addr)?;
    check_immediate(instr, addr)?;
    let dest = resolve_address(machine, instr, addr)?;
    let value = machine.register(reg);
    machine.data_mut()[dest] = value;
    Ok(())
}

fn add(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    let reg = check_register(instr.regcond(), addr)?;
    let value = operand_value(machine, instr, addr)?;
    machine.set_register(reg, machine.register(reg).wrapping_add(value));
    update_cc(machine, reg);
    Ok(())
}

fn sub(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    let reg = check_register(instr.regcond(), addr)?;
    let value = operand_value(machine, instr, addr)?;
    machine.set_register(reg, machine.register(reg).wrapping_sub(value));
    update_cc(machine, reg);
    Ok(())
}

fn branch(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    check_immediate(instr, addr)?;
    if condition_holds(instr, machine.cc(), addr)? {
        let target = resolve_address(machine, instr, addr)?;
        machine.set_pc(target as u32);
    }
    Ok(())
}

fn call(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    check_immediate(instr, addr)?;
    if condition_holds(instr, machine.cc(), addr)? {
        let target = resolve_address(machine, instr, addr)?;
        let sp = machine.sp();
        let slot = check_stack(machine, sp, addr)?;
        // The program counter was incremented at fetch: the pushed word
        // is the address of the instruction after the call.
        let return_addr = machine.pc() as Word;
        machine.data_mut()[slot] = return_addr;
        machine.set_sp(sp.wrapping_sub(1));
        machine.set_pc(target as u32);
    }
    Ok(())
}

fn ret(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    check_immediate(instr, addr)?;
    let sp = machine.sp().wrapping_add(1);
    let slot = check_stack(machine, sp, addr)?;
    let target = machine.data()[slot] as u32;
    machine.set_sp(sp);
    machine.set_pc(target);
    Ok(())
}

fn push(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    let sp = machine.sp();
    let slot = check_stack(machine, sp, addr)?;
    let value = operand_value(machine, instr, addr)?;
    machine.data_mut()[slot] = value;
    machine.set_sp(sp.wrapping_sub(1));
    Ok(())
}

fn pop(machine: &mut Machine, instr: Instruction, addr: u32) -> Result<(), MachineError> {
    check_immediate(instr, addr)?;
    let sp = machine.sp().wrapping_add(1);
    let slot = check_stack(machine, sp, addr)?;
    let dest = resolve_address(machine, instr, addr)?;
    let value = machine.data()[slot];
    machine.data_mut()[dest] = value;
    machine.set_sp(sp);
    Ok(())
}

/// Executes one decoded instruction. `addr` is the code address the
/// instruction was fetched from; every error is tagged with it. Returns
/// `Ok(false)` after `HALT`, `Ok(true)` otherwise.
pub(crate) fn execute(
    machine: &mut Machine,
    instr: Instruction,
    addr: u32,
) -> Result<bool, MachineError> {
    let opcode = match instr.opcode() {
        Some(opcode) => opcode,
        None => return Err(MachineError::new(ErrorKind::Unknown, addr)),
    };
    match opcode {
        Opcode::ILLOP => return Err(MachineError::new(ErrorKind::Illegal, addr)),
        Opcode::NOP => {}
        Opcode::LOAD => load(machine, instr, addr)?,
        Opcode::STORE => store(machine, instr, addr)?,
        Opcode::ADD => add(machine, instr, addr)?,
        Opcode::SUB => sub(machine, instr, addr)?,
        Opcode::BRANCH => branch(machine, instr, addr)?,
        Opcode::CALL => call(machine, instr, addr)?,
        Opcode::RET => ret(machine, instr, addr)?,
        Opcode::PUSH => push(machine, instr, addr)?,
        Opcode::POP => pop(machine, instr, addr)?,
        Opcode::HALT => {
            warning(Warning::Halt, addr);
            return Ok(false);
        }
    }
    Ok(true)
}
