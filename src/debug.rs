use crate::machine::Machine;
use std::io::{self, BufRead, Write};

fn options() {
    println!("Available commands:");
    println!("h\thelp");
    println!("c\tcontinue (exit interactive debug mode)");
    println!("s\tstep by step (next instruction)");
    println!("RET\tstep by step (next instruction)");
    println!("r\tprint registers");
    println!("d\tprint data memory");
    println!("t\tprint text (program) memory");
    println!("p\tprint text (program) memory");
    println!("m\tprint registers and data memory");
}

/// Interactive prompt for the current instruction. Reads one command per
/// line from standard input; returns false when debug mode should stay
/// off for the rest of the run.
pub(crate) fn debug_ask(machine: &Machine) -> bool {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask(machine, &mut input)
}

/// The prompt loop proper. Never mutates the machine; dumping commands
/// loop back to the prompt, stepping commands leave it.
pub(crate) fn ask<R: BufRead>(machine: &Machine, input: &mut R) -> bool {
    loop {
        print!("DEBUG? ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match input.read_line(&mut line) {
            // End of input behaves like `c`.
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }

        match line.trim_end().chars().next() {
            // An empty line is a step, like `s`.
            None | Some('s') => return true,
            Some('c') => return false,
            Some('h') => options(),
            Some('r') => machine.print_cpu(),
            Some('d') => machine.print_data(),
            Some('t') | Some('p') => machine.print_program(),
            Some('m') => {
                machine.print_cpu();
                machine.print_data();
            }
            Some(_) => {}
        }
    }
}
