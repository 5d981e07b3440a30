#[macro_use]
extern crate clap;

use clap::Arg;
use segvm::{instr_abs, instr_cond, instr_imm, instr_op};
use segvm::{Instruction, Machine, Word};
use std::process;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Starts interactive debug mode at the first instruction"),
        )
        .arg(
            Arg::with_name("binary")
                .short("b")
                .long("binary")
                .takes_value(true)
                .value_name("FILE")
                .help("Loads the program image from FILE instead of the built-in demo"),
        )
        .get_matches();

    let mut machine = Machine::new();

    if let Some(path) = matches.value_of("binary") {
        if let Err(err) = machine.read_program(path) {
            eprintln!("{}", err);
            process::exit(1);
        }
    } else {
        let (text, data, dataend) = demo_image();
        machine.load_program(text, data, dataend);
    }

    if let Err(err) = machine.run(matches.is_present("debug")) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

/// Built-in demo: a short arithmetic program ending on a conditional
/// branch that skips nothing and a store into the data region.
fn demo_image() -> (Vec<Instruction>, Vec<Word>, u32) {
    let text = vec![
        instr_imm!(ADD, 1, 0),
        instr_abs!(SUB, 1, 0),
        instr_cond!(BRANCH, GE, 4),
        instr_op!(NOP),
        instr_abs!(STORE, 1, 5),
        instr_op!(HALT),
    ];
    let mut data = vec![0; 20];
    data[0] = 5;
    (text, data, 10)
}
