use super::*;

#[test]
fn immediate() {
    let text = vec![
        instr_imm!(LOAD, 1, 5),
        instr_imm!(SUB, 1, 8),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.register(1), -3);
    assert_eq!(machine.cc(), ConditionCode::N);
}

#[test]
fn from_memory() {
    let mut data = data20();
    data[0] = 5;
    let text = vec![
        instr_imm!(LOAD, 1, 12),
        instr_abs!(SUB, 1, 0),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(1), 7);
    assert_eq!(machine.cc(), ConditionCode::P);
}

#[test]
fn result_of_zero_sets_z() {
    let text = vec![
        instr_imm!(LOAD, 1, 6),
        instr_imm!(SUB, 1, 6),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.register(1), 0);
    assert_eq!(machine.cc(), ConditionCode::Z);
}

#[test]
fn wraps_on_overflow() {
    let mut data = data20();
    data[0] = i32::min_value();
    let text = vec![
        instr_abs!(LOAD, 1, 0),
        instr_imm!(SUB, 1, 1),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(1), i32::max_value());
    assert_eq!(machine.cc(), ConditionCode::P);
}
