use super::*;

#[test]
fn absolute_writes_the_register() {
    let text = vec![
        instr_imm!(LOAD, 1, 9),
        instr_abs!(STORE, 1, 2),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.data()[2], 9);
}

#[test]
fn leaves_the_condition_code_alone() {
    let text = vec![
        instr_imm!(LOAD, 1, 9),
        instr_abs!(STORE, 1, 2),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.cc(), ConditionCode::P);
}

#[test]
fn indexed_destination() {
    let text = vec![
        instr_imm!(LOAD, 1, 3),
        instr_idx!(STORE, 1, 1, 4),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.data()[7], 3);
}

#[test]
fn immediate_mode_forbidden() {
    let text = vec![make_immediate_instruction(Opcode::STORE, 1, 5)];
    let (machine, err) = run_err(text, data20(), 10);

    assert_eq!(err, MachineError::new(ErrorKind::Immediate, 0));
    assert!(machine.data().iter().all(|&word| word == 0));
}

#[test]
fn at_dataend_is_segdata() {
    let (_, err) = run_err(vec![instr_abs!(STORE, 1, 10)], data20(), 10);

    assert_eq!(err, MachineError::new(ErrorKind::SegData, 0));
}
