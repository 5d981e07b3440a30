use super::*;

#[test]
fn immediate_positive() {
    let machine = run_ok(vec![instr_imm!(LOAD, 2, 42), instr_op!(HALT)], data20(), 10);

    assert_eq!(machine.register(2), 42);
    assert_eq!(machine.cc(), ConditionCode::P);
}

#[test]
fn immediate_negative() {
    let machine = run_ok(vec![instr_imm!(LOAD, 2, -7), instr_op!(HALT)], data20(), 10);

    assert_eq!(machine.register(2), -7);
    assert_eq!(machine.cc(), ConditionCode::N);
}

#[test]
fn immediate_zero() {
    let machine = run_ok(vec![instr_imm!(LOAD, 2, 0), instr_op!(HALT)], data20(), 10);

    assert_eq!(machine.register(2), 0);
    assert_eq!(machine.cc(), ConditionCode::Z);
}

#[test]
fn absolute_reads_the_cell_not_the_address() {
    let mut data = data20();
    data[3] = 77;
    let machine = run_ok(vec![instr_abs!(LOAD, 2, 3), instr_op!(HALT)], data, 10);

    assert_eq!(machine.register(2), 77);
}

#[test]
fn indexed_with_negative_offset() {
    let mut data = data20();
    data[4] = 55;
    let text = vec![
        instr_imm!(LOAD, 1, 6),
        instr_idx!(LOAD, 2, 1, -2),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(2), 55);
    assert_eq!(machine.cc(), ConditionCode::P);
}

#[test]
fn indexed_below_zero_is_segdata() {
    let text = vec![instr_imm!(LOAD, 1, 1), instr_idx!(LOAD, 2, 1, -5)];
    let (_, err) = run_err(text, data20(), 10);

    assert_eq!(err, MachineError::new(ErrorKind::SegData, 1));
}

#[test]
fn absolute_at_dataend_is_segdata() {
    let (_, err) = run_err(vec![instr_abs!(LOAD, 2, 10)], data20(), 10);

    assert_eq!(err, MachineError::new(ErrorKind::SegData, 0));
}
