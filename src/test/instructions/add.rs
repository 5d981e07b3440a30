use super::*;

#[test]
fn immediate() {
    let text = vec![
        instr_imm!(LOAD, 1, 5),
        instr_imm!(ADD, 1, 3),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.register(1), 8);
    assert_eq!(machine.cc(), ConditionCode::P);
}

#[test]
fn from_memory() {
    let mut data = data20();
    data[2] = -9;
    let text = vec![
        instr_imm!(LOAD, 1, 4),
        instr_abs!(ADD, 1, 2),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(1), -5);
    assert_eq!(machine.cc(), ConditionCode::N);
}

#[test]
fn indexed_source() {
    let mut data = data20();
    data[6] = 11;
    let text = vec![
        instr_imm!(LOAD, 1, 2),
        instr_idx!(ADD, 1, 1, 4),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(1), 13);
}

#[test]
fn result_of_zero_sets_z() {
    let text = vec![
        instr_imm!(LOAD, 1, 5),
        instr_imm!(ADD, 1, -5),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data20(), 10);

    assert_eq!(machine.cc(), ConditionCode::Z);
}

#[test]
fn wraps_on_overflow() {
    let mut data = data20();
    data[0] = i32::max_value();
    let text = vec![
        instr_abs!(LOAD, 1, 0),
        instr_abs!(ADD, 1, 0),
        instr_op!(HALT),
    ];
    let machine = run_ok(text, data, 10);

    assert_eq!(machine.register(1), -2);
    assert_eq!(machine.cc(), ConditionCode::N);
}

#[test]
fn source_outside_data_region_is_segdata() {
    let (_, err) = run_err(vec![instr_abs!(ADD, 1, 12)], data20(), 10);

    assert_eq!(err, MachineError::new(ErrorKind::SegData, 0));
}
