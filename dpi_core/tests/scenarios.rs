use dpi_core::mocks::RecordingSensor;
use dpi_core::{
    Command, LevelConfig, LevelController, LevelError, LevelState, Outcome, StepTable,
};

fn table_config(wrap: bool) -> LevelConfig {
    LevelConfig::new(StepTable::new(vec![400, 800, 1600, 3200]).unwrap(), 1)
        .unwrap()
        .with_wrap(wrap)
        .with_apply_on_init(false)
}

#[test]
fn clamp_walk_from_boot() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    ctl.init().unwrap();
    assert!(sensor.values().is_empty());

    let out = ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(out, Outcome::Applied { index: 2, cpi: 1600 });
    assert_eq!(sensor.values(), vec![1600]);

    let out = ctl.handle(Command::StepUp(5)).unwrap();
    assert_eq!(out, Outcome::Applied { index: 3, cpi: 3200 });
    assert_eq!(sensor.values(), vec![1600, 3200]);

    let out = ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(out, Outcome::Unchanged { index: 3, cpi: 3200 });
    assert_eq!(sensor.values(), vec![1600, 3200]);
}

#[test]
fn wrap_from_top_lands_on_first_step() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(true), sensor.clone());
    ctl.handle(Command::SetIndex(3)).unwrap();
    assert_eq!(ctl.state().current_index, 3);

    let out = ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(out, Outcome::Applied { index: 0, cpi: 400 });
    assert_eq!(sensor.values(), vec![3200, 400]);
}

#[test]
fn wrap_down_from_bottom() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(true), sensor.clone());
    ctl.handle(Command::SetIndex(0)).unwrap();
    let out = ctl.handle(Command::StepDown(0)).unwrap();
    assert_eq!(out.index(), 3);
}

#[test]
fn failed_write_leaves_state_and_retry_succeeds() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    ctl.handle(Command::StepUp(1)).unwrap();
    let before = ctl.state();

    sensor.fail_next(1);
    let err = ctl.handle(Command::StepUp(1)).unwrap_err();
    assert_eq!(
        err,
        LevelError::AdapterWriteFailed {
            cpi: 3200,
            cause: "write rejected".to_string()
        }
    );
    assert_eq!(ctl.state(), before);

    let out = ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(out, Outcome::Applied { index: 3, cpi: 3200 });
    assert_eq!(sensor.values(), vec![1600, 3200]);
    assert_eq!(sensor.attempts(), 3);
}

#[test]
fn failed_first_write_stays_uncommitted() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    sensor.fail_next(1);
    assert!(ctl.handle(Command::Reset).is_err());
    assert_eq!(
        ctl.state(),
        LevelState {
            current_index: 1,
            is_committed: false
        }
    );
    // Reset to the default still writes because nothing was committed.
    let out = ctl.handle(Command::Reset).unwrap();
    assert!(out.is_applied());
    assert_eq!(sensor.values(), vec![800]);
}

#[test]
fn set_index_twice_writes_once() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    ctl.handle(Command::SetIndex(2)).unwrap();
    let out = ctl.handle(Command::SetIndex(2)).unwrap();
    assert!(!out.is_applied());
    assert_eq!(sensor.values(), vec![1600]);
}

#[test]
fn set_index_out_of_range_clamps() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    assert_eq!(ctl.handle(Command::SetIndex(99)).unwrap().index(), 3);
    assert_eq!(ctl.handle(Command::SetIndex(-99)).unwrap().index(), 0);
}

#[test]
fn reset_writes_only_when_needed() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    ctl.handle(Command::Reset).unwrap();
    assert_eq!(sensor.values(), vec![800]);
    ctl.handle(Command::Reset).unwrap();
    assert_eq!(sensor.values(), vec![800]);
    ctl.handle(Command::StepDown(1)).unwrap();
    ctl.handle(Command::Reset).unwrap();
    assert_eq!(sensor.values(), vec![800, 400, 800]);
    assert_eq!(ctl.state().current_index, 1);
}

#[test]
fn not_ready_is_distinct_and_untouched() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    sensor.set_ready(false);
    let err = ctl.handle(Command::StepUp(1)).unwrap_err();
    assert_eq!(err, LevelError::DeviceNotReady("recording".to_string()));
    assert_eq!(sensor.attempts(), 0);
    assert!(!ctl.state().is_committed);

    sensor.set_ready(true);
    ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(sensor.values(), vec![1600]);
}

#[test]
fn init_when_not_ready_defers_to_first_command() {
    let sensor = RecordingSensor::new();
    sensor.set_ready(false);
    let cfg = table_config(false).with_apply_on_init(true);
    let ctl = LevelController::new(cfg, sensor.clone());
    ctl.init().expect("not-ready boot must not fail");
    assert!(!ctl.state().is_committed);

    sensor.set_ready(true);
    // Target equals the default index, but nothing was committed, so it writes.
    let out = ctl.handle(Command::SetIndex(1)).unwrap();
    assert!(out.is_applied());
    assert_eq!(sensor.values(), vec![800]);
}

#[test]
fn init_write_failure_is_reported_but_controller_survives() {
    let sensor = RecordingSensor::new();
    sensor.fail_next(1);
    let cfg = table_config(false).with_apply_on_init(true);
    let ctl = LevelController::new(cfg, sensor.clone());
    assert!(matches!(
        ctl.init(),
        Err(LevelError::AdapterWriteFailed { cpi: 800, .. })
    ));
    assert!(!ctl.state().is_committed);
    ctl.handle(Command::StepUp(1)).unwrap();
    assert_eq!(sensor.values(), vec![1600]);
}

#[test]
fn invalid_binding_touches_nothing() {
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(table_config(false), sensor.clone());
    let err = ctl.handle_binding(17, 1).unwrap_err();
    assert!(matches!(err, LevelError::InvalidCommand(_)));
    assert_eq!(sensor.attempts(), 0);
    assert!(!ctl.state().is_committed);
}

#[test]
fn writes_carry_configured_attribute() {
    let sensor = RecordingSensor::new();
    let cfg = table_config(false).with_attribute(9);
    let ctl = LevelController::new(cfg, sensor.clone());
    ctl.handle_binding(dpi_core::command::CMD_STEP_UP, 0).unwrap();
    assert_eq!(sensor.writes(), vec![(9, 1600)]);
}
