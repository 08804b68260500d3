#![no_main]
use dpi_core::mocks::RecordingSensor;
use dpi_core::{Command, LevelConfig, LevelController, StepTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, bool, Vec<(u32, i32)>)| {
    let (len, wrap, bindings) = input;
    let len = usize::from(len % 16) + 1;
    let steps: Vec<u32> = (1..=len as u32).map(|i| i * 100).collect();
    let cfg = LevelConfig::new(StepTable::new(steps).unwrap(), len / 2)
        .unwrap()
        .with_wrap(wrap);
    let sensor = RecordingSensor::new();
    let ctl = LevelController::new(cfg, sensor.clone());
    for (code, value) in bindings {
        if let Ok(cmd) = Command::from_binding(code, value) {
            let out = ctl.handle(cmd).unwrap();
            assert!(out.index() < len);
        }
    }
    assert!(sensor.values().len() <= sensor.attempts());
});
