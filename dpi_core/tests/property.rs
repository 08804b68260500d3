use dpi_core::mocks::RecordingSensor;
use dpi_core::{Command, LevelConfig, LevelController, StepTable, clamp_index, wrap_index};
use proptest::prelude::*;

proptest! {
    #[test]
    fn clamp_in_range_and_monotonic(len in 1usize..300, a in any::<i64>(), b in any::<i64>()) {
        let ca = clamp_index(a, len);
        let cb = clamp_index(b, len);
        prop_assert!(ca < len);
        prop_assert!(cb < len);
        if a <= b {
            prop_assert!(ca <= cb);
        }
    }

    #[test]
    fn wrap_in_range_and_periodic(len in 1usize..300, i in -1_000_000_000i64..1_000_000_000) {
        let w = wrap_index(i, len);
        prop_assert!(w < len);
        prop_assert_eq!(w, wrap_index(i + len as i64, len));
    }
}

prop_compose! {
    fn command_strategy()(kind in 0u8..4, mag in 0u32..8, idx in -10i32..10) -> Command {
        match kind {
            0 => Command::StepUp(mag),
            1 => Command::StepDown(mag),
            2 => Command::SetIndex(idx),
            _ => Command::Reset,
        }
    }
}

/// Reference model: plain sequential state machine over the same table.
struct Model {
    len: usize,
    default_index: usize,
    wrap: bool,
    current: usize,
    committed: bool,
    writes: usize,
}

impl Model {
    fn apply(&mut self, cmd: Command) {
        let active = (if self.committed { self.current } else { self.default_index }) as i64;
        let len = self.len as i64;
        let bound = |i: i64| -> usize {
            if self.wrap {
                (((i % len) + len) % len) as usize
            } else {
                i.max(0).min(len - 1) as usize
            }
        };
        let target = match cmd {
            Command::StepUp(d) => bound(active + i64::from(d.max(1))),
            Command::StepDown(d) => bound(active - i64::from(d.max(1))),
            Command::SetIndex(v) => bound(i64::from(v)),
            Command::Reset => self.default_index,
        };
        if !self.committed || target != self.current {
            self.current = target;
            self.committed = true;
            self.writes += 1;
        }
    }
}

proptest! {
    #[test]
    fn controller_matches_sequential_model(
        len in 1usize..8,
        default_seed in any::<usize>(),
        wrap in any::<bool>(),
        cmds in proptest::collection::vec(command_strategy(), 0..40),
    ) {
        let default_index = default_seed % len;
        let steps: Vec<u32> = (1..=len as u32).map(|i| i * 400).collect();
        let cfg = LevelConfig::new(StepTable::new(steps).unwrap(), default_index)
            .unwrap()
            .with_wrap(wrap)
            .with_apply_on_init(false);
        let sensor = RecordingSensor::new();
        let ctl = LevelController::new(cfg, sensor.clone());
        let mut model = Model { len, default_index, wrap, current: default_index, committed: false, writes: 0 };

        for cmd in cmds {
            let out = ctl.handle(cmd).unwrap();
            model.apply(cmd);
            prop_assert_eq!(out.index(), model.current);
            prop_assert_eq!(ctl.state().current_index, model.current);
            prop_assert_eq!(ctl.state().is_committed, model.committed);
        }
        prop_assert_eq!(sensor.values().len(), model.writes);
    }

    #[test]
    fn reset_always_lands_on_default(
        default_seed in any::<usize>(),
        wrap in any::<bool>(),
        cmds in proptest::collection::vec(command_strategy(), 0..10),
    ) {
        let default_index = default_seed % 4;
        let cfg = LevelConfig::new(StepTable::new(vec![400, 800, 1600, 3200]).unwrap(), default_index)
            .unwrap()
            .with_wrap(wrap)
            .with_apply_on_init(false);
        let sensor = RecordingSensor::new();
        let ctl = LevelController::new(cfg, sensor.clone());
        for cmd in cmds {
            ctl.handle(cmd).unwrap();
        }
        let before = ctl.state();
        let writes_before = sensor.values().len();
        ctl.handle(Command::Reset).unwrap();
        prop_assert_eq!(ctl.state().current_index, default_index);
        let expected = usize::from(!before.is_committed || before.current_index != default_index);
        prop_assert_eq!(sensor.values().len() - writes_before, expected);
    }
}
