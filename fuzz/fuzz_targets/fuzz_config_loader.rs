#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are fine; panics are not.
    if let Ok(cfg) = toml::from_str::<dpi_config::Config>(data) {
        let valid = cfg.validate().is_ok();
        let converted = dpi_core::LevelConfig::try_from(&cfg);
        // Anything validate() accepts must also build a core config.
        if valid {
            assert!(converted.is_ok());
        }
    }
});
