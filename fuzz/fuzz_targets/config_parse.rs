#![no_main]

use libfuzzer_sys::fuzz_target;
use mission_control_core::config::MissionControlConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(config) = MissionControlConfig::parse(content) {
            let _ = config.validate();
        }
    }
});
