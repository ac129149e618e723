#![no_main]

use libfuzzer_sys::fuzz_target;
use mission_control_discovery::TitleFormatter;

fuzz_target!(|data: (&str, Vec<String>)| {
    let (raw, acronyms) = data;
    let title = TitleFormatter::new(acronyms).format(raw);

    // 하이픈만 공백으로 바뀌므로 세그먼트 수는 유지된다
    assert_eq!(
        title.split(' ').count(),
        raw.split('-').count() + raw.matches(' ').count()
    );
});
