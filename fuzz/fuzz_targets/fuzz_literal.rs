// Fuzz target feeding arbitrary text to the temporal literal parser.
#![no_main]

use libfuzzer_sys::fuzz_target;
use tempora::{parse, to_text, TemporalValue};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(value) = parse::<f64>(text, None) {
        let printed = to_text(&value);
        let reparsed = parse::<f64>(&printed, None).expect("printed literal must parse");
        // NaN never compares equal, so compare the printed forms.
        assert_eq!(to_text(&reparsed), printed);

        let json = serde_json::to_string(&value).expect("serialize");
        let _: TemporalValue<f64> = serde_json::from_str(&json).expect("deserialize");
    }

    let _ = parse::<String>(text, None);
});
