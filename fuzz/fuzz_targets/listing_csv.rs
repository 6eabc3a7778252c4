#![no_main]

use libfuzzer_sys::fuzz_target;
use propscan::dataset::Dataset;
use propscan::price_search::locate_price;

fuzz_target!(|data: &[u8]| {
    // Malformed CSV must surface as an error, never a panic
    if let Ok(dataset) = Dataset::from_reader(data) {
        let _ = locate_price(&dataset, 881000.0, "Clayton");
        let _ = dataset.formatted_prices();
    }
});
