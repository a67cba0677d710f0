//! Walks through the logger's features, writing to stderr.
//!
//! Run with `cargo run --example tour`.

use std::sync::Mutex;

use coretrace::{ct_error, ct_info, ct_warn, Level};

static BUFFER: Mutex<Vec<u8>> = Mutex::new(Vec::new());

fn buffer_sink(bytes: &[u8]) {
    if let Ok(mut buffer) = BUFFER.lock() {
        buffer.extend_from_slice(bytes);
    }
}

fn main() {
    coretrace::enable_logging();

    // 1. Basic logging
    ct_info!("Logger initialized\n");
    ct_warn!("This is a warning: value={}\n", 42);
    ct_error!("Something went wrong!\n");

    // 2. Level filtering
    coretrace::set_min_level(Level::Warn);
    ct_info!("This INFO should NOT appear\n");
    ct_warn!("This WARN should appear\n");
    ct_error!("This ERROR should appear\n");
    coretrace::set_min_level(Level::Info);

    // 3. Module filtering
    coretrace::enable_module("alloc");
    coretrace::enable_module("trace");
    ct_info!(module: "alloc", "malloc ptr={:#x} size={}\n", 0xDEAD_BEEFu32, 64);
    ct_info!(module: "trace", "enter main()\n");
    ct_info!(module: "network", "This should NOT appear (module not enabled)\n");
    coretrace::enable_all_modules();

    // 4. Timestamps
    coretrace::set_timestamps(true);
    ct_info!("This line has a timestamp\n");
    coretrace::set_timestamps(false);

    // 5. Source location
    coretrace::set_source_location(true);
    ct_info!("This line shows file:line\n");
    coretrace::set_source_location(false);

    // 6. All features combined
    coretrace::set_prefix("==myapp==");
    coretrace::set_timestamps(true);
    coretrace::set_source_location(true);
    coretrace::enable_module("db");
    ct_warn!(module: "db", "Connection pool exhausted, count={}\n", 0);
    coretrace::set_timestamps(false);
    coretrace::set_source_location(false);
    coretrace::enable_all_modules();
    coretrace::set_prefix("==ct==");

    // 7. Custom sink
    coretrace::set_sink(Some(buffer_sink));
    ct_info!("This goes to the buffer, not stderr\n");
    coretrace::reset_sink();

    let captured = BUFFER.lock().map(|b| b.clone()).unwrap_or_default();
    eprintln!("\n--- Buffer sink captured {} bytes ---", captured.len());
    coretrace::write_raw(&captured);

    // 8. Disable logging
    coretrace::disable_logging();
    ct_error!("This should NOT appear\n");
}
