//! Explicit API configuration beats the environment, whatever the call order.
//!
//! Each integration test binary is its own process, so the one-time
//! environment read happens inside the test below.

use std::env;
use std::sync::Mutex;

use coretrace::{ct_error, ct_info, ct_warn, ColorMode, Level};
use serial_test::serial;

static CAPTURED: Mutex<Vec<u8>> = Mutex::new(Vec::new());

fn capture_sink(bytes: &[u8]) {
    CAPTURED.lock().unwrap().extend_from_slice(bytes);
}

fn take() -> String {
    String::from_utf8(std::mem::take(&mut *CAPTURED.lock().unwrap())).unwrap()
}

#[test]
#[serial]
fn test_explicit_level_beats_env_level() {
    unsafe {
        env::set_var("CT_LOG_LEVEL", "info");
        env::set_var("CT_DEBUG", "net");
    }

    coretrace::set_sink(Some(capture_sink));
    coretrace::set_color_mode(ColorMode::Never);
    coretrace::enable_logging();

    // Claim the module table first: a level change runs the one-time
    // environment read, which would otherwise seed `net` from CT_DEBUG.
    coretrace::enable_module("alloc");
    coretrace::set_min_level(Level::Error);

    ct_warn!("warn should be filtered\n");
    ct_error!("error should pass\n");
    ct_error!(module: "net", "net should be filtered\n");
    ct_error!(module: "alloc", "alloc should pass\n");

    // A later initialisation request changes nothing.
    coretrace::init_once();
    ct_info!("info still filtered\n");

    coretrace::reset_sink();
    unsafe {
        env::remove_var("CT_LOG_LEVEL");
        env::remove_var("CT_DEBUG");
    }

    let out = take();
    assert!(!out.contains("[WARN]"), "{out}");
    assert!(out.contains("error should pass"), "{out}");
    assert!(!out.contains("net should be filtered"), "{out}");
    assert!(out.contains("alloc should pass"), "{out}");
    assert!(!out.contains("info still filtered"), "{out}");
    assert_eq!(coretrace::min_level(), Level::Error);
    assert_eq!(coretrace::LOGGER.enabled_modules(), ["alloc"]);
}
