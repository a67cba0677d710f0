// src/tests/concurrency.rs
//
// Line atomicity under concurrent writers, and configuration churn

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;

const THREADS: usize = 8;
const LINES: usize = 500;

#[test]
fn test_thread_safe_lines_never_interleave() {
    let (sink, take) = capture!();
    let log = test_logger(sink);
    log.set_source_location(true);

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let log = &log;
            s.spawn(move || {
                for i in 0..LINES {
                    test_log!(log, Level::Warn, module: "stress", "thread={t} seq={i} {}\n", "x".repeat(i % 40));
                }
            });
        }
    });

    let out = take();
    let head = format!("{}==ct== [WARN] concurrency.rs:", pid_block());
    let mut seen: HashMap<(usize, usize), usize> = HashMap::new();

    for line in out.lines() {
        let rest = line.strip_prefix(&head).unwrap_or_else(|| panic!("spliced line: {line:?}"));
        let (_, body) = rest.split_once(" (stress) ").expect("module tag");
        let mut fields = body.split(' ');
        let t: usize = fields.next().unwrap().strip_prefix("thread=").unwrap().parse().unwrap();
        let i: usize = fields.next().unwrap().strip_prefix("seq=").unwrap().parse().unwrap();
        assert_eq!(fields.next().unwrap_or(""), "x".repeat(i % 40), "{line:?}");
        assert!(fields.next().is_none(), "{line:?}");
        *seen.entry((t, i)).or_default() += 1;
    }

    assert_eq!(seen.len(), THREADS * LINES);
    assert!(seen.values().all(|&n| n == 1));
    assert!(out.ends_with('\n'));
}

#[test]
fn test_unsynchronised_output_loses_no_bytes() {
    let (sink, take) = capture!();
    let log = test_logger(sink);
    log.set_thread_safe(false);
    assert!(!log.is_thread_safe());

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let log = &log;
            s.spawn(move || {
                for i in 0..LINES {
                    test_log!(log, Level::Info, "t{t} i{i}\n");
                }
            });
        }
    });

    let expected: usize = (0..THREADS)
        .flat_map(|t| (0..LINES).map(move |i| format!("{}==ct== [INFO] t{t} i{i}\n", pid_block())))
        .map(|line| line.len())
        .sum();

    let out = take();
    assert_eq!(out.len(), expected);
    assert_eq!(out.matches('\n').count(), THREADS * LINES);
}

#[test]
fn test_reconfiguring_while_logging() {
    let (sink, take) = capture!();
    let log = test_logger(sink);
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for i in 0..2_000 {
                    test_log!(log, Level::Info, "msg {i}\n");
                    test_log!(log, Level::Info, module: "stress", "module {i}\n");
                }
            });
        }

        s.spawn(|| {
            for i in 0..2_000 {
                log.set_thread_safe(i % 2 == 0);
                log.set_prefix(if i % 2 == 0 { "==alpha==" } else { "==beta==" });
                log.enable_module("stress");
                if i % 3 == 0 {
                    log.disable_module("stress");
                }
                let _ = log.module_is_enabled("stress");
            }
            log.set_thread_safe(true);
            done.store(true, Ordering::Release);
        });
    });

    assert!(done.load(Ordering::Acquire));
    assert!(log.is_thread_safe());

    // Prefix snapshots are whole: never a blend of the two values.
    let out = take();
    for tag in ["==alphe", "==betaa", "==beta==a"] {
        assert!(!out.contains(tag), "{tag}");
    }
    assert!(out.matches("msg ").count() >= 4_000);
}
