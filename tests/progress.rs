//! Integration tests for progress reporting and timing.

use tracefix::{NoopProgress, ProgressObserver, Stopwatch, TerminalProgressBar};

#[test]
fn test_stopwatch_lifecycle() {
    let mut watch = Stopwatch::new();
    assert!(!watch.is_running());
    assert_eq!(watch.elapsed(), 0.0);

    watch.start();
    assert!(watch.is_running());

    watch.stop();
    assert!(!watch.is_running());
    assert!(watch.elapsed() >= 0.0);
}

#[test]
fn test_stopwatch_freezes_when_stopped() {
    let mut watch = Stopwatch::new();
    watch.start();
    watch.stop();

    let first = watch.elapsed();
    let second = watch.elapsed();
    assert_eq!(first, second);
}

#[test]
fn test_stopwatch_accumulates_across_restarts() {
    let mut watch = Stopwatch::new();
    watch.start();
    watch.stop();
    let first = watch.elapsed();

    watch.start();
    watch.stop();
    assert!(watch.elapsed() >= first);
}

#[test]
fn test_double_start_is_harmless() {
    let mut watch = Stopwatch::new();
    watch.start();
    watch.start();
    watch.stop();
    assert!(!watch.is_running());
}

#[test]
fn test_noop_progress_ignores_everything() {
    let mut progress: Box<dyn ProgressObserver> = Box::new(NoopProgress);
    progress.set_processed(10);
    progress.set_processed(5);
    progress.finish();
}

#[test]
fn test_terminal_bar_handles_updates_and_overflow() {
    let mut bar = TerminalProgressBar::new(100, 20);
    bar.set_processed(0);
    bar.set_processed(50);
    // More processed than the advertised total must not panic.
    bar.set_processed(150);
    bar.finish();
}

#[test]
fn test_terminal_bar_with_zero_total() {
    let mut bar = TerminalProgressBar::new(0, 20);
    bar.set_processed(0);
    bar.finish();
}
