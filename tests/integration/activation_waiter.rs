// Timing behaviour of the activation waiter across threads

use deckprofile::engine::{ActivationOutcome, ProfileId, activate_profile};
use std::thread;
use std::time::Duration;

use crate::common::helpers::*;

const A: ProfileId = ProfileId::OneSubDeviceFullDuplex;
const B: ProfileId = ProfileId::TwoSubDevicesFullDuplex;

#[test]
fn test_already_active_returns_immediately() {
    let w = waiter(B, B);
    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_secs(30)));
    assert_eq!(outcome, ActivationOutcome::AlreadyActive);
    assert!(elapsed < PROMPT);
}

#[test]
fn test_notification_while_blocked_wakes_waiter() {
    let w = waiter(B, A);
    let notifier = w.notifier();

    let driver = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        notifier.on_external_notification(B);
    });

    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_secs(10)));
    driver.join().unwrap();

    assert_eq!(outcome, ActivationOutcome::ActivatedWithinTimeout);
    assert!(elapsed >= Duration::from_millis(40), "woke too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(10), "waited out the timeout: {:?}", elapsed);
}

#[test]
fn test_delayed_match_inside_short_timeout() {
    // target B, device on A, notifier fires at ~50ms, wait bounded at 100ms
    let w = waiter(B, A);
    let notifier = w.notifier();

    let driver = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        notifier.on_external_notification(B);
    });

    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_millis(100)));
    driver.join().unwrap();

    assert_eq!(outcome, ActivationOutcome::ActivatedWithinTimeout);
    assert!(elapsed >= Duration::from_millis(40), "woke too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(100), "missed the deadline: {:?}", elapsed);
}

#[test]
fn test_simulated_driver_confirms_inside_short_timeout() {
    let manager = full_manager(Duration::from_millis(50));

    let (outcome, elapsed) = timed(|| {
        activate_profile(&manager, B, Duration::from_millis(100))
    });

    assert_eq!(outcome, Ok(ActivationOutcome::ActivatedWithinTimeout));
    assert!(elapsed < Duration::from_millis(100), "missed the deadline: {:?}", elapsed);
}

#[test]
fn test_no_notification_times_out_not_before_deadline() {
    let w = waiter(B, A);
    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_millis(100)));
    assert_eq!(outcome, ActivationOutcome::TimedOut);
    assert!(elapsed >= Duration::from_millis(100), "returned early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(100) + PROMPT);
}

#[test]
fn test_unrelated_notifications_do_not_wake_waiter() {
    let w = waiter(B, A);
    let notifier = w.notifier();

    let driver = thread::spawn(move || {
        for profile in [A, ProfileId::TwoSubDevicesHalfDuplex, ProfileId::FourSubDevicesHalfDuplex] {
            notifier.on_external_notification(profile);
            thread::sleep(Duration::from_millis(5));
        }
    });

    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_millis(150)));
    driver.join().unwrap();

    assert_eq!(outcome, ActivationOutcome::TimedOut);
    assert!(elapsed >= Duration::from_millis(150));
}

#[test]
fn test_duplicate_matching_notifications_are_idempotent() {
    let w = waiter(B, A);
    let first = w.notifier();
    let second = first.clone();

    let drivers: Vec<_> = [first, second]
        .into_iter()
        .map(|n| {
            thread::spawn(move || {
                n.on_external_notification(B);
                n.on_external_notification(B);
            })
        })
        .collect();
    for driver in drivers {
        driver.join().unwrap();
    }

    let (outcome, elapsed) = timed(|| w.await_confirmation(Duration::from_secs(10)));
    assert_eq!(outcome, ActivationOutcome::ActivatedWithinTimeout);
    assert!(elapsed < PROMPT);
}

#[test]
fn test_notifier_outlives_waiter() {
    let w = waiter(B, A);
    let notifier = w.notifier();
    assert_eq!(notifier.target(), B);

    assert_eq!(
        w.await_confirmation(Duration::from_millis(10)),
        ActivationOutcome::TimedOut
    );

    thread::spawn(move || notifier.on_external_notification(B))
        .join()
        .unwrap();
}
