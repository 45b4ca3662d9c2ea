use std::{
    env, hint,
    process::{Command, ExitStatus, Output},
    ptr,
};

use nnptr::{NotNull, Shared, CHECKED};

const CHILD: &str = "NNPTR_FAIL_FAST_CHILD";
const NO_LOGGER: &str = "NNPTR_FAIL_FAST_NO_LOGGER";

fn is_child() -> bool {
    if env::var_os(CHILD).is_none() {
        return false;
    }

    if env::var_os(NO_LOGGER).is_none() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
    true
}

fn child(test_name: &str) -> Command {
    let mut command = Command::new(env::current_exe().expect("No test binary"));
    command
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD, "1");
    command
}

/// Runs a single test of this binary again in a child process.
fn run_in_child(test_name: &str) -> ExitStatus {
    child(test_name).status().expect("Failed to run child")
}

fn violation_reports(output: &Output) -> usize {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    stdout.matches("null invariant violation").count()
        + stderr.matches("null invariant violation").count()
}

#[test]
fn test_null_construction() {
    if is_child() {
        let null: *const i32 = hint::black_box(ptr::null());
        let _n = NotNull::new(null);
        return;
    }

    let status = run_in_child("test_null_construction");

    // Unchecked builds trust the caller and never look
    assert_eq!(status.success(), !CHECKED);
}

#[test]
fn test_shared_from_null_raw_pointer() {
    if is_child() {
        // Adopting null is undefined behaviour when nothing checks for it
        if CHECKED {
            let null: *mut i32 = hint::black_box(ptr::null_mut());
            let _s = unsafe { Shared::from_raw(null) };
        }
        return;
    }

    let status = run_in_child("test_shared_from_null_raw_pointer");

    assert_eq!(status.success(), !CHECKED);
}

#[test]
fn test_violation_reported_once() {
    if !CHECKED {
        return;
    }

    if is_child() {
        let null: *const i32 = hint::black_box(ptr::null());
        let _n = NotNull::new(null);
        return;
    }

    let logged = child("test_violation_reported_once")
        .output()
        .expect("Failed to run child");
    let unlogged = child("test_violation_reported_once")
        .env(NO_LOGGER, "1")
        .output()
        .expect("Failed to run child");

    assert!(!logged.status.success());
    assert!(!unlogged.status.success());

    // Through the logger when there is one, straight to stderr otherwise
    assert_eq!(violation_reports(&logged), 1);
    assert_eq!(violation_reports(&unlogged), 1);
}

#[test]
fn test_null_dereference_terminates() {
    if is_child() {
        let null: Option<Box<i32>> = hint::black_box(None);
        let n = NotNull::new(null);
        println!("{}", *n);
        return;
    }

    assert!(!run_in_child("test_null_dereference_terminates").success());
}

#[test]
fn test_shared_released_through_escape_hatch() {
    if !CHECKED {
        return;
    }

    if is_child() {
        let mut s = Shared::new(10);

        unsafe {
            drop(Shared::inner_mut(&mut s).take());
        }

        println!("{}", *s);
        return;
    }

    assert!(!run_in_child("test_shared_released_through_escape_hatch").success());
}

#[test]
fn test_unique_released_through_escape_hatch() {
    if !CHECKED {
        return;
    }

    if is_child() {
        struct TestClass;

        let mut some_unique = NotNull::new(Some(Box::new(TestClass)));

        // Leaks, and leaves the wrapper holding `None`
        unsafe {
            let _ = Box::leak(some_unique.as_inner_mut().take().expect("Already empty"));
        }

        println!("{:?}", some_unique.as_inner().is_some());
        return;
    }

    assert!(!run_in_child("test_unique_released_through_escape_hatch").success());
}

#[test]
fn test_child_completes_without_violation() {
    if is_child() {
        let s = Shared::new(1);
        let n = NotNull::new(Some(Box::new(2)));
        assert_eq!(*s + *n, 3);
        return;
    }

    assert!(run_in_child("test_child_completes_without_violation").success());
}
