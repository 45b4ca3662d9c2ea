use std::{
    cell::Cell,
    fmt::Write,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

use nnptr::{upcast, NotNull, Shared};

trait Base {}

struct Derived;

impl Base for Derived {}

upcast!(Derived => dyn Base);

struct Tracked<'a> {
    value: i32,
    drops: &'a Cell<usize>,
}

impl<'a> Drop for Tracked<'a> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_arithmetic_through_value() {
    let p1 = Shared::from_box(Box::new(9));
    let p3 = p1.clone();

    assert_eq!(*p3, 9);
    assert_eq!(*p1 + *p3, 18);

    // Packing a computed value allocates a fresh handle
    let p5 = Shared::new(*p1 + *p3 + *p1);

    assert_eq!(*p5, 27);
    assert!(!Shared::ptr_eq(&p1, &p5));
}

#[test]
fn test_string_round_trip() {
    let raw = Box::into_raw(Box::new(String::from("hello world!")));
    let p_str = unsafe { Shared::from_raw(raw) };

    assert_eq!(Shared::unwrap_or_clone(p_str.clone()), "hello world!");
    assert_eq!(p_str.as_str(), "hello world!");
}

#[test]
fn test_vector_of_handles() {
    let vshared = vec![
        Shared::from_box(Box::new(1)),
        Shared::from_box(Box::new(2)),
        Shared::from_box(Box::new(3)),
    ];

    let mut out = String::new();
    write!(out, "{}{}{}", vshared[0], vshared[1], vshared[2]).unwrap();

    assert_eq!(out, "123");
}

#[test]
fn test_derived_into_base() {
    let b = Shared::new(Derived);
    let b2 = b.clone();
    let a: Shared<dyn Base> = Shared::from_derived(b2);

    assert_eq!(Shared::strong_count(&b), 2);
    assert_eq!(Shared::as_ptr(&b) as *const u8, Shared::as_ptr(&a) as *const u8);
}

#[test]
fn test_container_of_vectors() {
    let nnsptr_1 = NotNull::new(Some(Arc::new(vec![1; 10])));
    let nnsptr_3 = Shared::new(vec![1; 10]);

    assert_eq!(nnsptr_1[0], 1);
    assert_eq!(nnsptr_3[0], 1);
    assert_eq!(nnsptr_3.len(), 10);
}

#[test]
fn test_drop_only_with_last_owner() {
    let drops = Cell::new(0);

    let first = Shared::new(Tracked { value: 4, drops: &drops });
    let copies: Vec<_> = (0..5).map(|_| first.clone()).collect();

    assert_eq!(Shared::strong_count(&first), 6);

    drop(first);
    let last = copies.last().cloned().expect("No copies");
    drop(copies);

    assert_eq!(drops.get(), 0);
    assert_eq!(last.value, 4);

    drop(last);

    assert_eq!(drops.get(), 1);
}

#[test]
fn test_handle_as_argument_and_result() {
    fn foo(si: Shared<i32>) -> Shared<f64> {
        f64::from(*si).into()
    }

    let sd = foo(10.into());

    assert_eq!(*sd, 10.0);
}

#[test]
fn test_clone_across_threads() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Drop for Counted {
        fn drop(&mut self) {
            DROPS.fetch_add(1, Ordering::SeqCst);
        }
    }

    let shared = Shared::new(Counted);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let local = shared.clone();
            thread::spawn(move || {
                let more = local.clone();
                drop(local);
                drop(more);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(Shared::strong_count(&shared), 1);
    assert_eq!(DROPS.load(Ordering::SeqCst), 0);

    drop(shared);

    assert_eq!(DROPS.load(Ordering::SeqCst), 1);
}
