/// Whether null invariant checks are compiled into this build.
///
/// Checks are on whenever `debug_assertions` are, and can be forced on in
/// optimised builds with the `checked` feature.
pub const CHECKED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// Verifies that a value which must never be null isn't.
///
/// Compiles to nothing unless [`CHECKED`] is set.
#[inline(always)]
#[track_caller]
pub(crate) fn verify(is_null: bool) {
    if CHECKED && is_null {
        violation(core::panic::Location::caller());
    }
}

/// Reports a null found where a referent had to be borrowed.
///
/// Unlike [`verify`] this fires in every build mode, as there is nothing sound left to return.
#[cold]
#[track_caller]
pub(crate) fn null_dereference() -> ! {
    violation(core::panic::Location::caller())
}

#[cold]
#[inline(never)]
fn violation(location: &core::panic::Location<'_>) -> ! {
    if log::log_enabled!(log::Level::Error) {
        log::error!("null invariant violation at {}", location);
    } else {
        report_unlogged(location);
    }

    terminate(location)
}

#[cfg(feature = "std")]
fn report_unlogged(location: &core::panic::Location<'_>) {
    std::eprintln!("nnptr: null invariant violation at {}", location);
}

// The panic message below carries the location.
#[cfg(not(feature = "std"))]
fn report_unlogged(_location: &core::panic::Location<'_>) {}

#[cfg(feature = "std")]
fn terminate(_location: &core::panic::Location<'_>) -> ! {
    std::process::abort()
}

#[cfg(not(feature = "std"))]
fn terminate(location: &core::panic::Location<'_>) -> ! {
    panic!("null invariant violation at {}", location)
}
