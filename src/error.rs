use core::fmt;

/// Returned by [`NotNull::try_new`](crate::NotNull::try_new) when handed a null value.
///
/// The rejected value is given back to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NullError<P>(pub P);

impl<P> NullError<P> {
    /// Takes back the rejected value.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> fmt::Display for NullError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value is null")
    }
}

#[cfg(feature = "std")]
impl<P: fmt::Debug> std::error::Error for NullError<P> {}
