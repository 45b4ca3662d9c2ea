use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

use crate::{check, NullError, Nullable, NullableDeref, NullableDerefMut};

/// A pointer-like `P` that is never null.
///
/// Has the same layout as `P`. Every way in and out of the wrapper verifies
/// the value when [`CHECKED`](crate::CHECKED) is set, terminating the process
/// on a null. Otherwise the checks compile away.
///
/// There is deliberately no pointer arithmetic, indexing, or comparison with
/// a bare `P`: a `NotNull` is a single non-null value, never a position.
///
/// Construction from a null is not a compile error: `NotNull::new(None)` and
/// `NotNull::new(ptr::null())` build, and are caught at run time only in
/// checked builds. Use [`try_new`](Self::try_new) to test in every build, or
/// [`Shared`](crate::Shared), whose safe constructors take nothing nullable.
///
/// ```
/// use nnptr::NotNull;
///
/// assert!(NotNull::try_new(None::<Box<i32>>).is_err());
/// assert!(NotNull::try_new(core::ptr::null::<i32>()).is_err());
/// ```
#[repr(transparent)]
pub struct NotNull<P>(P);

impl<P: Nullable> NotNull<P> {
    /// Wraps `value`, terminating the process if it is null and checks are on.
    #[inline]
    #[track_caller]
    pub fn new(value: P) -> Self {
        check::verify(value.is_null());
        Self(value)
    }

    /// Wraps `value`, handing it back in the error if it is null.
    ///
    /// Unlike [`new`](Self::new) this always tests, whatever the build mode.
    #[inline]
    pub fn try_new(value: P) -> Result<Self, NullError<P>> {
        if value.is_null() {
            Err(NullError(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Converts the value held by another wrapper, for instance to widen the pointee type.
    #[inline]
    #[track_caller]
    pub fn from_not_null<Q>(other: NotNull<Q>) -> Self
    where
        Q: Nullable + Into<P>,
    {
        Self::new(other.into_inner().into())
    }

    /// Converts the held value into a `NotNull<Q>`.
    #[inline]
    #[track_caller]
    pub fn convert<Q>(self) -> NotNull<Q>
    where
        Q: Nullable,
        P: Into<Q>,
    {
        NotNull::from_not_null(self)
    }

    /// Borrows the held value.
    #[inline]
    #[track_caller]
    pub fn as_inner(&self) -> &P {
        check::verify(self.0.is_null());
        &self.0
    }

    /// Unwraps the held value.
    #[inline]
    #[track_caller]
    pub fn into_inner(self) -> P {
        check::verify(self.0.is_null());
        self.0
    }

    /// Mutably borrows the held value itself, bypassing the wrapper.
    ///
    /// # Safety
    ///
    /// The value must not be null once the borrow ends. Checked builds detect a
    /// violation on the next access and terminate; in unchecked builds any
    /// later access that assumes non-null is undefined behaviour.
    #[inline]
    #[track_caller]
    pub unsafe fn as_inner_mut(&mut self) -> &mut P {
        check::verify(self.0.is_null());
        &mut self.0
    }
}

impl<P: Nullable + Clone> NotNull<P> {
    /// Returns a copy of the held value.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> P {
        self.as_inner().clone()
    }
}

impl<T: ?Sized> NotNull<*const T> {
    /// Acquires the underlying `*const` pointer.
    #[inline]
    #[track_caller]
    pub fn as_ptr(&self) -> *const T {
        self.get()
    }

    /// Returns a shared reference to the value.
    ///
    /// # Safety
    ///
    /// When calling this method, you must ensure that the data is still valid, i.e. it hasn't been dropped
    #[inline]
    #[track_caller]
    pub unsafe fn as_ref<'a>(&self) -> &'a T {
        &*self.as_ptr()
    }
}

impl<T: ?Sized> NotNull<*mut T> {
    /// Acquires the underlying `*mut` pointer.
    #[inline]
    #[track_caller]
    pub fn as_ptr(&self) -> *mut T {
        self.get()
    }

    /// Returns a shared reference to the value.
    ///
    /// # Safety
    ///
    /// The data must still be valid and not mutably aliased for `'a`.
    #[inline]
    #[track_caller]
    pub unsafe fn as_ref<'a>(&self) -> &'a T {
        &*self.as_ptr()
    }

    /// Returns an exclusive reference to the value.
    ///
    /// # Safety
    ///
    /// The data must still be valid and not aliased at all for `'a`.
    #[inline]
    #[track_caller]
    pub unsafe fn as_mut<'a>(&mut self) -> &'a mut T {
        &mut *self.as_ptr()
    }
}

impl<P: NullableDeref> Deref for NotNull<P> {
    type Target = P::Target;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &P::Target {
        match self.0.try_deref() {
            Some(target) => target,
            None => check::null_dereference(),
        }
    }
}

impl<P: NullableDerefMut> DerefMut for NotNull<P> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut P::Target {
        match self.0.try_deref_mut() {
            Some(target) => target,
            None => check::null_dereference(),
        }
    }
}

impl<P: Nullable + Clone> Clone for NotNull<P> {
    #[inline]
    #[track_caller]
    fn clone(&self) -> Self {
        Self(self.get())
    }
}

impl<P: Nullable + Copy> Copy for NotNull<P> {}

impl<P, Q> PartialEq<NotNull<Q>> for NotNull<P>
where
    P: Nullable + PartialEq<Q>,
    Q: Nullable,
{
    #[inline]
    fn eq(&self, other: &NotNull<Q>) -> bool {
        self.as_inner() == other.as_inner()
    }
}

impl<P: Nullable + Eq> Eq for NotNull<P> {}

impl<P, Q> PartialOrd<NotNull<Q>> for NotNull<P>
where
    P: Nullable + PartialOrd<Q>,
    Q: Nullable,
{
    #[inline]
    fn partial_cmp(&self, other: &NotNull<Q>) -> Option<Ordering> {
        self.as_inner().partial_cmp(other.as_inner())
    }
}

impl<P: Nullable + Ord> Ord for NotNull<P> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_inner().cmp(other.as_inner())
    }
}

impl<P: Nullable + Hash> Hash for NotNull<P> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_inner().hash(state)
    }
}

impl<P: Nullable + fmt::Debug> fmt::Debug for NotNull<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_inner(), f)
    }
}

impl<P: Nullable + fmt::Display> fmt::Display for NotNull<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_inner(), f)
    }
}

impl<P: Nullable + fmt::Pointer> fmt::Pointer for NotNull<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(self.as_inner(), f)
    }
}
