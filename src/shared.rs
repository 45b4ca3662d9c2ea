use alloc::{boxed::Box, sync::Arc};
use core::{
    any::type_name,
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use crate::{check, NotNull, Upcast};

/// A never-null, reference-counted handle to a heap-allocated `T`.
///
/// Cloning a `Shared` shares the allocation and bumps the strong count; the
/// value is dropped when its last owner goes away. Ownership is entirely that
/// of the inner [`Arc`], this type adds the non-null guarantee on top.
///
/// Apart from the `unsafe` [`Shared::from_raw`], none of the constructors
/// accept anything that could be null, so a `Shared` is valid from creation
/// until it is dropped. The only way to break that afterwards is
/// [`Shared::inner_mut`], which is `unsafe` too.
///
/// Like [`Arc`], the functions that aren't about the pointee are associated
/// functions (`Shared::strong_count(&s)`) so they never shadow `T`'s methods.
#[repr(transparent)]
pub struct Shared<T: ?Sized>(NotNull<Option<Arc<T>>>);

impl<T> Shared<T> {
    /// Moves `value` into a new allocation.
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Allocates a copy of `value`, converted into `T`.
    ///
    /// The original stays with the caller: a `Shared` never adopts storage it
    /// didn't allocate.
    pub fn from_value<X>(value: &X) -> Self
    where
        X: Clone + Into<T>,
    {
        Self::new(value.clone().into())
    }
}

impl<T: Clone> Shared<T> {
    /// Returns the value if this is the only owner, otherwise a clone of it.
    pub fn unwrap_or_clone(this: Self) -> T {
        Arc::try_unwrap(Self::into_arc(this)).unwrap_or_else(|arc| T::clone(&arc))
    }

    /// Makes the value unique to this handle, cloning it if it is shared, and
    /// returns exclusive access to it.
    #[track_caller]
    pub fn make_mut(this: &mut Self) -> &mut T {
        Arc::make_mut(this.arc_mut())
    }
}

impl<T: ?Sized> Shared<T> {
    /// Takes ownership of a boxed value given as a raw pointer.
    ///
    /// The value is moved into a fresh reference-counted allocation and the
    /// box is freed, so [`Shared::as_ptr`] won't return `pointer`.
    ///
    /// This is the one constructor that accepts a null, which is why it is
    /// `unsafe`.
    ///
    /// # Safety
    ///
    /// `pointer` must come from [`Box::into_raw`] and must not be used again by
    /// the caller. A null `pointer` terminates the process in checked builds.
    #[track_caller]
    pub unsafe fn from_raw(pointer: *mut T) -> Self {
        check::verify(pointer.is_null());
        log::trace!("adopting raw {} at {:p}", type_name::<T>(), pointer);

        Self::from_box(Box::from_raw(pointer))
    }

    /// Moves a boxed value into a new reference-counted allocation.
    pub fn from_box(boxed: Box<T>) -> Self {
        Self::from_arc(Arc::from(boxed))
    }

    /// Wraps an existing `Arc`, sharing its allocation and count.
    #[track_caller]
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self(NotNull::new(Some(arc)))
    }

    /// Converts a handle over a related type, sharing its allocation and count.
    #[track_caller]
    pub fn from_derived<X>(other: Shared<X>) -> Self
    where
        X: ?Sized + Upcast<T>,
    {
        other.upcast()
    }

    /// Narrows the static type of the pointee to `U`, keeping the same allocation and count.
    #[track_caller]
    pub fn upcast<U: ?Sized>(self) -> Shared<U>
    where
        T: Upcast<U>,
    {
        log::trace!("upcasting Shared<{}> to Shared<{}>", type_name::<T>(), type_name::<U>());

        Shared::from_arc(<T as Upcast<U>>::upcast_arc(Self::into_arc(self)))
    }

    /// Borrows the pointee.
    #[inline]
    #[track_caller]
    pub fn get(this: &Self) -> &T {
        this.arc()
    }

    /// Borrows the inner `Arc`.
    #[inline]
    #[track_caller]
    pub fn as_arc(this: &Self) -> &Arc<T> {
        this.arc()
    }

    /// Unwraps the inner `Arc`, which keeps owning the value.
    #[track_caller]
    pub fn into_arc(this: Self) -> Arc<T> {
        match this.0.into_inner() {
            Some(arc) => arc,
            None => check::null_dereference(),
        }
    }

    /// Number of owners of the allocation, counting bare `Arc`s taken out of handles.
    #[track_caller]
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(this.arc())
    }

    /// Returns true if both handles point to the same allocation.
    #[track_caller]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(this.arc(), other.arc())
    }

    /// Address of the pointee.
    #[track_caller]
    pub fn as_ptr(this: &Self) -> *const T {
        Arc::as_ptr(this.arc())
    }

    /// Returns exclusive access to the value if this is the only owner.
    #[track_caller]
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        Arc::get_mut(this.arc_mut())
    }

    /// Mutably borrows the inner optional `Arc`, bypassing the non-null guarantee.
    ///
    /// # Safety
    ///
    /// The handle must hold `Some` again once the borrow ends. If it doesn't,
    /// the next access through the handle terminates the process in checked
    /// builds and is undefined behaviour otherwise.
    #[track_caller]
    pub unsafe fn inner_mut(this: &mut Self) -> &mut Option<Arc<T>> {
        this.0.as_inner_mut()
    }

    #[inline(always)]
    #[track_caller]
    fn arc(&self) -> &Arc<T> {
        match self.0.as_inner() {
            Some(arc) => arc,
            // `as_inner` has already terminated on `None` in checked builds, and
            // only `inner_mut` can leave one behind.
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline(always)]
    #[track_caller]
    fn arc_mut(&mut self) -> &mut Arc<T> {
        match unsafe { self.0.as_inner_mut() } {
            Some(arc) => arc,
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

impl<T: ?Sized> Deref for Shared<T> {
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        self.arc()
    }
}

impl<T: ?Sized> AsRef<T> for Shared<T> {
    #[track_caller]
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: ?Sized> Borrow<T> for Shared<T> {
    #[track_caller]
    fn borrow(&self) -> &T {
        self
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    #[inline]
    #[track_caller]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized> From<Box<T>> for Shared<T> {
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T: ?Sized> From<Arc<T>> for Shared<T> {
    fn from(arc: Arc<T>) -> Self {
        Self::from_arc(arc)
    }
}

impl<T: ?Sized> From<Shared<T>> for Arc<T> {
    fn from(shared: Shared<T>) -> Self {
        Shared::into_arc(shared)
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Shared<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + Eq> Eq for Shared<T> {}

impl<T: ?Sized + PartialOrd> PartialOrd for Shared<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: ?Sized + Ord> Ord for Shared<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: ?Sized + Hash> Hash for Shared<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized> fmt::Pointer for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&Self::as_ptr(self), f)
    }
}
