use alloc::{boxed::Box, rc::Rc, sync::Arc};
use core::ptr::NonNull;

/// A pointer-like type with a null representation that can be tested for.
pub trait Nullable {
    /// Returns true if the value is the type's null representation.
    fn is_null(&self) -> bool;
}

/// A [`Nullable`] pointer whose referent can be borrowed safely when it isn't null.
///
/// Raw pointers don't implement this, their referents are only reachable through `unsafe`.
pub trait NullableDeref: Nullable {
    type Target: ?Sized;

    /// Borrows the referent, or returns `None` for the null representation.
    fn try_deref(&self) -> Option<&Self::Target>;
}

/// A [`NullableDeref`] pointer that also hands out exclusive access to its referent.
pub trait NullableDerefMut: NullableDeref {
    /// Mutably borrows the referent, or returns `None` for the null representation.
    fn try_deref_mut(&mut self) -> Option<&mut Self::Target>;
}

impl<T: ?Sized> Nullable for *const T {
    #[inline]
    fn is_null(&self) -> bool {
        (*self).is_null()
    }
}

impl<T: ?Sized> Nullable for *mut T {
    #[inline]
    fn is_null(&self) -> bool {
        (*self).is_null()
    }
}

impl<T: ?Sized> Nullable for NonNull<T> {
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

impl<T: ?Sized> Nullable for Option<NonNull<T>> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<'a, T: ?Sized> Nullable for &'a T {
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

impl<'a, T: ?Sized> NullableDeref for &'a T {
    type Target = T;

    #[inline]
    fn try_deref(&self) -> Option<&T> {
        Some(*self)
    }
}

impl<'a, T: ?Sized> Nullable for &'a mut T {
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

impl<'a, T: ?Sized> NullableDeref for &'a mut T {
    type Target = T;

    #[inline]
    fn try_deref(&self) -> Option<&T> {
        Some(&**self)
    }
}

impl<'a, T: ?Sized> NullableDerefMut for &'a mut T {
    #[inline]
    fn try_deref_mut(&mut self) -> Option<&mut T> {
        Some(&mut **self)
    }
}

impl<'a, T: ?Sized> Nullable for Option<&'a T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<'a, T: ?Sized> NullableDeref for Option<&'a T> {
    type Target = T;

    #[inline]
    fn try_deref(&self) -> Option<&T> {
        *self
    }
}

impl<'a, T: ?Sized> Nullable for Option<&'a mut T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<'a, T: ?Sized> NullableDeref for Option<&'a mut T> {
    type Target = T;

    #[inline]
    fn try_deref(&self) -> Option<&T> {
        self.as_deref()
    }
}

impl<'a, T: ?Sized> NullableDerefMut for Option<&'a mut T> {
    #[inline]
    fn try_deref_mut(&mut self) -> Option<&mut T> {
        self.as_deref_mut()
    }
}

// Owning pointers are never null on their own, and null only as `None` when optional.
macro_rules! owning_pointer {
    ($($pointer:ident),+) => {
        $(
            impl<T: ?Sized> Nullable for $pointer<T> {
                #[inline]
                fn is_null(&self) -> bool {
                    false
                }
            }

            impl<T: ?Sized> NullableDeref for $pointer<T> {
                type Target = T;

                #[inline]
                fn try_deref(&self) -> Option<&T> {
                    Some(&**self)
                }
            }

            impl<T: ?Sized> Nullable for Option<$pointer<T>> {
                #[inline]
                fn is_null(&self) -> bool {
                    self.is_none()
                }
            }

            impl<T: ?Sized> NullableDeref for Option<$pointer<T>> {
                type Target = T;

                #[inline]
                fn try_deref(&self) -> Option<&T> {
                    self.as_deref()
                }
            }
        )+
    };
}

owning_pointer!(Box, Rc, Arc);

impl<T: ?Sized> NullableDerefMut for Box<T> {
    #[inline]
    fn try_deref_mut(&mut self) -> Option<&mut T> {
        Some(&mut **self)
    }
}

impl<T: ?Sized> NullableDerefMut for Option<Box<T>> {
    #[inline]
    fn try_deref_mut(&mut self) -> Option<&mut T> {
        self.as_deref_mut()
    }
}
