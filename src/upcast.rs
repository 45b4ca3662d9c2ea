use alloc::sync::Arc;

/// Declares that an `Arc<Self>` can be turned into an `Arc<U>` over the same allocation.
///
/// Every type upcasts to itself. Other relationships, typically a concrete
/// type into a trait object it implements, are declared with [`upcast!`](crate::upcast!).
///
/// Implementations must return `this` itself, only changing its static type,
/// so that strong count and storage stay shared.
pub trait Upcast<U: ?Sized> {
    fn upcast_arc(this: Arc<Self>) -> Arc<U>;
}

impl<T: ?Sized> Upcast<T> for T {
    #[inline]
    fn upcast_arc(this: Arc<Self>) -> Arc<T> {
        this
    }
}

/// Declares [`Upcast`] relationships from a type into one or more wider types.
///
/// ```
/// use nnptr::{upcast, Shared};
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// upcast!(Square => dyn Shape, dyn Shape + Send + Sync);
///
/// let square = Shared::new(Square(3.0));
/// let shape: Shared<dyn Shape> = square.clone().upcast();
///
/// assert_eq!(shape.area(), 9.0);
/// assert!(Shared::ptr_eq(&square.upcast::<dyn Shape>(), &shape));
/// ```
#[macro_export]
macro_rules! upcast {
    ($derived:ty => $($base:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$base> for $derived {
                #[inline]
                fn upcast_arc(this: $crate::__private::Arc<Self>) -> $crate::__private::Arc<$base> {
                    this
                }
            }
        )+
    };
}
