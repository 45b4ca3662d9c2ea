#![no_std]

//! Pointers that are never null.
//!
//! [`NotNull`] wraps any pointer-like value and refuses to hold its null
//! representation. [`Shared`] builds on it to give a reference-counted handle
//! that always points at a live, heap-allocated value.
//!
//! Null checks are compiled in when `debug_assertions` or the `checked`
//! feature are on (see [`CHECKED`]); a violation then terminates the process.
//! Otherwise the wrappers cost nothing over the pointer they hold.
//!
//! # Example
//! ```
//! use nnptr::{upcast, Shared};
//!
//! trait Animal {
//!     fn noise(&self) -> &'static str;
//! }
//!
//! struct Dog;
//!
//! impl Animal for Dog {
//!     fn noise(&self) -> &'static str {
//!         "woof"
//!     }
//! }
//!
//! upcast!(Dog => dyn Animal);
//!
//! let p1 = Shared::new(9);
//! let p3 = p1.clone();
//! assert_eq!(*p1 + *p3, 18);
//! assert_eq!(Shared::strong_count(&p1), 2);
//!
//! let dog = Shared::new(Dog);
//! let animal: Shared<dyn Animal> = dog.clone().upcast();
//! assert_eq!(animal.noise(), "woof");
//! ```

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod check;
mod error;
mod not_null;
mod nullable;
mod shared;
mod upcast;

pub use check::CHECKED;
pub use error::NullError;
pub use not_null::NotNull;
pub use nullable::{Nullable, NullableDeref, NullableDerefMut};
pub use shared::Shared;
pub use upcast::Upcast;

#[doc(hidden)]
pub mod __private {
    pub use alloc::sync::Arc;
}
