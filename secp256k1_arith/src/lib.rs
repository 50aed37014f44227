//! The arithmetic core of secp256k1.
//!
//! - [`field::Field`]: integers mod `p = 2^256 - 2^32 - 977` in a redundant
//!   ten limb representation whose carry headroom is tracked at runtime.
//! - [`Scalar`]: integers mod the group order.
//! - [`group::Affine`] and [`group::Jacobian`]: points on `y² = x³ + 7`.
//! - [`ecmult`]: scalar multiplication, both constant-time and variable-time.
//! - [`eckey`]: public and secret key encodings and tweaks.
//!
//! Anything whose name ends in `_var` may branch on its inputs. Only call it
//! with public data.
//!
//! ```
//! use secp256k1_arith::{eckey::SecretKey, Context, Scalar};
//! let ctx = Context::global();
//! let sk = SecretKey::from_scalar(Scalar::from_int(3)).unwrap();
//! let three_g = sk.public_key(ctx);
//! assert_eq!(
//!     three_g.to_string(),
//!     "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
//! );
//! ```
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub use digest;
pub use rand_core;
pub use subtle;

mod macros;

pub mod field;
pub mod group;
pub mod hex;
mod scalar;

mod error;
pub use error::Error;

#[cfg(feature = "alloc")]
mod context;
#[cfg(feature = "alloc")]
pub mod ecmult;
#[cfg(feature = "alloc")]
pub mod eckey;
#[cfg(feature = "alloc")]
pub use context::Context;

pub use field::Field;
pub use group::{Affine, G, Jacobian};
pub use scalar::Scalar;

#[cfg(feature = "proptest")]
pub mod proptest;
#[cfg(any(test, feature = "proptest"))]
mod proptest_impls;

#[cfg(feature = "serde")]
pub extern crate serde;
#[cfg(feature = "libsecp_compat")]
pub extern crate secp256k1;
#[cfg(feature = "libsecp_compat")]
mod libsecp_compat;

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing as __tracing;

#[doc(hidden)]
pub const TEST_SOUNDNESS: usize = 20;
