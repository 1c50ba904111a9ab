#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! use ecgroup::{CurveGroup, Domain};
//! use num_bigint::BigUint;
//!
//! let domain = Domain::curve25519();
//! let point = domain
//!     .curve()
//!     .scalar_mul(domain.generator(), &BigUint::from(2u32))?;
//! assert!(domain.curve().contains(&point));
//! # Ok::<(), ecgroup::Error>(())
//! ```

mod curve;
mod domain;
mod error;
mod point;

pub use crate::{
    curve::{CurveForm, CurveGroup, EllipticCurve},
    domain::Domain,
    error::{Error, Result},
    point::CurvePoint,
};
pub use num_bigint::{self, BigUint};
