#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

pub mod authenticated;
pub mod ct;
pub mod ecdh;
pub mod kdf;

mod error;

pub use crate::{
    authenticated::{EcDiffieHellmanRsa, IdentityKey},
    ct::ct_eq,
    ecdh::EcDiffieHellman,
    error::{Error, Result},
    kdf::Prf,
};
pub use ecgroup::{self, CurvePoint, Domain};
pub use rand_core;
pub use rsa;
pub use x509_cert;
