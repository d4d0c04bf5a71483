#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// `crate` inside the crate, `vc_graph` in doc tests and derive output.
// `Manifest` can only emit one of them, so the crate also answers to its name.
extern crate self as vc_graph;

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

pub mod clone;
pub mod decl;
pub mod error;
pub mod generated;
pub mod hash;
pub mod impls;
pub mod info;
pub mod object;
pub mod options;
pub mod schema;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use object::Object;
pub use vc_graph_derive as derive;
pub use vc_graph_derive::Graph;
