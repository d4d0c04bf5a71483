//! Support for clone and merge functions generated at compile time.
//!
//! `#[derive(Graph)]` with `#[graph(generate)]` writes a [`GraphClone`]
//! impl whose bodies access fields directly and call the functions of the
//! nested types statically. Decisions that depend on the [`Options`] of the
//! [`Cloner`] (inclusion, predicates, hooks, factory, surrogate) are read
//! from a [`GeneratedPlan`], so both paths agree on every input.
//!
//! [`GeneratedTable`] collects the generated types, a cloner built with
//! [`Cloner::with_generated`] uses them in place of the interpreted plans.
//!
//! [`Options`]: crate::options::Options

// -----------------------------------------------------------------------------
// Modules

mod graph_clone;
mod plan;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use graph_clone::{GraphClone, Specialized};
pub use plan::GeneratedPlan;
pub use table::{GeneratedEntry, GeneratedTable};

#[cfg(doc)]
use crate::clone::Cloner;
