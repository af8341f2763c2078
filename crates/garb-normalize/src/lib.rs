//! Schema normalization engine for heterogeneous supplier feeds.
//!
//! Reduces an upstream response of unpredictable shape — a SOAP payload
//! whose nesting and field spellings drift across WSDL revisions, or a
//! plain JSON body — to a flat list of canonical product records:
//!
//! 1. decode the payload into a [`tree::RawNode`] document tree,
//! 2. find the product records with [`locate::locate_products`],
//! 3. extract canonical fields per record with [`map::map_record`],
//! 4. drop repeats with [`dedup::dedup_products`],
//! 5. reduce vendor-specific shapes to the public one with
//!    [`unify::unify_record`] at the serving boundary.
//!
//! Everything here is pure: no I/O, no clocks, no globals. Extraction is
//! recall-biased — a field whose spelling matches no alias comes back as
//! an empty string (or `0.0` for price) rather than failing the batch.

pub mod aliases;
pub mod dedup;
pub mod locate;
pub mod map;
pub mod tree;
pub mod unify;
pub mod walk;

pub use aliases::{AliasTable, SANMAR_ALIASES};
pub use dedup::dedup_products;
pub use locate::locate_products;
pub use map::map_record;
pub use tree::{RawNode, TreeError};
pub use unify::{unify_record, unify_records};
pub use walk::walk;
