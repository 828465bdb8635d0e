//! Data models for commitments-of-traders records.
//!
//! Figures are grouped per trader category. A report lists its numbers in a
//! fixed left-to-right order, and [`Category::ALL`] is that order.

pub mod category;
pub mod record;

pub use category::{Category, CategoryValues};
pub use record::Record;
