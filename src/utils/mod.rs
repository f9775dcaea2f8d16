//! Miscellaneous components used in the library.

mod label;
pub use label::LabelType;
