//! Crustiat is a stability estimator for incomplete argumentation theories.
//!
//! Given an argumentation system and a partial knowledge base over its queryable literals,
//! it computes which literals already have a fixed status under the grounded semantics,
//! whatever the missing observations turn out to be.

#![warn(missing_docs)]

pub mod iat;

pub mod io;

pub mod stability;

pub mod utils;
