//! Game implementations.

pub mod pots;
