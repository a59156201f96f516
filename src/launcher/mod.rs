//! Launch targets
//!
//! Classifies button addresses and hands them to the desktop's URL or file
//! handlers through the [`Opener`] trait.

pub mod address;
pub mod opener;

pub use address::{AddressKind, classify, normalize_address};
pub use opener::{Opener, SystemOpener};
