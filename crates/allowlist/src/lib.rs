#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error type (`AllowListStoreError`)
//! - [`document`]: Typed documents and pure transforms (`DependencyDocument`, `LicenseDocument`, `SourceType`)
//! - [`xml`]: XML codec (`XmlDocument`)
//! - [`store`]: Persistence over the settings store (`AllowListStore`, `AllowListScope`)

pub mod document;
pub mod error;
pub mod store;
pub mod xml;

// --- Public API Re-exports ---

pub use document::{AllowedDependency, DependencyDocument, License, LicenseDocument, SourceType};
pub use error::AllowListStoreError;
pub use store::{AllowListScope, AllowListStore};
pub use xml::{XmlDocument, XmlError};
