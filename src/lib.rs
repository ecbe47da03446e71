//! MuShop Architecture - typed catalog of the MuShop reference architecture
//!
//! This crate describes the cloud e-commerce reference architecture the MuShop
//! storefront renders as a diagram: technology categories, reusable service
//! kinds, concrete services and the directed links between them. Two cloud
//! variants exist (OCI and AWS) and the OCI variant also has a reduced "basic"
//! view.
//!
//! # Core Features
//!
//! - **Typed references**: services and links refer to each other through ids
//!   resolved at load time, so a misspelled key is a load error
//! - **Icon resolution**: icon file names are joined onto an asset directory once,
//!   by a pure transform
//! - **Validation**: [`catalog::Architecture::validate`] re-checks every invariant
//!   of a loaded catalog
//! - **Diagram export**: [`catalog::Diagram`] flattens a view into JSON or YAML
//!   for a renderer
//!
//! # Getting Started
//!
//! ```rust
//! use mushop_arch::catalog::{oci, View};
//!
//! let architecture = oci();
//! let atp = architecture.service("ATP").unwrap();
//! assert_eq!(architecture.tech_of(atp).name, "Oracle Cloud Infrastructure");
//! assert_eq!(architecture.links(View::Basic).unwrap().len(), 5);
//! ```
//!
//! Configuration is optional; see [`config::CatalogConfig`].

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod catalog;
pub mod config;

pub use catalog::{aws, oci, Architecture, Cloud, Diagram, View};
pub use config::CatalogConfig;
