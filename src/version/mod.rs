//! Version resolution layer
//!
//! Decides, for one declared dependency, which published version it should be
//! upgraded to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Name     │────▶│  Registry   │────▶│  Selector   │
//! │ (validate)  │     │   (fetch)   │     │ (candidate) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Registries  │     │  Resolver   │
//!                     │ (http, cli) │     │(latest tag) │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`name`]: npm package name validation
//! - [`range`]: npm range parsing and matching
//! - [`selector`]: Highest matching published version
//! - [`resolver`]: Reconciliation against the "latest" dist-tag
//! - [`registry`]: Registry trait for fetching versions and dist-tags
//! - [`registries`]: Concrete registry implementations (HTTP, `npm view`)
//! - [`error`]: Error types
//! - [`semver`]: Shared semver utilities
//! - [`types`]: Registry metadata types

pub mod error;
pub mod name;
pub mod range;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod selector;
pub mod semver;
pub mod types;
