//! # pile_core - Deep Foundation Axial Capacity Engine
//!
//! `pile_core` computes the axial compression and tension capacity of driven
//! piles and drilled shafts in layered soil, following the NAVFAC DM-7.02
//! method. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Fail Fast**: A sweep is validated in full before anything is computed
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::project::Project;
//! use pile_core::summary::CapacityKind;
//!
//! let project = Project::sample("Pier 7", "Jane Engineer", "ACME Port Authority");
//! let analysis = project.analyze().unwrap();
//!
//! let table = analysis.summary(CapacityKind::Allowable).unwrap();
//! println!("{:?}", table.compression_kips);
//! ```
//!
//! ## Modules
//!
//! - [`soil`] - Coarse layers, sublayer profile and effective stress
//! - [`calculations`] - Single-pile capacity and the width × depth sweep
//! - [`navfac`] - DM-7.02 tables and closed-form factors
//! - [`foundation`] - Materials, pile types and pile geometry
//! - [`project`] - Project record and one-call analysis
//! - [`summary`] - Capacity matrices in kips
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types and warnings
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod foundation;
pub mod navfac;
pub mod project;
pub mod soil;
pub mod summary;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, sweep, PileCapacityResult, SweepResults, SweepSettings};
pub use errors::{CalcError, CalcResult, DomainWarning};
pub use file_io::{load_project, save_project, FileLock};
pub use foundation::{FoundationConfiguration, Material, PileType, PileWidth};
pub use project::{Analysis, Project, ProjectMetadata};
pub use soil::{build, DetailedSoilProfile, GeneralSoilProfile, SoilLayer};
pub use summary::{CapacityKind, CapacitySummary};
