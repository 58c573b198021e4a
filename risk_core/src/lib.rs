//! # risk_core - Lightning Risk Assessment Engine
//!
//! `risk_core` computes the IEC 62305-2 risks of a structure struck by, or
//! near to, lightning: R1 (human life), R2 (public service), R3 (cultural
//! heritage) and R4 (economic value), each broken down per zone with every
//! intermediate frequency, probability and loss exposed by name.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: an engine is built from validated inputs and every
//!   `compute_*` call is a pure function of them
//! - **JSON-First**: all inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: invalid inputs are reported with their field path
//! - **Auditable**: results carry the factors and citations they came from
//!
//! ## Quick Start
//!
//! ```rust
//! use risk_core::assessment::Assessment;
//!
//! let assessment = Assessment::template("John Engineer", "25-001", "Acme Logistics");
//! let report = assessment.evaluate().unwrap();
//!
//! for check in &report.compliance {
//!     println!("{}: {:.3e} (passes: {:?})", check.risk.display_name(), check.total, check.passes);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`assessment`] - Assessment document, metadata and full evaluation
//! - [`calculations`] - The risk engine and the R1..R4 breakdowns
//! - [`structure`] - Structure geometry and collection areas
//! - [`lines`] - Connected service lines and their frequencies
//! - [`zone`] - Zone coefficients
//! - [`equations`] - The underlying closed-form formulas
//! - [`compliance`] - Tolerable risk checks
//! - [`economics`] - Cost-benefit of protection
//! - [`settings`] - Engine settings stored with an assessment
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod assessment;
pub mod calculations;
pub mod compliance;
pub mod economics;
pub mod equations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod lines;
pub mod settings;
pub mod structure;
pub mod zone;

pub use assessment::{Assessment, AssessmentMetadata, AssessmentReport};
pub use calculations::{RiskEngine, RiskKind, RiskReport};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_assessment, save_assessment, FileLock};
pub use settings::EngineSettings;
