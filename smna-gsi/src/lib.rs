//! Core types for GSI cost-function diagnostics.
//!
//! The data assimilation system writes, for every analysis cycle, the
//! number of observations (`Nobs`), the observation term of the cost
//! function (`Jo`) and its normalized value (`Jo/n`) per observation type
//! and per point of the minimization. This crate names those things:
//!
//! - [`observation`]: observation types, iteration stages, metrics and
//!   the [`observation::ObservationRecord`] row
//! - [`synoptic`]: synoptic hours and the synoptic-time selection labels
//! - [`error`]: the error taxonomy shared by every SMNA crate

pub mod error;
pub mod observation;
pub mod synoptic;

pub use error::{Result, SmnaError};
