//! `hostwatch-core` — pure domain logic for the host-health sampler.
//!
//! Contains the sample model, the threshold evaluation engine, and the
//! alert message renderer. Nothing in this crate performs I/O — the
//! metric provider and notification channel are boundaries implemented
//! by other crates, which keeps everything here testable in isolation.

pub mod alert;
pub mod evaluate;
pub mod provider;
pub mod sample;
pub mod types;
