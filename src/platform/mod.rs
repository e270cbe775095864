//! Platform abstraction layer.
//!
//! Provides consistent interfaces for:
//! - External command execution with timeouts
//! - Linux host information and privilege level

pub mod command;
pub mod linux;
