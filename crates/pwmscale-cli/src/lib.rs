//! pwmscale CLI library.
//!
//! Command implementations for the `pwmscale` binary. Each command prints
//! its primary output on stdout and status lines on stderr, so stdout can be
//! redirected straight into driver source.

pub mod commands;
