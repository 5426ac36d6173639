// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pit library
//!
//! This module exports the command line plumbing of pit for use in
//! integration tests: configuration and the parse-and-report step.

pub mod config;
pub mod report;
