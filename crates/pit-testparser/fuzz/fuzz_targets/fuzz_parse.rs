// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for whole-stream parsing
//!
//! This fuzzes `parse`, which reads captured `go test -v` output from any
//! `BufRead`. Invalid UTF-8 must surface as an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use pit_testparser::parse;

fuzz_target!(|data: &[u8]| {
    let _ = parse(data);
});
