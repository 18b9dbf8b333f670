// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Provider-based message authentication code (MAC) engine.
//!
//! Providers publish algorithms as reference-counted descriptors. Callers
//! acquire a descriptor by name, create per-computation contexts from it,
//! stream data, and finalize into fixed-length or caller-sized output.

pub mod rgm {
	pub mod mac;
}
