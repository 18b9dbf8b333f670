// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// Module: mac (message authentication codes)
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Keyed message authentication code (MAC) engine.
//! Submodules provide the descriptor and registry layer, computation
//! contexts, the typed parameter protocol, and the built-in backends.

pub mod algorithm;
pub mod backend;
pub mod blake3;
pub mod cmac;
pub mod context;
pub mod error;
pub mod executor;
pub mod hmac;
pub mod kmac;
pub mod params;
pub mod poly1305;
pub mod registry;
