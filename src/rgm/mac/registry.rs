// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: registry.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Provider boundary and the built-in algorithm registry.

use std::sync::OnceLock;

use log::debug;

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::error::{MacError, MacErrorKind};
use super::{blake3, cmac, hmac, kmac, poly1305};

/// Source of algorithm descriptors. Every successful lookup hands out a
/// shared handle and therefore counts as one acquired reference.
pub trait MacProvider: Send + Sync {
	fn name(&self) -> &'static str;

	fn lookup(&self, identifier: &str) -> Option<MacAlgorithm>;

	fn algorithms(&self) -> Vec<MacAlgorithm>;
}

pub const BUILTIN_PROVIDER: &str = "builtin";

fn builtin_catalog() -> &'static [MacAlgorithm] {
	static CATALOG: OnceLock<Vec<MacAlgorithm>> = OnceLock::new();
	CATALOG.get_or_init(|| {
		let mut algorithms = hmac::catalog();
		algorithms.extend(kmac::catalog());
		algorithms.extend(cmac::catalog());
		algorithms.extend(blake3::catalog());
		algorithms.extend(poly1305::catalog());
		algorithms
	})
}

pub fn algorithms() -> impl Iterator<Item = &'static MacAlgorithm> {
	builtin_catalog().iter()
}

pub fn metadata() -> Vec<MacAlgorithmMetadata> {
	algorithms().map(|algorithm| algorithm.metadata()).collect()
}

/// Resolves the primary name or any alias, case-insensitive.
pub fn find_algorithm(
	identifier: &str,
) -> Option<&'static MacAlgorithm> {
	algorithms().find(|algorithm| algorithm.is_a(identifier))
}

pub fn find_by_identity(
	identity: u32,
) -> Option<&'static MacAlgorithm> {
	algorithms()
		.find(|algorithm| algorithm.identity() == identity)
}

/// Acquires a shared descriptor handle from the built-in registry.
pub fn acquire(identifier: &str) -> Result<MacAlgorithm, MacError> {
	let algorithm = find_algorithm(identifier).ok_or_else(|| {
		MacError::new(
			MacErrorKind::NotFound,
			format!("unsupported MAC algorithm `{}`", identifier),
		)
	})?;
	debug!(
		"acquired `{}` from the {} provider",
		algorithm.name(),
		algorithm.provider()
	);
	Ok(algorithm.clone())
}

/// Acquires a shared descriptor handle by numeric identity.
pub fn acquire_by_identity(
	identity: u32,
) -> Result<MacAlgorithm, MacError> {
	let algorithm = find_by_identity(identity).ok_or_else(|| {
		MacError::new(
			MacErrorKind::NotFound,
			format!("no MAC algorithm with identity {}", identity),
		)
	})?;
	debug!(
		"acquired `{}` from the {} provider",
		algorithm.name(),
		algorithm.provider()
	);
	Ok(algorithm.clone())
}

/// Acquires a descriptor through an external provider boundary.
pub fn acquire_from(
	provider: &dyn MacProvider,
	identifier: &str,
) -> Result<MacAlgorithm, MacError> {
	provider.lookup(identifier).ok_or_else(|| {
		MacError::new(
			MacErrorKind::NotFound,
			format!(
				"provider `{}` has no MAC algorithm `{}`",
				provider.name(),
				identifier
			),
		)
	})
}

/// The built-in catalog exposed through the provider boundary.
pub struct BuiltinProvider;

impl MacProvider for BuiltinProvider {
	fn name(&self) -> &'static str {
		BUILTIN_PROVIDER
	}

	fn lookup(&self, identifier: &str) -> Option<MacAlgorithm> {
		find_algorithm(identifier).cloned()
	}

	fn algorithms(&self) -> Vec<MacAlgorithm> {
		algorithms().cloned().collect()
	}
}
