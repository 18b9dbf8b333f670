// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: algorithm.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Reference-counted algorithm descriptors: immutable metadata plus the
//! backend operation table.

use std::fmt;
use std::sync::Arc;

use super::backend::MacBackend;
use super::params::ParamBag;

#[derive(Clone, Copy, Debug)]
pub struct MacAlgorithmMetadata {
	pub identity: u32,
	pub name: &'static str,
	pub aliases: &'static [&'static str],
	pub description: &'static str,
	pub legacy: bool,
}

impl MacAlgorithmMetadata {
	pub const fn new(
		identity: u32,
		name: &'static str,
		aliases: &'static [&'static str],
		description: &'static str,
		legacy: bool,
	) -> Self {
		Self {
			identity,
			name,
			aliases,
			description,
			legacy,
		}
	}

	pub const fn legacy(
		identity: u32,
		name: &'static str,
		aliases: &'static [&'static str],
		description: &'static str,
	) -> Self {
		Self::new(identity, name, aliases, description, true)
	}

	pub const fn current(
		identity: u32,
		name: &'static str,
		aliases: &'static [&'static str],
		description: &'static str,
	) -> Self {
		Self::new(identity, name, aliases, description, false)
	}

	pub fn is_legacy(&self) -> bool {
		self.legacy
	}
}

struct AlgorithmInner {
	metadata: MacAlgorithmMetadata,
	provider: &'static str,
	backend: Box<dyn MacBackend>,
}

/// Shared handle to one algorithm descriptor.
///
/// Cloning acquires another reference; dropping a handle releases one.
/// The descriptor and its backend are torn down exactly once, after the
/// last holder is gone. Reference counting is atomic, so handles may be
/// cloned and dropped from independent threads.
#[derive(Clone)]
pub struct MacAlgorithm {
	inner: Arc<AlgorithmInner>,
}

impl MacAlgorithm {
	pub fn new(
		metadata: MacAlgorithmMetadata,
		provider: &'static str,
		backend: Box<dyn MacBackend>,
	) -> Self {
		Self {
			inner: Arc::new(AlgorithmInner {
				metadata,
				provider,
				backend,
			}),
		}
	}

	pub fn metadata(&self) -> MacAlgorithmMetadata {
		self.inner.metadata
	}

	pub fn identity(&self) -> u32 {
		self.inner.metadata.identity
	}

	pub fn name(&self) -> &'static str {
		self.inner.metadata.name
	}

	pub fn aliases(&self) -> &'static [&'static str] {
		self.inner.metadata.aliases
	}

	pub fn description(&self) -> &'static str {
		self.inner.metadata.description
	}

	pub fn provider(&self) -> &'static str {
		self.inner.provider
	}

	pub fn is_legacy(&self) -> bool {
		self.inner.metadata.legacy
	}

	/// Primary name followed by every alias.
	pub fn names(&self) -> impl Iterator<Item = &'static str> {
		std::iter::once(self.inner.metadata.name)
			.chain(self.inner.metadata.aliases.iter().copied())
	}

	/// Capability check against the primary name or any alias,
	/// case-insensitive.
	pub fn is_a(&self, name: &str) -> bool {
		self.names()
			.any(|candidate| candidate.eq_ignore_ascii_case(name))
	}

	/// Number of live handles, the registry's own included.
	pub fn reference_count(&self) -> usize {
		Arc::strong_count(&self.inner)
	}

	/// Algorithm-granularity parameter query.
	pub fn get_params(&self, params: &mut ParamBag) -> bool {
		self.inner.backend.get_params(params)
	}

	/// Algorithm-granularity configuration.
	pub fn set_params(&self, params: &ParamBag) -> bool {
		self.inner.backend.set_params(params)
	}

	pub(crate) fn backend(&self) -> &dyn MacBackend {
		self.inner.backend.as_ref()
	}
}

impl fmt::Debug for MacAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MacAlgorithm")
			.field("identity", &self.identity())
			.field("name", &self.name())
			.field("provider", &self.provider())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::super::backend::{MacBackend, MacState};
	use super::super::error::MacError;
	use super::super::params::ParamBag;
	use super::*;

	struct NullBackend;

	struct NullState;

	impl MacBackend for NullBackend {
		fn new_state(
			&self,
		) -> Result<Box<dyn MacState>, MacError> {
			Ok(Box::new(NullState))
		}
	}

	impl MacState for NullState {
		fn init(
			&mut self,
			_key: &[u8],
			_params: Option<&ParamBag>,
		) -> Result<(), MacError> {
			Ok(())
		}

		fn update(&mut self, _data: &[u8]) {}

		fn finalize(
			&mut self,
			_out: &mut [u8],
		) -> Result<usize, MacError> {
			Ok(0)
		}
	}

	fn descriptor() -> MacAlgorithm {
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				900,
				"null-mac",
				&["null", "noop-mac"],
				"Test descriptor without behavior",
			),
			"test",
			Box::new(NullBackend),
		)
	}

	#[test]
	fn is_a_matches_primary_and_aliases() {
		let algorithm = descriptor();
		assert!(algorithm.is_a("null-mac"));
		assert!(algorithm.is_a("NULL-MAC"));
		assert!(algorithm.is_a("noop-mac"));
		assert!(!algorithm.is_a("hmac-sha256"));
	}

	#[test]
	fn names_lists_primary_first() {
		let algorithm = descriptor();
		let names: Vec<&str> = algorithm.names().collect();
		assert_eq!(names, vec!["null-mac", "null", "noop-mac"]);
	}

	#[test]
	fn clone_and_drop_move_the_reference_count() {
		let algorithm = descriptor();
		assert_eq!(algorithm.reference_count(), 1);
		let second = algorithm.clone();
		assert_eq!(algorithm.reference_count(), 2);
		drop(second);
		assert_eq!(algorithm.reference_count(), 1);
	}

	#[test]
	fn params_default_to_vacuous_success() {
		let algorithm = descriptor();
		let mut query = ParamBag::new();
		assert!(algorithm.get_params(&mut query));
		assert!(algorithm.set_params(&ParamBag::new()));
	}
}
