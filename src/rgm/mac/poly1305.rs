// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: poly1305.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Poly1305 one-time authenticator backend.

use poly1305::{
	universal_hash::KeyInit, universal_hash::UniversalHash,
	Poly1305 as Poly1305Mac,
};

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::backend::{write_fixed, MacBackend, MacState};
use super::error::{MacError, MacErrorKind};
use super::params::{
	ParamBag, MAC_PARAM_BLOCK_SIZE, MAC_PARAM_SIZE, MAC_PARAM_XOF,
};
use super::registry::BUILTIN_PROVIDER;

const POLY1305_KEY_LENGTH: usize = 32;
const POLY1305_TAG_SIZE: usize = 16;
const POLY1305_BLOCK_SIZE: usize = 16;

pub(crate) fn catalog() -> Vec<MacAlgorithm> {
	vec![MacAlgorithm::new(
		MacAlgorithmMetadata::current(
			12,
			"poly1305",
			&[],
			"Poly1305 one-time authenticator (RFC 8439)",
		),
		BUILTIN_PROVIDER,
		Box::new(Poly1305Backend),
	)]
}

struct Poly1305Backend;

impl MacBackend for Poly1305Backend {
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError> {
		Ok(Box::new(Poly1305State { mac: None }))
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, POLY1305_TAG_SIZE);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, POLY1305_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}
}

// One-time keys make a checkpointed copy meaningless, so this state
// keeps the default `try_clone` and reports duplication as unsupported.
struct Poly1305State {
	mac: Option<Poly1305Mac>,
}

impl MacState for Poly1305State {
	fn init(
		&mut self,
		key: &[u8],
		_params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		if key.len() != POLY1305_KEY_LENGTH {
			return Err(MacError::new(
				MacErrorKind::InvalidArgument,
				format!(
					"Poly1305 requires a 32-byte one-time key but received {} bytes",
					key.len()
				),
			));
		}
		let mac =
			Poly1305Mac::new_from_slice(key).map_err(|_| {
				MacError::new(
					MacErrorKind::BackendRejected,
					"Poly1305 failed to initialize with provided key",
				)
			})?;
		self.mac = Some(mac);
		Ok(())
	}

	fn update(&mut self, data: &[u8]) {
		if let Some(mac) = self.mac.as_mut() {
			mac.update_padded(data);
		}
	}

	fn finalize(&mut self, out: &mut [u8]) -> Result<usize, MacError> {
		let mac = self.mac.take().ok_or_else(|| {
			MacError::new(
				MacErrorKind::BackendRejected,
				"Poly1305 context is not initialized or already finalized",
			)
		})?;
		let tag = mac.finalize();
		write_fixed(tag.as_slice(), out)
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, POLY1305_TAG_SIZE);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, POLY1305_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}

	fn set_params(&mut self, params: &ParamBag) -> bool {
		params.get_boolean(MAC_PARAM_XOF) != Some(true)
	}
}
