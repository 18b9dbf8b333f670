// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: blake3.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! BLAKE3 keyed-mode backend with extendable-output support.

use zeroize::Zeroize;

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::backend::{MacBackend, MacState};
use super::error::{MacError, MacErrorKind};
use super::params::{
	ParamBag, MAC_PARAM_BLOCK_SIZE, MAC_PARAM_SIZE, MAC_PARAM_XOF,
};
use super::registry::BUILTIN_PROVIDER;

const BLAKE3_OUTPUT_LEN: usize = 32;
const BLAKE3_BLOCK_SIZE: usize = 64;

pub(crate) fn catalog() -> Vec<MacAlgorithm> {
	vec![MacAlgorithm::new(
		MacAlgorithmMetadata::current(
			11,
			"blake3-keyed",
			&["blake3"],
			"BLAKE3 keyed mode",
		),
		BUILTIN_PROVIDER,
		Box::new(Blake3Backend),
	)]
}

struct Blake3Backend;

impl MacBackend for Blake3Backend {
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError> {
		Ok(Box::new(Blake3State {
			hasher: None,
			output_len: BLAKE3_OUTPUT_LEN,
			xof: false,
		}))
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, BLAKE3_OUTPUT_LEN);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, BLAKE3_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, true);
		true
	}
}

#[derive(Clone)]
struct Blake3State {
	hasher: Option<blake3::Hasher>,
	output_len: usize,
	xof: bool,
}

impl MacState for Blake3State {
	fn try_clone(&self) -> Option<Box<dyn MacState>> {
		Some(Box::new(self.clone()))
	}

	fn init(
		&mut self,
		key: &[u8],
		params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		if key.len() != blake3::KEY_LEN {
			return Err(MacError::new(
				MacErrorKind::InvalidArgument,
				format!(
					"BLAKE3 keyed mode requires a {}-byte key (got {})",
					blake3::KEY_LEN,
					key.len()
				),
			));
		}
		if let Some(params) = params {
			if !self.set_params(params) {
				return Err(MacError::new(
					MacErrorKind::BackendRejected,
					"BLAKE3 rejected an init parameter",
				));
			}
		}
		let mut fixed = [0u8; blake3::KEY_LEN];
		fixed.copy_from_slice(key);
		self.hasher = Some(blake3::Hasher::new_keyed(&fixed));
		fixed.zeroize();
		Ok(())
	}

	fn update(&mut self, data: &[u8]) {
		if let Some(hasher) = self.hasher.as_mut() {
			hasher.update(data);
		}
	}

	fn finalize(&mut self, out: &mut [u8]) -> Result<usize, MacError> {
		let hasher = self.hasher.take().ok_or_else(|| {
			MacError::new(
				MacErrorKind::BackendRejected,
				"BLAKE3 context is not initialized or already finalized",
			)
		})?;
		let mut reader = hasher.finalize_xof();
		if self.xof {
			reader.fill(out);
			Ok(out.len())
		} else {
			if out.len() < self.output_len {
				return Err(MacError::new(
					MacErrorKind::InvalidArgument,
					format!(
						"output buffer holds {} bytes but BLAKE3 produces {}",
						out.len(),
						self.output_len
					),
				));
			}
			reader.fill(&mut out[..self.output_len]);
			Ok(self.output_len)
		}
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, self.output_len);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, BLAKE3_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, self.xof);
		true
	}

	fn set_params(&mut self, params: &ParamBag) -> bool {
		if let Some(size) = params.get_size(MAC_PARAM_SIZE) {
			if size == 0 {
				return false;
			}
			self.output_len = size;
		}
		if let Some(xof) = params.get_boolean(MAC_PARAM_XOF) {
			self.xof = xof;
		}
		true
	}
}
