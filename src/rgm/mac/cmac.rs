// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: cmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! CMAC backends for AES-128/192/256 keys.

use aes::{Aes128, Aes192, Aes256};
use cmac::{Cmac, Mac};

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::backend::{write_fixed, MacBackend, MacState};
use super::error::{MacError, MacErrorKind};
use super::params::{
	ParamBag, MAC_PARAM_BLOCK_SIZE, MAC_PARAM_SIZE, MAC_PARAM_XOF,
};
use super::registry::BUILTIN_PROVIDER;

type CmacAes128 = Cmac<Aes128>;
type CmacAes192 = Cmac<Aes192>;
type CmacAes256 = Cmac<Aes256>;

const CMAC_TAG_SIZE: usize = 16;
const CMAC_BLOCK_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CmacKind {
	Aes128,
	Aes192,
	Aes256,
}

impl CmacKind {
	fn key_length(self) -> usize {
		match self {
			CmacKind::Aes128 => 16,
			CmacKind::Aes192 => 24,
			CmacKind::Aes256 => 32,
		}
	}

	fn label(self) -> &'static str {
		match self {
			CmacKind::Aes128 => "CMAC-AES128",
			CmacKind::Aes192 => "CMAC-AES192",
			CmacKind::Aes256 => "CMAC-AES256",
		}
	}
}

pub(crate) fn catalog() -> Vec<MacAlgorithm> {
	vec![
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				8,
				"cmac-aes128",
				&["aes-128-cmac"],
				"CMAC with AES-128 (NIST SP 800-38B)",
			),
			BUILTIN_PROVIDER,
			Box::new(CmacBackend {
				kind: CmacKind::Aes128,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				9,
				"cmac-aes192",
				&["aes-192-cmac"],
				"CMAC with AES-192 (NIST SP 800-38B)",
			),
			BUILTIN_PROVIDER,
			Box::new(CmacBackend {
				kind: CmacKind::Aes192,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				10,
				"cmac-aes256",
				&["aes-256-cmac"],
				"CMAC with AES-256 (NIST SP 800-38B)",
			),
			BUILTIN_PROVIDER,
			Box::new(CmacBackend {
				kind: CmacKind::Aes256,
			}),
		),
	]
}

struct CmacBackend {
	kind: CmacKind,
}

impl MacBackend for CmacBackend {
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError> {
		Ok(Box::new(CmacState {
			kind: self.kind,
			mac: None,
		}))
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, CMAC_TAG_SIZE);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, CMAC_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}
}

#[derive(Clone)]
enum CmacVariant {
	Aes128(CmacAes128),
	Aes192(CmacAes192),
	Aes256(CmacAes256),
}

#[derive(Clone)]
struct CmacState {
	kind: CmacKind,
	mac: Option<CmacVariant>,
}

impl MacState for CmacState {
	fn try_clone(&self) -> Option<Box<dyn MacState>> {
		Some(Box::new(self.clone()))
	}

	fn init(
		&mut self,
		key: &[u8],
		_params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		if key.len() != self.kind.key_length() {
			return Err(MacError::new(
				MacErrorKind::InvalidArgument,
				format!(
					"Invalid {} key length: expected {} bytes but received {}",
					self.kind.label(),
					self.kind.key_length(),
					key.len()
				),
			));
		}
		let mac = match self.kind {
			CmacKind::Aes128 => CmacAes128::new_from_slice(key)
				.map(CmacVariant::Aes128),
			CmacKind::Aes192 => CmacAes192::new_from_slice(key)
				.map(CmacVariant::Aes192),
			CmacKind::Aes256 => CmacAes256::new_from_slice(key)
				.map(CmacVariant::Aes256),
		}
		.map_err(|_| {
			MacError::new(
				MacErrorKind::BackendRejected,
				format!(
					"{} failed to initialize with provided key",
					self.kind.label()
				),
			)
		})?;
		self.mac = Some(mac);
		Ok(())
	}

	fn update(&mut self, data: &[u8]) {
		match self.mac.as_mut() {
			Some(CmacVariant::Aes128(mac)) => mac.update(data),
			Some(CmacVariant::Aes192(mac)) => mac.update(data),
			Some(CmacVariant::Aes256(mac)) => mac.update(data),
			None => {}
		}
	}

	fn finalize(&mut self, out: &mut [u8]) -> Result<usize, MacError> {
		let mac = self.mac.take().ok_or_else(|| {
			MacError::new(
				MacErrorKind::BackendRejected,
				format!(
					"{} context is not initialized or already finalized",
					self.kind.label()
				),
			)
		})?;
		let digest = match mac {
			CmacVariant::Aes128(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			CmacVariant::Aes192(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			CmacVariant::Aes256(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
		};
		write_fixed(&digest, out)
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, CMAC_TAG_SIZE);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, CMAC_BLOCK_SIZE);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}

	fn set_params(&mut self, params: &ParamBag) -> bool {
		params.get_boolean(MAC_PARAM_XOF) != Some(true)
	}
}
