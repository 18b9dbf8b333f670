// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: hmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! HMAC backends covering SHA-1 (legacy) and SHA-2/SHA-3 variants.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::backend::{write_fixed, MacBackend, MacState};
use super::error::{MacError, MacErrorKind};
use super::params::{
	ParamBag, MAC_PARAM_BLOCK_SIZE, MAC_PARAM_SIZE, MAC_PARAM_XOF,
};
use super::registry::BUILTIN_PROVIDER;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;
type HmacSha3_256 = Hmac<Sha3_256>;
type HmacSha3_512 = Hmac<Sha3_512>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HmacKind {
	Sha1,
	Sha256,
	Sha512,
	Sha3_256,
	Sha3_512,
}

impl HmacKind {
	fn output_size(self) -> usize {
		match self {
			HmacKind::Sha1 => 20,
			HmacKind::Sha256 => 32,
			HmacKind::Sha512 => 64,
			HmacKind::Sha3_256 => 32,
			HmacKind::Sha3_512 => 64,
		}
	}

	fn block_size(self) -> usize {
		match self {
			HmacKind::Sha1 => 64,
			HmacKind::Sha256 => 64,
			HmacKind::Sha512 => 128,
			HmacKind::Sha3_256 => 136,
			HmacKind::Sha3_512 => 72,
		}
	}

	fn label(self) -> &'static str {
		match self {
			HmacKind::Sha1 => "HMAC-SHA1",
			HmacKind::Sha256 => "HMAC-SHA256",
			HmacKind::Sha512 => "HMAC-SHA512",
			HmacKind::Sha3_256 => "HMAC-SHA3-256",
			HmacKind::Sha3_512 => "HMAC-SHA3-512",
		}
	}
}

pub(crate) fn catalog() -> Vec<MacAlgorithm> {
	vec![
		MacAlgorithm::new(
			MacAlgorithmMetadata::legacy(
				1,
				"hmac-sha1",
				&["hmac-sha-1"],
				"HMAC with SHA-1 (RFC 2104)",
			),
			BUILTIN_PROVIDER,
			Box::new(HmacBackend {
				kind: HmacKind::Sha1,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				2,
				"hmac-sha256",
				&["hmac-sha-256"],
				"HMAC with SHA-256 (RFC 2104)",
			),
			BUILTIN_PROVIDER,
			Box::new(HmacBackend {
				kind: HmacKind::Sha256,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				3,
				"hmac-sha512",
				&["hmac-sha-512"],
				"HMAC with SHA-512 (RFC 2104)",
			),
			BUILTIN_PROVIDER,
			Box::new(HmacBackend {
				kind: HmacKind::Sha512,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				4,
				"hmac-sha3-256",
				&[],
				"HMAC with SHA3-256",
			),
			BUILTIN_PROVIDER,
			Box::new(HmacBackend {
				kind: HmacKind::Sha3_256,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				5,
				"hmac-sha3-512",
				&[],
				"HMAC with SHA3-512",
			),
			BUILTIN_PROVIDER,
			Box::new(HmacBackend {
				kind: HmacKind::Sha3_512,
			}),
		),
	]
}

struct HmacBackend {
	kind: HmacKind,
}

impl MacBackend for HmacBackend {
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError> {
		Ok(Box::new(HmacState {
			kind: self.kind,
			mac: None,
		}))
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, self.kind.output_size());
		params.fill_size(
			MAC_PARAM_BLOCK_SIZE,
			self.kind.block_size(),
		);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}
}

#[derive(Clone)]
enum HmacVariant {
	Sha1(HmacSha1),
	Sha256(HmacSha256),
	Sha512(HmacSha512),
	Sha3_256(HmacSha3_256),
	Sha3_512(HmacSha3_512),
}

#[derive(Clone)]
struct HmacState {
	kind: HmacKind,
	mac: Option<HmacVariant>,
}

impl HmacState {
	fn key_error(&self) -> MacError {
		MacError::new(
			MacErrorKind::InvalidArgument,
			format!(
				"{} key length must be at least one byte",
				self.kind.label()
			),
		)
	}
}

impl MacState for HmacState {
	fn try_clone(&self) -> Option<Box<dyn MacState>> {
		Some(Box::new(self.clone()))
	}

	fn init(
		&mut self,
		key: &[u8],
		_params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		let mac = match self.kind {
			HmacKind::Sha1 => HmacSha1::new_from_slice(key)
				.map(HmacVariant::Sha1)
				.map_err(|_| self.key_error())?,
			HmacKind::Sha256 => HmacSha256::new_from_slice(key)
				.map(HmacVariant::Sha256)
				.map_err(|_| self.key_error())?,
			HmacKind::Sha512 => HmacSha512::new_from_slice(key)
				.map(HmacVariant::Sha512)
				.map_err(|_| self.key_error())?,
			HmacKind::Sha3_256 => HmacSha3_256::new_from_slice(key)
				.map(HmacVariant::Sha3_256)
				.map_err(|_| self.key_error())?,
			HmacKind::Sha3_512 => HmacSha3_512::new_from_slice(key)
				.map(HmacVariant::Sha3_512)
				.map_err(|_| self.key_error())?,
		};
		self.mac = Some(mac);
		Ok(())
	}

	fn update(&mut self, data: &[u8]) {
		match self.mac.as_mut() {
			Some(HmacVariant::Sha1(mac)) => mac.update(data),
			Some(HmacVariant::Sha256(mac)) => mac.update(data),
			Some(HmacVariant::Sha512(mac)) => mac.update(data),
			Some(HmacVariant::Sha3_256(mac)) => mac.update(data),
			Some(HmacVariant::Sha3_512(mac)) => mac.update(data),
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
			HmacVariant::Sha1(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Sha256(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Sha512(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Sha3_256(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Sha3_512(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
		};
		write_fixed(&digest, out)
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, self.kind.output_size());
		params.fill_size(
			MAC_PARAM_BLOCK_SIZE,
			self.kind.block_size(),
		);
		params.fill_boolean(MAC_PARAM_XOF, false);
		true
	}

	fn set_params(&mut self, params: &ParamBag) -> bool {
		// extendable output is the only recognized context parameter
		// and HMAC cannot provide it
		params.get_boolean(MAC_PARAM_XOF) != Some(true)
	}
}
