// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: kmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! KMAC (NIST SP 800-185) backends for 128- and 256-bit variants, with
//! extendable-output support.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{CShake128, CShake128Core, CShake256, CShake256Core};
use zeroize::Zeroizing;

use super::algorithm::{MacAlgorithm, MacAlgorithmMetadata};
use super::backend::{MacBackend, MacState};
use super::error::{MacError, MacErrorKind};
use super::params::{
	ParamBag, MAC_PARAM_BLOCK_SIZE, MAC_PARAM_CUSTOM,
	MAC_PARAM_SIZE, MAC_PARAM_XOF,
};
use super::registry::BUILTIN_PROVIDER;

const KMAC128_RATE: usize = 168; // bytes
const KMAC256_RATE: usize = 136; // bytes
const FUNCTION_NAME: &[u8] = b"KMAC";
const OUTPUT_LEN_128: usize = 32;
const OUTPUT_LEN_256: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KmacKind {
	Kmac128,
	Kmac256,
}

impl KmacKind {
	fn rate(self) -> usize {
		match self {
			KmacKind::Kmac128 => KMAC128_RATE,
			KmacKind::Kmac256 => KMAC256_RATE,
		}
	}

	fn default_output(self) -> usize {
		match self {
			KmacKind::Kmac128 => OUTPUT_LEN_128,
			KmacKind::Kmac256 => OUTPUT_LEN_256,
		}
	}

	fn label(self) -> &'static str {
		match self {
			KmacKind::Kmac128 => "KMAC128",
			KmacKind::Kmac256 => "KMAC256",
		}
	}
}

pub(crate) fn catalog() -> Vec<MacAlgorithm> {
	vec![
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				6,
				"kmac128",
				&["kmac-128"],
				"KMAC128 keyed sponge (NIST SP 800-185)",
			),
			BUILTIN_PROVIDER,
			Box::new(KmacBackend {
				kind: KmacKind::Kmac128,
			}),
		),
		MacAlgorithm::new(
			MacAlgorithmMetadata::current(
				7,
				"kmac256",
				&["kmac-256"],
				"KMAC256 keyed sponge (NIST SP 800-185)",
			),
			BUILTIN_PROVIDER,
			Box::new(KmacBackend {
				kind: KmacKind::Kmac256,
			}),
		),
	]
}

struct KmacBackend {
	kind: KmacKind,
}

impl MacBackend for KmacBackend {
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError> {
		Ok(Box::new(KmacState {
			kind: self.kind,
			sponge: None,
			output_len: self.kind.default_output(),
			xof: false,
		}))
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, self.kind.default_output());
		params.fill_size(MAC_PARAM_BLOCK_SIZE, self.kind.rate());
		params.fill_boolean(MAC_PARAM_XOF, true);
		true
	}
}

#[derive(Clone)]
enum KmacSponge {
	Kmac128(CShake128),
	Kmac256(CShake256),
}

#[derive(Clone)]
struct KmacState {
	kind: KmacKind,
	sponge: Option<KmacSponge>,
	output_len: usize,
	xof: bool,
}

impl MacState for KmacState {
	fn try_clone(&self) -> Option<Box<dyn MacState>> {
		Some(Box::new(self.clone()))
	}

	fn init(
		&mut self,
		key: &[u8],
		params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		if key.is_empty() {
			return Err(MacError::new(
				MacErrorKind::InvalidArgument,
				format!("{} key must not be empty", self.kind.label()),
			));
		}
		if let Some(params) = params {
			if !self.set_params(params) {
				return Err(MacError::new(
					MacErrorKind::BackendRejected,
					format!(
						"{} rejected an init parameter",
						self.kind.label()
					),
				));
			}
		}
		let customization = params
			.and_then(|bag| bag.get_bytes(MAC_PARAM_CUSTOM))
			.unwrap_or(&[]);
		let padded = Zeroizing::new(bytepad(
			&encode_string(key),
			self.kind.rate(),
		));
		let sponge = match self.kind {
			KmacKind::Kmac128 => {
				let core = CShake128Core::new_with_function_name(
					FUNCTION_NAME,
					customization,
				);
				let mut sponge = CShake128::from_core(core);
				sponge.update(&padded);
				KmacSponge::Kmac128(sponge)
			}
			KmacKind::Kmac256 => {
				let core = CShake256Core::new_with_function_name(
					FUNCTION_NAME,
					customization,
				);
				let mut sponge = CShake256::from_core(core);
				sponge.update(&padded);
				KmacSponge::Kmac256(sponge)
			}
		};
		self.sponge = Some(sponge);
		Ok(())
	}

	fn update(&mut self, data: &[u8]) {
		match self.sponge.as_mut() {
			Some(KmacSponge::Kmac128(sponge)) => sponge.update(data),
			Some(KmacSponge::Kmac256(sponge)) => sponge.update(data),
			None => {}
		}
	}

	fn finalize(&mut self, out: &mut [u8]) -> Result<usize, MacError> {
		let sponge = self.sponge.take().ok_or_else(|| {
			MacError::new(
				MacErrorKind::BackendRejected,
				format!(
					"{} context is not initialized or already finalized",
					self.kind.label()
				),
			)
		})?;
		// right_encode(0) selects the arbitrary-length mode; a fixed
		// request encodes its bit length instead
		let trailer = if self.xof {
			right_encode(0)
		} else {
			right_encode((self.output_len * 8) as u64)
		};
		let mut reader: Box<dyn XofReader> = match sponge {
			KmacSponge::Kmac128(mut sponge) => {
				sponge.update(&trailer);
				Box::new(sponge.finalize_xof())
			}
			KmacSponge::Kmac256(mut sponge) => {
				sponge.update(&trailer);
				Box::new(sponge.finalize_xof())
			}
		};
		if self.xof {
			reader.read(out);
			Ok(out.len())
		} else {
			if out.len() < self.output_len {
				return Err(MacError::new(
					MacErrorKind::InvalidArgument,
					format!(
						"output buffer holds {} bytes but {} produces {}",
						out.len(),
						self.kind.label(),
						self.output_len
					),
				));
			}
			reader.read(&mut out[..self.output_len]);
			Ok(self.output_len)
		}
	}

	fn get_params(&self, params: &mut ParamBag) -> bool {
		params.fill_size(MAC_PARAM_SIZE, self.output_len);
		params.fill_size(MAC_PARAM_BLOCK_SIZE, self.kind.rate());
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

// SP 800-185 string encoding helpers.

fn encode_string(input: &[u8]) -> Vec<u8> {
	let mut result = left_encode((input.len() * 8) as u64);
	result.extend_from_slice(input);
	result
}

fn left_encode(value: u64) -> Vec<u8> {
	let encoded = trim_be_bytes(value);
	let mut out = Vec::with_capacity(1 + encoded.len());
	out.push(encoded.len() as u8);
	out.extend_from_slice(&encoded);
	out
}

fn right_encode(value: u64) -> Vec<u8> {
	let encoded = trim_be_bytes(value);
	let mut out = Vec::with_capacity(1 + encoded.len());
	out.extend_from_slice(&encoded);
	out.push(encoded.len() as u8);
	out
}

fn bytepad(encoded: &[u8], w: usize) -> Vec<u8> {
	let mut result = left_encode(w as u64);
	result.extend_from_slice(encoded);
	while result.len() % w != 0 {
		result.push(0);
	}
	result
}

fn trim_be_bytes(value: u64) -> Vec<u8> {
	let bytes = value.to_be_bytes();
	if value == 0 {
		return vec![0];
	}
	let first = bytes
		.iter()
		.position(|&b| b != 0)
		.unwrap_or(bytes.len() - 1);
	bytes[first..].to_vec()
}
