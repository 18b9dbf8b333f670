// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: executor.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Streaming and one-shot helpers layered on top of [`MacContext`].

use hex::encode;
use std::io::{self, Read};

use super::algorithm::MacAlgorithm;
use super::context::MacContext;
use super::error::MacError;

const MAC_BUFFER_SIZE: usize = 8192;

/// One-shot computation over an in-memory message.
pub fn compute_bytes(
	algorithm: &MacAlgorithm,
	key: &[u8],
	data: &[u8],
) -> Result<Vec<u8>, MacError> {
	let mut context = MacContext::new(algorithm)?;
	context.init(key, None)?;
	context.update(data);
	finalize_vec(&mut context)
}

/// Streams a reader through an initialized context and finalizes.
pub fn consume_reader<R: Read>(
	mut reader: R,
	context: &mut MacContext,
) -> io::Result<Vec<u8>> {
	let mut buffer = [0u8; MAC_BUFFER_SIZE];
	loop {
		let n = reader.read(&mut buffer)?;
		if n == 0 {
			break;
		}
		context.update(&buffer[..n]);
	}
	finalize_vec(context).map_err(io::Error::other)
}

/// Sizes a buffer from the probe length and finalizes into it.
pub fn finalize_vec(
	context: &mut MacContext,
) -> Result<Vec<u8>, MacError> {
	let mut out = vec![0u8; context.output_size()];
	let written = context.finalize(&mut out)?;
	out.truncate(written);
	Ok(out)
}

pub fn digest_to_hex(bytes: &[u8]) -> String {
	encode(bytes)
}
