// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: backend.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Operation table implemented once per algorithm and dispatched at
//! runtime through the descriptor.

use super::error::{MacError, MacErrorKind};
use super::params::ParamBag;

/// Algorithm-wide half of the operation table. One instance is shared by
/// every context of the algorithm and must stay immutable.
pub trait MacBackend: Send + Sync + 'static {
	/// Creates fresh, un-keyed computation state.
	fn new_state(&self) -> Result<Box<dyn MacState>, MacError>;

	/// Reports algorithm-wide defaults by filling the entries it
	/// recognizes. A backend without a handler succeeds without effect.
	fn get_params(&self, params: &mut ParamBag) -> bool {
		let _ = params;
		true
	}

	/// Accepts algorithm-wide configuration. Descriptors are immutable,
	/// so the default succeeds without effect.
	fn set_params(&self, params: &ParamBag) -> bool {
		let _ = params;
		true
	}
}

/// Per-computation half of the operation table. State is exclusively
/// owned by one context; dropping it releases its resources.
pub trait MacState: Send {
	/// Deep copy of the running computation, sharing nothing with the
	/// original. `None` means the backend cannot checkpoint its state.
	fn try_clone(&self) -> Option<Box<dyn MacState>> {
		None
	}

	/// Binds key material and optional configuration. Rejections are
	/// reported, never retried.
	fn init(
		&mut self,
		key: &[u8],
		params: Option<&ParamBag>,
	) -> Result<(), MacError>;

	/// Absorbs the next chunk of message data.
	fn update(&mut self, data: &[u8]);

	/// Writes the result into `out` and returns the number of bytes
	/// written. After a successful call the state is exhausted.
	fn finalize(&mut self, out: &mut [u8]) -> Result<usize, MacError>;

	/// Context-granularity parameter query; same skip-unknown contract
	/// as [`MacBackend::get_params`].
	fn get_params(&self, params: &mut ParamBag) -> bool {
		let _ = params;
		true
	}

	/// Context-granularity configuration; same skip-unknown contract as
	/// [`MacBackend::set_params`].
	fn set_params(&mut self, params: &ParamBag) -> bool {
		let _ = params;
		true
	}
}

/// Copies a fixed-length result into the caller's buffer.
pub(crate) fn write_fixed(
	digest: &[u8],
	out: &mut [u8],
) -> Result<usize, MacError> {
	if out.len() < digest.len() {
		return Err(MacError::new(
			MacErrorKind::InvalidArgument,
			format!(
				"output buffer holds {} bytes but the result needs {}",
				out.len(),
				digest.len()
			),
		));
	}
	out[..digest.len()].copy_from_slice(digest);
	Ok(digest.len())
}
