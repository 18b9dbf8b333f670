// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: context.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Per-computation MAC contexts: creation, duplication, streaming, and
//! both finalization modes.
//!
//! A context is single-threaded and non-reentrant; the `&mut` receivers
//! enforce serialized access to one instance. A context moves through
//! init, zero or more updates, and a single finalize; dropping it
//! releases the backend state and the descriptor reference it holds.

use log::{debug, trace};

use super::algorithm::MacAlgorithm;
use super::backend::MacState;
use super::error::{MacError, MacErrorKind};
use super::params::{Param, ParamBag, MAC_PARAM_SIZE, MAC_PARAM_XOF};

pub struct MacContext {
	algorithm: MacAlgorithm,
	state: Box<dyn MacState>,
	size_hint: usize,
}

impl MacContext {
	/// Allocates backend state for one computation. Failure signals
	/// allocation failure or a malformed descriptor, not a usage error.
	pub fn new(algorithm: &MacAlgorithm) -> Result<Self, MacError> {
		let state = algorithm.backend().new_state()?;
		trace!("created `{}` context", algorithm.name());
		Ok(Self {
			algorithm: algorithm.clone(),
			state,
			size_hint: 0,
		})
	}

	/// Descriptor this context was created from.
	pub fn algorithm(&self) -> &MacAlgorithm {
		&self.algorithm
	}

	/// Checkpoints the running computation into an independent copy.
	///
	/// The copy shares no mutable state with the original; both sides
	/// can continue streaming and finalize separately. Backends without
	/// a duplicator report `Unsupported`, so callers can fall back to
	/// re-deriving from the key.
	pub fn try_clone(&self) -> Result<Self, MacError> {
		let state = self.state.try_clone().ok_or_else(|| {
			MacError::new(
				MacErrorKind::Unsupported,
				format!(
					"`{}` state cannot be duplicated",
					self.algorithm.name()
				),
			)
		})?;
		trace!("duplicated `{}` context", self.algorithm.name());
		Ok(Self {
			algorithm: self.algorithm.clone(),
			state,
			size_hint: self.size_hint,
		})
	}

	/// Declared result length in bytes, or 0 when it cannot be
	/// determined yet.
	///
	/// Queries `size` at context granularity first, then falls back to
	/// the algorithm-wide default. This is also the probe half of
	/// finalization: it reports the exact length a compute-mode
	/// finalize will produce without touching the running computation.
	pub fn output_size(&mut self) -> usize {
		let mut query = ParamBag::new()
			.with(Param::request_size(MAC_PARAM_SIZE));
		if self.state.get_params(&mut query) {
			if let Some(size) = query.get_size(MAC_PARAM_SIZE) {
				self.size_hint = size;
				return size;
			}
		}
		let mut query = ParamBag::new()
			.with(Param::request_size(MAC_PARAM_SIZE));
		if self.algorithm.get_params(&mut query) {
			if let Some(size) = query.get_size(MAC_PARAM_SIZE) {
				self.size_hint = size;
				return size;
			}
		}
		0
	}

	/// Binds key material and optional configuration.
	pub fn init(
		&mut self,
		key: &[u8],
		params: Option<&ParamBag>,
	) -> Result<(), MacError> {
		self.state.init(key, params)?;
		self.size_hint = 0;
		debug!(
			"initialized `{}` context with {}-byte key",
			self.algorithm.name(),
			key.len()
		);
		Ok(())
	}

	/// Absorbs the next chunk of message data. Callable zero or more
	/// times between init and finalize.
	pub fn update(&mut self, data: &[u8]) {
		self.state.update(data);
	}

	/// Compute-mode finalize into the caller's buffer; returns the
	/// number of bytes written.
	///
	/// Fails with `InvalidArgument` when the buffer is smaller than the
	/// declared length. On failure the buffer contents are undefined.
	pub fn finalize(
		&mut self,
		out: &mut [u8],
	) -> Result<usize, MacError> {
		let declared = self.output_size();
		if declared > 0 && out.len() < declared {
			return Err(MacError::new(
				MacErrorKind::InvalidArgument,
				format!(
					"output buffer holds {} bytes but `{}` produces {}",
					out.len(),
					self.algorithm.name(),
					declared
				),
			));
		}
		let written = self.state.finalize(out)?;
		debug!(
			"finalized `{}` context ({} bytes)",
			self.algorithm.name(),
			written
		);
		Ok(written)
	}

	/// Extendable-output finalize writing exactly `out.len()`
	/// caller-chosen bytes.
	///
	/// Negotiates extendable-output mode through the parameter-set
	/// protocol first; when the backend rejects the `xof` parameter the
	/// call fails with `Unsupported` and the running computation is
	/// left untouched, so a fixed-length finalize remains possible.
	pub fn finalize_xof(
		&mut self,
		out: &mut [u8],
	) -> Result<(), MacError> {
		let request = ParamBag::new()
			.with(Param::boolean(MAC_PARAM_XOF, true));
		if !self.state.set_params(&request) {
			return Err(MacError::new(
				MacErrorKind::Unsupported,
				format!(
					"`{}` has no extendable-output mode",
					self.algorithm.name()
				),
			));
		}
		let written = self.state.finalize(out)?;
		if written != out.len() {
			return Err(MacError::new(
				MacErrorKind::BackendRejected,
				format!(
					"extendable-output finalize wrote {} of {} requested bytes",
					written,
					out.len()
				),
			));
		}
		debug!(
			"finalized `{}` context ({} extendable-output bytes)",
			self.algorithm.name(),
			out.len()
		);
		Ok(())
	}

	/// Context-granularity parameter query. Succeeds without effect
	/// when the backend declares no handler.
	pub fn get_params(&self, params: &mut ParamBag) -> bool {
		self.state.get_params(params)
	}

	/// Context-granularity configuration. Succeeds without effect when
	/// the backend declares no handler; otherwise the handler's result
	/// is propagated unchanged.
	pub fn set_params(&mut self, params: &ParamBag) -> bool {
		self.state.set_params(params)
	}
}

impl std::fmt::Debug for MacContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MacContext")
			.field("algorithm", &self.algorithm)
			.field("size_hint", &self.size_hint)
			.finish_non_exhaustive()
	}
}

impl Drop for MacContext {
	fn drop(&mut self) {
		trace!("released `{}` context", self.algorithm.name());
	}
}
