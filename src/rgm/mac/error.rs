// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac
// File: error.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Error type shared by the descriptor, context, and registry layers.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacErrorKind {
	/// No provider supplies an algorithm with the requested name or
	/// identity.
	NotFound,
	/// Backend state could not be allocated or the descriptor is
	/// malformed.
	ResourceExhaustion,
	/// The backend declares no duplicator, finalizer, or
	/// extendable-output mode.
	Unsupported,
	/// Undersized output buffer or invalid key length.
	InvalidArgument,
	/// Algorithm-specific rejection during init, finalize, or a
	/// parameter set.
	BackendRejected,
}

#[derive(Debug)]
pub struct MacError {
	kind: MacErrorKind,
	message: Cow<'static, str>,
}

impl MacError {
	pub fn new(
		kind: MacErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	pub fn kind(&self) -> MacErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}
}

impl std::fmt::Display for MacError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for MacError {}
