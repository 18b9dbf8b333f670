// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac

use rustgenmac::rgm::mac::context::MacContext;
use rustgenmac::rgm::mac::error::MacErrorKind;
use rustgenmac::rgm::mac::executor::finalize_vec;
use rustgenmac::rgm::mac::params::{
	Param, ParamBag, MAC_PARAM_CUSTOM, MAC_PARAM_XOF,
};
use rustgenmac::rgm::mac::registry;

const KEY: &[u8] = b"extendable key";
const DATA: &[u8] = b"stream me";

fn xof_digest(name: &str, len: usize) -> Vec<u8> {
	let algorithm = registry::acquire(name).unwrap();
	let mut context = MacContext::new(&algorithm).unwrap();
	context.init(KEY, None).unwrap();
	context.update(DATA);
	let mut out = vec![0u8; len];
	context.finalize_xof(&mut out).unwrap();
	out
}

#[test]
fn kmac_writes_exactly_the_requested_length() {
	for len in [1usize, 16, 32, 100] {
		let out = xof_digest("kmac128", len);
		assert_eq!(out.len(), len);
	}
}

#[test]
fn blake3_writes_exactly_the_requested_length() {
	let out = xof_digest("blake3-keyed", 48);
	assert_eq!(out.len(), 48);
}

#[test]
fn extendable_streams_are_prefix_consistent() {
	// the arbitrary-length stream does not depend on the requested
	// length, so a shorter read is a prefix of a longer one
	let short = xof_digest("kmac256", 16);
	let long = xof_digest("kmac256", 64);
	assert_eq!(short.as_slice(), &long[..16]);

	let short = xof_digest("blake3-keyed", 32);
	let long = xof_digest("blake3-keyed", 96);
	assert_eq!(short.as_slice(), &long[..32]);
}

#[test]
fn fixed_length_backends_reject_extendable_output() {
	for name in ["hmac-sha256", "cmac-aes128"] {
		let algorithm = registry::acquire(name).unwrap();
		let mut context = MacContext::new(&algorithm).unwrap();
		let key: Vec<u8> = if name.starts_with("cmac") {
			vec![0x11; 16]
		} else {
			KEY.to_vec()
		};
		context.init(&key, None).unwrap();
		context.update(DATA);
		let mut out = vec![0u8; 20];
		let err = context.finalize_xof(&mut out).unwrap_err();
		assert_eq!(err.kind(), MacErrorKind::Unsupported);
	}
}

#[test]
fn rejected_negotiation_leaves_the_context_usable() {
	let algorithm = registry::acquire("hmac-sha256").unwrap();
	let mut context = MacContext::new(&algorithm).unwrap();
	context.init(KEY, None).unwrap();
	context.update(DATA);
	let mut chosen = vec![0u8; 20];
	assert!(context.finalize_xof(&mut chosen).is_err());
	let digest = finalize_vec(&mut context).unwrap();

	let mut fresh = MacContext::new(&algorithm).unwrap();
	fresh.init(KEY, None).unwrap();
	fresh.update(DATA);
	assert_eq!(digest, finalize_vec(&mut fresh).unwrap());
}

#[test]
fn probe_after_negotiation_reports_the_nominal_default() {
	let algorithm = registry::acquire("kmac256").unwrap();
	let mut context = MacContext::new(&algorithm).unwrap();
	context.init(KEY, None).unwrap();
	let request = ParamBag::new()
		.with(Param::boolean(MAC_PARAM_XOF, true));
	assert!(context.set_params(&request));
	assert_eq!(context.output_size(), 64);
}

#[test]
fn customization_separates_output_domains() {
	let algorithm = registry::acquire("kmac128").unwrap();

	let mut plain = MacContext::new(&algorithm).unwrap();
	plain.init(KEY, None).unwrap();
	plain.update(DATA);
	let plain_digest = finalize_vec(&mut plain).unwrap();

	let params = ParamBag::new()
		.with(Param::bytes(MAC_PARAM_CUSTOM, b"domain A".to_vec()));
	let mut custom = MacContext::new(&algorithm).unwrap();
	custom.init(KEY, Some(&params)).unwrap();
	custom.update(DATA);
	let custom_digest = finalize_vec(&mut custom).unwrap();

	assert_ne!(plain_digest, custom_digest);
}

#[test]
fn fixed_kmac_differs_from_its_extendable_stream() {
	// SP 800-185 domain-separates the two finalization modes even for
	// equal lengths
	let algorithm = registry::acquire("kmac128").unwrap();
	let mut fixed = MacContext::new(&algorithm).unwrap();
	fixed.init(KEY, None).unwrap();
	fixed.update(DATA);
	let fixed_digest = finalize_vec(&mut fixed).unwrap();

	let extendable = xof_digest("kmac128", 32);
	assert_ne!(fixed_digest, extendable);
}
