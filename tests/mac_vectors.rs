// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustgenmac

use hex_literal::hex;
use rustgenmac::rgm::mac::context::MacContext;
use rustgenmac::rgm::mac::executor::{
	compute_bytes, consume_reader, digest_to_hex,
};
use rustgenmac::rgm::mac::registry;

#[test]
fn hmac_sha1_matches_rfc_2202_case_1() {
	let algorithm = registry::acquire("hmac-sha1").unwrap();
	let digest =
		compute_bytes(&algorithm, &[0x0bu8; 20], b"Hi There")
			.unwrap();
	assert_eq!(
		digest_to_hex(&digest),
		"b617318655057264e28bc0b6fb378c8ef146be00"
	);
}

#[test]
fn hmac_sha256_matches_rfc_4231_case_1() {
	let algorithm = registry::acquire("hmac-sha256").unwrap();
	let digest =
		compute_bytes(&algorithm, &[0x0bu8; 20], b"Hi There")
			.unwrap();
	assert_eq!(
		digest_to_hex(&digest),
		"b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
	);
}

#[test]
fn hmac_sha256_matches_rfc_4231_case_2() {
	let algorithm = registry::acquire("hmac-sha256").unwrap();
	let digest = compute_bytes(
		&algorithm,
		b"Jefe",
		b"what do ya want for nothing?",
	)
	.unwrap();
	assert_eq!(
		digest_to_hex(&digest),
		"5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
	);
}

#[test]
fn hmac_sha512_matches_rfc_4231_case_1() {
	let algorithm = registry::acquire("hmac-sha512").unwrap();
	let digest =
		compute_bytes(&algorithm, &[0x0bu8; 20], b"Hi There")
			.unwrap();
	assert_eq!(
		digest_to_hex(&digest),
		"87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
		 daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
	);
}

#[test]
fn cmac_aes128_matches_rfc_4493_examples() {
	let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
	let algorithm = registry::acquire("cmac-aes128").unwrap();

	let empty = compute_bytes(&algorithm, &key, b"").unwrap();
	assert_eq!(
		digest_to_hex(&empty),
		"bb1d6929e95937287fa37d129b756746"
	);

	let message = hex!("6bc1bee22e409f96e93d7e117393172a");
	let digest = compute_bytes(&algorithm, &key, &message).unwrap();
	assert_eq!(
		digest_to_hex(&digest),
		"070a16b46b4d4144f79bdd9dd04a287c"
	);
}

#[test]
fn blake3_keyed_matches_the_reference_hasher() {
	let key = [0x42u8; 32];
	let data = b"cross-checked payload";
	let algorithm = registry::acquire("blake3-keyed").unwrap();
	let digest = compute_bytes(&algorithm, &key, data).unwrap();
	let reference = blake3::keyed_hash(&key, data);
	assert_eq!(digest.as_slice(), reference.as_bytes());
}

#[test]
fn kmac_variants_declare_their_nominal_lengths() {
	let kmac128 = registry::acquire("kmac128").unwrap();
	let digest =
		compute_bytes(&kmac128, b"vector key", b"payload").unwrap();
	assert_eq!(digest.len(), 32);

	let kmac256 = registry::acquire("kmac256").unwrap();
	let digest =
		compute_bytes(&kmac256, b"vector key", b"payload").unwrap();
	assert_eq!(digest.len(), 64);
}

#[test]
fn reader_streaming_matches_one_shot_computation() {
	let algorithm = registry::acquire("hmac-sha256").unwrap();
	let payload = vec![0xa5u8; 40000];

	let mut context = MacContext::new(&algorithm).unwrap();
	context.init(b"stream key", None).unwrap();
	let streamed =
		consume_reader(payload.as_slice(), &mut context).unwrap();

	let one_shot =
		compute_bytes(&algorithm, b"stream key", &payload).unwrap();
	assert_eq!(streamed, one_shot);
}
