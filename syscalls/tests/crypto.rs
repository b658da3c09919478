use cx_common::{
    decode_hex, CX_EC_INFINITE_POINT, CX_EC_INVALID_CURVE, CX_EC_INVALID_POINT,
    CX_INVALID_PARAMETER, CX_INVALID_PARAMETER_SIZE, CX_NOT_UNLOCKED, CX_OK,
};
use cx_syscalls::*;
use sha2::{Digest, Sha256};

const SECP256K1: u32 = 0x21;
const ED25519: u32 = 0x71;
const BLS12_381_G1: u32 = 0x39;

fn alloc_point(ctx: &mut CxContext, curve: u32) -> SyscallEcPoint {
    let mut p = SyscallEcPoint::default();
    assert_eq!(sys_cx_ecpoint_alloc(ctx, &mut p, curve), CX_OK);
    p
}

#[test]
fn test_ecdomain_queries() {
    let mut bits = 0;
    assert_eq!(sys_cx_ecdomain_size(SECP256K1, &mut bits), CX_OK);
    assert_eq!(bits, 256);
    let mut len = 0;
    assert_eq!(sys_cx_ecdomain_parameters_length(BLS12_381_G1, &mut len), CX_OK);
    assert_eq!(len, 48);
    assert_eq!(sys_cx_ecdomain_size(0x20, &mut bits), CX_EC_INVALID_CURVE);

    let (mut gx, mut gy) = ([0u8; 32], [0u8; 32]);
    assert_eq!(sys_cx_ecdomain_generator(SECP256K1, &mut gx, &mut gy), CX_OK);
    assert_eq!(
        gx.to_vec(),
        decode_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
    );
    let mut short = [0u8; 16];
    assert_eq!(sys_cx_ecdomain_generator(SECP256K1, &mut short, &mut gy), CX_INVALID_PARAMETER_SIZE);
    assert_eq!(sys_cx_ecdomain_parameter(SECP256K1, 0, &mut gx), CX_INVALID_PARAMETER);
}

#[test]
fn test_point_flow() {
    let mut ctx = CxContext::default();
    assert_eq!(sys_cx_bn_lock(&mut ctx, 32, 0), CX_OK);

    let g = alloc_point(&mut ctx, SECP256K1);
    assert_eq!(sys_cx_ecdomain_generator_bn(&mut ctx, SECP256K1, &g), CX_OK);
    let mut on_curve = false;
    assert_eq!(sys_cx_ecpoint_is_on_curve(&mut ctx, &g, &mut on_curve), CX_OK);
    assert!(on_curve);

    // 2G through doubling and through scalar multiplication
    let doubled = alloc_point(&mut ctx, SECP256K1);
    assert_eq!(sys_cx_ecpoint_add(&mut ctx, &doubled, &g, &g), CX_OK);
    let scaled = alloc_point(&mut ctx, SECP256K1);
    let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
    assert_eq!(sys_cx_ecpoint_export(&ctx, &g, &mut x, &mut y), CX_OK);
    assert_eq!(sys_cx_ecpoint_init(&mut ctx, &scaled, &x, &y), CX_OK);
    assert_eq!(sys_cx_ecpoint_scalarmul(&mut ctx, &scaled, &[2]), CX_OK);
    let mut equal = false;
    assert_eq!(sys_cx_ecpoint_cmp(&ctx, &doubled, &scaled, &mut equal), CX_OK);
    assert!(equal);

    // Compression round trip
    let mut compressed = [0u8; 32];
    let mut sign = 0;
    assert_eq!(sys_cx_ecpoint_compress(&ctx, &doubled, &mut compressed, &mut sign), CX_OK);
    let restored = alloc_point(&mut ctx, SECP256K1);
    assert_eq!(sys_cx_ecpoint_decompress(&mut ctx, &restored, &compressed, sign), CX_OK);
    assert_eq!(sys_cx_ecpoint_cmp(&ctx, &restored, &doubled, &mut equal), CX_OK);
    assert!(equal);

    // 2G - 2G is the point at infinity
    assert_eq!(sys_cx_ecpoint_neg(&mut ctx, &restored), CX_OK);
    assert_eq!(sys_cx_ecpoint_add(&mut ctx, &restored, &restored, &doubled), CX_OK);
    let mut at_infinity = false;
    assert_eq!(sys_cx_ecpoint_is_at_infinity(&ctx, &restored, &mut at_infinity), CX_OK);
    assert!(at_infinity);
    assert_eq!(sys_cx_ecpoint_export(&ctx, &restored, &mut x, &mut y), CX_EC_INFINITE_POINT);
    assert_eq!(sys_cx_ecpoint_compress(&ctx, &restored, &mut compressed, &mut sign), CX_EC_INVALID_POINT);

    // Mixed curves are rejected
    let other = alloc_point(&mut ctx, 0x22);
    assert_eq!(sys_cx_ecpoint_add(&mut ctx, &other, &g, &g), CX_EC_INVALID_POINT);

    let mut g = g;
    assert_eq!(sys_cx_ecpoint_destroy(&mut ctx, &mut g), CX_OK);
    assert_eq!(g, SyscallEcPoint::default());
    assert_eq!(sys_cx_ecpoint_neg(&mut ctx, &g), CX_EC_INVALID_CURVE);
    sys_cx_bn_unlock(&mut ctx);
}

#[test]
fn test_x25519() {
    let k = decode_hex("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let u = decode_hex("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    let mut out = [0u8; 32];
    assert_eq!(sys_cx_x25519(&mut out, &k, &u), CX_OK);
    assert_eq!(
        out.to_vec(),
        decode_hex("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552")
    );
}

#[test]
fn test_ecdsa_flow() {
    let mut ctx = CxContext::default();
    let key = decode_hex("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
    let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
    assert_eq!(sys_cx_ecdsa_public_key(&mut ctx, SECP256K1, &key, &mut x, &mut y), CX_OK);

    let hash = Sha256::digest(b"sample");
    let mut sig = [0u8; 64];
    let mut parity = 2;
    assert_eq!(sys_cx_ecdsa_sign(&mut ctx, SECP256K1, &key, &hash, &mut sig, &mut parity), CX_OK);
    assert!(parity < 2);

    let mut verified = false;
    assert_eq!(sys_cx_ecdsa_verify(&mut ctx, SECP256K1, &x, &y, &hash, &sig, &mut verified), CX_OK);
    assert!(verified);

    let other = Sha256::digest(b"other");
    assert_eq!(sys_cx_ecdsa_verify(&mut ctx, SECP256K1, &x, &y, &other, &sig, &mut verified), CX_OK);
    assert!(!verified);

    // Signing runs its own session
    assert_eq!(sys_cx_bn_lock(&mut ctx, 32, 0), CX_OK);
    assert_eq!(
        sys_cx_ecdsa_sign(&mut ctx, SECP256K1, &key, &hash, &mut sig, &mut parity),
        CX_NOT_UNLOCKED
    );
    sys_cx_bn_unlock(&mut ctx);
}

#[test]
fn test_eddsa_rfc8032() {
    let mut ctx = CxContext::default();
    let key = decode_hex("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let mut public = [0u8; 32];
    assert_eq!(sys_cx_eddsa_public_key(&mut ctx, &key, &mut public), CX_OK);
    assert_eq!(
        public.to_vec(),
        decode_hex("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
    );

    let mut sig = [0u8; 64];
    assert_eq!(sys_cx_eddsa_sign(&mut ctx, &key, b"", &mut sig), CX_OK);
    assert_eq!(
        sig.to_vec(),
        decode_hex(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        )
    );

    let mut verified = false;
    assert_eq!(sys_cx_eddsa_verify(&mut ctx, &public, b"", &sig, &mut verified), CX_OK);
    assert!(verified);
    assert_eq!(sys_cx_eddsa_verify(&mut ctx, &public, b"x", &sig, &mut verified), CX_OK);
    assert!(!verified);
}

#[test]
fn test_bip32_derivation() {
    let mut ctx = CxContext::default();
    let seed = decode_hex("000102030405060708090a0b0c0d0e0f");
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    assert_eq!(
        sys_os_derive_node_bip32(&mut ctx, SECP256K1, &[], &seed, &mut key, Some(&mut chain_code)),
        CX_OK
    );
    assert_eq!(
        key.to_vec(),
        decode_hex("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
    );
    assert_eq!(
        chain_code.to_vec(),
        decode_hex("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508")
    );

    assert_eq!(
        sys_os_derive_node_bip32(&mut ctx, SECP256K1, &[0x8000_0000], &seed, &mut key, None),
        CX_OK
    );
    assert_eq!(
        key.to_vec(),
        decode_hex("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
    );

    assert_eq!(
        sys_os_derive_node_bip32(&mut ctx, ED25519, &[], &seed, &mut key, Some(&mut chain_code)),
        CX_OK
    );
    assert_eq!(
        key.to_vec(),
        decode_hex("2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7")
    );
    assert_eq!(
        chain_code.to_vec(),
        decode_hex("90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb")
    );

    // Ed25519 only derives hardened children
    assert_eq!(
        sys_os_derive_node_bip32(&mut ctx, ED25519, &[0], &seed, &mut key, None),
        CX_INVALID_PARAMETER
    );
    assert_eq!(
        sys_os_derive_node_bip32(&mut ctx, 0x23, &[], &seed, &mut key, None),
        CX_EC_INVALID_CURVE
    );
}

#[test]
fn test_bls_flow() {
    let mut private_key = [0u8; BLS_PRIVATE_KEY_BUFFER_SIZE];
    let mut public_key = [0u8; 48];
    let seed = [0x42u8; 32];
    // Proof-of-possession scheme, derived key
    assert_eq!(
        sys_cx_bls12381_key_gen(0x82, &seed, &[], &[], &mut private_key, &mut public_key),
        CX_OK
    );
    assert!(private_key[..16].iter().all(|&b| b == 0));

    let mut expected = [0u8; 48];
    assert_eq!(sys_cx_bls12381_public_key(&private_key, &mut expected), CX_OK);
    assert_eq!(public_key, expected);

    let mut sig = [0u8; 96];
    assert_eq!(sys_cx_bls12381_sign(2, &private_key, b"message", &mut sig), CX_OK);
    let mut verified = false;
    assert_eq!(sys_cx_bls12381_verify(2, &public_key, b"message", &sig, &mut verified), CX_OK);
    assert!(verified);
    // Another scheme hashes under another tag
    assert_eq!(sys_cx_bls12381_verify(1, &public_key, b"message", &sig, &mut verified), CX_OK);
    assert!(!verified);

    let mut acc = [0u8; 96];
    assert_eq!(sys_cx_bls12381_aggregate(&sig, &mut acc, true), CX_OK);
    assert_eq!(acc, sig);
    assert_eq!(sys_cx_bls12381_aggregate(&sig[..48], &mut acc, false), CX_INVALID_PARAMETER);

    // Basic scheme leaves the public key alone
    let mut untouched = [0xAAu8; 48];
    assert_eq!(
        sys_cx_bls12381_key_gen(0, &private_key, &[], &[], &mut [0u8; 48], &mut untouched),
        CX_OK
    );
    assert_eq!(untouched, [0xAAu8; 48]);

    let mut padded = private_key;
    padded[0] = 1;
    assert_eq!(sys_cx_bls12381_sign(2, &padded, b"message", &mut sig), CX_INVALID_PARAMETER);
}

#[test]
fn test_bls_generator_public_key() {
    let mut private_key = [0u8; BLS_PRIVATE_KEY_BUFFER_SIZE];
    private_key[47] = 1;
    let mut public_key = [0u8; 48];
    assert_eq!(sys_cx_bls12381_public_key(&private_key, &mut public_key), CX_OK);
    assert_eq!(
        public_key.to_vec(),
        decode_hex(
            "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
        )
    );
}

#[test]
fn test_hash_to_field() {
    let mut out = [0u8; HASH_TO_FIELD_SIZE];
    assert_eq!(sys_cx_hash_to_field(b"abc", b"DST", &mut out), CX_OK);
    // Every element is reduced below p, whose top byte is 0x1a
    for chunk in out.chunks(48) {
        assert!(chunk[0] <= 0x1a);
    }
    let mut again = [0u8; HASH_TO_FIELD_SIZE];
    assert_eq!(sys_cx_hash_to_field(b"abc", b"DST", &mut again), CX_OK);
    assert_eq!(out, again);

    let mut short = [0u8; 96];
    assert_eq!(sys_cx_hash_to_field(b"abc", b"DST", &mut short), CX_INVALID_PARAMETER_SIZE);
}
