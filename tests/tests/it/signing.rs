use frost340::{
    generic_ec::Scalar,
    signing::{aggregate, round1, round2, session},
    trusted_dealer, tweak, Curve, ShareIndex,
};
use frost340_tests::{external_verify, sign_message};
use rand::{seq::SliceRandom, RngCore};

#[test_case::case(2, 3; "t2n3")]
#[test_case::case(3, 3; "t3n3")]
#[test_case::case(3, 5; "t3n5")]
#[test_case::case(5, 5; "t5n5")]
fn full_signing_round_produces_valid_bip340_signature(t: u16, n: u16) {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], t, n).unwrap();

    let signers = (1..=n)
        .collect::<Vec<ShareIndex>>()
        .choose_multiple(&mut rng, usize::from(t))
        .copied()
        .collect::<Vec<_>>();

    let mut msg = [0u8; 32];
    rng.fill_bytes(&mut msg);

    let (pk, sig) = sign_message(&mut rng, &group, &signers, &[], &msg);
    sig.verify(&pk, &msg).expect("invalid signature");
    external_verify(&pk, &sig, &msg);
}

#[test]
fn signing_with_taproot_tweak_verifies_against_tweaked_key() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let tweak = tweak::taproot_tweak(&group.group_pubkey, None).unwrap();

    let mut msg = [0u8; 32];
    rng.fill_bytes(&mut msg);

    let (pk, sig) = sign_message(&mut rng, &group, &[1, 3], &[tweak], &msg);
    sig.verify(&pk, &msg).expect("invalid signature");
    external_verify(&pk, &sig, &msg);

    // The tweaked key is a different key
    let key = session::build_key_context(group.group_pubkey.to_bytes(true).as_bytes(), &[])
        .unwrap();
    assert_ne!(pk, key.xonly_pubkey().unwrap());
}

#[test]
fn odd_y_group_keys_sign_correctly() {
    let mut rng = rand_dev::DevRng::new();

    // Deal until the group key has an odd y-coordinate, so the parity
    // machinery actually kicks in
    let group = loop {
        let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
        if group.group_pubkey.to_bytes(true)[0] == 3 {
            break group;
        }
    };

    let mut msg = [0u8; 32];
    rng.fill_bytes(&mut msg);

    let (pk, sig) = sign_message(&mut rng, &group, &[2, 3], &[], &msg);
    sig.verify(&pk, &msg).expect("invalid signature");
    external_verify(&pk, &sig, &msg);

    // The x-only key drops the parity byte unchanged
    assert_eq!(&pk[..], &group.group_pubkey.to_bytes(true).as_bytes()[1..]);
}

#[test]
fn nonces_of_another_share_are_rejected() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let key = session::build_key_context(group.group_pubkey.to_bytes(true).as_bytes(), &[])
        .unwrap();

    let (secret_1, public_1) = round1::commit(&mut rng, &group.shares[0]);
    let (_secret_2, public_2) = round1::commit(&mut rng, &group.shares[1]);
    let ctx = session::build_session_context(key, &[public_1, public_2], b"msg").unwrap();

    // Share 2 signing with share 1's nonces
    assert!(round2::sign(&ctx, &group.shares[1], &secret_1).is_err());
}

#[test]
fn corrupted_partial_signature_is_flagged_not_fatal() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let key = session::build_key_context(group.group_pubkey.to_bytes(true).as_bytes(), &[])
        .unwrap();

    let (secret_1, public_1) = round1::commit(&mut rng, &group.shares[0]);
    let (_, public_2) = round1::commit(&mut rng, &group.shares[1]);
    let ctx = session::build_session_context(key, &[public_1, public_2], b"msg").unwrap();

    let psig = round2::sign(&ctx, &group.shares[0], &secret_1).unwrap();
    assert!(round2::verify_partial(&ctx, &public_1, &psig.public_key, &psig.scalar).unwrap());

    let corrupted = psig.scalar + Scalar::<Curve>::one();
    assert!(!round2::verify_partial(&ctx, &public_1, &psig.public_key, &corrupted).unwrap());
}

#[test]
fn session_rejects_duplicate_signers() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let key = session::build_key_context(group.group_pubkey.to_bytes(true).as_bytes(), &[])
        .unwrap();

    let (_, public_1) = round1::commit(&mut rng, &group.shares[0]);
    assert!(session::build_session_context(key, &[public_1, public_1], b"msg").is_err());
}

#[test]
fn aggregation_requires_signature_shares() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let key = session::build_key_context(group.group_pubkey.to_bytes(true).as_bytes(), &[])
        .unwrap();

    let (_, public_1) = round1::commit(&mut rng, &group.shares[0]);
    let (_, public_2) = round1::commit(&mut rng, &group.shares[1]);
    let ctx = session::build_session_context(key, &[public_1, public_2], b"msg").unwrap();

    assert!(aggregate::aggregate(&ctx, &[]).is_err());
}

#[test]
fn signature_wire_format_round_trips() {
    let mut rng = rand_dev::DevRng::new();

    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let mut msg = [0u8; 32];
    rng.fill_bytes(&mut msg);

    let (_, sig) = sign_message(&mut rng, &group, &[1, 2], &[], &msg);
    let decoded = frost340::Signature::from_bytes(&sig.to_bytes()).unwrap();
    assert_eq!(decoded, sig);
}
