use frost340::{
    generic_ec::{Point, Scalar, SecretScalar},
    poly, vss, Curve,
};
use rand::seq::SliceRandom;

#[test_case::case(2, 3; "t2n3")]
#[test_case::case(3, 5; "t3n5")]
#[test_case::case(5, 7; "t5n7")]
fn every_threshold_subset_reconstructs_the_secret(t: u16, n: u16) {
    let mut rng = rand_dev::DevRng::new();

    let coeffs = vss::generate_coefficients(&mut rng, &[], t);
    let secret = coeffs[0];
    let shares = vss::derive_shares(&coeffs, n).unwrap();

    for mut subset in frost340_tests::subsets(&shares, usize::from(t)) {
        subset.shuffle(&mut rng);
        let reconstructed = vss::derive_secret(&subset).unwrap();
        assert_eq!(reconstructed, secret);
    }
}

#[test]
fn share_verification_accepts_honest_and_rejects_tampered_shares() {
    let mut rng = rand_dev::DevRng::new();
    let (t, n) = (3, 5);

    let coeffs = vss::generate_coefficients(&mut rng, &[], t);
    let shares = vss::derive_shares(&coeffs, n).unwrap();
    let commitments = vss::commit_coefficients(&coeffs);

    for share in &shares {
        assert!(vss::verify_share(&commitments, share, t).unwrap());

        // Flip one byte of the secret
        let mut bytes: [u8; 32] = share.secret.as_ref().to_be_bytes().as_bytes().try_into().unwrap();
        bytes[7] ^= 0x40;
        let mut tampered_secret = Scalar::<Curve>::from_be_bytes_mod_order(bytes);
        let tampered = vss::SecretShare {
            index: share.index,
            secret: SecretScalar::new(&mut tampered_secret),
        };
        assert!(!vss::verify_share(&commitments, &tampered, t).unwrap());
    }
}

#[test]
fn polynomial_rejects_zero_evaluation_point() {
    let mut rng = rand_dev::DevRng::new();
    let coeffs = vss::generate_coefficients(&mut rng, &[], 3);
    assert!(poly::evaluate_at(&coeffs, &Scalar::zero()).is_err());
}

#[test]
fn lagrange_basis_requires_membership_and_unique_points() {
    let xs = [
        Scalar::<Curve>::from(1u16),
        Scalar::from(2u16),
        Scalar::from(3u16),
    ];
    assert!(poly::lagrange_basis(&xs, &Scalar::from(5u16)).is_err());

    let dups = [
        Scalar::<Curve>::from(1u16),
        Scalar::from(1u16),
        Scalar::from(3u16),
    ];
    assert!(poly::lagrange_basis(&dups, &Scalar::from(3u16)).is_err());
}

#[test]
fn combining_shares_requires_matching_indices() {
    let mut rng = rand_dev::DevRng::new();
    let coeffs = vss::generate_coefficients(&mut rng, &[], 2);
    let shares = vss::derive_shares(&coeffs, 3).unwrap();

    assert!(vss::combine_shares(&[shares[0].clone(), shares[1].clone()]).is_err());
    assert!(vss::combine_shares(&[]).is_err());

    let combined = vss::combine_shares(&[shares[0].clone(), shares[0].clone()]).unwrap();
    assert_eq!(combined.index, shares[0].index);
    assert_eq!(
        *combined.secret.as_ref(),
        *shares[0].secret.as_ref() + *shares[0].secret.as_ref()
    );
}

#[test]
fn merging_commitment_sets_matches_coefficient_addition() {
    let mut rng = rand_dev::DevRng::new();

    let a = vss::generate_coefficients(&mut rng, &[], 3);
    let b = vss::generate_coefficients(&mut rng, &[], 3);
    let summed = a
        .iter()
        .zip(&b)
        .map(|(x, y)| *x + *y)
        .collect::<Vec<Scalar<Curve>>>();

    let merged =
        vss::merge_commitment_sets(&vss::commit_coefficients(&a), &vss::commit_coefficients(&b))
            .unwrap();
    assert_eq!(merged, vss::commit_coefficients(&summed));

    let shorter = vss::commit_coefficients(&a[..2]);
    assert!(vss::merge_commitment_sets(&vss::commit_coefficients(&a), &shorter).is_err());
}

#[test]
fn commitment_zero_is_the_group_public_key() {
    let mut rng = rand_dev::DevRng::new();
    let coeffs = vss::generate_coefficients(&mut rng, &[], 4);
    let commitments = vss::commit_coefficients(&coeffs);
    assert_eq!(
        *commitments.group_pubkey().unwrap(),
        Point::generator() * coeffs[0]
    );
}
