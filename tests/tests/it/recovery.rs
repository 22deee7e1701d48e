use frost340::{
    ecdh,
    generic_ec::{NonZero, Point, Scalar},
    refresh, repair, trusted_dealer, vss, Curve, ShareIndex,
};

#[test]
fn refresh_preserves_the_secret_and_rerandomizes_every_share() {
    let mut rng = rand_dev::DevRng::new();
    let (t, n) = (3u16, 5u16);

    let group = trusted_dealer::deal(&mut rng, &[], t, n).unwrap();
    let secret = vss::derive_secret(&group.shares).unwrap();

    // Every participant deals one refresh contribution
    let contributions = (0..n)
        .map(|_| refresh::generate_refresh(&mut rng, t, n).unwrap())
        .collect::<Vec<_>>();

    let refreshed = group
        .shares
        .iter()
        .map(|share| {
            let updates = contributions
                .iter()
                .map(|pkg| pkg.shares[usize::from(share.index) - 1].clone())
                .collect::<Vec<_>>();
            refresh::refresh_share(share, &updates).unwrap()
        })
        .collect::<Vec<_>>();

    // Same secret, same group key, different share values
    assert_eq!(vss::derive_secret(&refreshed).unwrap(), secret);
    for (old, new) in group.shares.iter().zip(&refreshed) {
        assert_eq!(old.index, new.index);
        assert_ne!(old.secret.as_ref(), new.secret.as_ref());
    }

    // The updated commitment set verifies the refreshed shares
    let commitments = contributions
        .iter()
        .fold(group.commitments.clone(), |acc, pkg| {
            refresh::merge_refresh_commitments(&acc, &pkg.commitments).unwrap()
        });
    assert_eq!(commitments.group_pubkey(), group.commitments.group_pubkey());
    for share in &refreshed {
        assert!(vss::verify_share(&commitments, share, t).unwrap());
    }

    // Old shares no longer lie on the updated polynomial
    assert!(!vss::verify_share(&commitments, &group.shares[0], t).unwrap());
}

#[test]
fn refresh_updates_must_match_the_share_index() {
    let mut rng = rand_dev::DevRng::new();
    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();
    let contribution = refresh::generate_refresh(&mut rng, 2, 3).unwrap();

    let wrong = contribution.shares[1].clone();
    assert!(refresh::refresh_share(&group.shares[0], &[wrong]).is_err());
}

#[test]
fn quorum_repairs_a_lost_share() {
    let mut rng = rand_dev::DevRng::new();
    let (t, n) = (3u16, 5u16);

    let group = trusted_dealer::deal(&mut rng, &[], t, n).unwrap();
    let lost: ShareIndex = 2;
    let helpers: [ShareIndex; 3] = [1, 3, 4];

    // Each helper splits its contribution into per-helper summands
    let dealt = helpers
        .iter()
        .map(|index| {
            let share = &group.shares[usize::from(*index) - 1];
            repair::generate_repair_shares(&mut rng, share, &helpers, t, lost).unwrap()
        })
        .collect::<Vec<_>>();

    // Each helper sums the summands addressed to it
    let aggregates = helpers
        .iter()
        .map(|index| {
            let received = dealt
                .iter()
                .map(|summands| {
                    *summands
                        .iter()
                        .find(|summand| summand.index == *index)
                        .unwrap()
                })
                .collect::<Vec<_>>();
            repair::aggregate_repair_shares(*index, &received).unwrap()
        })
        .collect::<Vec<_>>();

    let recovered = repair::recover_share(&aggregates, lost).unwrap();
    assert_eq!(recovered.index, lost);
    assert_eq!(
        recovered.secret.as_ref(),
        group.shares[usize::from(lost) - 1].secret.as_ref()
    );

    // No single aggregate equals the lost share
    for aggregate in &aggregates {
        assert_ne!(
            aggregate.value,
            *group.shares[usize::from(lost) - 1].secret.as_ref()
        );
    }
}

#[test]
fn repair_requires_a_full_quorum() {
    let mut rng = rand_dev::DevRng::new();
    let group = trusted_dealer::deal(&mut rng, &[], 3, 5).unwrap();

    let helpers: [ShareIndex; 2] = [1, 3];
    assert!(
        repair::generate_repair_shares(&mut rng, &group.shares[0], &helpers, 3, 2).is_err()
    );

    // The caller must be part of the quorum it deals for
    let others: [ShareIndex; 3] = [2, 3, 4];
    assert!(
        repair::generate_repair_shares(&mut rng, &group.shares[0], &others, 3, 5).is_err()
    );
}

#[test]
fn repair_rejects_duplicate_helpers() {
    let mut rng = rand_dev::DevRng::new();
    let group = trusted_dealer::deal(&mut rng, &[], 3, 5).unwrap();

    // Three entries but only two distinct peers: not a real quorum
    let padded: [ShareIndex; 3] = [1, 1, 3];
    assert!(
        repair::generate_repair_shares(&mut rng, &group.shares[0], &padded, 3, 2).is_err()
    );

    // Duplicates of someone other than the caller are no better
    let padded: [ShareIndex; 4] = [1, 3, 3, 4];
    assert!(
        repair::generate_repair_shares(&mut rng, &group.shares[0], &padded, 3, 2).is_err()
    );
}

#[test]
fn threshold_ecdh_matches_direct_diffie_hellman() {
    let mut rng = rand_dev::DevRng::new();
    let (t, n) = (2u16, 3u16);

    let group = trusted_dealer::deal(&mut rng, &[], t, n).unwrap();
    let group_secret = vss::derive_secret(&group.shares).unwrap();

    // Counterparty keypair
    let their_secret = Scalar::<Curve>::random(&mut rng);
    let their_pubkey = NonZero::from_point(Point::generator() * their_secret).unwrap();

    let members: [ShareIndex; 2] = [1, 3];
    let shares = members
        .iter()
        .map(|index| {
            let share = &group.shares[usize::from(*index) - 1];
            ecdh::create_ecdh_share(&members, share, &their_pubkey).unwrap()
        })
        .collect::<Vec<_>>();

    let shared = ecdh::derive_ecdh_secret(&shares).unwrap();
    assert_eq!(*shared, *their_pubkey * group_secret);
    assert_eq!(*shared, *group.group_pubkey * their_secret);
}

#[test]
fn ecdh_member_must_belong_to_the_quorum() {
    let mut rng = rand_dev::DevRng::new();
    let group = trusted_dealer::deal(&mut rng, &[], 2, 3).unwrap();

    let their_pubkey =
        NonZero::from_point(Point::generator() * Scalar::<Curve>::random(&mut rng)).unwrap();
    let members: [ShareIndex; 2] = [1, 2];
    assert!(ecdh::create_ecdh_share(&members, &group.shares[2], &their_pubkey).is_err());
    assert!(ecdh::derive_ecdh_secret(&[]).is_err());
}
