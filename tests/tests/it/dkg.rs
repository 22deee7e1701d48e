//! Dealerless key generation: seven participants each deal a 5-of-7
//! polynomial seeded with the hash of their alias, sub-shares are folded
//! index-wise, and the group secret equals the sum of the individual seeds.

use frost340::{generic_ec::Point, trusted_dealer, vss};
use frost340_tests::name_seed;
use rand::seq::SliceRandom;

const ALIASES: [&str; 7] = [
    "alice", "bob", "carol", "david", "edward", "frank", "gerome",
];
const TARGET_SECRET: &str = "1353adcaf8f428bc77e61f83261dca4b6697c45ad5a35b0ea591dc13ecb7dca1";

#[test]
fn seven_dealer_group_reproduces_fixed_secret() {
    let mut rng = rand_dev::DevRng::new();
    let (t, n) = (5u16, 7u16);

    let deals = ALIASES
        .iter()
        .map(|alias| trusted_dealer::deal(&mut rng, &[name_seed(alias)], t, n).unwrap())
        .collect::<Vec<_>>();

    // Every participant folds the sub-shares dealt to its index
    let group_shares = (0..usize::from(n))
        .map(|i| {
            let sub_shares = deals
                .iter()
                .map(|deal| deal.shares[i].clone())
                .collect::<Vec<_>>();
            vss::combine_shares(&sub_shares).unwrap()
        })
        .collect::<Vec<_>>();

    // The merged commitment set verifies every folded share
    let merged = deals[1..]
        .iter()
        .fold(deals[0].commitments.clone(), |acc, deal| {
            vss::merge_commitment_sets(&acc, &deal.commitments).unwrap()
        });
    for share in &group_shares {
        assert!(vss::verify_share(&merged, share, t).unwrap());
    }

    // Any 5 of 7, in any order, reconstruct the agreed secret
    for _ in 0..25 {
        let subset = group_shares
            .choose_multiple(&mut rng, usize::from(t))
            .cloned()
            .collect::<Vec<_>>();
        let secret = vss::derive_secret(&subset).unwrap();
        assert_eq!(hex::encode(secret.to_be_bytes().as_bytes()), TARGET_SECRET);
    }

    // Too few shares interpolate to garbage, not the secret
    let short = &group_shares[..usize::from(t) - 1];
    let wrong = vss::derive_secret(short).unwrap();
    assert_ne!(hex::encode(wrong.to_be_bytes().as_bytes()), TARGET_SECRET);

    // The group key is the commitment to the reconstructed secret
    let secret = vss::derive_secret(&group_shares[..usize::from(t)]).unwrap();
    assert_eq!(
        *merged.group_pubkey().unwrap(),
        Point::generator() * secret
    );
}
