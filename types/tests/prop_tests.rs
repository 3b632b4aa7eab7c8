use proptest::prelude::*;

use franchise_types::{
    ActorId, Amount, ElectionError, ElectionParams, Linkage, NationalIdHash, Timestamp,
};

proptest! {
    /// NationalIdHash hex roundtrip: Display output parses back to the same credential.
    #[test]
    fn national_id_hex_roundtrip(bytes in prop::array::uniform12(0u8..)) {
        let id = NationalIdHash::new(bytes);
        let parsed = NationalIdHash::from_hex(&id.to_string()).unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Hex of any width other than twelve bytes is rejected.
    #[test]
    fn national_id_wrong_width_rejected(bytes in prop::collection::vec(0u8.., 0..32)) {
        prop_assume!(bytes.len() != 12);
        let encoded = bytes.iter().map(|b| format!("{b:02x}")).collect::<String>();
        prop_assert!(NationalIdHash::from_hex(&encoded).is_err());
    }

    /// Distinct public keys derive distinct identities.
    #[test]
    fn public_key_identities_distinct(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(ActorId::from_public_key(&a), ActorId::from_public_key(&b));
    }

    /// The hex form of a key derives the same identity as its raw bytes.
    #[test]
    fn public_key_hex_agrees_with_bytes(key in prop::array::uniform32(0u8..)) {
        let encoded = key.iter().map(|b| format!("{b:02x}")).collect::<String>();
        prop_assert_eq!(
            ActorId::from_public_key_hex(&encoded).unwrap(),
            ActorId::from_public_key(&key)
        );
    }

    /// Amount: checked_add returns None exactly when the sum exceeds u128.
    #[test]
    fn amount_checked_add_overflow(a in any::<u128>(), b in any::<u128>()) {
        let result = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(result, a.checked_add(b).map(Amount::new));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(Timestamp::new(a) <= Timestamp::new(b), a <= b);
    }

    /// A linkage accepts the first coordinator and rejects every later one.
    #[test]
    fn linkage_is_write_once(ids in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let mut linkage = Linkage::default();
        linkage.link(ActorId::new(ids[0].clone())).unwrap();
        for id in &ids[1..] {
            let err = linkage.link(ActorId::new(id.clone())).unwrap_err();
            let is_already_linked = matches!(err, ElectionError::AlreadyLinked { .. });
            prop_assert!(is_already_linked);
        }
        prop_assert_eq!(linkage.coordinator(), Some(&ActorId::new(ids[0].clone())));
    }

    /// Deposit refund check is monotonic in the candidate's votes.
    #[test]
    fn keeps_deposit_monotonic(total in 1u64..10_000, a in 0u64..10_000, b in 0u64..10_000) {
        let params = ElectionParams::default();
        let (lo, hi) = (a.min(b).min(total), a.max(b).min(total));
        if params.keeps_deposit(lo, total) {
            prop_assert!(params.keeps_deposit(hi, total));
        }
    }
}
