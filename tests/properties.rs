//! Property-based tests for lookup, carving and chain precedence.

use layered_config::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

fn dictionary() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[a-c]{1,2}(\\.[a-c]{1,2}){0,3}", "[ -~]{0,12}", 0..24)
}

proptest! {
    #[test]
    fn get_string_returns_stored_value(dict in dictionary()) {
        let config = LeafConfiguration::new(dict.clone());
        for (key, value) in &dict {
            prop_assert_eq!(&config.get_string(key).unwrap(), value);
        }
    }

    #[test]
    fn absent_keys_use_default(dict in dictionary(), key in "[x-z]{1,4}", default in "[ -~]{0,8}") {
        let config = LeafConfiguration::new(dict);
        prop_assert_eq!(config.get_string_or(&key, &default).unwrap(), default);
        prop_assert!(config.get_string(&key).unwrap_err().is_key_not_found());
    }

    #[test]
    fn nested_carving_matches_dotted_carving(dict in dictionary(), a in "[a-c]{1,2}", b in "[a-c]{1,2}") {
        let config = LeafConfiguration::new(dict);
        let dotted = format!("{a}.{b}");
        let nested = config
            .get_namespace(&a)
            .and_then(|sub| sub.get_namespace(&b));
        let direct = config.get_namespace(&dotted);

        match (nested, direct) {
            (Ok(nested), Ok(direct)) => {
                let mut nested_keys = nested.keys().to_vec();
                let mut direct_keys = direct.keys().to_vec();
                nested_keys.sort();
                direct_keys.sort();
                prop_assert_eq!(&nested_keys, &direct_keys);
                for key in &nested_keys {
                    prop_assert_eq!(nested.get(key).unwrap(), direct.get(key).unwrap());
                }
                prop_assert_eq!(nested.configuration_namespace(), Some(dotted.as_str()));
            }
            (Err(_), Err(direct)) => prop_assert!(direct.is_namespace_not_found()),
            (nested, direct) => prop_assert!(false, "mismatch: {:?} vs {:?}", nested.err(), direct.err()),
        }
    }

    #[test]
    fn non_canonical_integers_are_rejected(n in any::<i32>(), zeros in 1usize..3) {
        let padded = format!("{}{}", "0".repeat(zeros), n.unsigned_abs());
        let config = LeafConfiguration::new(FlatStore::from([("canonical", n.to_string()), ("padded", padded)]));
        prop_assert_eq!(config.get_integer("canonical").unwrap(), i64::from(n));
        prop_assert!(config.get_integer("padded").unwrap_err().is_bad_type());
    }

    #[test]
    fn chain_takes_first_source_having_key(
        layers in prop::collection::vec(dictionary(), 1..4),
        key in "[a-c]{1,2}(\\.[a-c]{1,2}){0,3}",
    ) {
        let items: Vec<Arc<dyn Configuration>> = layers
            .iter()
            .map(|dict| Arc::new(LeafConfiguration::new(dict.clone())) as Arc<dyn Configuration>)
            .collect();
        let chain = ChainConfiguration::new(items).unwrap();

        match layers.iter().find(|dict| dict.contains_key(&key)) {
            Some(dict) => prop_assert_eq!(&chain.get(&key).unwrap(), &dict[&key]),
            None => prop_assert!(chain.get(&key).unwrap_err().is_key_not_found()),
        }

        let mut expected: Vec<_> = layers.iter().flat_map(|dict| dict.keys().cloned()).collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(chain.keys().to_vec(), expected);
    }
}
