use contract_bindgen::{rename, ContractDescriptor, DescriptorPayload, NamingRule};
use proptest::prelude::*;
use serde_json::json;
use std::path::PathBuf;

fn any_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,24}"
}

fn any_descriptor() -> impl Strategy<Value = ContractDescriptor> {
    (any_name(), any::<u32>(), proptest::option::of("[a-z/]{1,20}\\.sol")).prop_map(
        |(name, marker, source_path)| ContractDescriptor {
            payload: DescriptorPayload {
                abi: json!([{ "type": "function", "name": format!("f{}", marker), "inputs": [] }]),
                source_path,
                artifact_path: PathBuf::from(format!("out/{0}.sol/{0}.json", name)),
            },
            name,
        },
    )
}

proptest! {
    #[test]
    fn rename_preserves_length_order_and_payloads(
        input in prop::collection::vec(any_descriptor(), 0..16),
    ) {
        let rule = NamingRule::default();
        let output = rename(input.clone(), &rule).expect("valid names");

        prop_assert_eq!(output.len(), input.len());
        for (before, after) in input.iter().zip(&output) {
            prop_assert_eq!(&after.payload, &before.payload);
            prop_assert_eq!(&after.name, &rule.apply(&before.name).unwrap());
        }
    }

    #[test]
    fn names_without_trim_only_gain_suffix(name in "[A-UW-Za-z][A-UW-Za-z0-9]{0,24}") {
        // No `V` anywhere, so `V3` cannot occur
        let rule = NamingRule::new("V3", "V310").unwrap();
        prop_assert_eq!(rule.apply(&name).unwrap(), format!("{}V310", name));
    }

    #[test]
    fn every_trim_occurrence_is_removed(
        parts in prop::collection::vec("[A-UW-Z][a-z]{0,6}", 1..5),
        suffix in "[A-Z][0-9]{0,3}",
    ) {
        let name = parts.join("V3");
        let rule = NamingRule::new("V3", suffix.clone()).unwrap();
        let renamed = rule.apply(&name).unwrap();

        prop_assert_eq!(renamed, format!("{}{}", parts.concat(), suffix));
    }
}

#[test]
fn renaming_examples() {
    let rule = NamingRule::new("V3", "V310").unwrap();
    assert_eq!(rule.apply("ICreditManagerV3").unwrap(), "ICreditManagerV310");
    assert_eq!(rule.apply("ILossPolicy").unwrap(), "ILossPolicyV310");
    assert_eq!(NamingRule::default().apply("IPoolV3").unwrap(), "IPoolV310");
    assert!(rename(Vec::new(), &rule).unwrap().is_empty());
}
