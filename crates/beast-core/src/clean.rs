//! Document cleaning: recursive removal of empty values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether numeric zero counts as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    #[default]
    Strip,
    Keep,
}

/// Null, `""`, `[]`, `{}` and, under [`ZeroPolicy::Strip`], numeric zero.
/// Booleans are never empty.
pub fn is_empty(value: &Value, zeros: ZeroPolicy) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(number) => zeros == ZeroPolicy::Strip && number.as_f64() == Some(0.0),
        Value::Bool(_) => false,
    }
}

/// [`clean_with`] under the default zero policy.
pub fn clean(value: Value) -> Value {
    clean_with(value, ZeroPolicy::default())
}

/// Remove empty values at every level of `value`.
///
/// Children are cleaned before the emptiness test, so a mapping that only
/// held empty values disappears from its parent. Scalars pass through, and
/// the result is a fixed point: cleaning it again changes nothing.
pub fn clean_with(value: Value, zeros: ZeroPolicy) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| clean_with(item, zeros))
                .filter(|item| !is_empty(item, zeros))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, clean_with(item, zeros)))
                .filter(|(_, item)| !is_empty(item, zeros))
                .collect(),
        ),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn strips_nested_empties() {
        let value = json!({
            "title": {"native": "Film", "english": ""},
            "media": {"trailerUrl": "", "posterUrl": ""},
            "genre": [],
            "director": [{"id": "D1", "birthYear": 0, "deathYear": null}, {}],
            "release": {"year": 0, "date": null},
            "flag": false,
        });
        assert_eq!(
            clean(value),
            json!({
                "title": {"native": "Film"},
                "director": [{"id": "D1"}],
                "flag": false,
            })
        );
    }

    #[test]
    fn zeros_survive_when_kept() {
        let value = json!({"year": 0, "rate": 0.0, "name": ""});
        assert_eq!(clean_with(value, ZeroPolicy::Keep), json!({"year": 0, "rate": 0.0}));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(clean(json!(0)), json!(0));
        assert_eq!(clean(json!("")), json!(""));
        assert_eq!(clean(Value::Null), Value::Null);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-3i64..3).prop_map(|n| json!(n)),
            prop_oneof![Just(0.0f64), Just(-0.0), Just(1.5)].prop_map(|n| json!(n)),
            "[a-c]{0,2}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..6)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(value in arb_json()) {
            let once = clean(value);
            prop_assert_eq!(clean(once.clone()), once);
        }

        #[test]
        fn cleaned_containers_hold_no_empty_values(value in arb_json()) {
            fn check(value: &Value) -> bool {
                match value {
                    Value::Array(items) => items.iter().all(|v| !is_empty(v, ZeroPolicy::Strip) && check(v)),
                    Value::Object(map) => map.values().all(|v| !is_empty(v, ZeroPolicy::Strip) && check(v)),
                    _ => true,
                }
            }
            prop_assert!(check(&clean(value)));
        }
    }
}
