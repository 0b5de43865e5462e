use proptest::prelude::*;
use proptest::strategy::Just;
use serde_json::{json, Value};

use authz_sql::ConditionMap;

/// Strategy for condition keys: widget columns, qualified keys and unknown names
pub fn condition_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("status".to_string()),
        Just("data".to_string()),
        Just("color".to_string()),
        Just("state".to_string()),
        Just("users.prefs".to_string()),
        Just("users.name".to_string()),
        "[a-z_]{1,10}",
    ]
}

/// Strategy for scalar condition values
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ']{0,12}".prop_map(Value::from),
    ]
}

/// Strategy for condition values of every shape
pub fn condition_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar_value_strategy(),
        prop::collection::vec(scalar_value_strategy(), 0..4).prop_map(Value::from),
        ("[a-z]{1,6}", scalar_value_strategy()).prop_map(|(key, value)| json!({ key: value })),
    ]
}

/// Strategy for whole condition maps
pub fn condition_map_strategy() -> impl Strategy<Value = ConditionMap> {
    prop::collection::vec((condition_key_strategy(), condition_value_strategy()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Strategy for widget condition maps that compile successfully
///
/// Key pairs such as `owner`/`owner_id` and `colour`/`color` resolve to the same
/// column, so these maps exercise colliding leaves.
pub fn compilable_widget_conditions() -> impl Strategy<Value = ConditionMap> {
    let key = prop_oneof![
        Just("status".to_string()),
        Just("color".to_string()),
        Just("colour".to_string()),
        Just("owner".to_string()),
        Just("owner_id".to_string()),
    ];
    let value = prop_oneof![
        scalar_value_strategy(),
        prop::collection::vec(scalar_value_strategy(), 0..4).prop_map(Value::from),
    ];
    let json = ("[a-z]{1,6}", "[a-z0-9']{0,8}").prop_map(|(key, value)| json!({ key: value }));

    (prop::collection::vec((key, value), 0..5), prop::option::of(json)).prop_map(
        |(pairs, data)| {
            let mut conditions: ConditionMap = pairs.into_iter().collect();
            if let Some(data) = data {
                conditions.insert("data", data);
            }
            conditions
        },
    )
}
