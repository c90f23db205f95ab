//! Conversion of context errors to the flat map format used by earlier
//! releases.

use serde_json::{json, Map, Value};

use crate::ctx::Context;

/// Flatten a finished context into the legacy message map: root errors as
/// `code -> message` entries, field errors grouped under their field path.
/// Later errors with the same code overwrite earlier ones, and a field
/// group overwrites a root entry whose code equals its path.
pub fn legacy_messages(ctx: &Context<'_>) -> Value {
    let mut out = Map::new();
    let mut groups: Map<String, Value> = Map::new();

    for error in ctx.error_messages() {
        match &error.field_path {
            None => {
                out.insert(error.code.clone(), Value::String(error.msg.clone()));
            }
            Some(path) => {
                let entry = groups.entry(path.clone()).or_insert_with(|| json!({}));
                if let Some(map) = entry.as_object_mut() {
                    map.insert(error.code.clone(), Value::String(error.msg.clone()));
                }
            }
        }
    }

    for (path, group) in groups {
        out.insert(path, group);
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{Length, Regexp, Validator};
    use crate::complex::{AllItems, Chain, DictValidate};
    use serde_json::json;

    #[test]
    fn test_legacy_messages_groups_by_field() {
        let validator = DictValidate::new()
            .key_validator(Regexp::new("^field").unwrap())
            .value_validators(AllItems::new(
                Chain::new()
                    .add(Regexp::new("^value").unwrap())
                    .add(Length::min(10))
                    .continue_on_fail(),
            ))
            .continue_on_fail();

        let result = validator.is_valid(json!({
            "field_1": "v",
            "my_field_2": "v"
        }));

        assert_eq!(
            legacy_messages(&result),
            json!({
                "invalidKey": "'my_field_2' is not a valid key",
                "my_field_2": {
                    "notMatch": "'my_field_2' does not match against pattern '^field'"
                },
                "field_1": {
                    "notMatch": "'v' does not match against pattern '^value'",
                    "tooShort": "'v' is less than 10 unit length"
                }
            })
        );
    }

    #[test]
    fn test_legacy_messages_field_group_wins_over_root_code() {
        // A field literally named "invalidKey" collides with the root
        // error code emitted for the rejected key; the field group must
        // survive.
        let validator = DictValidate::new()
            .field("invalidKey", Length::min(10))
            .key_validator(Regexp::new("^field").unwrap())
            .continue_on_fail();

        let result = validator.is_valid(json!({
            "bad": "x",
            "invalidKey": "v"
        }));

        assert_eq!(
            legacy_messages(&result),
            json!({
                "bad": {
                    "notMatch": "'bad' does not match against pattern '^field'"
                },
                "invalidKey": {
                    "tooShort": "'v' is less than 10 unit length"
                }
            })
        );
    }

    #[test]
    fn test_legacy_messages_root_errors_flat() {
        let result = Length::min(3).is_valid("ab");
        assert_eq!(
            legacy_messages(&result),
            json!({"tooShort": "'ab' is less than 3 unit length"})
        );
    }
}
