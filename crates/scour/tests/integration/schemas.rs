//! Whole-schema scenarios: coercion, cross-field checks, additional-field
//! policies, and structured error reports.

use pretty_assertions::assert_eq;
use rstest::rstest;
use scour::prelude::*;
use serde_json::json;

fn registration_schema() -> ObjectField {
    object()
        .field(
            "name",
            string()
                .transform(StringTransform::Trim)
                .transform(StringTransform::Title)
                .build()
                .unwrap(),
        )
        .field("age", number().allow(Kind::String).build().unwrap())
        .field(
            "guardian",
            string()
                .transform(StringTransform::Trim)
                .transform(StringTransform::Title)
                .empty(true)
                .build()
                .unwrap(),
        )
        .check(|state| {
            let age = state.get("age").and_then(Value::as_f64);
            let guardian_given = state
                .get("guardian")
                .is_some_and(|guardian| !guardian.is_null());
            if age.is_some_and(|age| age < 18.0) && !guardian_given {
                state.add_field_error("guardian", "Please enter a guardian");
            }
        })
        .build()
        .unwrap()
}

#[test]
fn minor_without_guardian_fails() {
    let schema = registration_schema();
    let err = schema
        .validate(&Value::from(json!({
            "name": "bart simpson",
            "age": "10",
            "guardian": "",
        })))
        .unwrap_err();

    let tree = err.into_tree();
    assert_eq!(
        tree.field("guardian").and_then(ErrorTree::as_message),
        Some("Please enter a guardian")
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn adult_without_guardian_cleans() {
    let schema = registration_schema();
    let cleaned = schema
        .clean(Value::from(json!({
            "name": "homer simpson",
            "age": "39",
            "guardian": "",
        })))
        .unwrap()
        .unwrap();

    assert_eq!(cleaned["name"], Value::from("Homer Simpson"));
    assert_eq!(cleaned["age"], Value::Number(39.0));
    assert_eq!(cleaned["guardian"], Value::Null);
}

#[test]
fn cleaned_output_revalidates_unchanged() {
    let schema = registration_schema();
    let once = schema
        .clean(Value::from(json!({
            "name": " marge simpson ",
            "age": "36",
            "guardian": "",
        })))
        .unwrap()
        .unwrap();
    let twice = schema.clean(Value::Object(once.clone())).unwrap().unwrap();
    assert_eq!(once, twice);
}

#[rstest]
#[case(AdditionalFields::Strip)]
#[case(AdditionalFields::Merge)]
#[case(AdditionalFields::Error)]
fn additional_field_policies(#[case] policy: AdditionalFields) {
    let schema = object()
        .field("name", string().build().unwrap())
        .additional_fields(policy)
        .build()
        .unwrap();
    let input = Value::from(json!({"name": "lisa", "instrument": "saxophone"}));

    match policy {
        AdditionalFields::Strip => {
            let cleaned = schema.clean(input).unwrap().unwrap();
            assert!(!cleaned.contains_key("instrument"));
        }
        AdditionalFields::Merge => {
            let cleaned = schema.clean(input).unwrap().unwrap();
            assert_eq!(cleaned["instrument"], Value::from("saxophone"));
        }
        AdditionalFields::Error => {
            let tree = schema.validate(&input).unwrap_err().into_tree();
            assert_eq!(
                tree.field("instrument").and_then(ErrorTree::as_message),
                Some("Please remove field")
            );
        }
    }
}

#[rstest]
#[case(1.0, true, false)]
#[case(2.0, false, true)]
#[case(1.5, true, true)]
#[case(1.5, false, false)]
fn range_inclusivity_grid(#[case] value: f64, #[case] min_inclusive: bool, #[case] max_inclusive: bool) {
    let field = number()
        .min(Bound::new(1.0, min_inclusive))
        .max(Bound::new(2.0, max_inclusive))
        .build()
        .unwrap();
    // 1 passes only an inclusive min, 2 only an inclusive max, 1.5 always.
    let expected = match value {
        v if v == 1.0 => min_inclusive,
        v if v == 2.0 => max_inclusive,
        _ => true,
    };
    assert_eq!(field.validate(&Value::Number(value)).is_ok(), expected);
}

#[rstest]
#[case("", false)]
#[case("a", true)]
#[case("ab", true)]
#[case("abc", true)]
#[case("abcd", false)]
fn bounded_string_lengths(#[case] input: &str, #[case] valid: bool) {
    let field = string()
        .min_length(1)
        .max_length(3)
        .empty(true)
        .build()
        .unwrap();
    assert_eq!(field.validate(&Value::from(input)).is_ok(), valid);
}

#[test]
fn check_reports_the_tree_as_data() {
    let schema = object()
        .field("email", email().build().unwrap())
        .field("age", number().build().unwrap())
        .build()
        .unwrap();

    let outcome = check(&schema, Value::from(json!({"email": "nope"})));
    assert!(!outcome.success);
    assert_eq!(outcome.value, None);

    let tree = outcome.errors.unwrap();
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "age": "Please add the field age",
            "email": "Please enter a valid email",
        })
    );
}

#[test]
fn nested_schemas_report_nested_trees() {
    let schema = object()
        .nested(
            "account",
            object()
                .field("email", email().build().unwrap())
                .field("password", password().require_number().build().unwrap()),
        )
        .build()
        .unwrap();

    let cleaned = schema
        .clean(Value::from(json!({
            "account": {"email": "lisa@example.com", "password": "s4xophone"},
        })))
        .unwrap()
        .unwrap();
    assert_eq!(
        cleaned["account"],
        Value::from(json!({"email": "lisa@example.com", "password": "s4xophone"}))
    );

    let err = schema
        .validate(&Value::from(json!({
            "account": {"email": "lisa@example.com", "password": "saxophone"},
        })))
        .unwrap_err();
    let tree = err.into_tree();
    assert_eq!(
        tree.field("account")
            .and_then(|account| account.field("password"))
            .and_then(ErrorTree::as_message),
        Some("Please enter a number (such as 0)")
    );
}

#[test]
fn whole_object_errors_round_trip_through_json() {
    let schema = object()
        .check(|state| state.add_error("Please fill something in"))
        .build()
        .unwrap();
    let tree = schema
        .validate(&Value::from(json!({})))
        .unwrap_err()
        .into_tree();
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({"_": "Please fill something in"})
    );
}

#[test]
fn schema_serialization_recurses() {
    let schema = object()
        .field("age", number().min(0).allow(Kind::String).build().unwrap())
        .build()
        .unwrap();
    assert_eq!(
        schema.serialize(),
        json!({
            "empty": false,
            "additionalFields": "strip",
            "fields": {
                "age": {"empty": false, "allowTypes": ["string"], "min": 0},
            },
        })
    );
}
