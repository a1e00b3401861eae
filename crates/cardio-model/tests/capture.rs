//! Integration tests for form capture.

use std::collections::{BTreeMap, HashMap};

use cardio_model::{FIELDS, ValidationReason, capture_record, field_spec};

fn complete_form() -> BTreeMap<String, String> {
    [
        ("age", "63"),
        ("sex", "1"),
        ("cp", "3"),
        ("trestbps", "145"),
        ("chol", "233"),
        ("fbs", "1"),
        ("restecg", "0"),
        ("thalach", "150"),
        ("exang", "0"),
        ("oldpeak", "2.3"),
        ("slope", "0"),
        ("ca", "0"),
        ("thal", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn captures_complete_form() {
    let record = capture_record(&complete_form()).unwrap();
    assert_eq!(record.age, 63.0);
    assert_eq!(record.sex, 1);
    assert_eq!(record.cp, 3);
    assert_eq!(record.trestbps, 145.0);
    assert_eq!(record.chol, 233.0);
    assert_eq!(record.oldpeak, 2.3);
    assert_eq!(record.thal, 1);
}

#[test]
fn captures_from_hash_map_with_whitespace() {
    let mut source: HashMap<String, String> = complete_form().into_iter().collect();
    source.insert("age".to_string(), "  41 ".to_string());
    let record = capture_record(&source).unwrap();
    assert_eq!(record.age, 41.0);
}

#[test]
fn missing_field_names_that_field() {
    for spec in &FIELDS {
        let mut source = complete_form();
        source.remove(spec.key);
        let err = capture_record(&source).unwrap_err();
        assert_eq!(err.field, spec.key);
        assert_eq!(err.reason, ValidationReason::Missing);
        assert_eq!(
            err.to_string(),
            format!("Please enter a valid value for {}", spec.key)
        );
    }
}

#[test]
fn blank_field_is_missing() {
    let mut source = complete_form();
    source.insert("chol".to_string(), "   ".to_string());
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "chol");
    assert_eq!(err.reason, ValidationReason::Missing);
}

#[test]
fn non_numeric_field_names_that_field() {
    for spec in &FIELDS {
        let mut source = complete_form();
        source.insert(spec.key.to_string(), "abc".to_string());
        let err = capture_record(&source).unwrap_err();
        assert_eq!(err.field, spec.key);
        assert_eq!(err.reason, ValidationReason::NotANumber);
    }
}

#[test]
fn infinite_value_is_not_a_number() {
    let mut source = complete_form();
    source.insert("thalach".to_string(), "inf".to_string());
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "thalach");
    assert_eq!(err.reason, ValidationReason::NotANumber);
}

#[test]
fn first_failing_field_in_catalog_order_wins() {
    let mut source = complete_form();
    source.remove("thal");
    source.insert("chol".to_string(), "high".to_string());
    source.remove("cp");
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "cp");
}

#[test]
fn numeric_domain_is_enforced() {
    let mut source = complete_form();
    source.insert("age".to_string(), "0".to_string());
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "age");
    assert_eq!(err.reason, ValidationReason::OutOfRange);

    let mut source = complete_form();
    source.insert("oldpeak".to_string(), "0".to_string());
    assert_eq!(capture_record(&source).unwrap().oldpeak, 0.0);

    source.insert("oldpeak".to_string(), "-1.5".to_string());
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "oldpeak");
    assert_eq!(err.reason, ValidationReason::OutOfRange);
}

#[test]
fn unknown_code_is_rejected() {
    let mut source = complete_form();
    source.insert("restecg".to_string(), "3".to_string());
    let err = capture_record(&source).unwrap_err();
    assert_eq!(err.field, "restecg");
    assert_eq!(err.reason, ValidationReason::UnknownCode);

    let mut source = complete_form();
    source.insert("ca".to_string(), "4".to_string());
    assert_eq!(capture_record(&source).unwrap().ca, 4);
}

#[test]
fn record_serializes_codes_as_integers() {
    let record = capture_record(&complete_form()).unwrap();
    let json = serde_json::to_value(record).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), FIELDS.len());
    for spec in &FIELDS {
        let value = &object[spec.key];
        if spec.is_numeric() {
            assert!(value.is_f64(), "{} should be a float", spec.key);
        } else {
            assert!(value.is_u64(), "{} should be an integer", spec.key);
        }
    }
    assert_eq!(object["oldpeak"], 2.3);
    assert_eq!(object["thal"], 1);
}

#[test]
fn field_domains() {
    let domains: BTreeMap<&str, String> = FIELDS
        .iter()
        .map(|spec| (spec.key, spec.domain_text()))
        .collect();
    insta::assert_json_snapshot!(domains, @r#"
    {
      "age": "> 0",
      "ca": "0, 1, 2, 3, 4",
      "chol": "> 0",
      "cp": "0, 1, 2, 3",
      "exang": "0, 1",
      "fbs": "0, 1",
      "oldpeak": ">= 0",
      "restecg": "0, 1, 2",
      "sex": "0, 1",
      "slope": "0, 1, 2",
      "thal": "0, 1, 2, 3",
      "thalach": "> 0",
      "trestbps": "> 0"
    }
    "#);
    assert!(field_spec("unknown").is_none());
}
