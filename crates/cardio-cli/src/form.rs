//! Raw form input from files and command line flags.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Raw field values keyed by field name.
pub type FormInput = BTreeMap<String, String>;

/// Parse a `name=value` flag.
pub fn parse_field_arg(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse a flat TOML form: one `key = value` per field.
///
/// Numbers, strings and booleans are accepted; validation of the values
/// happens later during capture.
pub fn parse_form_toml(content: &str) -> Result<FormInput> {
    let table: toml::Table = toml::from_str(content).context("parse form")?;
    let mut form = FormInput::new();
    for (key, value) in table {
        let raw = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => if b { "1" } else { "0" }.to_string(),
            other => bail!("field `{key}` has unsupported type {}", other.type_str()),
        };
        form.insert(key, raw);
    }
    Ok(form)
}

/// Build the form from an optional file plus flag overrides.
pub fn build_form(file: Option<&Path>, overrides: &[(String, String)]) -> Result<FormInput> {
    let mut form = match file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read form {}", path.display()))?;
            parse_form_toml(&content).with_context(|| format!("in {}", path.display()))?
        }
        None => FormInput::new(),
    };
    for (name, value) in overrides {
        form.insert(name.clone(), value.clone());
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_arg() {
        assert_eq!(
            parse_field_arg("age=63").unwrap(),
            ("age".to_string(), "63".to_string())
        );
        assert_eq!(
            parse_field_arg(" oldpeak = 2.3 ").unwrap(),
            ("oldpeak".to_string(), "2.3".to_string())
        );
        assert!(parse_field_arg("age").is_err());
        assert!(parse_field_arg("=5").is_err());
    }

    #[test]
    fn test_parse_form_toml_value_types() {
        let form = parse_form_toml("age = 63\noldpeak = 2.3\nsex = \"1\"\nfbs = true\n").unwrap();
        assert_eq!(form["age"], "63");
        assert_eq!(form["oldpeak"], "2.3");
        assert_eq!(form["sex"], "1");
        assert_eq!(form["fbs"], "1");
    }

    #[test]
    fn test_parse_form_toml_rejects_tables() {
        let err = parse_form_toml("[patient]\nage = 1\n").unwrap_err();
        assert!(err.to_string().contains("patient"));
    }

    #[test]
    fn test_overrides_win() {
        let form = build_form(None, &[("age".to_string(), "70".to_string())]).unwrap();
        assert_eq!(form["age"], "70");
        assert_eq!(form.len(), 1);
    }
}
