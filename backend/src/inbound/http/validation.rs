//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query strings and multipart forms arrive as text, so integers, booleans
//! and JSON lists are parsed here with field-level error details.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidInteger,
    InvalidBoolean,
    InvalidList,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidBoolean => "invalid_boolean",
            ErrorCode::InvalidList => "invalid_list",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let Some(value) = value {
        details["value"] = json!(value);
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
        None,
    )
}

/// Missing-field error with a caller-chosen message.
pub(crate) fn missing_field_error_with(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, message.into(), ErrorCode::MissingField, None)
}

/// Reject a required text field that is present but blank.
pub(crate) fn require_non_blank(value: &str, field: FieldName) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(missing_field_error(field))
    } else {
        Ok(())
    }
}

pub(crate) fn out_of_range_error(field: FieldName, message: impl Into<String>, value: i64) -> Error {
    field_error(
        field,
        message.into(),
        ErrorCode::OutOfRange,
        Some(&value.to_string()),
    )
}

/// Parse a path id. Anything that is not an `i32` names no row, so the
/// caller gets the resource's 404 rather than a 400.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_path_id("12", "Brand").expect("numeric"), 12);
/// assert!(parse_path_id("abc", "Brand").is_err());
/// ```
pub(crate) fn parse_path_id(raw: &str, resource: &str) -> Result<i32, Error> {
    raw.parse::<i32>()
        .map_err(|_| Error::not_found(format!("{resource} not found")))
}

pub(crate) fn parse_integer(value: &str, field: FieldName) -> Result<i32, Error> {
    value.trim().parse::<i32>().map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be an integer"),
            ErrorCode::InvalidInteger,
            Some(value),
        )
    })
}

/// Parse an optional integer; an absent or empty value is `None`.
pub(crate) fn parse_optional_integer(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<i32>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_integer(raw, field).map(Some),
    }
}

/// Parse an optional `"true"`/`"false"` flag; absent means `false`.
pub(crate) fn parse_flag(value: Option<&str>, field: FieldName) -> Result<bool, Error> {
    match value.map(str::trim) {
        None | Some("") | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => {
            let name = field.as_str();
            Err(field_error(
                field,
                format!("{name} must be \"true\" or \"false\""),
                ErrorCode::InvalidBoolean,
                Some(other),
            ))
        }
    }
}

/// Parse an optional JSON array of strings; absent means empty.
pub(crate) fn parse_string_list(
    value: Option<&str>,
    field: FieldName,
) -> Result<Vec<String>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str::<Vec<String>>(raw).map_err(|_| {
            let name = field.as_str();
            field_error(
                field,
                format!("{name} must be a JSON array of strings"),
                ErrorCode::InvalidList,
                Some(raw),
            )
        }),
    }
}

/// Drop blank optional text so empty form fields store as `NULL`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    const YEAR: FieldName = FieldName::new("year");

    #[rstest]
    #[case("7", 7)]
    #[case("-1", -1)]
    fn numeric_path_ids_parse(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_path_id(raw, "Brand").expect("numeric id"), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("99999999999")]
    fn non_numeric_path_ids_are_not_found(#[case] raw: &str) {
        let err = parse_path_id(raw, "Supplier").expect_err("non-numeric id");
        assert_eq!(err.code(), DomainCode::NotFound);
        assert_eq!(err.message(), "Supplier not found");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" 2023 "), Some(2023))]
    fn optional_integers_parse(#[case] raw: Option<&str>, #[case] expected: Option<i32>) {
        assert_eq!(parse_optional_integer(raw, YEAR).expect("valid"), expected);
    }

    #[rstest]
    fn malformed_integers_report_the_field() {
        let err = parse_optional_integer(Some("twenty"), YEAR).expect_err("malformed");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "year", "code": "invalid_integer", "value": "twenty"}))
        );
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some("false"), false)]
    #[case(Some("true"), true)]
    fn flags_parse(#[case] raw: Option<&str>, #[case] expected: bool) {
        let field = FieldName::new("isCustomDrawing");
        assert_eq!(parse_flag(raw, field).expect("valid flag"), expected);
    }

    #[rstest]
    fn unknown_flag_values_are_rejected() {
        let field = FieldName::new("isCustomDrawing");
        let err = parse_flag(Some("yes"), field).expect_err("invalid flag");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
    }

    #[rstest]
    fn string_lists_parse_from_json() {
        let field = FieldName::new("tags");
        let tags = parse_string_list(Some(r#"["48V","controller"]"#), field).expect("valid");
        assert_eq!(tags, vec!["48V".to_owned(), "controller".to_owned()]);
    }

    #[rstest]
    #[case("48V,controller")]
    #[case("[1,2]")]
    fn malformed_lists_are_rejected(#[case] raw: &str) {
        let field = FieldName::new("tags");
        let err = parse_string_list(Some(raw), field).expect_err("invalid list");
        assert_eq!(err.details().and_then(|d| d.get("code")), Some(&json!("invalid_list")));
    }

    #[rstest]
    fn blank_text_becomes_none() {
        assert_eq!(non_blank(Some("  ".to_owned())), None);
        assert_eq!(non_blank(Some("x".to_owned())), Some("x".to_owned()));
    }
}
