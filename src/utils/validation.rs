use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};
use crate::errors::AppError;

const BLANK_CODE: &str = "blank";

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::ValidationFailed(field_messages(&err)))
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(BLANK_CODE);
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// One message per field, keyed by the wire (camelCase) name. A blank value
/// reports the blank error rather than whatever else it trips.
fn field_messages(err: &ValidationErrors) -> BTreeMap<String, String> {
    err.field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            let chosen = errs.iter()
                .find(|e| e.code == BLANK_CODE)
                .or_else(|| errs.first())?;
            let message = chosen.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid value ({})", chosen.code));
            Some((to_camel_case(field), message))
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
