//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Only braced references are handed to shellexpand; bare `$VAR` and an
/// unterminated `${` are left as written, so prefixes such as `/@team$1`
/// survive. An unset variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(&rest[start..=start + len], field)?);
        rest = &rest[start + len + 1..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Lookup failure carrying the variable name.
struct UnsetVar(String);
