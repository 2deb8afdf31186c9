use crate::core::models::parameters::{
    NUMERIC_KEYS, ProjectParameters, QUOTED_KEYS, TEMPLATE_KEYS, is_placeholder, keys,
    parse_partition,
};
use crate::core::template::Template;
use crate::core::validation::{IssueKind, ValidationErrors};
use crate::engine::error::RenderError;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Fills `template` with the parameters and the generated deformation code.
///
/// Validation runs over every field before anything is substituted, and all problems are
/// reported together:
///
/// - every key must be non-blank, and file or directory fields must not hold a
///   "not yet chosen" placeholder,
/// - values placed in Python string literals must fit on one line without a single quote, and
///   the project name must be usable as a file name,
/// - numeric fields must parse as finite numbers and `parts` as a list of atom ranges,
/// - the fitting interval must not start after it ends.
///
/// # Errors
///
/// [`RenderError::Invalid`] with the collected issues, or [`RenderError::Template`] if the
/// template names keys outside the parameter set.
pub fn render(
    parameters: &ProjectParameters,
    deformation_fragment: &str,
    template: &Template,
) -> Result<String, RenderError> {
    let context = parameters.to_context(deformation_fragment);

    let issues = validate_context(&context);
    if !issues.is_empty() {
        warn!("Project parameters failed validation: {}", issues);
        return Err(RenderError::Invalid(issues));
    }

    let rendered = template.substitute(&context)?;
    debug!("Rendered project template ({} bytes).", rendered.len());
    Ok(rendered)
}

/// Checks a flattened parameter set for completeness, numeric format and interval order.
pub fn validate_context(context: &BTreeMap<&str, String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let mut expected: Vec<&str> = TEMPLATE_KEYS.iter().copied().collect();
    expected.sort_unstable();
    for key in expected {
        let Some(value) = context.get(key) else {
            errors.push(key, IssueKind::Missing);
            continue;
        };
        if value.trim().is_empty() {
            errors.push(key, IssueKind::Missing);
        } else if is_placeholder(value) {
            errors.push(key, IssueKind::Placeholder(value.trim().to_string()));
        } else if let Some(reason) = literal_problem(key, value) {
            errors.push(key, IssueKind::Malformed(reason));
        } else if NUMERIC_KEYS.contains(key) && parse_number(value).is_none() {
            errors.push(key, IssueKind::NotANumber(value.clone()));
        } else if key == keys::PARTS {
            if let Err(reason) = parse_partition(value) {
                errors.push(key, IssueKind::Malformed(reason));
            }
        }
    }

    let bound = |key: &str| context.get(key).and_then(|v| parse_number(v));
    if let (Some(left), Some(right)) = (bound(keys::LEFT_INTERVAL), bound(keys::RIGHT_INTERVAL)) {
        if left > right {
            errors.push(keys::LEFT_INTERVAL, IssueKind::InvalidRange { left, right });
        }
    }

    errors
}

/// Why `value` cannot be substituted into the string literal `key` appears in.
fn literal_problem(key: &str, value: &str) -> Option<String> {
    if !QUOTED_KEYS.contains(key) {
        return None;
    }
    if value.contains('\'') {
        return Some("must not contain a single quote".to_string());
    }
    if value.contains(['\n', '\r']) {
        return Some("must fit on a single line".to_string());
    }
    if value.ends_with('\\') {
        return Some("must not end with a backslash".to_string());
    }
    if key == keys::PROJECT_NAME {
        let name = value.trim();
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Some("must be a plain file name without path separators".to_string());
        }
    }
    None
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
