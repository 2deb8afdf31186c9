use std::fmt;

/// The reason a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The field is absent or blank.
    Missing,
    /// The field still holds a "not yet chosen" placeholder from the form.
    Placeholder(String),
    NotAnInteger(String),
    NotANumber(String),
    UnknownKind(String),
    /// Both axis atoms of a deformation point at the same index.
    IdenticalAtoms(u32),
    DuplicateName(String),
    /// The fitting interval starts after it ends.
    InvalidRange { left: f64, right: f64 },
    Malformed(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "must have a value"),
            Self::Placeholder(value) => write!(f, "has not been chosen ('{value}')"),
            Self::NotAnInteger(value) => {
                write!(f, "must be a non-negative integer (got '{value}')")
            }
            Self::NotANumber(value) => write!(f, "must be a number (got '{value}')"),
            Self::UnknownKind(value) => write!(
                f,
                "unknown deformation type '{value}', expected 'shift' or 'rotation'"
            ),
            Self::IdenticalAtoms(atom) => {
                write!(f, "axis atoms must differ (both are {atom})")
            }
            Self::DuplicateName(name) => write!(f, "deformation name '{name}' is already in use"),
            Self::InvalidRange { left, right } => write!(
                f,
                "start of energy interval ({left}) is larger than the end ({right})"
            ),
            Self::Malformed(reason) => write!(f, "{reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Every issue found in one validation pass, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, kind: IssueKind) {
        self.issues.push(ValidationIssue {
            field: field.into(),
            kind,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }

    /// Returns `true` if any issue was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// Names of the fields reported as absent, blank or still at a placeholder.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| matches!(issue.kind, IssueKind::Missing | IssueKind::Placeholder(_)))
            .map(|issue| issue.field.as_str())
            .collect()
    }

    pub fn has_invalid_range(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue.kind, IssueKind::InvalidRange { .. }))
    }

    /// Turns the collected issues into `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn issues_are_kept_in_push_order() {
        let mut errors = ValidationErrors::new();
        errors.push("name", IssueKind::Missing);
        errors.push("atom-1", IssueKind::NotAnInteger("x".to_string()));

        let fields: Vec<_> = errors.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "atom-1"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn missing_fields_include_placeholders_but_not_other_issues() {
        let mut errors = ValidationErrors::new();
        errors.push("molecule_file", IssueKind::Placeholder("No molecule file chosen!".into()));
        errors.push("GH", IssueKind::Missing);
        errors.push("norm", IssueKind::NotANumber("abc".into()));

        assert_eq!(errors.missing_fields(), vec!["molecule_file", "GH"]);
        assert!(errors.has_field("norm"));
        assert!(!errors.has_invalid_range());
    }

    #[test]
    fn display_joins_every_issue() {
        let mut errors = ValidationErrors::new();
        errors.push("left_interval", IssueKind::InvalidRange { left: 10.0, right: 5.0 });
        errors.push("project_name", IssueKind::Missing);

        let text = errors.to_string();
        assert!(text.contains("start of energy interval (10) is larger than the end (5)"));
        assert!(text.contains("project_name: must have a value"));
    }
}
