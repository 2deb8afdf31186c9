//! `$`-delimited text templates.
//!
//! The syntax is the one PyFitIt project skeletons are written in:
//!
//! - `${name}` and `$name` are placeholders; `name` is an ASCII identifier
//!   (`[A-Za-z_][A-Za-z0-9_]*`).
//! - `$$` is a literal `$`.
//! - Any other use of `$` is rejected when the template is parsed.
//!
//! Unlike a blind text replacement, the full set of placeholders is known after parsing, so a
//! template referring to keys nobody supplies is rejected before any output is produced.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// PyFitIt project skeleton shipped with the library; references every template key.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../templates/project.template");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template '{path}': {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid placeholder in template: line {line}, col {column}")]
    InvalidPlaceholder { line: usize, column: usize },

    #[error("Template references unknown keys: {}", .0.join(", "))]
    UnknownPlaceholders(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }

            let name = match chars.peek().map(|&(_, next)| next) {
                Some('$') => {
                    chars.next();
                    literal.push('$');
                    continue;
                }
                Some('{') => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed || !is_identifier(&name) {
                        return Err(invalid_at(text, pos));
                    }
                    name
                }
                Some(next) if next == '_' || next.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        if c == '_' || c.is_ascii_alphanumeric() {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    name
                }
                _ => return Err(invalid_at(text, pos)),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|e| TemplateError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text)
    }

    /// Every distinct placeholder name, sorted.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Placeholder names for which `is_known` returns `false`, sorted and deduplicated.
    pub fn unknown_placeholders(&self, is_known: impl Fn(&str) -> bool) -> Vec<String> {
        self.placeholders()
            .into_iter()
            .filter(|name| !is_known(*name))
            .map(str::to_string)
            .collect()
    }

    /// Replaces every placeholder with its value from `values`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownPlaceholders`] listing all names missing from `values`;
    /// nothing is substituted in that case.
    pub fn substitute<V: AsRef<str>>(
        &self,
        values: &BTreeMap<&str, V>,
    ) -> Result<String, TemplateError> {
        let unknown = self.unknown_placeholders(|name| values.contains_key(name));
        if !unknown.is_empty() {
            return Err(TemplateError::UnknownPlaceholders(unknown));
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = values.get(name.as_str()) {
                        out.push_str(value.as_ref());
                    }
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn invalid_at(text: &str, pos: usize) -> TemplateError {
    let before = &text[..pos];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    TemplateError::InvalidPlaceholder { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn values(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn braced_and_bare_placeholders_are_substituted() {
        let t = Template::parse("name = '${project_name}'\nradius = $Radius\n").unwrap();
        let out = t
            .substitute(&values(&[("project_name", "Fe"), ("Radius", "5.5")]))
            .unwrap();
        assert_eq!(out, "name = 'Fe'\nradius = 5.5\n");
    }

    #[test]
    fn bare_placeholder_stops_at_non_identifier_character() {
        let t = Template::parse("m.part[$part].x").unwrap();
        assert_eq!(t.placeholders().into_iter().collect::<Vec<_>>(), vec!["part"]);
        assert_eq!(t.substitute(&values(&[("part", "2")])).unwrap(), "m.part[2].x");
    }

    #[test]
    fn double_dollar_is_a_literal_dollar() {
        let t = Template::parse("cost: $$5 and $${x}").unwrap();
        assert!(t.placeholders().is_empty());
        assert_eq!(
            t.substitute(&BTreeMap::<&str, String>::new()).unwrap(),
            "cost: $5 and ${x}"
        );
    }

    #[test]
    fn placeholders_are_sorted_and_unique() {
        let t = Template::parse("$b ${a} $b").unwrap();
        assert_eq!(t.placeholders().into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_keys_are_all_reported_before_substitution() {
        let t = Template::parse("${a} ${zeta} ${beta}").unwrap();
        match t.substitute(&values(&[("a", "1")])) {
            Err(TemplateError::UnknownPlaceholders(keys)) => {
                assert_eq!(keys, vec!["beta".to_string(), "zeta".to_string()]);
            }
            other => panic!("expected UnknownPlaceholders, got {other:?}"),
        }
    }

    #[test]
    fn stray_dollar_reports_line_and_column() {
        match Template::parse("ok\n  x = $ 1\n") {
            Err(TemplateError::InvalidPlaceholder { line, column }) => {
                assert_eq!((line, column), (2, 7));
            }
            other => panic!("expected InvalidPlaceholder, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_or_non_identifier_braces_are_invalid() {
        assert!(matches!(
            Template::parse("${open"),
            Err(TemplateError::InvalidPlaceholder { line: 1, column: 1 })
        ));
        assert!(matches!(
            Template::parse("x ${1abc}"),
            Err(TemplateError::InvalidPlaceholder { line: 1, column: 3 })
        ));
    }

    #[test]
    fn load_reads_template_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "folder = '${{project_folder}}'").unwrap();

        let t = Template::load(file.path()).unwrap();
        assert!(t.placeholders().contains("project_folder"));
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Template::load(&dir.path().join("absent.template"));
        assert!(matches!(result, Err(TemplateError::Read { .. })));
    }
}
