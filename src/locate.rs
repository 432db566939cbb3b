//! Text position lookup of a dependency name inside the manifest source.
//!
//! The match is a raw substring search: no JSON or word-boundary awareness,
//! so `react` can match inside `react-dom` if that appears first.

use crate::error::ConvertError;
use crate::types::TextRange;

/// What to do when the name does not occur in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateMode {
    /// Point one line past the last newline, column 0.
    #[default]
    Compat,
    /// Fail the run with [`ConvertError::Locate`].
    Strict,
}

/// Line is 1-based, columns are 0-based and counted in characters.
pub fn find(text: &str, name: &str) -> Option<TextRange> {
    let index = text.find(name)?;
    Some(range_at(&text[..index], name))
}

pub fn locate(
    text: &str,
    name: &str,
    manifest_path: &str,
    mode: LocateMode,
) -> Result<TextRange, ConvertError> {
    match (find(text, name), mode) {
        (Some(range), _) => Ok(range),
        (None, LocateMode::Compat) => Ok(TextRange {
            start_line: 1 + text.matches('\n').count(),
            start_column: 0,
            end_column: Some(name.chars().count()),
        }),
        (None, LocateMode::Strict) => Err(ConvertError::Locate {
            name: name.to_string(),
            path: manifest_path.to_string(),
        }),
    }
}

fn range_at(before: &str, name: &str) -> TextRange {
    let (line_index, line_start) = match before.rfind('\n') {
        Some(nl) => (before.matches('\n').count(), nl + 1),
        None => (0, 0),
    };
    let start_column = before[line_start..].chars().count();
    TextRange {
        start_line: line_index + 1,
        start_column,
        end_column: Some(start_column + name.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "{\n  \"name\": \"app\",\n  \"version\": \"1.0.0\",\n  \"dependencies\": {\n    \"left-pad\": \"1.2.0\",\n    \"lodash\": \"4.17.20\"\n  }\n}\n";

    #[test]
    fn finds_line_and_columns() {
        let range = find(MANIFEST, "left-pad").unwrap();
        assert_eq!(
            range,
            TextRange {
                start_line: 5,
                start_column: 5,
                end_column: Some(13),
            }
        );
    }

    #[test]
    fn first_line_match_starts_at_line_one() {
        let range = find("left-pad", "left-pad").unwrap();
        assert_eq!((range.start_line, range.start_column), (1, 0));
    }

    #[test]
    fn span_width_equals_name_length() {
        for name in ["left-pad", "lodash", "app", "dependencies"] {
            let range = find(MANIFEST, name).unwrap();
            assert_eq!(
                range.end_column.unwrap() - range.start_column,
                name.chars().count()
            );
        }
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(find(MANIFEST, "lodash"), find(MANIFEST, "lodash"));
    }

    #[test]
    fn substring_of_another_token_matches_first_occurrence() {
        let text = "\"react-dom\": \"1\",\n\"react\": \"1\"";
        let range = find(text, "react").unwrap();
        assert_eq!((range.start_line, range.start_column), (1, 1));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let text = "\"é\": 1, \"pkg\": 2";
        let range = find(text, "pkg").unwrap();
        assert_eq!(range.start_column, 9);
    }

    #[test]
    fn compat_mode_points_past_last_line() {
        let range = locate(MANIFEST, "missing", "package.json", LocateMode::Compat).unwrap();
        assert_eq!(range.start_line, 9);
        assert_eq!(range.start_column, 0);
        assert_eq!(range.end_column, Some(7));
    }

    #[test]
    fn strict_mode_fails_when_absent() {
        let err = locate(MANIFEST, "missing", "package.json", LocateMode::Strict).unwrap_err();
        assert!(matches!(err, ConvertError::Locate { ref name, .. } if name == "missing"));
    }
}
