//! Map-file text syntax: `segment<TAB>index<TAB>filename[<TAB>comment]`.

use thiserror::Error;
use voiceware::{MappingEntry, MappingTable};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("{path}:{line}: missing tab-separated fields")]
    MissingFields { path: String, line: usize },

    #[error("{path}:{line}: invalid segment or message index")]
    InvalidIndex { path: String, line: usize },
}

/// Parse a map file's full text into a [`MappingTable`].
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. Each remaining line must have at least two tabs (segment index,
/// message index, filename, with an optional fourth-field-free comment after
/// a third tab).
pub fn parse_mapping_table(path: &str, text: &str) -> Result<MappingTable, MapError> {
    let mut table = MappingTable::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line_number = line_no + 1;
        let trimmed = raw_line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.splitn(3, '\t');
        let seg_field = fields.next().ok_or_else(|| MapError::MissingFields {
            path: path.to_string(),
            line: line_number,
        })?;
        let rest = fields.next().ok_or_else(|| MapError::MissingFields {
            path: path.to_string(),
            line: line_number,
        })?;
        let tail = fields.next().ok_or_else(|| MapError::MissingFields {
            path: path.to_string(),
            line: line_number,
        })?;

        // `rest` was everything after the first tab: "<msg_index>\t<tail-of-tail>";
        // split once more to pull out the message index.
        let mut rest_fields = rest.splitn(2, '\t');
        let msg_field = rest_fields.next().ok_or_else(|| MapError::MissingFields {
            path: path.to_string(),
            line: line_number,
        })?;

        let segment_index: usize = seg_field.parse().map_err(|_| MapError::InvalidIndex {
            path: path.to_string(),
            line: line_number,
        })?;
        let msg_index_in_segment: usize = msg_field.parse().map_err(|_| MapError::InvalidIndex {
            path: path.to_string(),
            line: line_number,
        })?;

        let (name_field, comment_field) = match tail.split_once('\t') {
            Some((name, comment)) => (name, Some(comment)),
            None => (tail, None),
        };

        table.insert(MappingEntry {
            segment_index,
            msg_index_in_segment,
            name: name_field.trim_end().to_string(),
            comment: comment_field.map(clean_comment).filter(|c| !c.is_empty()),
        });
    }

    Ok(table)
}

/// Strip leading whitespace, a leading `#` and the whitespace after it (if
/// present), and trailing whitespace from a raw comment field.
fn clean_comment(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let without_hash = trimmed.strip_prefix('#').map(str::trim_start).unwrap_or(trimmed);
    without_hash.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let table = parse_mapping_table(
            "map.txt",
            "\n  \n# a full-line comment\n0\t0\tgreeting\n",
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn parses_filename_without_comment() {
        let table = parse_mapping_table("map.txt", "0\t3\thello_world  \n").unwrap();
        let entry = table.get(0, 3).unwrap();
        assert_eq!(entry.name, "hello_world");
        assert!(entry.comment.is_none());
    }

    #[test]
    fn parses_filename_with_comment_and_cleans_it() {
        let table = parse_mapping_table("map.txt", "1\t2\tgoodbye\t  # final prompt \n").unwrap();
        let entry = table.get(1, 2).unwrap();
        assert_eq!(entry.name, "goodbye");
        assert_eq!(entry.comment.as_deref(), Some("final prompt"));
    }

    #[test]
    fn rejects_non_numeric_index() {
        let err = parse_mapping_table("map.txt", "x\t0\tname\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidIndex { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_tabs() {
        let err = parse_mapping_table("map.txt", "0 0 name\n").unwrap_err();
        assert!(matches!(err, MapError::MissingFields { line: 1, .. }));
    }

    #[test]
    fn later_line_overwrites_earlier_for_same_key() {
        let table =
            parse_mapping_table("map.txt", "0\t0\tfirst\n0\t0\tsecond\n").unwrap();
        assert_eq!(table.get(0, 0).unwrap().name, "second");
    }
}
