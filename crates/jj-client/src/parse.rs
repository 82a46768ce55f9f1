//! Parsing of jj's line-oriented text output.
//!
//! jj interleaves prose ("Working copy changes:", "The working copy has no
//! changes.") with data lines, so every parser here skips what it does not
//! recognize instead of erroring.

use chrono::{DateTime, Utc};

use crate::types::{Change, ChangeState, FileChange, FileStatus};

/// Parse `jj status` / `jj diff --summary` output into file changes.
///
/// Each non-blank line is split on the first whitespace run into a status
/// code and the rest. Lines whose first token is not a known status code
/// are prose and are dropped. A `=>` arrow in the rest marks a rename or
/// copy, carrying the prior path.
pub(crate) fn parse_status_files(output: &str) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for raw in output.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((code, rest)) = line.split_once(char::is_whitespace) else {
            continue;
        };

        let status = FileStatus::from_code(code);
        if status == FileStatus::Unknown {
            continue;
        }

        let rest = rest.trim();
        match rest.split_once("=>") {
            Some((old, new)) => changes.push(FileChange {
                path: new.trim().to_string(),
                status,
                old_path: Some(old.trim().to_string()),
            }),
            None => changes.push(FileChange {
                path: rest.to_string(),
                status,
                old_path: None,
            }),
        }
    }

    changes
}

/// Per-field line lists from the five template queries a log operation
/// issues. Each list is one line per matching change.
pub(crate) struct LogFields {
    pub change_ids: Vec<String>,
    pub commit_ids: Vec<String>,
    pub descriptions: Vec<String>,
    pub authors: Vec<String>,
    pub timestamps: Vec<String>,
}

/// Zip the field lists into changes by position.
///
/// The usable row count is the minimum list length: if one invocation
/// returned fewer lines than the others (formatting drift, an empty
/// description collapsing a line), the extra rows are dropped rather than
/// misaligned or raised on.
pub(crate) fn zip_log_fields(fields: LogFields) -> Vec<Change> {
    let rows = [
        fields.change_ids.len(),
        fields.commit_ids.len(),
        fields.descriptions.len(),
        fields.authors.len(),
        fields.timestamps.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    (0..rows)
        .map(|i| Change {
            change_id: fields.change_ids[i].clone(),
            commit_id: fields.commit_ids[i].clone(),
            description: fields.descriptions[i].clone(),
            author: fields.authors[i].clone(),
            timestamp: parse_timestamp(&fields.timestamps[i]),
            parent_ids: Vec::new(),
            state: ChangeState::Mutable,
        })
        .collect()
}

/// Parse a jj timestamp into UTC.
///
/// Accepts RFC 3339 (with `Z` normalized to `+00:00` first) and the
/// space-separated `YYYY-MM-DD HH:MM:SS[.fff] +ZZ:ZZ` form that
/// `committer.timestamp()` prints. Anything unparseable falls back to the
/// Unix epoch so one bad row never fails a whole log query.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    let normalized = raw.trim().replace('Z', "+00:00");

    if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
        return ts.with_timezone(&Utc);
    }
    if let Ok(ts) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return ts.with_timezone(&Utc);
    }

    DateTime::<Utc>::UNIX_EPOCH
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn status_lines_parse_into_file_changes() {
        let output = "M src/main.rs\nA new_file.txt\nD old_file.txt\n";
        let changes = parse_status_files(output);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].status, FileStatus::Modified);
        assert_eq!(changes[0].path, "src/main.rs");
        assert_eq!(changes[0].old_path, None);
        assert_eq!(changes[1].status, FileStatus::Added);
        assert_eq!(changes[2].status, FileStatus::Deleted);
    }

    #[test]
    fn rename_arrow_splits_old_and_new_paths() {
        let changes = parse_status_files("R old.txt => new.txt\n");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, FileStatus::Renamed);
        assert_eq!(changes[0].path, "new.txt");
        assert_eq!(changes[0].old_path.as_deref(), Some("old.txt"));
    }

    #[test]
    fn prose_lines_are_skipped_silently() {
        let output = "\
Working copy changes:
M file.txt
The working copy has no changes.
Working copy : pzsxstzt 3d0c8c7e (no description set)
Parent commit (@-): rlvkpnrz 2f4a3311 main
";
        let changes = parse_status_files(output);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "file.txt");
    }

    #[test]
    fn order_is_preserved_without_dedup() {
        let output = "M a.txt\nM a.txt\nA b.txt\n";
        let changes = parse_status_files(output);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].path, "a.txt");
        assert_eq!(changes[1].path, "a.txt");
        assert_eq!(changes[2].path, "b.txt");
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zipping_stops_at_shortest_field_list() {
        let fields = LogFields {
            change_ids: lines(&["c1", "c2", "c3", "c4", "c5"]),
            commit_ids: lines(&["h1", "h2", "h3", "h4", "h5"]),
            descriptions: lines(&["d1", "d2", "d3", "d4", "d5"]),
            authors: lines(&["a1", "a2", "a3", "a4", "a5"]),
            timestamps: lines(&["t1", "t2", "t3", "t4"]),
        };

        let changes = zip_log_fields(fields);

        assert_eq!(changes.len(), 4);
        // Rows correspond by position, not by value matching
        assert_eq!(changes[2].change_id, "c3");
        assert_eq!(changes[2].commit_id, "h3");
        assert_eq!(changes[2].description, "d3");
        assert_eq!(changes[2].author, "a3");
    }

    #[test]
    fn zipped_changes_carry_defaults() {
        let fields = LogFields {
            change_ids: lines(&["c1"]),
            commit_ids: lines(&["h1"]),
            descriptions: lines(&["d1"]),
            authors: lines(&["a1"]),
            timestamps: lines(&["2024-01-01T00:00:00Z"]),
        };

        let changes = zip_log_fields(fields);

        assert_eq!(changes[0].parent_ids, Vec::<String>::new());
        assert_eq!(changes[0].state, ChangeState::Mutable);
    }

    #[test]
    fn timestamp_parses_rfc3339_with_zulu_suffix() {
        let ts = parse_timestamp("2024-01-01T00:00:00Z");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn timestamp_parses_jj_space_separated_form() {
        let ts = parse_timestamp("2024-06-15 10:30:00.000 +02:00");
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn malformed_timestamp_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("not a timestamp"), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(parse_timestamp(""), DateTime::<Utc>::UNIX_EPOCH);
    }
}
