//! Submission input parsing: account dumps, textarea username lists and
//! the derived download file name.

use std::collections::HashMap;
use std::path::Path;

use sweep_engine::BatchInput;
use sweep_model::{AccountRecord, Username};

use crate::error::ApiError;

/// Assemble a `BatchInput` from the two submission sources.
///
/// `accounts` is an uploaded JSON dump (array of objects carrying a
/// `"username"` key; entries without one are skipped, as are non-string
/// usernames). `usernames_text` is the textarea fallback: one name per
/// line, blank lines ignored, each name paired with a minimal record.
/// Both sources may be combined; at least one username must resolve.
pub fn build_batch(
    accounts: Option<Vec<AccountRecord>>,
    usernames_text: Option<&str>,
    filename: Option<&str>,
) -> Result<BatchInput, ApiError> {
    let mut usernames: Vec<Username> = Vec::new();
    let mut records: HashMap<Username, AccountRecord> = HashMap::new();

    for entry in accounts.unwrap_or_default() {
        let Some(name) = entry.get("username").and_then(|u| u.as_str()) else {
            continue;
        };
        usernames.push(name.to_string());
        records.insert(name.to_string(), entry);
    }

    if let Some(text) = usernames_text {
        for name in parse_username_lines(text) {
            records
                .entry(name.clone())
                .or_insert_with(|| serde_json::json!({ "username": name }));
            usernames.push(name);
        }
    }

    if usernames.is_empty() {
        return Err(ApiError::InvalidRequest("no valid usernames found".into()));
    }

    Ok(BatchInput {
        usernames,
        accounts: records,
        filename: final_filename(filename.unwrap_or("usernames.txt")),
    })
}

/// Split textarea input into trimmed, non-empty usernames.
pub fn parse_username_lines(text: &str) -> Vec<Username> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Download name for a source file: `final_<stem>.json`.
pub fn final_filename(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("usernames");
    format!("final_{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_trimmed_and_blank_lines_skipped() {
        let names = parse_username_lines("alice\n  bob \n\n\tcarol\n");
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn final_filename_replaces_extension() {
        assert_eq!(final_filename("dump.json"), "final_dump.json");
        assert_eq!(final_filename("usernames.txt"), "final_usernames.json");
        assert_eq!(final_filename("noext"), "final_noext.json");
    }

    #[test]
    fn accounts_without_username_are_skipped() {
        let accounts = vec![
            serde_json::json!({"username": "a", "id": 1}),
            serde_json::json!({"id": 2}),
            serde_json::json!({"username": 3}),
        ];

        let batch = build_batch(Some(accounts), None, Some("dump.json")).unwrap();
        assert_eq!(batch.usernames, vec!["a"]);
        assert_eq!(batch.accounts["a"]["id"], 1);
        assert_eq!(batch.filename, "final_dump.json");
    }

    #[test]
    fn textarea_names_get_minimal_records() {
        let batch = build_batch(None, Some("x\ny"), None).unwrap();
        assert_eq!(batch.usernames, vec!["x", "y"]);
        assert_eq!(batch.accounts["x"], serde_json::json!({"username": "x"}));
        assert_eq!(batch.filename, "final_usernames.json");
    }

    #[test]
    fn sources_combine_and_upload_record_wins() {
        let accounts = vec![serde_json::json!({"username": "a", "id": 1})];
        let batch = build_batch(Some(accounts), Some("a\nb"), None).unwrap();

        // "a" appears in both sources: probed twice, one record kept.
        assert_eq!(batch.usernames, vec!["a", "a", "b"]);
        assert_eq!(batch.accounts["a"]["id"], 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = build_batch(None, Some("\n  \n"), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
