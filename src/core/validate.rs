use crate::core::errors::{ResponseError, StatusError};
use crate::core::models::{HomeworkStatus, HomeworkUpdate, StatusReport};
use serde_json::Value;

const HOMEWORKS_KEY: &str = "homeworks";
const CURSOR_KEY: &str = "current_date";
const EXPECTED_KEYS: [&str; 2] = [HOMEWORKS_KEY, CURSOR_KEY];

/// Checks the shape of a decoded API response. Every expected key must be
/// present; an empty `homeworks` list is a normal result.
pub fn check_response(response: Value) -> Result<HomeworkUpdate, ResponseError> {
    let Value::Object(mut body) = response else {
        return Err(ResponseError::NotAnObject);
    };

    let missing: Vec<&'static str> = EXPECTED_KEYS
        .into_iter()
        .filter(|key| !body.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ResponseError::MissingExpectedKeys(missing));
    }

    let cursor = body.get(CURSOR_KEY).and_then(Value::as_i64);

    let homeworks = match body.remove(HOMEWORKS_KEY) {
        Some(Value::Array(homeworks)) => homeworks,
        _ => return Err(ResponseError::HomeworksNotAList),
    };

    if homeworks.is_empty() {
        tracing::debug!("No new statuses");
    }

    Ok(HomeworkUpdate { homeworks, cursor })
}

pub fn parse_status(homework: &Value) -> Result<String, StatusError> {
    extract_status(homework).map(|report| report.message)
}

pub fn extract_status(homework: &Value) -> Result<StatusReport, StatusError> {
    let record = homework.as_object().ok_or(StatusError::RecordNotAnObject)?;

    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(StatusError::MissingName)?;

    let code = record.get("status").and_then(Value::as_str);
    let status = code.and_then(HomeworkStatus::from_code).ok_or_else(|| {
        StatusError::UnrecognizedStatus(code.unwrap_or("<missing>").to_string())
    })?;

    Ok(StatusReport {
        homework_name: name.to_string(),
        status,
        message: format!(
            "Status changed for submission \"{}\". {}",
            name,
            status.verdict()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_response_returns_homeworks_and_cursor() {
        let update = check_response(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        }))
        .unwrap();

        assert_eq!(update.homeworks.len(), 1);
        assert_eq!(update.cursor, Some(1000));
    }

    #[test]
    fn test_check_response_empty_list_is_not_an_error() {
        let update = check_response(json!({"homeworks": [], "current_date": 1000})).unwrap();
        assert!(update.latest().is_none());
        assert_eq!(update.cursor, Some(1000));
    }

    #[test]
    fn test_check_response_rejects_non_object() {
        assert_eq!(
            check_response(json!([{"homework_name": "hw1"}])),
            Err(ResponseError::NotAnObject)
        );
        assert_eq!(check_response(json!(null)), Err(ResponseError::NotAnObject));
    }

    #[test]
    fn test_check_response_requires_every_key() {
        assert_eq!(
            check_response(json!({"current_date": 1000})),
            Err(ResponseError::MissingExpectedKeys(vec!["homeworks"]))
        );
        assert_eq!(
            check_response(json!({"homeworks": []})),
            Err(ResponseError::MissingExpectedKeys(vec!["current_date"]))
        );
        assert_eq!(
            check_response(json!({})),
            Err(ResponseError::MissingExpectedKeys(vec![
                "homeworks",
                "current_date"
            ]))
        );
    }

    #[test]
    fn test_check_response_rejects_non_list_homeworks() {
        assert_eq!(
            check_response(json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1})),
            Err(ResponseError::HomeworksNotAList)
        );
    }

    #[test]
    fn test_check_response_non_integer_cursor() {
        let update = check_response(json!({"homeworks": [], "current_date": null})).unwrap();
        assert_eq!(update.cursor, None);
    }

    #[test]
    fn test_parse_status_formats_message() {
        let message =
            parse_status(&json!({"homework_name": "hw1", "status": "approved"})).unwrap();
        assert_eq!(
            message,
            format!(
                "Status changed for submission \"hw1\". {}",
                HomeworkStatus::Approved.verdict()
            )
        );
    }

    #[test]
    fn test_parse_status_contains_name_and_one_verdict() {
        for status in HomeworkStatus::ALL {
            let message =
                parse_status(&json!({"homework_name": "project_x", "status": status.code()}))
                    .unwrap();
            assert!(message.contains("project_x"));
            let matching = HomeworkStatus::ALL
                .iter()
                .filter(|s| message.contains(s.verdict()))
                .count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn test_parse_status_is_idempotent() {
        let record = json!({"homework_name": "hw2", "status": "rejected", "id": 7});
        assert_eq!(parse_status(&record), parse_status(&record));
    }

    #[test]
    fn test_parse_status_rejects_missing_name() {
        assert_eq!(
            parse_status(&json!({"status": "approved"})),
            Err(StatusError::MissingName)
        );
        assert_eq!(
            parse_status(&json!({"homework_name": "", "status": "approved"})),
            Err(StatusError::MissingName)
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown_status() {
        assert_eq!(
            parse_status(&json!({"homework_name": "hw1", "status": "in_review"})),
            Err(StatusError::UnrecognizedStatus("in_review".to_string()))
        );
        assert_eq!(
            parse_status(&json!({"homework_name": "hw1"})),
            Err(StatusError::UnrecognizedStatus("<missing>".to_string()))
        );
    }

    #[test]
    fn test_parse_status_rejects_non_object_record() {
        assert_eq!(
            parse_status(&json!("hw1")),
            Err(StatusError::RecordNotAnObject)
        );
    }

    #[test]
    fn test_extract_status_report() {
        let report =
            extract_status(&json!({"homework_name": "hw3", "status": "reviewing"})).unwrap();
        assert_eq!(report.homework_name, "hw3");
        assert_eq!(report.status, HomeworkStatus::Reviewing);
    }
}
