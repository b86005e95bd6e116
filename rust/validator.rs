use serde_json::Value;

use crate::error::MalformedResponse;
use crate::models::Cursor;

/// A response that passed [`check_response`]; borrows from the decoded body.
#[derive(Debug, PartialEq)]
pub struct CheckedResponse<'a> {
    pub homeworks: &'a [Value],
    pub current_date: Cursor,
}

/// Gatekeeper for the review API payload: nothing is read from the response
/// before it is confirmed to be `{"homeworks": [...], "current_date": <int>}`.
pub fn check_response(response: &Value) -> Result<CheckedResponse<'_>, MalformedResponse> {
    let object = response.as_object().ok_or(MalformedResponse::NotAnObject)?;

    let homeworks = object
        .get("homeworks")
        .ok_or(MalformedResponse::MissingKey("homeworks"))?;
    let current_date = object
        .get("current_date")
        .ok_or(MalformedResponse::MissingKey("current_date"))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(MalformedResponse::HomeworksNotAList)?;
    let current_date = current_date
        .as_i64()
        .ok_or(MalformedResponse::CurrentDateNotInteger)?;

    Ok(CheckedResponse {
        homeworks,
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_documented_shape() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1700000100
        });
        let checked = check_response(&response).unwrap();
        assert_eq!(checked.current_date, 1700000100);
        assert_eq!(checked.homeworks.len(), 1);
    }

    #[test]
    fn accepts_empty_homeworks() {
        let response = json!({"homeworks": [], "current_date": 1});
        let checked = check_response(&response).unwrap();
        assert!(checked.homeworks.is_empty());
    }

    #[test]
    fn rejects_non_object_top_level() {
        for response in [json!([]), json!("homeworks"), json!(42), Value::Null] {
            assert_eq!(check_response(&response), Err(MalformedResponse::NotAnObject));
        }
    }

    #[test]
    fn rejects_missing_keys() {
        assert_eq!(
            check_response(&json!({"current_date": 1})),
            Err(MalformedResponse::MissingKey("homeworks"))
        );
        assert_eq!(
            check_response(&json!({"homeworks": []})),
            Err(MalformedResponse::MissingKey("current_date"))
        );
    }

    #[test]
    fn rejects_homeworks_that_are_not_a_list() {
        for homeworks in [json!({"hw": "approved"}), json!("hw1"), json!(null)] {
            let response = json!({"homeworks": homeworks, "current_date": 1});
            assert_eq!(
                check_response(&response),
                Err(MalformedResponse::HomeworksNotAList)
            );
        }
    }

    #[test]
    fn rejects_non_integer_current_date() {
        let response = json!({"homeworks": [], "current_date": "yesterday"});
        assert_eq!(
            check_response(&response),
            Err(MalformedResponse::CurrentDateNotInteger)
        );
    }
}
