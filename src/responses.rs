//! Decoding of the team endpoint's JSON payload.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::types::Team;

/// Decode the response body into teams.
///
/// Object keys are matched case-insensitively, and a `null` field keeps its
/// default. With `strict` unset a malformed payload is logged and yields an
/// empty list so the report is still produced (empty).
pub fn decode_teams(body: &[u8], strict: bool) -> Result<Vec<Team>> {
    let parsed = serde_json::from_slice::<Value>(body)
        .and_then(|value| serde_json::from_value::<Vec<Team>>(fold_keys(value)));

    match parsed {
        Ok(teams) => Ok(teams),
        Err(e) if strict => Err(e.into()),
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "ignoring undecodable team payload");
            Ok(Vec::new())
        }
    }
}

/// Lowercase every object key. A later key wins over an earlier one that
/// folds to the same name.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), fold_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    const ALPHA: &str = r#"[{"id":1,"identifier":"A","name":"Alpha","volunteeremails":[{"volunteeremail":"a@x.com"},{"volunteeremail":"b@x.com"}]}]"#;

    #[test]
    fn test_decode_single_team() {
        let teams = decode_teams(ALPHA.as_bytes(), true).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id, 1);
        assert_eq!(teams[0].identifier, "A");
        assert_eq!(teams[0].name, "Alpha");
        assert_eq!(teams[0].volunteer_count(), 2);
        assert_eq!(teams[0].volunteer_emails[1].volunteer_email, "b@x.com");
        assert_eq!(teams[0].volunteer_emails[0].team_id, 0);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_teams(b"[]", true).unwrap().is_empty());
    }

    #[test]
    fn test_decode_missing_and_null_emails() {
        let body = br#"[{"id":2,"identifier":"B","name":"Beta"},{"id":3,"identifier":"C","name":"Gamma","volunteeremails":null}]"#;
        let teams = decode_teams(body, true).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].volunteer_count(), 0);
        assert_eq!(teams[1].volunteer_count(), 0);
    }

    #[test]
    fn test_decode_ignores_unknown_fields_and_reads_team_id() {
        let body = br#"[{"id":4,"identifier":"D","name":"Delta","city":"Oslo","volunteeremails":[{"TeamID":4,"volunteeremail":"d@x.com","active":true}]}]"#;
        let teams = decode_teams(body, true).unwrap();
        assert_eq!(teams[0].volunteer_emails[0].team_id, 4);
        assert_eq!(teams[0].volunteer_count(), 1);
    }

    #[test]
    fn test_decode_preserves_order() {
        let body = br#"[{"id":2,"name":"Second"},{"id":1,"name":"First"}]"#;
        let names: Vec<_> = decode_teams(body, true)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Second", "First"]);
    }

    #[test]
    fn test_malformed_payload_is_swallowed() {
        let teams = decode_teams(b"<html>Unauthorized</html>", false).unwrap();
        assert!(teams.is_empty());
    }

    #[test]
    fn test_malformed_payload_is_fatal_when_strict() {
        let err = decode_teams(b"{\"error\":\"nope\"}", true).unwrap_err();
        assert!(matches!(err, ReportError::Decode(_)));
    }

    #[test]
    fn test_null_scalar_fields_keep_the_team() {
        let body = br#"[{"id":null,"identifier":null,"name":null,"volunteeremails":[{"volunteeremail":"a@x.com"}]},{"id":2,"identifier":"B","name":"Beta","volunteeremails":[]}]"#;
        let teams = decode_teams(body, true).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id, 0);
        assert_eq!(teams[0].name, "");
        assert_eq!(teams[0].volunteer_count(), 1);
        assert_eq!(teams[1].name, "Beta");
    }

    #[test]
    fn test_null_volunteer_entries_still_count() {
        let body = br#"[{"id":1,"name":"Alpha","volunteeremails":[{"TeamID":null,"volunteeremail":null},null]}]"#;
        let teams = decode_teams(body, false).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].volunteer_count(), 2);
        assert_eq!(teams[0].volunteer_emails[0].volunteer_email, "");
        assert_eq!(teams[0].volunteer_emails[1].team_id, 0);
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        let body = br#"[{"ID":7,"Identifier":"A","Name":"Alpha","VolunteerEmails":[{"teamId":7,"VolunteerEmail":"a@x.com"}]}]"#;
        let teams = decode_teams(body, true).unwrap();
        assert_eq!(teams[0].id, 7);
        assert_eq!(teams[0].identifier, "A");
        assert_eq!(teams[0].name, "Alpha");
        assert_eq!(teams[0].volunteer_count(), 1);
        assert_eq!(teams[0].volunteer_emails[0].team_id, 7);
        assert_eq!(teams[0].volunteer_emails[0].volunteer_email, "a@x.com");
    }

    #[test]
    fn test_later_key_wins_when_case_collides() {
        let body = br#"[{"name":"first","NAME":"second"}]"#;
        let teams = decode_teams(body, true).unwrap();
        assert_eq!(teams[0].name, "second");
    }
}
