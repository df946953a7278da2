use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// The named fields pulled out of every log line, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    ThreadId,
    UserContext,
    Duration,
    Resource,
    Params,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Timestamp,
        Field::ThreadId,
        Field::UserContext,
        Field::Duration,
        Field::Resource,
        Field::Params,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::ThreadId => "threadId",
            Field::UserContext => "userContext",
            Field::Duration => "duration",
            Field::Resource => "resource",
            Field::Params => "params",
        }
    }

    /// Width of the single-character prefix a match may share with the
    /// previous match's text. Timestamp and duration prefixes cannot overlap
    /// their own values.
    fn shared_prefix(&self) -> usize {
        match self {
            Field::ThreadId | Field::UserContext | Field::Resource | Field::Params => 1,
            Field::Timestamp | Field::Duration => 0,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Field::Timestamp => &*TIMESTAMP_PATTERN,
            Field::ThreadId => &*THREAD_ID_PATTERN,
            Field::UserContext => &*USER_CONTEXT_PATTERN,
            Field::Duration => &*DURATION_PATTERN,
            Field::Resource => &*RESOURCE_PATTERN,
            Field::Params => &*PARAMS_PATTERN,
        }
    }
}

// Every pattern captures the field text in `value`. Prefix and terminator
// characters sit outside the group so a terminator can open the next match.
lazy_static! {
    static ref TIMESTAMP_PATTERN: Regex = Regex::new(
        r"(?P<value>[0-9]{1,4}-[0-9]{1,2}-[0-9]{1,2}\s[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2},[0-9]{1,3})"
    )
    .unwrap();
    static ref THREAD_ID_PATTERN: Regex = Regex::new(r"\((?P<value>.*)\)").unwrap();
    static ref USER_CONTEXT_PATTERN: Regex =
        Regex::new(r"\[(?P<value>[a-zA-Z0-9]*:[a-zA-Z0-9]*)\]").unwrap();
    static ref DURATION_PATTERN: Regex = Regex::new(r"in\s(?P<value>[0-9]+)").unwrap();
    static ref RESOURCE_PATTERN: Regex =
        Regex::new(r"/(?P<value>[a-zA-Z0-9]*.[a-zA-Z0-9]*)[?\s]").unwrap();
    static ref PARAMS_PATTERN: Regex =
        Regex::new(r"[?&](?P<value>[a-zA-Z0-9_-]*=[a-zA-Z0-9_-]*)[&\s]").unwrap();
}

/// Value of a field that matched at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    One(String),
    /// Two or more matches, in the order they appear on the line
    Many(Vec<String>),
}

impl FieldValue {
    fn from_matches(mut matches: Vec<String>) -> Option<Self> {
        match matches.len() {
            0 => None,
            1 => matches.pop().map(FieldValue::One),
            _ => Some(FieldValue::Many(matches)),
        }
    }

    /// The first occurrence on the line
    pub fn first(&self) -> &str {
        match self {
            FieldValue::One(value) => value,
            FieldValue::Many(values) => values.first().map_or("", String::as_str),
        }
    }
}

/// Fields extracted from a single log line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub timestamp: Option<FieldValue>,
    pub thread_id: Option<FieldValue>,
    pub user_context: Option<FieldValue>,
    pub duration: Option<FieldValue>,
    pub resource: Option<FieldValue>,
    pub params: Option<FieldValue>,
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        match field {
            Field::Timestamp => self.timestamp.as_ref(),
            Field::ThreadId => self.thread_id.as_ref(),
            Field::UserContext => self.user_context.as_ref(),
            Field::Duration => self.duration.as_ref(),
            Field::Resource => self.resource.as_ref(),
            Field::Params => self.params.as_ref(),
        }
    }

    fn set(&mut self, field: Field, value: Option<FieldValue>) {
        let slot = match field {
            Field::Timestamp => &mut self.timestamp,
            Field::ThreadId => &mut self.thread_id,
            Field::UserContext => &mut self.user_context,
            Field::Duration => &mut self.duration,
            Field::Resource => &mut self.resource,
            Field::Params => &mut self.params,
        };
        *slot = value;
    }
}

/// Extract every field from a raw log line.
///
/// Lines that only partially match are not an error: fields without a
/// match are left as `None`.
pub fn extract(line: &str) -> Record {
    let mut record = Record::default();
    for field in Field::ALL {
        let matches = find_all(field.pattern(), field.shared_prefix(), line);
        record.set(field, FieldValue::from_matches(matches));
    }
    record
}

/// Collect non-overlapping `value` captures from left to right.
///
/// Scanning resumes `prefix` bytes before the end of the previous capture,
/// so both the terminator and the capture's last character can open the
/// next match. A capture never starts before the previous one ends.
fn find_all(pattern: &Regex, prefix: usize, line: &str) -> Vec<String> {
    let mut matches = Vec::new();
    let mut position = 0;

    while position <= line.len() {
        let Some(captures) = pattern.captures_at(line, position) else {
            break;
        };
        let Some(value) = captures.name("value") else {
            break;
        };
        matches.push(value.as_str().to_string());

        let whole = captures.get(0).map_or(value.start(), |m| m.start());
        let mut next = value.end().saturating_sub(prefix);
        if !line.is_char_boundary(next) {
            // Prefixes are ASCII, nothing can match from inside a character
            next = value.end();
        }
        position = next.max(whole + 1);
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LINE: &str = "2015-08-19 00:04:25,474 (http--0.0.0.0-28080-405) [USER:300402244999] /mainContent.do?action=SUBSCRIPTION&msisdn=300402244999&contentId=main_subscription in 14";

    fn one(value: &str) -> Option<FieldValue> {
        Some(FieldValue::One(value.to_string()))
    }

    #[test]
    fn test_extract_full_line() {
        let record = extract(SAMPLE_LINE);

        assert_eq!(record.timestamp, one("2015-08-19 00:04:25,474"));
        assert_eq!(record.thread_id, one("http--0.0.0.0-28080-405"));
        assert_eq!(record.user_context, one("USER:300402244999"));
        assert_eq!(record.duration, one("14"));
        assert_eq!(record.resource, one("mainContent.do"));
        assert_eq!(
            record.params,
            Some(FieldValue::Many(vec![
                "action=SUBSCRIPTION".to_string(),
                "msisdn=300402244999".to_string(),
                "contentId=main_subscription".to_string(),
            ]))
        );
    }

    #[test]
    fn test_single_param_is_scalar() {
        let record = extract("2015-08-19 13:00:00,001 /getImage.do?id=42 in 3");
        assert_eq!(record.params, one("id=42"));
        assert_eq!(record.resource, one("getImage.do"));
        assert_eq!(record.thread_id, None);
        assert_eq!(record.user_context, None);
    }

    #[test]
    fn test_blank_line_has_no_fields() {
        let record = extract("");
        for field in Field::ALL {
            assert!(
                record.get(field).is_none(),
                "{} should be absent",
                field.as_str()
            );
        }
    }

    #[test]
    fn test_repeated_duration_keeps_line_order() {
        let record = extract("done in 12 then in 7");
        assert_eq!(
            record.duration,
            Some(FieldValue::Many(vec!["12".to_string(), "7".to_string()]))
        );
        assert_eq!(record.duration.as_ref().map(FieldValue::first), Some("12"));
    }

    #[test]
    fn test_thread_id_spans_to_last_paren() {
        let record = extract("(worker (1)) rest");
        assert_eq!(record.thread_id, one("worker (1)"));

        let record = extract("() empty");
        assert_eq!(record.thread_id, one(""));
    }

    #[test]
    fn test_match_may_open_inside_previous_capture() {
        let record = extract("(ab() x");
        assert_eq!(
            record.thread_id,
            Some(FieldValue::Many(vec!["ab(".to_string(), String::new()]))
        );

        let record = extract("[a:b] [c:[d:e]");
        assert_eq!(
            record.user_context,
            Some(FieldValue::Many(vec!["a:b".to_string(), "d:e".to_string()]))
        );

        let record = extract("(é) done");
        assert_eq!(record.thread_id, one("é"));
    }

    #[test]
    fn test_user_context_requires_key_value() {
        assert_eq!(
            extract("[USER:1] [ADMIN:2]").user_context,
            Some(FieldValue::Many(vec!["USER:1".to_string(), "ADMIN:2".to_string()]))
        );
        assert_eq!(extract("[no-colon-here]").user_context, None);
    }

    #[test]
    fn test_resource_needs_terminator() {
        assert_eq!(extract("GET /status.do").resource, None);
        assert_eq!(extract("GET /status.do ").resource, one("status.do"));
        assert_eq!(extract("GET /a/b.do?x=1 ").resource, one("b.do"));
    }

    #[test]
    fn test_param_without_trailing_whitespace_is_dropped() {
        let record = extract("/x.do?a=1&b=2");
        assert_eq!(record.params, one("a=1"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(extract(SAMPLE_LINE)).unwrap();
        assert_eq!(json["duration"], "14");
        assert_eq!(json["threadId"], "http--0.0.0.0-28080-405");
        assert!(json["params"].is_array());
        assert_eq!(json["params"].as_array().unwrap().len(), 3);

        let json = serde_json::to_value(extract("nothing to see")).unwrap();
        assert!(json["timestamp"].is_null());
        assert!(json["params"].is_null());
    }
}
