//! Domain types: students and generation history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One student on the class roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub seat_number: String,
    pub name: String,
    /// Selected trait tags; generation requires at least one.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Specific supporting anecdote, woven into the comment when present.
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub generated_comment: Option<String>,
    #[serde(default)]
    pub last_generated_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(seat_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            seat_number: seat_number.into(),
            name: name.into(),
            traits: Vec::new(),
            note: None,
            generated_comment: None,
            last_generated_at: None,
        }
    }
}

/// Parses a plain-text roster, one student per line.
///
/// Accepted line shapes: `"01. 王小明"`, `"01 王小明"`, or a bare name.
/// A missing seat number becomes `"?"`. Blank lines are skipped.
pub fn parse_roster(raw: &str) -> Vec<Student> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_roster_line)
        .collect()
}

fn parse_roster_line(line: &str) -> Student {
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        let rest = line[digits.len()..].trim_start_matches(['.', ' ', '\t']).trim();
        if !rest.is_empty() {
            return Student::new(digits, rest);
        }
    }
    Student::new("?", line)
}

/// Audit record of one successful generation or rewrite.
///
/// Append-only: records are never mutated after creation, only deleted
/// by id or cleared in bulk by the history store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub generated_at: DateTime<Utc>,
    pub traits: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub style: String,
    pub word_count: u32,
    pub comment: String,
}

impl HistoryRecord {
    /// Builds a record for a freshly generated comment.
    pub fn for_student(
        student: &Student,
        comment: impl Into<String>,
        style: &str,
        word_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            generated_at: Utc::now(),
            traits: student.traits.clone(),
            note: student.note.clone(),
            style: style.to_string(),
            word_count,
            comment: comment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_roster_numbered_lines() {
        let students = parse_roster("01. 王小明\n02. 李小華\n");
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].seat_number, "01");
        assert_eq!(students[0].name, "王小明");
        assert_eq!(students[1].seat_number, "02");
        assert_eq!(students[1].name, "李小華");
    }

    #[test]
    fn test_parse_roster_space_separator() {
        let students = parse_roster("7 陳大文");
        assert_eq!(students[0].seat_number, "7");
        assert_eq!(students[0].name, "陳大文");
    }

    #[test]
    fn test_parse_roster_bare_name() {
        let students = parse_roster("林小美");
        assert_eq!(students[0].seat_number, "?");
        assert_eq!(students[0].name, "林小美");
    }

    #[test]
    fn test_parse_roster_skips_blank_lines() {
        let students = parse_roster("\n01. 王小明\n\n  \n02. 李小華");
        assert_eq!(students.len(), 2);
    }

    #[test]
    fn test_parse_roster_all_digit_line_is_a_name() {
        // A line with only digits has no name part; keep it verbatim.
        let students = parse_roster("42");
        assert_eq!(students[0].seat_number, "?");
        assert_eq!(students[0].name, "42");
    }

    #[test]
    fn test_students_get_unique_ids() {
        let students = parse_roster("01. 甲\n02. 乙");
        assert_ne!(students[0].id, students[1].id);
    }

    #[test]
    fn test_history_record_copies_student_metadata() {
        let mut student = Student::new("01", "王小明");
        student.traits = vec!["認真專注".to_string()];
        student.note = Some("科展獲獎".to_string());

        let record = HistoryRecord::for_student(&student, "評語內容", "溫馨", 100);
        assert_eq!(record.student_id, student.id);
        assert_eq!(record.student_name, "王小明");
        assert_eq!(record.traits, student.traits);
        assert_eq!(record.note.as_deref(), Some("科展獲獎"));
        assert_eq!(record.style, "溫馨");
        assert_eq!(record.word_count, 100);
        assert_eq!(record.comment, "評語內容");
    }
}
