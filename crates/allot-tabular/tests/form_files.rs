use allot_tabular::{read_self_report, read_student_choice};
use pretty_assertions::assert_eq;

#[test]
fn google_form_export_with_extra_columns() {
    let csv = "\
Timestamp,Email Address,Student ID number (INCLUDING 'UP'),First Supervisor Choice,Second Supervisor Choice,Third Supervisor Choice,Project Topic.
2024/02/01 10:15:00,s1@example.ac.uk,UP100,A. Smith,B. Jones,C. Lee,Computer vision
2024/01/31 08:00:00,s2@example.ac.uk,UP200,B. Jones,,,
";
    let form = read_student_choice(csv.as_bytes()).unwrap();
    assert!(form.has_timestamp);
    assert_eq!(form.rows.len(), 2);
    assert_eq!(form.rows[0].timestamp.as_deref(), Some("2024/02/01 10:15:00"));
    assert_eq!(form.rows[1].topic, None);
    assert_eq!(form.rows[1].row, 3);
}

#[test]
fn invalid_utf8_is_rejected() {
    let mut bytes = b"I agree to supervise / moderate this project,Supervisor or Moderator?,Student's ID (without 'UP'),Supervisor's / Moderator's name\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b',', b'x', b'\n']);
    assert!(read_self_report(bytes.as_slice()).is_err());
}
