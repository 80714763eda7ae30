use canvas::geom::Point;
use canvas::input::Button;
use tokio::io::AsyncBufReadExt;

use super::*;

#[test]
fn parses_each_event_kind() {
    let cases = [
        (r#"{"kind":"create","position":{"x":1,"y":2}}"#, InputEvent::Create { position: Point::new(1.0, 2.0) }),
        (
            r#"{"kind":"press","position":{"x":3,"y":4},"button":"secondary","timestamp":12.5}"#,
            InputEvent::Press { position: Point::new(3.0, 4.0), button: Button::Secondary, timestamp: 12.5 },
        ),
        (r#"{"kind":"move","position":{"x":5,"y":6}}"#, InputEvent::Move { position: Point::new(5.0, 6.0) }),
        (r#"{"kind":"release","timestamp":30}"#, InputEvent::Release { timestamp: 30.0 }),
        (
            r#"{"kind":"wheel","position":{"x":7,"y":8},"delta":-3}"#,
            InputEvent::Wheel { position: Point::new(7.0, 8.0), delta: -3.0 },
        ),
    ];
    for (line, expected) in cases {
        assert_eq!(parse_line(line, 1), Some(expected), "{line}");
    }
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert!(parse_line("", 1).is_none());
    assert!(parse_line("   ", 2).is_none());
    assert!(parse_line("# drag the first square", 3).is_none());
}

#[test]
fn malformed_lines_are_skipped() {
    assert!(parse_line("{", 1).is_none());
    assert!(parse_line(r#"{"kind":"teleport"}"#, 2).is_none());
    assert!(parse_line(r#"{"kind":"press","position":{"x":1,"y":1}}"#, 3).is_none());
}

#[tokio::test]
async fn open_reads_events_file() {
    let path = std::env::temp_dir().join(format!("squareboard-events-{}.jsonl", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, "{\"kind\":\"release\",\"timestamp\":1}\n").await.unwrap();

    let mut lines = open(Some(&path)).await.unwrap().lines();
    let line = lines.next_line().await.unwrap().unwrap();
    assert_eq!(parse_line(&line, 1), Some(InputEvent::Release { timestamp: 1.0 }));
    assert!(lines.next_line().await.unwrap().is_none());
    tokio::fs::remove_file(path).await.unwrap();
}

#[tokio::test]
async fn open_missing_file_errors() {
    let path = std::env::temp_dir().join(format!("squareboard-missing-{}.jsonl", uuid::Uuid::new_v4()));
    assert!(open(Some(&path)).await.is_err());
}
