// Tests for response rendering and the output writer

use super::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// Writer whose contents stay readable after it is boxed
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, 0, Box::new(buffer.clone()));
    (writer, buffer)
}

#[test]
fn test_json_formats() {
    let value = json!({"order_id": 5, "status": "refunded"});
    assert_eq!(
        OutputFormat::Json.format(&value).unwrap(),
        r#"{"order_id":5,"status":"refunded"}"#
    );
    assert!(OutputFormat::JsonPretty.format(&value).unwrap().contains("\n  \"order_id\": 5"));
    assert_eq!(
        OutputFormat::Yaml.format(&value).unwrap(),
        "order_id: 5\nstatus: refunded\n"
    );
}

#[test]
fn test_human_object_rendering() {
    let rendered = format_response_human(&json!({
        "id": 12,
        "name": "Course",
        "tags": ["a", "b"]
    }));
    assert_eq!(rendered, "id    12\nname  Course\ntags  [a, b]");
}

#[test]
fn test_human_table_rendering() {
    let rendered = format_response_human(&json!([
        {"product_id": 1, "name": "Course", "pricing": {"amount": 100}},
        {"product_id": 22, "name": "Coaching", "pricing": {"amount": 900}}
    ]));
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "product_id │ name");
    assert!(lines[1].starts_with("──────────"));
    assert_eq!(lines[2], "1          │ Course");
    assert_eq!(lines[3], "22         │ Coaching");
}

#[test]
fn test_human_empty_responses() {
    assert_eq!(format_response_human(&Value::Null), "(empty response)");
    assert_eq!(format_response_human(&json!([])), "(no results)");
    assert_eq!(format_response_human(&json!("pong")), "\"pong\"");
}

#[test]
fn test_compact_values() {
    assert_eq!(format_value_compact(&json!([1, 2, 3, 4])), "[4 items]");
    assert_eq!(format_value_compact(&json!({"a": 1})), "{a: 1}");
    assert_eq!(format_value_compact(&json!({"a": 1, "b": 2, "c": 3})), "{3 fields}");
}

#[test]
fn test_writer_machine_format_skips_messages() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("Fetching products").unwrap();
    output.success("Done").unwrap();
    output.response(&json!({"ok": true})).unwrap();
    assert_eq!(buffer.contents(), "{\"ok\":true}\n");
}

#[test]
fn test_writer_quiet_human() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("hidden").unwrap();
    output.section("Hidden").unwrap();
    output.warning("shown").unwrap();
    output.response(&json!({"ok": true})).unwrap();
    assert_eq!(buffer.contents(), "WARNING: shown\nok  true\n");
}

#[test]
fn test_writer_yaml_no_double_newline() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.data(&json!({"mode": "test"})).unwrap();
    assert_eq!(buffer.contents(), "mode: test\n");
}

#[test]
fn test_no_spinner_for_custom_writer() {
    let (output, _) = writer(OutputFormat::Human, false);
    assert!(output.spinner("Working").is_none());
}
