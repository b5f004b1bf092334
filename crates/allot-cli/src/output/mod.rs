use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

use table::TableOptions;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    render_with(value, format, TableOptions::default())
}

fn render_with<T: Serialize>(
    value: &T,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, options),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format, sizing tables to
/// the terminal.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_with(value, format, TableOptions::detect())?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T, options: TableOptions) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            // Nested lists (e.g. report failures) get their own table below the summary.
            let mut sections = Vec::new();
            let mut rows = Vec::with_capacity(map.len());
            for (key, value) in map {
                match value {
                    Value::Array(items) if !items.is_empty() => {
                        sections.push(format!("\n{key}:\n{}", render_array_table(&items, options)));
                    }
                    other => rows.push(vec![key, value_to_cell(&other)]),
                }
            }
            let mut out = table::render_rows(&["key", "value"], &rows, options);
            for section in sections {
                out.push('\n');
                out.push_str(&section);
            }
            Ok(out)
        }
        scalar => Ok(table::render_rows(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

fn render_array_table(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options);
    }

    // Column order follows the first record; later records may add columns.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Tally {
        strategy: &'static str,
        succeeded: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Tally {
            strategy: "default_fill",
            succeeded: 7,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["strategy"], "default_fill");
        assert_eq!(parsed["succeeded"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Tally {
            strategy: "manual",
            succeeded: 1,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["strategy"], "manual");
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Tally {
            strategy: "manual",
            succeeded: 1,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("strategy"));
        assert!(out.contains("succeeded"));
    }

    #[test]
    fn nested_rows_render_as_a_second_table() {
        let value = json!({
            "failed": 1,
            "failures": [{ "row": 3, "kind": "lookup", "reason": "unknown student" }],
        });
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.contains("failures:"));
        assert!(out.contains("unknown student"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let out = render(&Vec::<Tally>::new(), OutputFormat::Table).expect("table render");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn string_lists_join_into_one_cell() {
        assert_eq!(value_to_cell(&json!(["AI", "Robotics"])), "AI; Robotics");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }
}
