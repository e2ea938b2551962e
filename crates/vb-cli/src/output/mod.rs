use std::io::IsTerminal;
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};

pub mod table;

static TABLE_OPTIONS: OnceLock<table::TableOptions> = OnceLock::new();

/// Fix table rendering for this process from the global flags and terminal.
pub fn configure(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let options = table::TableOptions::resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        columns.as_deref(),
    );
    let _ = TABLE_OPTIONS.set(options);
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    TABLE_OPTIONS
        .get()
        .copied()
        .unwrap_or(table::TableOptions::PLAIN)
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["field", "value"];
            let rows = flatten_object(&map, "")
                .into_iter()
                .map(|(key, cell)| vec![key, cell])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

/// Nested objects become dotted keys.
fn flatten_object(map: &serde_json::Map<String, Value>, prefix: &str) -> Vec<(String, String)> {
    let mut rows = Vec::with_capacity(map.len());
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => rows.extend(flatten_object(inner, &name)),
            other => rows.push((name, value_to_cell(other))),
        }
    }
    rows
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    // `id` leads; remaining columns alphabetical.
    headers.sort_by(|a, b| (a != "id", a).cmp(&(b != "id", b)));

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

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) if v.is_empty() => String::from("-"),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, table::TableOptions, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Entry {
        id: i64,
        destination: &'static str,
        notes: &'static str,
    }

    #[derive(Serialize)]
    struct Nested {
        total: f64,
        summary: Inner,
    }

    #[derive(Serialize)]
    struct Inner {
        net_profit: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Entry {
            id: 1,
            destination: "example.com",
            notes: "",
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["destination"], "example.com");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Entry {
            id: 1,
            destination: "example.com",
            notes: "",
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_list_puts_id_first() {
        let rows = vec![
            Entry {
                id: 1,
                destination: "example.com",
                notes: "",
            },
            Entry {
                id: 2,
                destination: "mail.example.org",
                notes: "work",
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.starts_with("id"));
        assert!(header.find("destination") < header.find("notes"));
        assert!(out.contains("mail.example.org"));
    }

    #[test]
    fn table_render_flattens_nested_objects() {
        let value = Nested {
            total: 3.5,
            summary: Inner { net_profit: 1.5 },
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.contains("summary.net_profit"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Entry> = Vec::new();
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["id", "category", "description"];
        let rows = vec![
            vec!["1".to_string(), "Rent".to_string(), "short".to_string()],
            vec![
                "200".to_string(),
                "Office Supplies".to_string(),
                "a much longer description".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("category"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
