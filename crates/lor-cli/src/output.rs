//! Terminal output helpers.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Prints a list of rows.
pub fn output<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table if rows.is_empty() => info("No results found."),
        OutputFormat::Table => {
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Yaml => {
            for row in rows {
                print!("{}", yaml_text(&serde_json::to_value(row)?));
                println!();
            }
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Prints a single record.
pub fn output_single<T: Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            print!("{}", yaml_text(&serde_json::to_value(item)?));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Renders a JSON value as indented YAML-like text.
#[must_use]
pub fn yaml_text(value: &Value) -> String {
    let mut out = String::new();
    write_yaml(&mut out, value, 0);
    out
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn write_yaml(out: &mut String, value: &Value, indent: usize) {
    let prefix = "  ".repeat(indent);

    match value {
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    out.push_str(&format!("{prefix}-\n"));
                    write_yaml(out, item, indent + 1);
                } else {
                    out.push_str(&format!("{prefix}- {}\n", scalar(item)));
                }
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    out.push_str(&format!("{prefix}{key}:\n"));
                    write_yaml(out, val, indent + 1);
                } else {
                    out.push_str(&format!("{prefix}{key}: {}\n", scalar(val)));
                }
            }
        }
        other => out.push_str(&format!("{prefix}{}\n", scalar(other))),
    }
}

/// Prompts for confirmation.
pub fn confirm(message: &str) -> crate::CliResult<bool> {
    let answer = prompt(&format!("{message} [y/N]: "))?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Prompts for a line of input.
pub fn prompt(message: &str) -> crate::CliResult<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompts for password input (hidden).
pub fn prompt_password(message: &str) -> crate::CliResult<String> {
    Ok(rpassword::prompt_password(message)?)
}
