use serde_json::Value;

use crate::models::{TokenType, TokenValue};

use super::FlatToken;

const HEADER: &str = "/**\n * Do not edit directly, this file was auto-generated.\n */\n";

/// `:root { --name: value; }` stylesheet.
pub fn css_variables(tokens: &[FlatToken]) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\n:root {\n");
    for token in tokens {
        out.push_str(&format!("  --{}: {};", token.name, css_value(token)));
        if let Some(comment) = &token.comment {
            out.push_str(&format!(" /* {} */", comment_body(comment)));
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// CSS lists are comma separated; family names with spaces get quoted.
fn css_value(token: &FlatToken) -> String {
    match &token.value {
        TokenValue::Scalar(s) => s.clone(),
        TokenValue::List(items) if token.kind == TokenType::FontFamily => items
            .iter()
            .map(|item| quote_font_family(item))
            .collect::<Vec<_>>()
            .join(", "),
        TokenValue::List(items) => items.join(", "),
    }
}

fn quote_font_family(name: &str) -> String {
    let already_quoted = name.starts_with('\'') || name.starts_with('"');
    if name.chars().any(char::is_whitespace) && !already_quoted {
        format!("'{name}'")
    } else {
        name.to_string()
    }
}

/// `export const Name = value;` module.
pub fn es6_module(tokens: &[FlatToken]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for token in tokens {
        out.push_str(&format!(
            "export const {} = {};",
            token.name,
            json_literal(&token.value)
        ));
        match &token.comment {
            Some(comment) if is_multiline(comment) => {
                out.push_str(&format!(" /* {} */", comment_body(comment)));
            }
            Some(comment) => out.push_str(&format!(" // {comment}")),
            None => {}
        }
        out.push('\n');
    }
    out
}

/// `export const Name: "literal";` declarations.
pub fn es6_declarations(tokens: &[FlatToken]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for token in tokens {
        if let Some(comment) = &token.comment {
            out.push_str(&doc_comment(comment));
        }
        out.push_str(&format!(
            "export const {}: {};\n",
            token.name,
            literal_type(&token.value)
        ));
    }
    out
}

fn is_multiline(comment: &str) -> bool {
    comment.contains(['\n', '\r'])
}

/// Comment text that cannot terminate the block comment around it.
fn comment_body(comment: &str) -> String {
    comment.replace("*/", "*\\/")
}

fn doc_comment(comment: &str) -> String {
    let body = comment_body(comment);
    if !is_multiline(&body) {
        return format!("/** {body} */\n");
    }
    let mut out = String::from("/**\n");
    for line in body.lines() {
        out.push_str(format!(" * {line}").trim_end());
        out.push('\n');
    }
    out.push_str(" */\n");
    out
}

fn json_literal(value: &TokenValue) -> String {
    match value {
        TokenValue::Scalar(s) => Value::String(s.clone()).to_string(),
        TokenValue::List(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect()).to_string()
        }
    }
}

fn literal_type(value: &TokenValue) -> String {
    match value {
        TokenValue::Scalar(s) => Value::String(s.clone()).to_string(),
        TokenValue::List(items) => {
            let members: Vec<String> = items
                .iter()
                .map(|item| Value::String(item.clone()).to_string())
                .collect();
            format!("readonly [{}]", members.join(", "))
        }
    }
}
