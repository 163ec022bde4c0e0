// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Console-style rendering of log arguments.
//!
//! Top-level strings are printed verbatim. Containers use an inspect-like
//! form: `{pid: 42, name: 'worker'}` and `[1, 'two']`, with nested strings
//! single-quoted.

use serde_json::Value;

/// Renders the arguments of a log call, separated by single spaces.
pub fn render_args(args: &[Value]) -> String {
	let mut out = String::new();
	for (index, arg) in args.iter().enumerate() {
		if index > 0 {
			out.push(' ');
		}
		render_top(arg, &mut out);
	}
	out
}

/// Renders one argument as it appears at the top level of a console line.
pub fn render_arg(arg: &Value) -> String {
	let mut out = String::new();
	render_top(arg, &mut out);
	out
}

fn render_top(value: &Value, out: &mut String) {
	match value {
		Value::String(s) => out.push_str(s),
		other => render_nested(other, out),
	}
}

fn render_nested(value: &Value, out: &mut String) {
	match value {
		Value::Null => out.push_str("null"),
		Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
		Value::Number(n) => match n.as_f64().filter(|_| n.is_f64()) {
			// f64's Display drops the trailing `.0` of integral values.
			Some(f) => out.push_str(&f.to_string()),
			None => out.push_str(&n.to_string()),
		},
		Value::String(s) => push_quoted(s, out),
		Value::Array(items) => {
			out.push('[');
			for (index, item) in items.iter().enumerate() {
				if index > 0 {
					out.push_str(", ");
				}
				render_nested(item, out);
			}
			out.push(']');
		}
		Value::Object(map) => {
			if map.is_empty() {
				out.push_str("{}");
				return;
			}
			out.push('{');
			for (index, (key, item)) in map.iter().enumerate() {
				if index > 0 {
					out.push_str(", ");
				}
				render_key(key, out);
				out.push_str(": ");
				render_nested(item, out);
			}
			out.push('}');
		}
	}
}

fn render_key(key: &str, out: &mut String) {
	let bare = !key.is_empty()
		&& !key.starts_with(|c: char| c.is_ascii_digit())
		&& key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
	if bare {
		out.push_str(key);
	} else {
		push_quoted(key, out);
	}
}

fn push_quoted(s: &str, out: &mut String) {
	out.push('\'');
	for c in s.chars() {
		match c {
			'\'' => out.push_str("\\'"),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('\'');
}
