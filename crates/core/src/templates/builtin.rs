//! Templates compiled into the binary.
//!
//! A file with the same logical name in the templates directory takes
//! precedence over these.

pub const DAY: &str = "# {{date}}

[[{{previous}}]] | [[{{next}}]]

## Notes

## Log
";

pub const WEEK: &str = "# {{week}}

{{start}} to {{end}}

[[{{previous}}]] | [[{{next}}]]

## Goals

## Review
";

pub const ZET: &str = "---
title: {{title}}
created: {{created}}
---

# {{title}}

";

const BUILTINS: &[(&str, &str)] = &[("day", DAY), ("week", WEEK), ("zet", ZET)];

pub fn get(name: &str) -> Option<&'static str> {
    BUILTINS.iter().find(|(n, _)| *n == name).map(|(_, body)| *body)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(n, _)| *n)
}
