// Rendered statements and value quoting.

use std::fmt;

use serde::Serialize;

use crate::schema::{FieldId, SCOPE};

/// One `set` statement, relative to the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    #[serde(serialize_with = "serialize_field")]
    pub field: FieldId,
    pub path: &'static str,
    /// Rendered value, quoted when needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_field<S: serde::Serializer>(field: &FieldId, serializer: S) -> Result<S::Ok, S::Error> {
    let name: &'static str = (*field).into();
    serializer.serialize_str(name)
}

impl Statement {
    /// `set system <path> [value]`
    pub fn set_command(&self) -> String {
        format!("set {SCOPE} {self}")
    }
}

/// `<path> [value]`, the relative form the device displays.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(ref value) => write!(f, "{} {value}", self.path),
            None => f.write_str(self.path),
        }
    }
}

/// Ordered output of the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatementSet {
    statements: Vec<Statement>,
}

impl StatementSet {
    pub(crate) fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Full `set system ...` commands, in emission order.
    pub fn set_commands(&self) -> Vec<String> {
        self.statements.iter().map(Statement::set_command).collect()
    }

    /// Text shaped like `show configuration system | display set relative`.
    pub fn to_display_set(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str("set ");
            out.push_str(&statement.to_string());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

// ── Quoting ─────────────────────────────────────────────────────────

/// Quote a value the way the device displays it: bare when it is a
/// single plain token, otherwise in double quotes with `\"` and `\\`.
pub fn quote(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.starts_with('"') || value.contains(char::is_whitespace);
    if !needs_quotes {
        return value.to_owned();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Inverse of [`quote`]. Unquoted input is returned unchanged.
pub fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return raw.to_owned();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tokens_stay_bare() {
        assert_eq!(quote("edge1"), "edge1");
        assert_eq!(quote("2001:db8::/32"), "2001:db8::/32");
        assert_eq!(quote("a\\b"), "a\\b");
    }

    #[test]
    fn whitespace_and_quotes_are_quoted() {
        assert_eq!(quote("hello world"), "\"hello world\"");
        assert_eq!(quote("\"x"), "\"\\\"x\"");
        assert_eq!(quote("say \"hi\" \\o/"), "\"say \\\"hi\\\" \\\\o/\"");
    }

    #[test]
    fn unquote_inverts_quote() {
        for value in ["edge1", "hello world", "\"x", "say \"hi\" \\o/", " padded "] {
            assert_eq!(unquote(&quote(value)), value);
        }
    }

    #[test]
    fn lone_quote_is_left_alone() {
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn statement_renders_relative_and_full() {
        let statement = Statement {
            field: FieldId::HostName,
            path: "host-name",
            value: Some("edge1".into()),
        };
        assert_eq!(statement.to_string(), "host-name edge1");
        assert_eq!(statement.set_command(), "set system host-name edge1");
    }
}
