// NETCONF 1.0 message construction and reply decoding.
//
// Pure functions only: no I/O happens here, which keeps the wire format
// testable without a device.

use std::fmt::Write as _;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::Error;

/// End-of-message marker for NETCONF 1.0 framing.
pub(crate) const DELIMITER: &[u8] = b"]]>]]>";

const BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

// ── Requests ────────────────────────────────────────────────────────

pub(crate) fn client_hello() -> String {
    format!(
        "<hello xmlns=\"{BASE_NS}\"><capabilities>\
         <capability>urn:ietf:params:netconf:base:1.0</capability>\
         </capabilities></hello>]]>]]>"
    )
}

/// Wrap an operation body in an `<rpc>` envelope with framing.
pub(crate) fn rpc(message_id: u64, body: &str) -> String {
    format!("<rpc message-id=\"{message_id}\" xmlns=\"{BASE_NS}\">{body}</rpc>]]>]]>")
}

pub(crate) fn lock_candidate() -> &'static str {
    "<lock><target><candidate/></target></lock>"
}

pub(crate) fn load_set(statements: &[String]) -> String {
    let mut body = String::from(
        "<load-configuration action=\"set\" format=\"text\"><configuration-set>",
    );
    for statement in statements {
        body.push_str(&escape(statement.as_str()));
        body.push('\n');
    }
    body.push_str("</configuration-set></load-configuration>");
    body
}

pub(crate) fn commit(comment: &str) -> String {
    format!(
        "<commit-configuration><log>{}</log></commit-configuration>",
        escape(comment)
    )
}

pub(crate) fn discard_changes() -> &'static str {
    "<discard-changes/>"
}

pub(crate) fn command(text: &str) -> String {
    format!("<command format=\"text\">{}</command>", escape(text))
}

pub(crate) fn close_session() -> &'static str {
    "<close-session/>"
}

// ── Framing ─────────────────────────────────────────────────────────

/// Split one complete message off the front of `buf`.
///
/// Returns the message text (without delimiter) and the number of bytes
/// consumed, or `None` while the delimiter has not arrived yet.
pub(crate) fn split_message(buf: &[u8]) -> Option<(String, usize)> {
    let end = buf
        .windows(DELIMITER.len())
        .position(|window| window == DELIMITER)?;
    let message = String::from_utf8_lossy(&buf[..end]).into_owned();
    Some((message, end + DELIMITER.len()))
}

// ── Replies ─────────────────────────────────────────────────────────

/// An `rpc-error` element reported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RpcError {
    pub severity: String,
    pub message: String,
}

impl RpcError {
    /// Warnings are informational; anything else fails the operation.
    pub(crate) fn is_fatal(&self) -> bool {
        self.severity != "warning"
    }
}

/// Decoded `rpc-reply`: the payload text and any reported errors.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Reply {
    /// Reply content with entities decoded. Nested element tags are kept
    /// as bare `<name>` / `</name>` so text-level markers survive.
    pub data: String,
    pub errors: Vec<RpcError>,
}

impl Reply {
    /// First fatal error message, joined with any others.
    pub(crate) fn fatal_message(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .filter(|e| e.is_fatal())
            .map(|e| e.message.as_str())
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ErrorField {
    None,
    Severity,
    Message,
}

/// Decode an `rpc-reply` message.
pub(crate) fn parse_reply(xml: &str) -> Result<Reply, Error> {
    let mut reader = Reader::from_str(xml);
    let mut reply = Reply::default();
    let mut in_reply = false;
    let mut error_depth = 0usize;
    let mut current: Option<RpcError> = None;
    let mut field = ErrorField::None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if !in_reply {
                    in_reply = name == "rpc-reply";
                    continue;
                }
                if error_depth > 0 {
                    error_depth += 1;
                    field = match name.as_str() {
                        "error-severity" => ErrorField::Severity,
                        "error-message" => ErrorField::Message,
                        _ => ErrorField::None,
                    };
                } else if name == "rpc-error" {
                    error_depth = 1;
                    current = Some(RpcError {
                        severity: "error".into(),
                        message: String::new(),
                    });
                } else {
                    let _ = write!(reply.data, "<{name}>");
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if error_depth > 0 {
                    error_depth -= 1;
                    field = ErrorField::None;
                    if error_depth == 0 {
                        if let Some(err) = current.take() {
                            reply.errors.push(err);
                        }
                    }
                } else if name == "rpc-reply" {
                    in_reply = false;
                } else if in_reply {
                    let _ = write!(reply.data, "</{name}>");
                }
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if in_reply && error_depth == 0 && name != "ok" {
                    let _ = write!(reply.data, "<{name}/>");
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                if let Some(ref mut err) = current {
                    match field {
                        ErrorField::Severity => err.severity = text.trim().to_owned(),
                        ErrorField::Message => err.message.push_str(text.trim()),
                        ErrorField::None => {}
                    }
                } else if in_reply {
                    reply.data.push_str(&text);
                }
            }
            Event::CData(c) => {
                if in_reply && error_depth == 0 {
                    reply.data.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(reply)
}

/// Extract the session id from the server `<hello>`, if present.
pub(crate) fn parse_hello(xml: &str) -> Result<Option<String>, Error> {
    let mut reader = Reader::from_str(xml);
    let mut saw_hello = false;
    let mut in_session_id = false;
    let mut session_id = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"hello" => saw_hello = true,
                b"session-id" => in_session_id = true,
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"session-id" => in_session_id = false,
            Event::Text(t) if in_session_id => {
                session_id = Some(t.unescape()?.trim().to_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if saw_hello {
        Ok(session_id)
    } else {
        Err(Error::Protocol {
            message: "expected <hello> from device".into(),
        })
    }
}
