// ── Statement parser ──
//
// Device text → model, in one pass. Statements may arrive in any order;
// each one is resolved against the catalog and folded into the model,
// creating its block chain on first sight. Lines the catalog does not
// know are skipped.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::model::{Assignment, SystemConfig};
use crate::schema::{self, ScalarKind, Shape};
use crate::statement::unquote;

const OUTPUT_OPEN: &str = "<configuration-output>";
const OUTPUT_CLOSE: &str = "</configuration-output>";

/// Outcome of [`parse_lenient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub config: SystemConfig,
    /// Lines whose value could not be decoded, in input order.
    pub errors: Vec<ParseError>,
    /// Lines no catalog entry matched, or whose value spells "unset".
    pub skipped: usize,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse `display set` output, failing on the first undecodable value.
pub fn parse(text: &str) -> Result<SystemConfig, ParseError> {
    walk(text, true).map(|report| report.config)
}

/// Parse `display set` output, collecting undecodable values instead of
/// stopping. Every other line still applies.
pub fn parse_lenient(text: &str) -> ParseReport {
    // A non-strict walk never returns Err.
    walk(text, false).unwrap_or_default()
}

fn walk(text: &str, strict: bool) -> Result<ParseReport, ParseError> {
    let mut report = ParseReport::default();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.contains(OUTPUT_OPEN) {
            continue;
        }
        if line.contains(OUTPUT_CLOSE) {
            break;
        }
        let statement = line.strip_prefix("set ").unwrap_or(line).trim_start();
        let statement = statement
            .strip_prefix(schema::SCOPE)
            .and_then(|rest| rest.strip_prefix(' '))
            .unwrap_or(statement);
        if statement.is_empty() {
            continue;
        }

        let Some(found) = schema::lookup(statement) else {
            trace!(line_number, statement, "skipping unrecognized statement");
            report.skipped += 1;
            continue;
        };
        let field = found.field;

        let assignment = match (field.shape, found.value) {
            (Shape::Marker | Shape::Flag, _) => Assignment::Present,
            (Shape::Scalar(ScalarKind::Int), Some(raw_value)) => {
                let value = unquote(raw_value);
                match value.parse::<u32>() {
                    Ok(number) => Assignment::Int(number),
                    Err(source) => {
                        let err = ParseError {
                            line_number,
                            line: line.to_owned(),
                            field: field.id,
                            value,
                            source,
                        };
                        if strict {
                            return Err(err);
                        }
                        debug!(line_number, field = %field.id, "undecodable integer");
                        report.errors.push(err);
                        continue;
                    }
                }
            }
            (Shape::Scalar(ScalarKind::Text) | Shape::List, Some(raw_value)) => {
                Assignment::Text(unquote(raw_value))
            }
            // lookup only matches valued shapes when a value is present
            (Shape::Scalar(_) | Shape::List, None) => continue,
        };

        if assignment.is_unset(field.sentinel) {
            trace!(line_number, field = %field.id, "value spells unset, ignoring");
            report.skipped += 1;
            continue;
        }

        report
            .config
            .materialize(field.block)
            .assign(field.id, assignment);
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{IcmpRateLimit, InternetOptions};
    use crate::schema::{BlockId, FieldId};
    use pretty_assertions::assert_eq;

    #[test]
    fn framing_markers_bound_the_input() {
        let text = "<configuration-information>\n<configuration-output>\n\
                    set host-name edge1\n\
                    </configuration-output>\n\
                    set host-name ignored\n";
        let config = parse(text).unwrap();
        assert_eq!(config.host_name.as_deref(), Some("edge1"));
    }

    #[test]
    fn full_and_bare_forms_are_accepted() {
        let config = parse("set system host-name a\nset domain-name b\ntime-zone UTC\n").unwrap();
        assert_eq!(config.host_name.as_deref(), Some("a"));
        assert_eq!(config.domain_name.as_deref(), Some("b"));
        assert_eq!(config.time_zone.as_deref(), Some("UTC"));
    }

    #[test]
    fn unrecognized_lines_are_skipped() {
        let report = parse_lenient(
            "set login user netops class super-user\n\
             set services netconf ssh\n\
             set host-name edge1\n",
        );
        assert!(report.is_clean());
        assert_eq!(report.skipped, 2);
        assert_eq!(report.config.host_name.as_deref(), Some("edge1"));
        assert!(report.config.services.is_none());
    }

    #[test]
    fn last_scalar_wins() {
        let config = parse("set host-name a\nset host-name b\n").unwrap();
        assert_eq!(config.host_name.as_deref(), Some("b"));
    }

    #[test]
    fn quoted_values_are_unquoted() {
        let config = parse("set tracing destination-override syslog host \"log \\\"host\\\"\"\n")
            .unwrap();
        assert_eq!(
            config.tracing_dest_override_syslog_host.as_deref(),
            Some("log \"host\"")
        );
    }

    #[test]
    fn bad_integer_is_reported_with_position() {
        let err = parse("set host-name edge1\nset services ssh port twenty-two\n").unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.field, FieldId::SshPort);
        assert_eq!(err.value, "twenty-two");
        assert_eq!(err.line, "set services ssh port twenty-two");
    }

    #[test]
    fn lenient_parse_keeps_unaffected_fields() {
        let report = parse_lenient(
            "set services ssh port x\n\
             set services ssh root-login deny\n\
             set max-configuration-rollbacks 99999999999\n\
             set host-name edge1\n",
        );
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[1].line_number, 3);
        assert_eq!(report.config.host_name.as_deref(), Some("edge1"));
        let ssh = report.config.services.unwrap().ssh.unwrap();
        assert_eq!(ssh.port, None);
        assert_eq!(ssh.root_login.as_deref(), Some("deny"));
    }

    #[test]
    fn unset_spellings_leave_fields_and_blocks_absent() {
        let report = parse_lenient(
            "set services ssh port 0\n\
             set syslog archive files 0\n\
             set domain-name \"\"\n\
             set max-configuration-rollbacks 0\n",
        );
        assert_eq!(report.skipped, 3);
        assert!(report.config.services.is_none());
        assert!(report.config.syslog.is_none());
        assert_eq!(report.config.domain_name, None);
        assert_eq!(report.config.max_configuration_rollbacks, Some(0));
    }

    #[test]
    fn nested_blocks_materialize_lazily() {
        let config = parse("set internet-options icmpv6-rate-limit packet-rate 0\n").unwrap();
        assert_eq!(
            config.internet_options,
            Some(InternetOptions {
                icmpv6_rate_limit: Some(IcmpRateLimit {
                    bucket_size: None,
                    packet_rate: Some(0),
                }),
                ..InternetOptions::default()
            })
        );
        assert!(!config.is_present(BlockId::Icmpv4RateLimit));
    }
}
