//! `parse`: display-set text to model.

use std::path::Path;

use junoset_core::{parse, parse_lenient};

use crate::cli::{GlobalOpts, ParseArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: &ParseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let input = args.input.as_deref().unwrap_or(Path::new("-"));
    let text = util::read_text(input)?;

    let config = if args.lenient {
        let report = parse_lenient(&text);
        for err in &report.errors {
            tracing::warn!(line = err.line_number, field = %err.field, value = %err.value, "undecodable value");
            if !global.quiet {
                eprintln!("warning: line {}: {}", err.line_number, err.line);
            }
        }
        tracing::debug!(skipped = report.skipped, errors = report.errors.len(), "lenient parse done");
        report.config
    } else {
        parse(&text)?
    };

    output::emit(&output::model(&global.output, &config), global.quiet);
    Ok(())
}
