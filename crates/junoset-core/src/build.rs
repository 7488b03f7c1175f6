// ── Statement builder ──
//
// Model → ordered `set` statements. Validation covers the whole model
// before the first statement is produced, so a rejected model yields
// nothing at all.

use tracing::debug;

use crate::error::ValidationError;
use crate::model::{FieldValue, SystemConfig};
use crate::schema::{self, BlockId, Sentinel, Shape};
use crate::statement::{Statement, StatementSet, quote};

/// Check every block, value, and mutual-exclusion pair.
pub fn validate(config: &SystemConfig) -> Result<(), ValidationError> {
    for block in schema::blocks() {
        if block.id != BlockId::Root && config.is_present(block.id) && is_empty_block(config, block.id)
        {
            return Err(ValidationError::EmptyBlock { block: block.id });
        }
    }

    for field in schema::fields() {
        match config.value(field.id) {
            None if field.required && config.is_present(field.block) => {
                return Err(ValidationError::EmptyValue { field: field.id });
            }
            Some(FieldValue::Int(0)) if field.sentinel == Sentinel::Zero => {
                return Err(ValidationError::UnsetSentinel { field: field.id });
            }
            Some(FieldValue::Text(value)) => check_text(field.id, value)?,
            Some(FieldValue::List(values)) => {
                for value in values {
                    check_text(field.id, value)?;
                }
            }
            _ => {}
        }
    }

    for (first, second) in schema::conflict_pairs() {
        if config.value(first).is_some() && config.value(second).is_some() {
            return Err(ValidationError::Conflict { first, second });
        }
    }

    Ok(())
}

/// A present block must say something: an active field, a marker, or
/// a present child block.
fn is_empty_block(config: &SystemConfig, block: BlockId) -> bool {
    let has_field = schema::fields_in(block)
        .any(|f| f.shape == Shape::Marker || config.value(f.id).is_some());
    let has_child = schema::children_of(block).any(|child| config.is_present(child.id));
    !(has_field || has_child)
}

fn check_text(field: schema::FieldId, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::MultilineValue { field });
    }
    Ok(())
}

/// Validate, then emit one statement per active field (one per element
/// for lists) in catalog order.
pub fn build(config: &SystemConfig) -> Result<StatementSet, ValidationError> {
    validate(config)?;

    let mut set = StatementSet::default();
    for field in schema::fields() {
        let statement = |value: Option<String>| Statement {
            field: field.id,
            path: field.path,
            value,
        };

        if field.shape == Shape::Marker {
            if config.is_present(field.block) {
                set.push(statement(None));
            }
            continue;
        }

        match config.value(field.id) {
            None => {}
            Some(FieldValue::Flag) => set.push(statement(None)),
            Some(FieldValue::Text(value)) => set.push(statement(Some(quote(value)))),
            Some(FieldValue::Int(value)) => set.push(statement(Some(value.to_string()))),
            Some(FieldValue::List(values)) => {
                for value in values {
                    set.push(statement(Some(quote(value))));
                }
            }
        }
    }

    debug!(statements = set.len(), "built statement set");
    Ok(set)
}
