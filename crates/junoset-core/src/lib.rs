// junoset-core: Bidirectional mapping between the Junos `system` subtree and a typed model.

pub mod build;
pub mod error;
pub mod model;
pub mod parse;
pub mod replace;
pub mod resource;
pub mod schema;
pub mod statement;

// ── Primary re-exports ──────────────────────────────────────────────
pub use build::{build, validate};
pub use error::{CoreError, ErrorKind, ParseError, ValidationError};
pub use model::SystemConfig;
pub use parse::{ParseReport, parse, parse_lenient};
pub use replace::{ReplaceCoordinator, ReplaceState, Strategy, plan};
pub use resource::{Cycle, RESOURCE_ID, SubtreeLock, SystemResource};
pub use schema::{BlockId, FieldId};
pub use statement::{Statement, StatementSet};
