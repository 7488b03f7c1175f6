//! Catalog listings: `fields` and `paths`.

use serde::Serialize;
use tabled::Tabled;

use junoset_core::schema::{self, FieldDescriptor, Sentinel};

use crate::cli::GlobalOpts;
use crate::output;

#[derive(Debug, Clone, Serialize, Tabled)]
struct FieldInfo {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Statement")]
    path: &'static str,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Unset")]
    unset: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Conflicts With")]
    conflicts_with: String,
}

impl From<&FieldDescriptor> for FieldInfo {
    fn from(f: &FieldDescriptor) -> Self {
        Self {
            field: f.id.into(),
            path: f.path,
            shape: f.shape.to_string(),
            unset: match f.sentinel {
                Sentinel::None => String::new(),
                other => other.to_string(),
            },
            required: f.required,
            conflicts_with: f
                .conflicts_with
                .map(|other| other.to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn fields(global: &GlobalOpts) {
    let infos: Vec<FieldInfo> = schema::fields().iter().map(FieldInfo::from).collect();
    let out = output::rows(&global.output, &infos, Clone::clone, |f| f.path.to_owned());
    output::emit(&out, global.quiet);
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct PathInfo {
    #[tabled(rename = "Managed Path")]
    path: &'static str,
    #[tabled(rename = "Delete Command")]
    command: String,
}

pub fn paths(global: &GlobalOpts) {
    let infos: Vec<PathInfo> = schema::all_managed_paths()
        .into_iter()
        .zip(schema::delete_commands())
        .map(|(path, command)| PathInfo { path, command })
        .collect();
    let out = output::rows(&global.output, &infos, Clone::clone, |p| p.path.to_owned());
    output::emit(&out, global.quiet);
}
