//! Preset command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

#[derive(Debug, Serialize)]
pub struct PresetReport {
    pub name: String,
    pub manifest: PathBuf,
    pub change: PresetChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetChange {
    Created,
    Replaced,
    Removed,
}

impl Report for PresetReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!("Presets ({})", self.manifest.display()));
        match self.change {
            PresetChange::Created => out.added_item(&self.name),
            PresetChange::Replaced => out.list_item(&format!("{} (replaced)", self.name)),
            PresetChange::Removed => out.removed_item(&self.name),
        }
    }
}
