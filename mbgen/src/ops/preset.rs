//! Preset operations - save and remove named option sets in mbgen.toml.

use eyre::{Context, Result};
use mbgen_manifest::{GenerationOptions, MbgenToml};

use crate::reports::{PresetChange, PresetReport};

/// Save a preset built from `from` (or `[generator]`) with `edit` applied.
///
/// A preset with the same name is replaced. The manifest is written back
/// before returning.
pub fn save(
    mbgen_toml: &mut MbgenToml,
    name: &str,
    from: Option<&str>,
    edit: impl FnOnce(&mut GenerationOptions),
) -> Result<PresetReport> {
    let mut options = mbgen_toml.manifest().options(from)?.clone();
    edit(&mut options);

    let previous = mbgen_toml.manifest_mut().insert_preset(name, options)?;
    mbgen_toml
        .save()
        .wrap_err_with(|| format!("Failed to save preset '{name}'"))?;
    tracing::info!(preset = name, replaced = previous.is_some(), "preset saved");

    Ok(PresetReport {
        name: name.to_string(),
        manifest: mbgen_toml.path().to_path_buf(),
        change: if previous.is_some() {
            PresetChange::Replaced
        } else {
            PresetChange::Created
        },
    })
}

pub fn remove(mbgen_toml: &mut MbgenToml, name: &str) -> Result<PresetReport> {
    mbgen_toml.manifest_mut().remove_preset(name)?;
    mbgen_toml
        .save()
        .wrap_err_with(|| format!("Failed to remove preset '{name}'"))?;
    tracing::info!(preset = name, "preset removed");

    Ok(PresetReport {
        name: name.to_string(),
        manifest: mbgen_toml.path().to_path_buf(),
        change: PresetChange::Removed,
    })
}
