use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use eyre::Result;
use mbgen_manifest::{GenerationOptions, MbgenToml};

use super::UnwrapOrExit;
use crate::{ops, reports::emit};

#[derive(Args)]
pub struct PresetCommand {
    #[command(subcommand)]
    pub action: PresetAction,

    /// Path to mbgen.toml (defaults to ./mbgen.toml)
    #[arg(short, long, global = true, default_value = "mbgen.toml")]
    pub config: PathBuf,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum PresetAction {
    /// Save options under a name, replacing any preset with that name
    Save {
        /// Preset name
        name: String,

        /// Start from this preset instead of [generator]
        #[arg(long)]
        from: Option<String>,

        /// Turn an option on
        #[arg(long, value_enum)]
        enable: Vec<OptionFlag>,

        /// Turn an option off
        #[arg(long, value_enum)]
        disable: Vec<OptionFlag>,

        /// Root folder for generated artifacts
        #[arg(long)]
        output_root: Option<PathBuf>,
    },

    /// Remove a saved preset
    Remove {
        /// Preset name
        name: String,
    },
}

/// Boolean generation options that can be toggled from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionFlag {
    TemporalTypes,
    ActualColumnNames,
    RichObjectMethods,
    PropertyAnnotations,
    PropertyAnnotationUpperCase,
    BatchInsert,
    BatchUpdate,
    PagedQuery,
    OverwriteMappingDocument,
    Lombok,
    Constructors,
    Comments,
}

impl OptionFlag {
    fn set(self, options: &mut GenerationOptions, on: bool) {
        let field = match self {
            OptionFlag::TemporalTypes => &mut options.use_temporal_types,
            OptionFlag::ActualColumnNames => &mut options.use_actual_column_names,
            OptionFlag::RichObjectMethods => &mut options.use_rich_object_methods,
            OptionFlag::PropertyAnnotations => &mut options.use_property_annotations,
            OptionFlag::PropertyAnnotationUpperCase => {
                &mut options.property_annotation_upper_case
            }
            OptionFlag::BatchInsert => &mut options.generate_batch_insert,
            OptionFlag::BatchUpdate => &mut options.generate_batch_update,
            OptionFlag::PagedQuery => &mut options.generate_paged_query,
            OptionFlag::OverwriteMappingDocument => &mut options.overwrite_mapping_document,
            OptionFlag::Lombok => &mut options.use_lombok,
            OptionFlag::Constructors => &mut options.use_constructors,
            OptionFlag::Comments => &mut options.comments,
        };
        *field = on;
    }
}

impl PresetCommand {
    pub fn run(&self) -> Result<()> {
        let mut mbgen_toml = MbgenToml::open_or_default(&self.config).unwrap_or_exit();

        let report = match &self.action {
            PresetAction::Save {
                name,
                from,
                enable,
                disable,
                output_root,
            } => ops::preset::save(&mut mbgen_toml, name, from.as_deref(), |options| {
                for flag in enable {
                    flag.set(options, true);
                }
                for flag in disable {
                    flag.set(options, false);
                }
                if let Some(root) = output_root {
                    options.output_root = root.clone();
                }
            })?,
            PresetAction::Remove { name } => ops::preset::remove(&mut mbgen_toml, name)?,
        };

        emit(&report, self.json)
    }
}
