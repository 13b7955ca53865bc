//! The `schema` subcommand.

use clap::{Args, ValueEnum};
use schemars::schema_for;

use crate::{
    events::TextractNotification, handlers::get_text::GetTextOutput, io::write_json,
    pages::PageRecord, prelude::*,
};

/// The different schema types we support.
///
/// We parse these as PascalCase, because they represent type names.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[clap(rename_all = "PascalCase")]
pub enum SchemaType {
    /// The Textract job-completion message inside the SNS event.
    TextractNotification,
    /// One row of the Parquet output.
    PageRecord,
    /// The result returned by `get-text`.
    GetTextOutput,
}

/// Schema command line arguments.
#[derive(Debug, Args)]
pub struct SchemaOpts {
    /// The schema type to generate.
    #[clap(value_enum, value_name = "TYPE")]
    pub schema_type: SchemaType,

    /// The output path to write the schema to.
    #[clap(short = 'o', long = "out")]
    pub output_path: Option<PathBuf>,
}

/// The `schema` subcommand.
#[instrument(level = "debug", skip_all)]
pub async fn cmd_schema(schema_opts: &SchemaOpts) -> Result<()> {
    let schema = match schema_opts.schema_type {
        SchemaType::TextractNotification => schema_for!(TextractNotification),
        SchemaType::PageRecord => schema_for!(PageRecord),
        SchemaType::GetTextOutput => schema_for!(GetTextOutput),
    };
    write_json(schema_opts.output_path.as_deref(), &schema)
        .await
        .context("failed to write schema")
}
