mod cli;
mod error;

use std::process::ExitCode;

use clap::Parser;

use cpacsgen_codegen::Options;
use cpacsgen_tables::Tables;
use cpacsgen_typesystem::TypeSystem;
use error::CliError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "generation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<(), CliError> {
    tracing::info!(path = %cli.tables.display(), "loading tables");
    let tables = Tables::load(&cli.tables)?;

    tracing::info!(path = %cli.schema.display(), "reading schema");
    let xml = std::fs::read_to_string(&cli.schema).map_err(|source| CliError::ReadSchema {
        path: cli.schema.clone(),
        source,
    })?;

    tracing::info!("parsing schema");
    let registry = cpacsgen_schema::parse(&xml)?;

    tracing::info!("building type system");
    let mut types = TypeSystem::build(&registry, &tables)?;
    types.collapse_enums();
    types.run_prune_list(&tables);

    let options = Options {
        generate_default_ctors_for_parent_pointer_types: cli.generate_default_ctors_for_parent_pointer_types,
        generate_case_sensitive_string_to_enum: cli.generate_case_sensitive_string_to_enum,
        generate_try_catch_around_optional_class_reads: !cli.no_try_catch_around_optional_class_reads,
    };

    tracing::info!("generating code");
    let files = cpacsgen_codegen::generate(&types, &tables, &options)?;

    std::fs::create_dir_all(&cli.output).map_err(|source| CliError::CreateOutputDir {
        path: cli.output.clone(),
        source,
    })?;

    for file in &files {
        let path = cli.output.join(&file.relative_path);
        std::fs::write(&path, &file.contents).map_err(|source| CliError::WriteGeneratedFile { path: path.clone(), source })?;
    }

    tracing::info!(file_count = files.len(), output = %cli.output.display(), "done");
    Ok(())
}
