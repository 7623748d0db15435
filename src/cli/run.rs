use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use pepvar::emit::{emit_to_path, OutputFormat};
use pepvar::loader::LoadOptions;
use pepvar::pipeline::{load_inputs, InputPaths, Pipeline, PipelineConfig};
use pepvar::report::RunReport;

use super::config::Config;
use super::RunArgs;

/// Run the full pipeline and write the joined table
pub fn run(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let Config {
        input,
        columns,
        translation,
        output,
    } = config;

    let mut paths = match args.input_dir.as_ref().or(input.dir.as_ref()) {
        Some(dir) => InputPaths::in_dir(dir),
        None => InputPaths::default(),
    };
    if let Some(path) = args.conversion {
        paths.conversion = path;
    }
    if let Some(path) = args.dbpepvar {
        paths.dbpepvar = path;
    }
    if let Some(path) = args.refseq {
        paths.refseq = path;
    }
    if let Some(path) = args.missense {
        paths.missense = path;
    }

    let mut options = LoadOptions::default();
    if let Some(delimiter) = args.delimiter.or(input.delimiter_byte()?) {
        options = options.with_delimiter(delimiter);
    }
    if let Some(null_values) = input.null_values {
        options = options.with_null_values(null_values);
    }

    let duplicates = args
        .duplicates
        .map(Into::into)
        .or(input.duplicates)
        .unwrap_or_default();
    let on_unknown = args
        .on_unknown
        .map(Into::into)
        .or(translation.on_unknown)
        .unwrap_or_default();

    let output_path = args
        .output
        .or(output.path)
        .unwrap_or_else(|| PathBuf::from("output.csv"));
    let format = args
        .format
        .map(OutputFormat::from)
        .or(output.format)
        .or_else(|| OutputFormat::from_path(&output_path))
        .unwrap_or_default();

    info!("pepvar - evidence/missense reconciliation");
    info!("=========================================");
    info!("Conversion: {}", paths.conversion.display());
    info!("dbPepVar:   {}", paths.dbpepvar.display());
    info!("RefSeq:     {}", paths.refseq.display());
    info!("Missense:   {}", paths.missense.display());
    info!("Output:     {} ({:?})", output_path.display(), format);

    let loaded = load_inputs(&paths, &options, duplicates).context("Failed to load inputs")?;

    let mut report = RunReport::new();
    for summary in loaded.summaries {
        report.add_input(summary);
    }

    let pipeline = Pipeline::new(PipelineConfig {
        columns,
        on_unknown,
    });
    let map = pipeline
        .identifier_map(&loaded.conversion)
        .context("Failed to build NP to GI map")?;
    let result = pipeline
        .run(&map, loaded.inputs)
        .context("Pipeline failed")?;

    emit_to_path(&result.table, &output_path, format)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    report.pipeline = Some(result.summary);
    report.output = Some(output_path.display().to_string());

    println!("{}", report.format_colored());

    if let Some(path) = args.report {
        let json = report.to_json().context("Failed to serialize run report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        info!("Run report written to {}", path.display());
    }

    Ok(())
}
