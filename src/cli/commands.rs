// CLI command implementations
use super::{CliError, Commands, Config, OutputFormatter};
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use riffy::WavParser;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Dispatch the parsed command line
pub fn run(config: &Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match &config.command {
        Commands::Info { files } => command_info(files, &formatter),
        Commands::Chunks { file, data } => command_chunks(file, *data, &formatter),
        Commands::Export {
            file,
            chunk_id,
            output,
        } => command_export(file, chunk_id, output, &formatter),
        Commands::ExportAudio { file, output } => command_export_audio(file, output, &formatter),
        Commands::Batch { directory, pattern } => command_batch(directory, pattern, &formatter),
        Commands::SetChunk {
            file,
            chunk_id,
            from,
            output,
            overwrite,
        } => command_set_chunk(file, chunk_id, from, output, *overwrite, &formatter),
    }
}

fn open_parsed(file: &Path) -> Result<WavParser> {
    let mut parser = WavParser::new(file);
    parser
        .parse()
        .with_context(|| format!("failed to parse {}", file.display()))?;
    Ok(parser)
}

/// Show parse results for each file
fn command_info(files: &[PathBuf], formatter: &OutputFormatter) -> Result<()> {
    if files.is_empty() {
        return Err(CliError::NoFiles.into());
    }

    let mut stdout = io::stdout().lock();
    for file in files {
        let parser = open_parsed(file)?;
        let mut value = serde_json::to_value(parser.info()?)?;
        if formatter.is_table() {
            if let Some(modified) = modified_time(file) {
                value["modified"] = Value::String(modified);
            }
        }
        formatter.output(&value, &mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

/// File modification time as UTC text
fn modified_time(file: &Path) -> Option<String> {
    let modified = std::fs::metadata(file).ok()?.modified().ok()?;
    let datetime: chrono::DateTime<chrono::Utc> = modified.into();
    Some(datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// List chunks, optionally with their bodies
fn command_chunks(file: &Path, with_data: bool, formatter: &OutputFormatter) -> Result<()> {
    let parser = open_parsed(file)?;
    let chunks: Vec<Value> = parser
        .chunks()?
        .iter()
        .map(|chunk| {
            let mut entry = json!({
                "id": chunk.id(),
                "size": chunk.size(),
                "offset": chunk.offset(),
            });
            if with_data {
                entry["data"] = Value::String(STANDARD.encode(chunk.data()));
            }
            entry
        })
        .collect();

    let mut stdout = io::stdout().lock();
    let value = json!({ "file_path": file.display().to_string(), "chunks": chunks });
    formatter.output(&value, &mut stdout)?;
    Ok(())
}

/// Export one chunk body
fn command_export(
    file: &Path,
    chunk_id: &str,
    output: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    let parser = open_parsed(file)?;
    let written = parser.export_chunk_to_file(chunk_id, output)?;
    formatter.print_success(&format!(
        "exported chunk '{}' ({} bytes) to {}",
        chunk_id,
        written,
        output.display()
    ));
    Ok(())
}

/// Export the audio payload
fn command_export_audio(file: &Path, output: &Path, formatter: &OutputFormatter) -> Result<()> {
    let parser = open_parsed(file)?;
    let written = parser.export_audio_data_to_file(output)?;
    formatter.print_success(&format!("exported {} audio bytes to {}", written, output.display()));
    Ok(())
}

/// Parse every matching file and print a one-line summary for each
fn command_batch(directory: &Path, pattern: &str, formatter: &OutputFormatter) -> Result<()> {
    let glob_pattern = directory.join(pattern);
    let glob_pattern = glob_pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern).map_err(|e| CliError::InvalidPattern(e.to_string()))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("error reading path: {}", e)),
        }
    }

    if files.is_empty() {
        formatter.print_info("no files found matching pattern");
        return Ok(());
    }

    let mut failed = 0;
    for path in &files {
        let mut parser = WavParser::new(path);
        match parser.parse() {
            Ok(info) => formatter.print_success(&format!(
                "{}: {} Hz, {} ch, {}-bit, {:.2}s, {} chunks",
                path.display(),
                info.format.sample_rate(),
                info.format.channels(),
                info.format.bits_per_sample(),
                info.duration_seconds,
                info.chunks.len()
            )),
            Err(e) => {
                failed += 1;
                formatter.print_error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    formatter.print_info(&format!(
        "completed: {} successful, {} errors",
        files.len() - failed,
        failed
    ));
    if failed > 0 {
        return Err(CliError::BatchFailures {
            failed,
            total: files.len(),
        }
        .into());
    }
    Ok(())
}

/// Replace or add a chunk and write the result
fn command_set_chunk(
    file: &Path,
    chunk_id: &str,
    from: &Path,
    output: &Path,
    overwrite: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let body = std::fs::read(from).with_context(|| format!("failed to read {}", from.display()))?;
    let mut parser = open_parsed(file)?;
    parser.set_chunk(chunk_id, body)?;
    let written = parser.write_wav(output, overwrite)?;
    formatter.print_success(&format!("wrote {} bytes to {}", written, output.display()));
    Ok(())
}
