// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// riffy - inspect, export and edit chunks of RIFF/WAV files
#[derive(Parser, Debug)]
#[command(name = "riffy")]
#[command(about = "Inspect, export and edit chunks of RIFF/WAV files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (only errors are logged or printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for parse results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Aligned key/value table
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse WAV file(s) and show format, duration and chunk sizes
    Info {
        /// WAV file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// List the chunks of a WAV file with sizes and offsets
    Chunks {
        /// WAV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include chunk bodies, base64-encoded
        #[arg(long)]
        data: bool,
    },

    /// Export one chunk's body to a binary file
    Export {
        /// WAV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chunk id, e.g. "fmt " or "LIST"
        #[arg(value_name = "CHUNK_ID")]
        chunk_id: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export the raw audio payload (the data chunk)
    ExportAudio {
        /// WAV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Parse every file matching a pattern and summarize
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g. "*.wav")
        #[arg(short, long, default_value = "*.wav")]
        pattern: String,
    },

    /// Replace or add a chunk from a binary file and write a new WAV
    SetChunk {
        /// WAV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chunk id to replace or add
        #[arg(value_name = "CHUNK_ID")]
        chunk_id: String,

        /// Binary file holding the new chunk body
        #[arg(long = "from", value_name = "BIN")]
        from: PathBuf,

        /// Destination WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Replace the destination if it exists
        #[arg(long)]
        overwrite: bool,
    },
}

impl Config {
    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_export_command() {
        let config =
            Config::try_parse_from(["riffy", "export", "a.wav", "LIST", "-o", "list.bin"]).unwrap();
        assert_eq!(config.log_filter(), "warn");
        match &config.command {
            Commands::Export { chunk_id, output, .. } => {
                assert_eq!(chunk_id, "LIST");
                assert_eq!(output.as_path(), Path::new("list.bin"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let config =
            Config::try_parse_from(["riffy", "info", "a.wav", "--format", "table", "-v"]).unwrap();
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Config::try_parse_from(["riffy", "-q", "-v", "info", "a.wav"]).is_err());
    }
}
