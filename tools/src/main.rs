use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::Scheme;
use glob::Pattern;
use strux_tools::{
    decode_json, decode_report, encode_json, format_decode_pretty, format_inspect,
    inspect_standard, schema_dump,
};
use tracing_subscriber::EnvFilter;
use wire::Limits;

#[derive(Parser)]
#[command(
    name = "strux-tools",
    version,
    about = "strux record inspection and encoding tools"
)]
struct Cli {
    /// Maximum accepted string length when decoding.
    #[arg(long, global = true)]
    max_string_bytes: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the record's field registry as JSON.
    Schema,
    /// Encode a JSON record into bytes.
    Encode {
        /// Path to the JSON record, or `-` for stdin.
        input: PathBuf,
        /// Where to write the bytes; prints hex when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = Scheme::Standard)]
        scheme: Scheme,
    },
    /// Decode record bytes.
    Decode {
        /// Path to the record bytes.
        record_file: PathBuf,
        #[arg(long, default_value_t = Scheme::Standard)]
        scheme: Scheme,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Walk the field headers of standard-encoded records.
    Inspect {
        /// Path to record bytes, or a directory of them.
        record_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut limits = Limits::default();
    if let Some(max) = cli.max_string_bytes {
        limits.max_string_bytes = max;
    }

    match cli.command {
        Command::Schema => {
            let json = serde_json::to_string_pretty(&schema_dump()).context("serialize schema")?;
            println!("{json}");
        }
        Command::Encode {
            input,
            output,
            scheme,
        } => {
            let json = read_input(&input)?;
            let bytes = encode_json(&json, scheme)?;
            match output {
                Some(path) => {
                    fs::write(&path, &bytes)
                        .with_context(|| format!("write record {}", path.display()))?;
                    tracing::info!(path = %path.display(), len = bytes.len(), %scheme, "wrote record");
                }
                None => println!("{}", hex::encode(&bytes)),
            }
        }
        Command::Decode {
            record_file,
            scheme,
            format,
        } => {
            let bytes = fs::read(&record_file)
                .with_context(|| format!("read record {}", record_file.display()))?;
            match format {
                DecodeFormat::Json => {
                    let value = decode_json(&bytes, scheme, &limits)?;
                    let json = serde_json::to_string_pretty(&value).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let report = decode_report(&bytes, scheme, &limits)?;
                    print!("{}", format_decode_pretty(&report));
                }
            }
        }
        Command::Inspect { record_path, glob } => {
            if record_path.is_dir() {
                for entry in collect_record_entries(&record_path, glob.as_deref())? {
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    inspect_file(&entry.path, &limits)?;
                }
            } else {
                inspect_file(&record_path, &limits)?;
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("read stdin")?;
        return Ok(json);
    }
    fs::read_to_string(path).with_context(|| format!("read record json {}", path.display()))
}

fn inspect_file(path: &Path, limits: &Limits) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read record {}", path.display()))?;
    let report = inspect_standard(&bytes, limits)
        .with_context(|| format!("inspect {}", path.display()))?;
    print!("{}", format_inspect(&report));
    Ok(())
}

struct RecordEntry {
    path: PathBuf,
    size: u64,
}

fn collect_record_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<RecordEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !pattern.matches_path(&path) && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(RecordEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}
