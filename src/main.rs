// faas-extract - command-line front end
//
//   faas-extract scan 'app/**/*.py'
//   faas-extract extract app/service.py --out-dir build/functions
//   faas-extract extract app/service.py --entry read_item --json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faas_extract::utils::file_utils::{expand_patterns, read_file_content};
use faas_extract::{ExtractConfig, Extractor};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "faas-extract")]
#[command(about = "Extract marked Python functions into standalone per-function modules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List functions carrying the marker decorator
    Scan {
        /// Python files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,

        /// Marker decorator name
        #[arg(short, long)]
        marker: Option<String>,
    },

    /// Extract entry functions into standalone files
    Extract {
        /// Python module to extract from
        file: PathBuf,

        /// Entry function to extract (repeatable; default: every marked function)
        #[arg(short, long = "entry")]
        entries: Vec<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Marker decorator name (overrides the config file)
        #[arg(short, long)]
        marker: Option<String>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print emitted units as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("faas_extract=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, marker: Option<String>) -> Result<ExtractConfig> {
    let mut config = match path {
        Some(path) => ExtractConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(marker) = marker {
        config.marker_name = marker;
    }
    Ok(config)
}

fn run_scan(files: &[String], marker: Option<String>) -> Result<()> {
    let extractor = Extractor::new(load_config(None, marker)?)?;

    for path in expand_patterns(files)? {
        let source = read_file_content(&path)?;
        let names = extractor
            .scan_marked_symbols(&source)
            .with_context(|| format!("Failed to scan {}", path.display()))?;
        for name in names {
            println!("{}: {}", path.display(), name);
        }
    }
    Ok(())
}

fn run_extract(
    file: &Path,
    entries: &[String],
    out_dir: &Path,
    config: ExtractConfig,
    json: bool,
) -> Result<()> {
    let extractor = Extractor::new(config)?;
    let units = extractor
        .extract_file(file, entries, out_dir)
        .with_context(|| format!("Failed to extract from {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&units)?);
    } else {
        for unit in &units {
            if let Some(path) = &unit.output_path {
                println!("{} -> {}", unit.entry, path.display());
            }
        }
    }

    info!("{} units extracted from {}", units.len(), file.display());
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { files, marker } => run_scan(&files, marker),
        Command::Extract {
            file,
            entries,
            out_dir,
            marker,
            config,
            json,
        } => {
            let config = load_config(config.as_deref(), marker)?;
            run_extract(&file, &entries, &out_dir, config, json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faas.json");
        fs::write(&path, r#"{ "marker_name": "ServerlessEntry", "output_extension": "pyw" }"#).unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.marker_name, "ServerlessEntry");
        assert_eq!(config.output_extension, "pyw");
    }

    #[test]
    fn test_cli_marker_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faas.json");
        fs::write(&path, r#"{ "marker_name": "ServerlessEntry", "output_extension": "pyw" }"#).unwrap();

        let config = load_config(Some(&path), Some("Lambda".to_string())).unwrap();
        assert_eq!(config.marker_name, "Lambda");
        assert_eq!(config.output_extension, "pyw");
    }

    #[test]
    fn test_load_config_missing_file_names_it() {
        let err = load_config(Some(Path::new("/nonexistent/faas.json")), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/faas.json"));
    }

    #[test]
    fn test_run_extract_writes_named_entries() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("service.py");
        fs::write(&module, "import os\n\ndef ping():\n    return 'pong'\n\ndef other():\n    return os.sep\n").unwrap();
        let out_dir = dir.path().join("out");

        run_extract(&module, &["ping".to_string()], &out_dir, ExtractConfig::default(), false).unwrap();
        assert_eq!(
            fs::read_to_string(out_dir.join("ping.py")).unwrap(),
            "def ping():\n    return 'pong'\n"
        );
        assert!(!out_dir.join("other.py").exists());
    }

    #[test]
    fn test_cli_parses_extract_arguments() {
        let cli = Cli::try_parse_from([
            "faas-extract",
            "extract",
            "app/service.py",
            "--entry",
            "read_item",
            "--entry",
            "create_item",
            "--marker",
            "Lambda",
        ])
        .unwrap();
        match cli.command {
            Command::Extract {
                entries, marker, out_dir, ..
            } => {
                assert_eq!(entries, vec!["read_item", "create_item"]);
                assert_eq!(marker.as_deref(), Some("Lambda"));
                assert_eq!(out_dir, PathBuf::from("."));
            }
            other => panic!("expected extract command, got {:?}", other),
        }
    }
}
