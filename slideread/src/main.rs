//! slideread - Read PDF and PPTX files aloud via a remote TTS service

mod audio;
mod config;
mod document;
mod error;
mod library;
mod pipeline;
mod text;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ReaderConfig;
use indicatif::{ProgressBar, ProgressStyle};
use library::LibraryStore;
use pipeline::{Pipeline, PipelineSettings};
use speech_client::{OpenAiSpeech, SpeechModel, Voice};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "slideread")]
#[command(about = "Convert PDF and PPTX files to spoken audio", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document into an audio file in the library
    Convert {
        /// Path to the PDF or PPTX file
        file: PathBuf,

        /// Voice preset (alloy, echo, fable, onyx, nova, shimmer)
        #[arg(long)]
        voice: Option<String>,

        /// Model tier (tts-1, tts-1-hd)
        #[arg(long)]
        model: Option<String>,

        /// Maximum characters per synthesis request
        #[arg(long)]
        max_chunk: Option<usize>,

        /// Output file stem (default: the document's base name)
        #[arg(short, long)]
        output_name: Option<String>,
    },
    /// List audio files in the library
    List,
    /// Open an audio file with the system player
    Open {
        /// File name as shown by `list`
        name: String,
    },
    /// Delete an audio file from the library
    Delete {
        /// File name as shown by `list`
        name: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default voice preset
    SetVoice {
        /// Voice name (alloy, echo, fable, onyx, nova, shimmer)
        voice: String,
    },
    /// Set the default model tier
    SetModel {
        /// Model name (tts-1, tts-1-hd)
        model: String,
    },
    /// Set the library directory
    SetLibrary {
        /// Directory receiving produced audio files
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Convert {
            file,
            voice,
            model,
            max_chunk,
            output_name,
        } => convert(file, voice, model, max_chunk, output_name).await,
        Commands::List => list(),
        Commands::Open { name } => open(&name),
        Commands::Delete { name } => delete(&name),
        Commands::Config { action } => handle_config_command(&action),
    }
}

async fn convert(
    file: PathBuf,
    voice: Option<String>,
    model: Option<String>,
    max_chunk: Option<usize>,
    output_name: Option<String>,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("Document not found: {}", file.display());
    }

    let config = ReaderConfig::load().context("Failed to load configuration")?;

    let voice: Voice = voice.as_deref().unwrap_or(&config.voice).parse()?;
    let model: SpeechModel = model.as_deref().unwrap_or(&config.model).parse()?;
    let max_chunk_chars = max_chunk.unwrap_or(config.chunk_chars);

    // A missing credential is fatal before any extraction work starts
    let provider = OpenAiSpeech::from_env()?;

    let pipeline = Pipeline::new(
        Arc::new(provider),
        PipelineSettings {
            library_root: config.library_dir(),
            voice,
            model,
            max_chunk_chars,
        },
    );

    eprintln!("Converting: {}", file.display());

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let output = pipeline
        .convert_with_progress(&file, output_name.as_deref(), |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .await?;

    pb.finish_and_clear();

    let metadata = std::fs::metadata(&output)?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);

    match audio::probe_duration_ms(&output) {
        Ok(ms) => eprintln!(
            "Output: {} ({:.1} MB, {})",
            output.display(),
            size_mb,
            format_duration(ms)
        ),
        Err(_) => eprintln!("Output: {} ({:.1} MB)", output.display(), size_mb),
    }

    Ok(())
}

fn list() -> Result<()> {
    let config = ReaderConfig::load()?;
    let store = LibraryStore::new(config.library_dir())?;

    let mut names = store.list()?;
    if names.is_empty() {
        eprintln!("Library is empty: {}", store.root().display());
        return Ok(());
    }

    names.sort();
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn open(name: &str) -> Result<()> {
    let config = ReaderConfig::load()?;
    let store = LibraryStore::new(config.library_dir())?;
    store.open(name)?;
    Ok(())
}

fn delete(name: &str) -> Result<()> {
    let config = ReaderConfig::load()?;
    let store = LibraryStore::new(config.library_dir())?;
    store.delete(name)?;
    eprintln!("Deleted: {}", name);
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReaderConfig::load()?;
            println!("Configuration file: {:?}", ReaderConfig::config_path()?);
            println!();
            println!("library_dir = \"{}\"", config.library_dir().display());
            println!("voice = \"{}\"", config.voice);
            println!("model = \"{}\"", config.model);
            println!("chunk_chars = {}", config.chunk_chars);
        }
        ConfigAction::SetVoice { voice } => {
            let parsed: Voice = voice.parse()?;
            let mut config = ReaderConfig::load()?;
            config.voice = parsed.to_string();
            config.save()?;
            println!("Default voice set to: {}", parsed);
        }
        ConfigAction::SetModel { model } => {
            let parsed: SpeechModel = model.parse()?;
            let mut config = ReaderConfig::load()?;
            config.model = parsed.to_string();
            config.save()?;
            println!("Default model set to: {}", parsed);
        }
        ConfigAction::SetLibrary { path } => {
            let mut config = ReaderConfig::load()?;
            config.library_dir = Some(path.clone());
            config.save()?;
            println!("Library directory set to: {}", path.display());
        }
    }
    Ok(())
}

fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    if mins >= 60 {
        format!("{}:{:02}:{:02}", mins / 60, mins % 60, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}
