use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use voiceware::dispatch;
use voiceware::{
    write_wav, DispatchOutcome, MappingTable, RomWalker, TrackMetadata, VoicewareError,
};

mod mapfile;

/// Decode Nortel Millennium VoiceWare ROM audio into WAV/raw PCM files.
#[derive(Parser)]
#[command(name = "voiceware", about = "Decode Nortel Millennium VoiceWare ROM audio", long_about = None)]
struct Cli {
    /// Path to the ROM image to read.
    rom_path: PathBuf,

    /// Optional map file assigning filenames/comments to messages.
    #[arg(short = 'm', long = "map")]
    map: Option<PathBuf>,

    /// Decode only the message with this absolute index.
    #[arg(short = 'i', long = "index")]
    index: Option<u32>,

    /// List messages instead of decoding them.
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Suppress status output.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Print per-nibble/per-opcode diagnostics.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    fn status(self) -> bool {
        self != Verbosity::Quiet
    }

    fn verbose(self) -> bool {
        self == Verbosity::Verbose
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    if cli.list && cli.index.is_some() {
        if verbosity.status() {
            println!("INFO: Option -i ignored when -l or --list is specified.");
        }
        cli.index = None;
    }

    let rom_bytes = fs::read(&cli.rom_path)
        .with_context(|| format!("reading ROM file {:?}", cli.rom_path))?;
    if verbosity.verbose() {
        eprintln!("Loaded ROM ({} bytes)", rom_bytes.len());
    }

    let mapping_table = match &cli.map {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading map file {:?}", path))?;
            mapfile::parse_mapping_table(&path.display().to_string(), &text)?
        }
        None => MappingTable::new(),
    };
    if verbosity.verbose() && cli.map.is_some() {
        eprintln!("Loaded {} mapping(s)", mapping_table.len());
    }

    let rom_basename = cli
        .rom_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if cli.list && verbosity.status() {
        println!("# ROM: {}\n", rom_basename);
    }

    let mut fatal_error = false;
    let mut target_found = false;

    for record_result in RomWalker::new(&rom_bytes) {
        let record = match record_result {
            Ok(record) => record,
            Err(err) => {
                eprintln!("ERROR: {err}");
                fatal_error = true;
                break;
            }
        };

        let mapping = mapping_table.get(record.segment_index, record.msg_index_in_segment);
        let name = mapping.map(|m| m.name.clone()).unwrap_or_else(|| {
            dispatch::default_name(record.segment_index, record.msg_index_in_segment)
        });
        let comment = mapping.and_then(|m| m.comment.clone());

        if cli.list {
            if verbosity.status() {
                let mode_byte = rom_bytes.get(record.start).copied();
                println!(
                    "{}",
                    voiceware::listing::render_row(
                        record.segment_index,
                        record.msg_index_in_segment,
                        &name,
                        mode_byte,
                        comment.as_deref(),
                    )
                );
            }
            continue;
        }

        if let Some(target) = cli.index {
            if record.absolute_index as u32 != target {
                continue;
            }
        }

        if verbosity.status() {
            println!(
                "Processing message {} (segment {}, index {})",
                record.absolute_index, record.segment_index, record.msg_index_in_segment
            );
        }

        match dispatch::dispatch_message(&rom_bytes, &record) {
            Ok(DispatchOutcome::OutOfBounds) => {
                eprintln!(
                    "WARN: message {} start offset is past the end of the ROM",
                    record.absolute_index
                );
            }
            Ok(DispatchOutcome::Adpcm(samples)) => {
                let out_path = format!("{}.wav", name);
                let metadata = TrackMetadata {
                    artist: &rom_basename,
                    title: &name,
                    track_number: record.absolute_index as u32,
                    comment: comment.as_deref(),
                };
                let result = File::create(&out_path)
                    .map_err(VoicewareError::from)
                    .and_then(|mut file| write_wav(&mut file, &samples, &metadata));
                match result {
                    Ok(()) => {
                        if verbosity.status() {
                            println!("Wrote {} ({} samples)", out_path, samples.len());
                        }
                    }
                    Err(err) => {
                        eprintln!("ERROR: failed to write {out_path}: {err}");
                        fatal_error = true;
                    }
                }
            }
            Ok(DispatchOutcome::AdpcmEmpty) => {
                if verbosity.status() {
                    println!(
                        "Message {} decoded to 0 samples; no WAV written",
                        record.absolute_index
                    );
                }
            }
            Ok(DispatchOutcome::Pcm(bytes)) => {
                let out_path = format!("{}.pcm", name);
                match fs::write(&out_path, &bytes) {
                    Ok(()) => {
                        if verbosity.status() {
                            println!("Saved raw PCM: {} ({} bytes)", out_path, bytes.len());
                        }
                    }
                    Err(err) => {
                        eprintln!("ERROR: failed to write {out_path}: {err}");
                        fatal_error = true;
                    }
                }
            }
            Ok(DispatchOutcome::PcmEmptyRange) => {
                eprintln!(
                    "WARN: message {} has an empty raw PCM byte range; skipping",
                    record.absolute_index
                );
            }
            Ok(DispatchOutcome::UnknownMode(mode)) => {
                eprintln!(
                    "WARN: unknown message mode {mode:#04x} for message {}",
                    record.absolute_index
                );
            }
            Err(err) => {
                eprintln!(
                    "WARN: message {} failed to decode: {err}",
                    record.absolute_index
                );
            }
        }

        if let Some(target) = cli.index {
            if record.absolute_index as u32 == target {
                target_found = true;
                break;
            }
        }
    }

    if let Some(target) = cli.index {
        if !target_found && !fatal_error {
            eprintln!("ERROR: target message index {target} was not found in the ROM");
            std::process::exit(1);
        }
    }

    if fatal_error {
        std::process::exit(1);
    }

    Ok(())
}
