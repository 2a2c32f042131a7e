use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use wordclip::config::{self, Profile};
use wordclip::extract::ClipExtractor;
use wordclip::{alignment, mismatch, output};

#[derive(Parser)]
#[command(name = "wordclip")]
#[command(about = "Split audio into per-word clips from transcript alignments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split an audio file into one clip per word
    Split {
        /// Input audio file
        input: PathBuf,

        /// Character-level TTS alignment JSON
        #[arg(long, conflicts_with = "timings")]
        alignment: Option<PathBuf>,

        /// Recognizer word-timing JSON (words already delimited)
        #[arg(long)]
        timings: Option<PathBuf>,

        /// Output directory for clips
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration profile or file path
        #[arg(short, long)]
        profile: Option<String>,

        /// Padding around recognizer word windows, in seconds
        #[arg(long)]
        padding: Option<f64>,
    },

    /// Print word segments computed from an alignment, without extracting
    Segments {
        /// Character-level TTS alignment JSON
        alignment: PathBuf,

        /// Write segments to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Filter a mismatch report down to entries whose word counts really differ
    FilterMismatches {
        /// Mismatch report JSON
        input: PathBuf,

        /// Output path (default: real_text_mismatches.json next to the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn resolve_profile_path(profile: &str) -> anyhow::Result<PathBuf> {
    if profile.starts_with("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(&profile[2..]));
    }

    let path = PathBuf::from(profile);
    if path.is_absolute() || profile.starts_with("./") || profile.starts_with("../") {
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home
        .join(".wordclip/profiles")
        .join(format!("{}.yaml", profile)))
}

fn clip_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            alignment: alignment_path,
            timings,
            out,
            profile,
            padding,
        } => {
            let profile = match profile {
                Some(p) => {
                    let conf_path = resolve_profile_path(&p)?;
                    config::load_profile(&conf_path).context("Failed to load profile")?
                }
                None => Profile::default(),
            };

            let input_path = input.canonicalize().context("Failed to find input file")?;
            let output_dir = out.unwrap_or_else(|| profile.output_dir());
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

            let extractor = ClipExtractor::new(&output_dir, profile.clip_format());

            let entries = match (alignment_path, timings) {
                (Some(alignment_path), None) => {
                    // 1. Segment the character alignment into word windows
                    let tts = alignment::load_tts_alignment(&alignment_path)?;
                    let segments = tts.segments().context("Failed to segment alignment")?;
                    println!("Found {} words", segments.len());

                    // 2. Trim one clip per word
                    println!("Extracting clips...");
                    let pb = clip_progress_bar(segments.len() as u64);
                    let entries = extractor
                        .extract_segments(&input_path, &segments, &pb)
                        .await
                        .context("Clip extraction failed")?;
                    pb.finish_with_message("Extraction complete");
                    entries
                }
                (None, Some(timings_path)) => {
                    // Recognizer words are already delimited; no segmentation
                    let words = alignment::load_recognized_words(&timings_path)?;
                    println!("Found {} words", words.len());

                    let padding = padding.unwrap_or_else(|| profile.padding());
                    println!("Extracting clips...");
                    let pb = clip_progress_bar(words.len() as u64);
                    let entries = extractor
                        .extract_words(&input_path, &words, padding, &pb)
                        .await
                        .context("Clip extraction failed")?;
                    pb.finish_with_message("Extraction complete");
                    entries
                }
                _ => anyhow::bail!("Either --alignment or --timings is required"),
            };

            if profile.keep_original() {
                let ext = input_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("mp3");
                let copy_path = output_dir.join(format!("original_audio.{}", ext));
                std::fs::copy(&input_path, &copy_path)
                    .context("Failed to copy original audio")?;
                println!("Copied original audio to {:?}", copy_path);
            }

            let manifest_path = output_dir.join("manifest.json");
            output::save_manifest_json(&manifest_path, &entries)?;
            println!(
                "Successfully split audio into {} word files in {:?}",
                entries.len(),
                output_dir
            );
            println!("Saved manifest to {:?}", manifest_path);
        }
        Commands::Segments { alignment: alignment_path, out } => {
            let tts = alignment::load_tts_alignment(&alignment_path)?;
            let segments = tts.segments().context("Failed to segment alignment")?;

            match out {
                Some(path) => {
                    output::save_segments_json(&path, &segments)?;
                    println!("Saved {} segments to {:?}", segments.len(), path);
                }
                None => println!("{}", serde_json::to_string_pretty(&segments)?),
            }
        }
        Commands::FilterMismatches { input, out } => {
            let report = mismatch::load_report(&input)?;
            println!("Loaded {} mismatches", report.mismatches.len());

            let real = mismatch::filter_real(&report);
            let tally = mismatch::tally(&report);
            println!("Total more detected: {}", tally.more_detected);
            println!("Total less detected: {}", tally.less_detected);

            let out_path = out.unwrap_or_else(|| {
                input
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join("real_text_mismatches.json")
            });
            mismatch::save_report(&out_path, &real)?;
            println!(
                "Found {} real mismatches, saved to {:?}",
                real.mismatches.len(),
                out_path
            );
        }
    }

    Ok(())
}
