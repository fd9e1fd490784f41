//! loadaudio - inspect WAV/MP3 files and re-encode them as WAV

use anyhow::{Context, Result};
use clap::Parser;
use loadaudio::{init_logging, AudioFile, AudioFormat, Args, Config};
use std::process;

fn main() {
    let config = match Config::from_args_and_config(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_logging(config.verbose);

    if let Err(e) = run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    if config.verbose {
        println!("{}", loadaudio::get_library_info());
        println!();
    }

    let audio = AudioFile::new(&config.input_path, config.input_format(), config.normalized())
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;
    let data = audio.read();

    println!("File: {}", audio.filename().display());
    println!("Format: {}", audio.format());
    println!("Sample type: {}", data.sample_type());
    println!("Shape: {:?}", data.shape());
    println!("Frame rate: {} Hz", audio.frame_rate());
    println!("Duration: {:.2}s", audio.duration());
    if config.verbose {
        println!("Normalized: {}", audio.normalized());
    }

    if let Some(output) = &config.output_path {
        let frame_rate = config.output_frame_rate(audio.frame_rate());
        AudioFile::write_data(data, output, frame_rate, config.output_format())
            .with_context(|| format!("Failed to write {}", output.display()))?;

        if config.output_format() == AudioFormat::Wav {
            println!("Output: {} ({} Hz)", output.display(), frame_rate);
        }
    }

    Ok(())
}
