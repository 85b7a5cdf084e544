use clap::Parser;
use kir::cli::Cli;
use kir::config;
use kir::{Extractor, KirError, Mode, files};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    match run(&cli) {
        Ok(0) => {}
        Ok(failed) => {
            log::debug!("{} input(s) failed", failed);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Process every input and print the images found. Returns how many inputs
/// failed without aborting the run.
fn run(cli: &Cli) -> Result<usize, KirError> {
    let config = config::load_config(cli.config.as_deref())?;
    let mode = if cli.tolerant || config.tolerant {
        Mode::Tolerant
    } else {
        Mode::Strict
    };
    let extractor = Extractor::new();
    let mut output = Output::new(cli.json);
    let mut failed = 0;

    for arg in &cli.paths {
        if arg == "-" {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .map_err(|e| KirError::io("<stdin>", e))?;
            let images = extractor
                .process(&raw, mode)
                .map_err(|source| KirError::Extract {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            output.emit(images)?;
            continue;
        }

        for path in files::find_files(std::slice::from_ref(arg), &config)? {
            match process_file(&extractor, &path, mode) {
                Ok(images) => output.emit(images)?,
                Err(e) => {
                    eprintln!("error: {}", e);
                    failed += 1;
                }
            }
        }
    }

    output.finish()?;
    Ok(failed)
}

fn process_file(extractor: &Extractor, path: &Path, mode: Mode) -> Result<Vec<String>, KirError> {
    let raw = std::fs::read(path).map_err(|e| KirError::io(path, e))?;
    log::info!("processing {}", path.display());
    extractor
        .process(&raw, mode)
        .map_err(|source| KirError::Extract {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes images as lines, or collects them for a single JSON array.
struct Output {
    json: Option<Vec<String>>,
}

impl Output {
    fn new(json: bool) -> Self {
        Self {
            json: json.then(Vec::new),
        }
    }

    fn emit(&mut self, images: Vec<String>) -> Result<(), KirError> {
        match &mut self.json {
            Some(all) => all.extend(images),
            None => {
                let mut out = io::stdout().lock();
                for image in images {
                    writeln!(out, "{}", image).map_err(|e| KirError::io("<stdout>", e))?;
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<(), KirError> {
        if let Some(all) = self.json {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &all)
                .map_err(|e| KirError::io("<stdout>", e.into()))?;
            writeln!(out).map_err(|e| KirError::io("<stdout>", e))?;
        }
        Ok(())
    }
}
