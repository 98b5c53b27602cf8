//! File plumbing for the huf binary: default output names, overwrite protection, and the loop
//! that feeds each input file through a compress or decompress step.
//!

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{error, info, warn};

use super::cli::{HufOpts, Output};
use crate::error::{HuffError, Result};

/// Extension added to compressed files
pub const COMPRESSED_EXTENSION: &str = "huf";
/// Prefix put in front of decompressed file names
pub const DECOMPRESSED_PREFIX: &str = "unhuf.";

/// `name` -> `name.huf`
pub fn compressed_name(input: &str) -> String {
    format!("{}.{}", input, COMPRESSED_EXTENSION)
}

/// `dir/name.huf` -> `dir/unhuf.name`. A name without the .huf extension keeps its whole file
/// name: `dir/name` -> `dir/unhuf.name`.
pub fn decompressed_name(input: &str) -> String {
    let path = Path::new(input);
    let file_name = match path.extension() {
        Some(ext) if ext == COMPRESSED_EXTENSION => path.file_stem(),
        _ => path.file_name(),
    }
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default();
    let new_name = format!("{}{}", DECOMPRESSED_PREFIX, file_name);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(new_name).to_string_lossy().into_owned(),
        _ => new_name,
    }
}

/// Make sure writing to `output` is allowed: it must differ from `input`, and it may only
/// replace an existing file when `force` is set.
pub fn check_output(input: &str, output: &str, force: bool) -> Result<()> {
    if input == output {
        error!("You cannot specify the same filename as both the input file and the output file.");
        return Err(HuffError::InvalidArgs(format!(
            "input and output are both {}",
            output
        )));
    }
    if Path::new(output).exists() {
        if !force {
            error!("{} already exists. Use --force to overwrite it.", output);
            return Err(HuffError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", output),
            )));
        }
        warn!("Overwriting {}.", output);
    }
    Ok(())
}

/// Run `op` over every input file in opts and write what it returns. The whole input is read
/// and transformed before the output is created, so a failed step leaves no partial output.
/// A file that fails is reported and counted, and the remaining files are still processed.
///
/// With no input files, stdin is read and the result goes to stdout (or to --output).
pub fn run_on_files<F>(opts: &HufOpts, default_name: fn(&str) -> String, mut op: F) -> Result<()>
where
    F: FnMut(&[u8]) -> Result<Vec<u8>>,
{
    if opts.files.is_empty() {
        let mut input = Vec::new();
        io::stdin().lock().read_to_end(&mut input)?;
        info!("Reading {} input bytes from stdin.", input.len());
        let out = op(&input)?;
        return match &opts.output_name {
            Some(name) => write_file(name, &out, opts.force_overwrite),
            None => write_stdout(&out),
        };
    }

    let mut failed = 0;
    for name in &opts.files {
        if let Err(e) = run_on_file(opts, name, default_name, &mut op) {
            error!("{}: {}", name, e);
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(HuffError::FilesFailed {
            failed,
            total: opts.files.len(),
        });
    }
    Ok(())
}

fn run_on_file<F>(
    opts: &HufOpts,
    name: &str,
    default_name: fn(&str) -> String,
    op: &mut F,
) -> Result<()>
where
    F: FnMut(&[u8]) -> Result<Vec<u8>>,
{
    // Work out where the output goes before doing any work.
    let target = match opts.output {
        Output::Stdout => None,
        Output::File => {
            let target = opts.output_name.clone().unwrap_or_else(|| default_name(name));
            check_output(name, &target, opts.force_overwrite)?;
            Some(target)
        }
    };

    let input = fs::read(name)?;
    info!("Reading {} input bytes from {}.", input.len(), name);
    let out = op(&input)?;

    match target {
        Some(target) => write_file(&target, &out, true),
        None => write_stdout(&out),
    }
}

fn write_file(name: &str, data: &[u8], force: bool) -> Result<()> {
    if !force && Path::new(name).exists() {
        error!("{} already exists. Use --force to overwrite it.", name);
        return Err(HuffError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", name),
        )));
    }
    fs::write(name, data)?;
    info!("Wrote {} bytes to {}.", data.len(), name);
    Ok(())
}

fn write_stdout(data: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(data)?;
    handle.flush()?;
    info!("Wrote {} bytes to stdout.", data.len());
    Ok(())
}
