use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

use crate::error::{HuffError, Result};

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Errors,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Log level that matches this verbosity
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "huf",
    version,
    about = "Huffman compression of whole files",
    long_about = "
    Each file is compressed with its own optimal Huffman code. The code tree is stored in front
    of the compressed data, so a .huf file can be decompressed on its own.

    If no file names are given, huf compresses or decompresses from standard input to standard
    output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Name of the output file (only with a single input file)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress everything but errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// All user settable options that control program behavior
#[derive(Debug)]
pub struct HufOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Explicit output file name, replacing the default one
    pub output_name: Option<String>,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HufOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            output: Output::File,
            output_name: None,
            verbose: Verbosity::Info,
        }
    }

    /// Reject option combinations that can't work.
    pub fn validate(&self) -> Result<()> {
        if self.output_name.is_some() && self.files.len() > 1 {
            return Err(invalid("--output needs exactly one input file"));
        }
        if self.output_name.is_some() && self.output == Output::Stdout {
            return Err(invalid("--output and --stdout can't be used together"));
        }
        if self.op_mode == Mode::Test && self.files.is_empty() {
            return Err(invalid("--test needs at least one input file"));
        }
        Ok(())
    }
}

impl Default for HufOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Args> for HufOpts {
    /// Copy the parsed command line into our internal structure
    fn from(args: Args) -> Self {
        let mut opts = HufOpts::new();
        opts.files = args.files;
        // Later flags win: test over decompress over compress.
        if args.compress {
            opts.op_mode = Mode::Zip
        };
        if args.decompress {
            opts.op_mode = Mode::Unzip
        };
        if args.test {
            opts.op_mode = Mode::Test
        };
        opts.force_overwrite = args.force;
        // With no input files the data comes from stdin, so it goes to stdout too.
        if args.stdout || (opts.files.is_empty() && args.output.is_none()) {
            opts.output = Output::Stdout
        };
        opts.output_name = args.output;
        opts.verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Errors,
            (false, 0) => Verbosity::Info,
            (false, 1) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        };
        opts
    }
}

/// Parse the command line into HufOpts.
pub fn hufopts_init() -> HufOpts {
    HufOpts::from(Args::parse())
}

/// Report the options in use. Call after the logger is up.
pub fn report(opts: &HufOpts) {
    info!("---- huf Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match opts.files.len() {
        0 => info!("Getting input from stdin"),
        n => info!("Processing {} file(s)", n),
    }
    info!("Sending output to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- huf Initialization End ----");
}

fn invalid(message: &str) -> HuffError {
    HuffError::InvalidArgs(message.to_string())
}
