//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffman::compression::compress::compress_files;
use huffman::compression::decompress::{decompress_files, test_files};
use huffman::tools::cli::{hufopts_init, report, Mode, Output};
use huffman::HuffError;

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    let options = hufopts_init();

    // Keep stdout clean when the data itself goes there.
    let mode = match options.output {
        Output::Stdout => TerminalMode::Stderr,
        Output::File => TerminalMode::Stdout,
    };
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        mode,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }
    report(&options);

    if let Err(e) = options.validate() {
        error!("{}", e);
        return Err(e);
    }

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_files(&options),
        Mode::Unzip => decompress_files(&options),
        Mode::Test => test_files(&options),
    };

    match &result {
        Ok(()) => info!("Done."),
        Err(e) => error!("Ooops! {}", e),
    }
    result
}
