//! idoarc CLI - a small archiver with RLE and LZW codecs.
//!
//! Archives are single `.ido` files, optionally password protected.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{AddOptions, ExtractOptions, ListOptions};
use idoarc_archive::EncodeParams;
use idoarc_core::CodecKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idoarc")]
#[command(author, version, about = "Archive files with RLE or LZW encoding")]
#[command(long_about = "
idoarc packs files into a single .ido archive. Each file is encoded with
run-length encoding (RLE) or Lempel-Ziv-Welch (LZW). Files ending in .txt
are stored as text, everything else as raw bytes.

Examples:
  idoarc add backup.ido notes.txt photos/
  idoarc add backup.ido report.txt --codec lzw --password secret
  idoarc list backup.ido
  idoarc extract backup.ido -o restored/
  idoarc delete backup.ido 1,3
  idoarc test backup.ido

Set RUST_LOG=debug for diagnostic output.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add files and folders to an archive, creating it if needed
    #[command(alias = "a")]
    Add {
        /// Archive file (.ido), or a directory to create Archive.ido in
        archive: PathBuf,

        /// Files and folders to add
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Codec used to encode the files
        #[arg(short, long, value_enum, default_value = "rle")]
        codec: CodecArg,

        /// RLE window width
        #[arg(short = 'b', long, default_value_t = EncodeParams::DEFAULT.unit_size)]
        unit_size: usize,

        /// Largest run count one RLE record may hold
        #[arg(short = 'q', long, default_value_t = EncodeParams::DEFAULT.cap_size)]
        cap_size: usize,

        /// Archive password (protects a new archive, unlocks an existing one)
        #[arg(short, long)]
        password: Option<String>,

        /// Delete an existing archive first instead of extending it
        #[arg(short, long)]
        replace: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract files from an archive
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Archive password (prompted for when needed)
        #[arg(short, long)]
        password: Option<String>,

        /// Include only files matching pattern (glob syntax: *.txt, docs/**/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude files matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,
    },

    /// List the contents of an archive
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Archive password (prompted for when needed)
        #[arg(short, long)]
        password: Option<String>,

        /// Show codec and size columns
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Include only files matching pattern (glob syntax: *.txt, docs/**/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude files matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,
    },

    /// Delete entries by their number in the listing
    #[command(alias = "d")]
    Delete {
        /// Archive file to modify
        archive: PathBuf,

        /// Comma separated entry numbers, as shown by `list` (e.g. 1,3)
        indices: String,

        /// Archive password (prompted for when needed)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check archive structure and decode every entry
    #[command(alias = "t")]
    Test {
        /// Archive file to test
        archive: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Codec selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CodecArg {
    /// Run-length encoding
    Rle,
    /// Lempel-Ziv-Welch
    Lzw,
}

impl From<CodecArg> for CodecKind {
    fn from(arg: CodecArg) -> Self {
        match arg {
            CodecArg::Rle => CodecKind::Rle,
            CodecArg::Lzw => CodecKind::Lzw,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            archive,
            files,
            codec,
            unit_size,
            cap_size,
            password,
            replace,
            verbose,
        } => commands::cmd_add(
            &archive,
            &files,
            &AddOptions {
                codec: codec.into(),
                params: EncodeParams::new(unit_size, cap_size),
                password: password.as_deref(),
                replace,
                verbose,
            },
        ),
        Commands::Extract {
            archive,
            output,
            password,
            include,
            exclude,
            verbose,
            progress,
        } => commands::cmd_extract(
            &archive,
            &output,
            &ExtractOptions {
                password: password.as_deref(),
                include: &include,
                exclude: &exclude,
                verbose,
                progress,
            },
        ),
        Commands::List {
            archive,
            password,
            verbose,
            json,
            include,
            exclude,
        } => commands::cmd_list(
            &archive,
            &ListOptions {
                password: password.as_deref(),
                verbose,
                json,
                include: &include,
                exclude: &exclude,
            },
        ),
        Commands::Delete {
            archive,
            indices,
            password,
        } => commands::cmd_delete(&archive, &indices, password.as_deref()),
        Commands::Test { archive, verbose } => commands::cmd_test(&archive, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
