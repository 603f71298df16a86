use anyhow::Result;
use clap::{Parser, Subcommand};
use solwrap_generate::{Driver, GenerationJob, TypePolicy};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "solwrap", version)]
#[command(about = "Generate Rust wrappers for smart contracts from their ABI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a contract wrapper from an ABI file
    Generate {
        /// ABI file in JSON format
        #[arg(short = 'a', long = "abiFile")]
        abi_file: PathBuf,

        /// Compiled bytecode file, deployments fail without it
        #[arg(short = 'b', long = "binFile")]
        bin_file: Option<PathBuf>,

        /// Destination base directory
        #[arg(short = 'o', long = "outputDir")]
        output_dir: PathBuf,

        /// Namespace of the generated contract, `.` separated
        #[arg(short = 'p', long = "package")]
        package: String,

        /// Map integers to native Rust types (default)
        #[arg(long = "nativeTypes", visible_alias = "javaTypes", alias = "jt")]
        native_types: bool,

        /// Map integers to exact-width Solidity types
        #[arg(
            long = "solidityTypes",
            alias = "st",
            conflicts_with = "native_types"
        )]
        solidity_types: bool,

        /// Skip formatting the generated code with rustfmt
        #[arg(long = "noFormat")]
        no_format: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Generate {
            abi_file,
            bin_file,
            output_dir,
            package,
            native_types: _,
            solidity_types,
            no_format,
        } => {
            let job = GenerationJob {
                abi_path: abi_file,
                bin_path: bin_file,
                output_dir,
                namespace: package,
                policy: if solidity_types {
                    TypePolicy::ExactWidth
                } else {
                    TypePolicy::Native
                },
            };
            let path = Driver::file_system().rustfmt(!no_format).run(&job)?;
            log::debug!("generated {}", path.display());
        }
    }

    Ok(())
}
