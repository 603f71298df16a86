//! Generation of a single contract wrapper from files: reading the ABI and
//! optional bytecode, expanding them and handing the artifact to a writer.

use crate::artifact::ContractArtifact;
use crate::errors::{GenerateError, GenerationFailure};
use crate::generate::types::TypePolicy;
use crate::util;
use crate::ContractBuilder;
use solwrap_common::{AbiLoader, Bytecode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The inputs of one generation run.
#[derive(Clone, Debug)]
pub struct GenerationJob {
    /// The ABI file. Its stem names the contract.
    pub abi_path: PathBuf,
    /// The optional compiled bytecode file.
    pub bin_path: Option<PathBuf>,
    /// The root directory generated files are placed under.
    pub output_dir: PathBuf,
    /// The namespace of the generated contract.
    pub namespace: String,
    /// How integer types are mapped.
    pub policy: TypePolicy,
}

impl GenerationJob {
    /// The contract name derived from the ABI file name: the file stem with
    /// its first letter capitalised.
    pub fn contract_name(&self) -> String {
        let stem = self
            .abi_path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        util::capitalize_first(&stem)
    }
}

/// Reads generation inputs.
pub trait InputSource {
    /// Reads the full contents at a path.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Persists generated source.
pub trait SourceWriter {
    /// Writes the source text to a path, creating parent directories as
    /// needed.
    fn write(&self, path: &Path, source: &str) -> io::Result<()>;
}

/// Input and output backed by the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystem;

impl InputSource for FileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

impl SourceWriter for FileSystem {
    fn write(&self, path: &Path, source: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, source)
    }
}

/// Runs generation jobs against an input source and a source writer.
pub struct Driver<I, W> {
    input: I,
    writer: W,
    rustfmt: bool,
}

impl Driver<FileSystem, FileSystem> {
    /// Creates a driver reading and writing the local file system.
    pub fn file_system() -> Self {
        Driver::new(FileSystem, FileSystem)
    }
}

impl<I, W> Driver<I, W>
where
    I: InputSource,
    W: SourceWriter,
{
    /// Creates a driver from its collaborators.
    pub fn new(input: I, writer: W) -> Self {
        Driver {
            input,
            writer,
            rustfmt: true,
        }
    }

    /// Specifies whether generated code is formatted with `rustfmt`.
    pub fn rustfmt(mut self, rustfmt: bool) -> Self {
        self.rustfmt = rustfmt;
        self
    }

    /// Generates the wrapper for one job and writes it out, returning the
    /// path of the written file. Nothing is written when any step fails.
    pub fn run(&self, job: &GenerationJob) -> Result<PathBuf, GenerationFailure> {
        let name = job.contract_name();
        let qualified = if job.namespace.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", job.namespace, name)
        };
        log::info!("Generating {} ... ", qualified);

        self.run_contract(&name, job)
            .map_err(|err| GenerationFailure::new(qualified, err))
    }

    fn run_contract(&self, name: &str, job: &GenerationJob) -> Result<PathBuf, GenerateError> {
        let bytecode = match &job.bin_path {
            Some(path) => Bytecode::from_bytes(&self.input.read(path)?),
            None => Bytecode::not_provided(),
        };
        let abi = self.input.read(&job.abi_path)?;

        let builder = ContractBuilder::new()
            .visibility_modifier("pub")
            .namespace(job.namespace.clone())
            .type_policy(job.policy)
            .rustfmt(self.rustfmt);
        let artifact = generate_from_slice(name, &abi, &bytecode, builder)?;

        let path = job.output_dir.join(artifact.relative_path());
        self.writer.write(&path, &artifact.to_source())?;
        log::info!("File written to {}", job.output_dir.display());

        Ok(path)
    }
}

/// Loads an ABI document and expands it into a contract artifact.
pub fn generate_from_slice(
    name: &str,
    abi: &[u8],
    bytecode: &Bytecode,
    builder: ContractBuilder,
) -> Result<ContractArtifact, GenerateError> {
    let abi = AbiLoader::new().load_from_slice(abi)?;
    builder.generate(name, &abi, bytecode)
}
