use std::{fs::File, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use javelin_class_file::ClassFile;
use memmap::Mmap;

/// Loads a single JVM class file and checks its structural invariants.
#[derive(Parser)]
#[command(name = "javelin")]
#[command(version)]
struct Args {
    /// Execute a jar archive instead of a loose class file
    #[arg(long)]
    jar: bool,

    /// Execute the main class of a module
    #[arg(short = 'm', long = "module")]
    module: bool,

    /// Print the decoded structure
    #[arg(long)]
    dump: bool,

    /// Path to the class file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();

    if args.jar {
        bail!("jar archives are not supported yet");
    }

    if args.module {
        bail!("module execution is not supported yet");
    }

    let file =
        File::open(&args.file).with_context(|| format!("opening {}", args.file.display()))?;
    let mmap =
        unsafe { Mmap::map(&file) }.with_context(|| format!("mapping {}", args.file.display()))?;

    let class_file =
        ClassFile::parse(&mmap).with_context(|| format!("loading {}", args.file.display()))?;

    log::info!(
        "loaded {} (class file version {}.{})",
        class_file.class_name().unwrap_or_else(|_| "<unknown>".into()),
        class_file.major_version,
        class_file.minor_version,
    );

    if args.dump {
        println!("{class_file:#?}");
    }

    Ok(())
}
