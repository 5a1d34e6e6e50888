//! Command-line interface
//!
//! Thin adapter over the core: expands input patterns, resolves backends,
//! folds the sources through the merge engine, applies inline overrides and
//! path surgery, and serializes the result to a file or stdout.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::backend::Registry;
use crate::container::{Container, Path};
use crate::merge::{merge, merge_all, MergeStrategy};
use crate::overrides;

mod sources;

/// Load, merge and rewrite configuration across JSON, TOML and YAML
#[derive(Parser)]
#[command(name = "confmix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input config files or glob patterns, merged left to right
    #[arg(value_name = "PATH_OR_PATTERN")]
    inputs: Vec<String>,

    /// List supported config types and exit
    #[arg(short = 'L', long)]
    list: bool,

    /// Output file path (stdout when omitted; --otype is then required)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input config type; overrides detection by file extension
    #[arg(short = 'I', long, value_name = "TYPE")]
    itype: Option<String>,

    /// Output config type; overrides detection by output file extension
    #[arg(short = 'O', long, value_name = "TYPE")]
    otype: Option<String>,

    /// Strategy used to merge multiple configs
    #[arg(short = 'M', long, value_enum, default_value = "merge_dicts", value_name = "STRATEGY")]
    merge: MergeStrategy,

    /// Inline override configs, e.g. 'obsoletes:sysdata;conflicts:sysdata-old'
    #[arg(short = 'A', long, value_name = "ARGS")]
    args: Option<String>,

    /// Parse --args with this config type instead of the K:V grammar
    #[arg(long, value_name = "TYPE")]
    atype: Option<String>,

    /// Output only the value at this dotted path of the merged result
    #[arg(long, value_name = "PATH")]
    get: Option<String>,

    /// Set PATH=VALUE in the merged result before output
    #[arg(long, value_name = "PATH=VALUE")]
    set: Option<String>,

    /// Silently skip input files that do not exist
    #[arg(long)]
    ignore_missing: bool,

    /// Silent or quiet mode
    #[arg(short = 's', long = "silent", visible_short_alias = 'q')]
    silent: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbosity flags to the tracing log level.
    // RUST_LOG in the environment always takes precedence.
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.silent {
        Level::ERROR
    } else {
        Level::WARN
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let registry = Registry::default();

    if cli.list {
        println!("Supported config types: {}", registry.list_types().join(", "));
        return Ok(());
    }

    if cli.inputs.is_empty() {
        bail!("no input config files given (use --list to see supported types)");
    }

    let paths = sources::expand(&cli.inputs, cli.ignore_missing)?;

    let mut trees = Vec::with_capacity(paths.len());
    for path in &paths {
        let backend = registry.resolve(cli.itype.as_deref(), path)?;
        tracing::debug!("loading {} as {}", path.display(), backend.id());
        let bytes =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let tree = backend
            .parse(&bytes)
            .with_context(|| format!("failed to load {}", path.display()))?;
        trees.push(tree);
    }

    // All inputs may have been skipped under --ignore-missing; fall back to
    // an empty tree so overrides and output still work.
    let mut data = match merge_all(trees, cli.merge) {
        Some(tree) => tree,
        None => {
            tracing::warn!("no readable inputs, starting from an empty config");
            Container::empty_map()
        }
    };

    if let Some(raw) = &cli.args {
        let overlay = match cli.atype.as_deref() {
            Some(atype) => registry
                .by_id(atype)?
                .parse(raw.as_bytes())
                .context("failed to parse --args")?,
            None => overrides::parse(raw)?,
        };
        data = merge(&data, &overlay, cli.merge);
    }

    if let Some(raw) = &cli.get {
        let path = Path::parse(raw)?;
        data = data.get(&path)?.clone();
    }

    if let Some(spec) = &cli.set {
        let (raw_path, raw_value) = spec
            .split_once('=')
            .with_context(|| format!("malformed --set '{spec}': expected PATH=VALUE"))?;
        let path = Path::parse(raw_path)?;
        data.set(&path, overrides::coerce_scalar(raw_value))?;
    }

    match &cli.output {
        Some(out) => {
            let backend = registry.resolve(cli.otype.as_deref(), out)?;
            let bytes = backend.serialize(&data)?;
            fs::write(out, bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => {
            let otype = match cli.otype.as_deref() {
                Some(t) => t,
                None => bail!("please specify the output type with -O/--otype"),
            };
            let bytes = registry.by_id(otype)?.serialize(&data)?;
            std::io::stdout().write_all(&bytes).context("failed to write to stdout")?;
        }
    }

    Ok(())
}
