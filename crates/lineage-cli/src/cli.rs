//! Command-line interface for the lineage utility
//!
//! Reads a family document (JSON) and prints its layout, viewport, stats or
//! a branch of it as JSON.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use lineage::core::logging::init_logging;
use lineage::family::{branch, duplicate_ids, stats, HiddenGenerations, PersonNode};
use lineage::{Boundaries, FamilyTreeLayout, LayoutConfig, TreeError, TreeLayout};

/// Lineage - Lay out family trees as positioned boxes and connectors
#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Lay out family tree documents for drawing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Where the family document comes from and which generations are collapsed
#[derive(Args, Debug, Clone, Default)]
pub struct TreeInput {
    /// Family document as JSON (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Collapse the generation below this person (repeatable)
    #[arg(long = "hide", value_name = "ID")]
    pub hide: Vec<String>,

    /// JSON file holding a `{ "personId": true }` map of collapsed generations
    #[arg(long, value_name = "FILE")]
    pub hidden: Option<PathBuf>,
}

/// Geometry overrides
#[derive(Args, Debug, Clone, Default)]
pub struct GeometryArgs {
    /// JSON file with layout geometry (camelCase keys, missing keys keep defaults)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Refuse trees with more visible generations than this
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a family tree
    Layout {
        #[command(flatten)]
        tree: TreeInput,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Output file for the layout JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print only the padded viewport of a layout
    Bounds {
        #[command(flatten)]
        tree: TreeInput,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check a family document and print its statistics
    Validate {
        /// Family document to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Extract the branch around one person
    Branch {
        /// Family document as JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Person whose branch to extract
        #[arg(long)]
        id: String,

        /// Output file for the branch JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// What `layout` prints
#[derive(Serialize)]
struct LayoutReport<'a> {
    #[serde(flatten)]
    layout: &'a TreeLayout,
    boundaries: Boundaries,
}

/// Main CLI application
pub struct LineageApp {
    config: LayoutConfig,
}

impl LineageApp {
    /// Create a new application instance with the default geometry
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create a new application instance with a base geometry
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("LINEAGE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("LINEAGE_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Lineage v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                tree,
                geometry,
                output,
                pretty,
            } => self.layout_command(&tree, &geometry, output, pretty, cli.verbose),
            Commands::Bounds {
                tree,
                geometry,
                pretty,
            } => self.bounds_command(&tree, &geometry, pretty, cli.verbose),
            Commands::Validate { input, geometry } => {
                self.validate_command(input, &geometry, cli.verbose)
            }
            Commands::Branch {
                input,
                id,
                output,
                pretty,
            } => self.branch_command(input, &id, output, pretty, cli.verbose),
        }
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        tree: &TreeInput,
        geometry: &GeometryArgs,
        output: Option<PathBuf>,
        pretty: bool,
        verbose: bool,
    ) -> Result<()> {
        let engine = self.engine(geometry)?;
        let layout = self.run_layout(&engine, tree, verbose)?;

        let report = LayoutReport {
            layout: &layout,
            boundaries: engine.boundaries(&layout),
        };
        self.write_output(output, &to_json(&report, pretty)?)
    }

    /// Handle the bounds command
    fn bounds_command(
        &self,
        tree: &TreeInput,
        geometry: &GeometryArgs,
        pretty: bool,
        verbose: bool,
    ) -> Result<()> {
        let engine = self.engine(geometry)?;
        let layout = self.run_layout(&engine, tree, verbose)?;
        self.write_output(None, &to_json(&engine.boundaries(&layout), pretty)?)
    }

    /// Handle the validate command
    fn validate_command(
        &self,
        input: Option<PathBuf>,
        geometry: &GeometryArgs,
        verbose: bool,
    ) -> Result<()> {
        let Some(tree) = self.load_tree(input, verbose)? else {
            println!("✓ Empty family document");
            return Ok(());
        };

        if !tree.has_id() {
            println!("✗ Root person has no id");
            bail!("Invalid family document: root person has no id");
        }

        let duplicates = duplicate_ids(&tree);
        if !duplicates.is_empty() {
            println!("✗ Duplicate person ids: {}", duplicates.join(", "));
            bail!("Invalid family document: {} duplicate id(s)", duplicates.len());
        }

        let engine = self.engine(geometry)?;
        let layout = match engine.generate(Some(&tree), &HiddenGenerations::new()) {
            Ok(layout) => layout,
            Err(e) => {
                println!("✗ {}", e);
                return Err(e.into());
            }
        };

        let stats = stats(&tree);
        println!(
            "✓ Valid family tree: {} persons, {} spouses, {} generations",
            stats.persons, stats.spouses, stats.generations
        );
        for warning in &layout.warnings {
            println!("  ⚠ {}", warning);
        }
        Ok(())
    }

    /// Handle the branch command
    fn branch_command(
        &self,
        input: Option<PathBuf>,
        id: &str,
        output: Option<PathBuf>,
        pretty: bool,
        verbose: bool,
    ) -> Result<()> {
        let tree = self
            .load_tree(input, verbose)?
            .ok_or_else(|| anyhow!("Input holds no family tree"))?;
        let branch = branch(&tree, id).ok_or_else(|| TreeError::not_found(id))?;

        if verbose {
            eprintln!("Extracted branch of '{}'", id);
        }
        self.write_output(output, &to_json(&branch, pretty)?)
    }

    /// Layout engine for this run: base geometry, then `--config`, then `--max-depth`
    fn engine(&self, geometry: &GeometryArgs) -> Result<FamilyTreeLayout> {
        let mut config = match &geometry.config {
            Some(path) => {
                let content = read_file(path)?;
                LayoutConfig::from_json(&content)
                    .with_context(|| format!("Invalid config file '{}'", path.display()))?
            }
            None => self.config.clone(),
        };
        if let Some(max_depth) = geometry.max_depth {
            config = config.with_max_depth(max_depth);
        }
        Ok(FamilyTreeLayout::with_config(config)?)
    }

    fn run_layout(
        &self,
        engine: &FamilyTreeLayout,
        tree: &TreeInput,
        verbose: bool,
    ) -> Result<TreeLayout> {
        let family = self.load_tree(tree.input.clone(), verbose)?;
        let hidden = self.load_hidden(tree)?;
        let layout = engine.generate(family.as_ref(), &hidden)?;

        if verbose {
            eprintln!(
                "Laid out {} nodes and {} connections",
                layout.nodes.len(),
                layout.connections.len()
            );
            for warning in &layout.warnings {
                eprintln!("Warning: {}", warning);
            }
        }
        Ok(layout)
    }

    /// Read and parse a family document; `null` means no tree
    pub fn load_tree(&self, input: Option<PathBuf>, verbose: bool) -> Result<Option<PersonNode>> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let tree = lineage::parse_tree(&content).context("Failed to parse family document")?;
        debug!(has_tree = tree.is_some(), "Parsed family document");
        Ok(tree)
    }

    /// Collapsed generations from `--hidden` and `--hide`
    pub fn load_hidden(&self, tree: &TreeInput) -> Result<HiddenGenerations> {
        let mut hidden = match &tree.hidden {
            Some(path) => HiddenGenerations::from_json(&read_file(path)?)
                .with_context(|| format!("Invalid hidden generations file '{}'", path.display()))?,
            None => HiddenGenerations::new(),
        };
        for id in &tree.hide {
            hidden.hide(id.as_str());
        }
        info!(hidden_count = hidden.len(), "Loaded hidden generations");
        Ok(hidden)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => read_file(&path),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", content.trim_end_matches('\n'))?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for LineageApp {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
