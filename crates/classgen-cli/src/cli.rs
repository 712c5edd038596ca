//! Command-line interface for the classgen utility
//!
//! Reads class-diagram scripts and prints class skeletons, load reports and
//! model summaries.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use classgen::core::logging::{init_logging, LEVEL_ENV};
use classgen::plugins::class::{DiagramModel, ScriptLoader};
use classgen::plugins::codegen::Generator;
use classgen::{GenerateConfig, Language};

/// Classgen - Generate class skeletons from class-diagram scripts
#[derive(Parser)]
#[command(name = "classgen")]
#[command(about = "Generate Java, PHP and Python class skeletons from class-diagram scripts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); defaults to warn
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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

#[derive(Subcommand)]
pub enum Commands {
    /// Generate class skeletons from a diagram script
    Generate {
        /// Input script (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language
        #[arg(short, long, value_enum, default_value_t = LanguageChoice::Java)]
        language: LanguageChoice,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 4)]
        indent: usize,

        /// Leave out the relation-kind comments on relation fields
        #[arg(long)]
        no_annotations: bool,
    },

    /// Load a script and report problems
    Check {
        /// Input script (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the classes and relations a script defines
    Inspect {
        /// Input script (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show supported target languages
    Languages {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Target language selection, including every language at once
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LanguageChoice {
    Java,
    Php,
    Python,
    All,
}

impl LanguageChoice {
    /// The single language selected, or `None` for all of them
    pub fn language(self) -> Option<Language> {
        match self {
            LanguageChoice::Java => Some(Language::Java),
            LanguageChoice::Php => Some(Language::Php),
            LanguageChoice::Python => Some(Language::Python),
            LanguageChoice::All => None,
        }
    }
}

#[derive(Serialize)]
struct ClassReport<'a> {
    name: &'a str,
    handle: u32,
    label: String,
    attributes: &'a [String],
    methods: &'a [String],
}

#[derive(Serialize)]
struct RelationReport<'a> {
    handle: u32,
    kind: &'static str,
    source: &'a str,
    target: &'a str,
    label: String,
}

#[derive(Serialize)]
struct ModelReport<'a> {
    classes: Vec<ClassReport<'a>>,
    relations: Vec<RelationReport<'a>>,
}

impl<'a> ModelReport<'a> {
    fn new(model: &'a DiagramModel) -> Self {
        Self {
            classes: model
                .classes()
                .iter()
                .map(|class| ClassReport {
                    name: class.name(),
                    handle: class.handle().id(),
                    label: class.label(),
                    attributes: class.attribute_lines(),
                    methods: class.method_lines(),
                })
                .collect(),
            relations: model
                .relations()
                .iter()
                .map(|relation| RelationReport {
                    handle: relation.handle().id(),
                    kind: relation.kind().name(),
                    source: relation.source(),
                    target: relation.target(),
                    label: relation.label(),
                })
                .collect(),
        }
    }
}

/// Main CLI application
pub struct ClassgenApp {
    loader: ScriptLoader,
}

impl ClassgenApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            loader: ScriptLoader::new(),
        }
    }

    fn build_config(indent: usize, no_annotations: bool) -> GenerateConfig {
        GenerateConfig::default()
            .with_indent_width(indent)
            .with_annotations(!no_annotations)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Keep stderr quiet unless asked otherwise
        let level = cli.log_level.map(|l| l.as_str()).or_else(|| {
            let from_env = std::env::var(LEVEL_ENV).is_ok() || std::env::var("RUST_LOG").is_ok();
            (!from_env).then_some("warn")
        });
        if let Err(e) = init_logging(level, cli.log_format.map(|f| f.as_str())) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classgen v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                output,
                language,
                indent,
                no_annotations,
            } => self.generate_command(
                input,
                output,
                language,
                Self::build_config(indent, no_annotations),
                cli.verbose,
            ),
            Commands::Check { input } => self.check_command(input, cli.verbose),
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Languages { json } => self.languages_command(json),
        }
    }

    fn load(&self, input: Option<PathBuf>, verbose: bool) -> Result<DiagramModel> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        self.loader.load(&content)
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        language: LanguageChoice,
        config: GenerateConfig,
        verbose: bool,
    ) -> Result<()> {
        let model = self.load(input, verbose)?;
        let generator = Generator::new(config);

        let text = match language.language() {
            Some(language) => generator.generate(&model, language)?,
            None => Self::render_all(&generator.generate_all(&model)?),
        };

        if verbose {
            eprintln!(
                "Generated {} classes ({} relations)",
                model.class_count(),
                model.relation_count()
            );
        }
        self.write_output(output, &text)
    }

    /// Concatenate per-language outputs, each under a banner comment
    pub fn render_all(outputs: &[(Language, String)]) -> String {
        outputs
            .iter()
            .map(|(language, text)| {
                format!("{} ---- {} ----\n{}", language.comment_prefix(), language, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let model = self.load(input, verbose)?;

        let mut warnings = 0;
        for class in model.classes() {
            for error in class.malformed_lines() {
                println!("warning: {}: {}", class.name(), error);
                warnings += 1;
            }
        }
        debug!(warnings, "Check completed");

        println!(
            "ok: {} classes, {} relations, {} malformed member lines",
            model.class_count(),
            model.relation_count(),
            warnings
        );
        Ok(())
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let model = self.load(input, verbose)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&ModelReport::new(&model))?);
            return Ok(());
        }

        for class in model.classes() {
            println!("class {} {}", class.name(), class.handle());
            for line in class.label().lines().skip(1) {
                println!("  {}", line);
            }
        }
        for relation in model.relations() {
            println!(
                "{} {} {} -> {}: {}",
                relation.handle(),
                relation.kind(),
                relation.source(),
                relation.target(),
                relation.label()
            );
        }
        Ok(())
    }

    /// Handle the languages command
    fn languages_command(&self, json: bool) -> Result<()> {
        let languages = Language::all();

        if json {
            let entries: Vec<_> = languages
                .iter()
                .map(|language| {
                    serde_json::json!({
                        "name": language,
                        "extension": language.file_extension(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "languages": entries,
                "total": languages.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported languages:");
            for language in languages {
                println!("  {:<8} (.{})", language.to_string(), language.file_extension());
            }
            println!();
            println!("Total: {} languages supported", languages.len());
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
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
                print!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClassgenApp {
    fn default() -> Self {
        Self::new()
    }
}
