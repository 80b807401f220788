//! mc-gradient CLI
//!
//! Render gradient text and animated TAB blocks from the command line.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mc_gradient::preset::to_query_pairs;
use mc_gradient::{ColorStops, FormatConfig, Generator, HexColor, OutputType, Preset, Settings};

#[derive(Parser)]
#[command(name = "mc-gradient")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Minecraft gradient text generator", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Start from a preset: inline JSON, or @path to a JSON file
    #[arg(short, long, global = true)]
    preset: Option<String>,

    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered gradient text
    Rgb,

    /// Print the animated TAB configuration block
    Animtab,

    /// Print the minimal preset JSON
    Export {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the settings as query-string pairs
    Url,

    /// List the built-in output formats
    Formats,
}

/// Overrides applied on top of the defaults or the `--preset`.
#[derive(Args)]
struct SettingsArgs {
    /// Text to color
    #[arg(short, long, global = true)]
    text: Option<String>,

    /// Comma-separated hex colors, spread evenly
    #[arg(short, long, global = true, value_delimiter = ',')]
    colors: Option<Vec<HexColor>>,

    /// Built-in output format by index (see `formats`)
    #[arg(short, long, global = true)]
    format: Option<usize>,

    /// Prefix/suffix template, `$t` marks the text
    #[arg(long, global = true)]
    prefix_suffix: Option<String>,

    /// Color whitespace too
    #[arg(long, global = true)]
    no_trim: bool,

    /// Characters sharing one color
    #[arg(long, global = true)]
    color_length: Option<usize>,

    #[arg(long, global = true)]
    bold: bool,

    #[arg(long, global = true)]
    italic: bool,

    #[arg(long, global = true)]
    underline: bool,

    #[arg(long, global = true)]
    strikethrough: bool,

    /// Animation name
    #[arg(long, global = true)]
    name: Option<String>,

    /// Milliseconds between frames
    #[arg(long, global = true)]
    speed: Option<u32>,

    /// Gradient length as a multiple of the text length
    #[arg(long, global = true)]
    length: Option<usize>,

    /// Frame playback order
    #[arg(long = "type", global = true, value_enum)]
    output_type: Option<OutputType>,
}

impl SettingsArgs {
    fn apply(self, settings: &mut Settings) -> Result<()> {
        if let Some(text) = self.text {
            settings.text = text;
        }
        if let Some(colors) = self.colors {
            if colors.len() < 2 {
                bail!("at least two colors are required, got {}", colors.len());
            }
            settings.colors = ColorStops::evenly_spaced(colors);
        }
        if let Some(index) = self.format {
            let formats = FormatConfig::builtin();
            settings.format = formats
                .get(index)
                .cloned()
                .with_context(|| format!("no built-in format {index}, expected 0-{}", formats.len() - 1))?;
        }
        if let Some(template) = self.prefix_suffix {
            settings.prefix_suffix = template;
        }
        if self.no_trim {
            settings.trim_spaces = false;
        }
        if let Some(color_length) = self.color_length {
            settings.color_length = color_length;
        }
        settings.bold |= self.bold;
        settings.italic |= self.italic;
        settings.underline |= self.underline;
        settings.strikethrough |= self.strikethrough;
        if let Some(name) = self.name {
            settings.name = name;
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if let Some(length) = self.length {
            settings.length = length;
        }
        if let Some(output_type) = self.output_type {
            settings.output_type = output_type;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut settings = match cli.preset.as_deref() {
        Some(source) => load_preset(source)?,
        None => Settings::default(),
    };
    cli.settings.apply(&mut settings)?;
    let generator = Generator::new(settings);

    match cli.command {
        Commands::Rgb => println!("{}", generator.output()),
        Commands::Animtab => println!("{}", generator.animation_output()),
        Commands::Export { pretty } => {
            let preset = Preset::export(generator.settings());
            let json = if pretty {
                preset.to_json_pretty()?
            } else {
                preset.to_json()?
            };
            println!("{json}");
        }
        Commands::Url => {
            for (key, value) in to_query_pairs(generator.settings())? {
                println!("{key}={value}");
            }
        }
        Commands::Formats => {
            let styles = generator.settings().styles();
            for (index, format) in FormatConfig::builtin().iter().enumerate() {
                println!("{index}: {}", format.label(styles));
            }
        }
    }

    Ok(())
}

fn load_preset(source: &str) -> Result<Settings> {
    let raw = match source.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read preset file {path}"))?,
        None => source.to_string(),
    };
    Preset::import(&raw).context("invalid preset")
}
