//! pdfreflow CLI - PDF page reflow tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfreflow::parser::{
    DEFAULT_BOILERPLATE_THRESHOLD, DEFAULT_HEADER_WINDOW, DEFAULT_HEIGHT_TOLERANCE,
    DEFAULT_MIN_PAGE_CHARS,
};
use pdfreflow::{
    reflow_pdf, segment_document, EnvelopeSink, JsonFormat, OutputFormat, PageSelection,
    PdfTextSource, ReaderBridge, ReflowOptions, TextRunSource,
};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(about = "Reflow PDF pages into readable paragraphs", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reflow a PDF into paragraphs
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: FormatArg,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Dump the filtered segments of every page as JSON
    Segments {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Convert base64 document text and emit one host message
    Bridge {
        /// File holding base64 document text (stdin if not specified)
        #[arg(long, value_name = "FILE")]
        b64_file: Option<PathBuf>,

        /// Output format of the payload
        #[arg(short, long, value_enum, default_value = "html")]
        format: FormatArg,
    },

    /// Show version information
    Version,
}

/// Reflow tuning shared by conversion commands.
#[derive(Args, Clone)]
struct TuningArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Extract pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Fail when any page cannot be extracted
    #[arg(long)]
    strict: bool,

    /// Maximum glyph-height difference within one line
    #[arg(long, env = "PDFREFLOW_HEIGHT_TOLERANCE", default_value_t = DEFAULT_HEIGHT_TOLERANCE)]
    height_tolerance: f32,

    /// Leading segments per page inspected for running headers
    #[arg(long, env = "PDFREFLOW_HEADER_WINDOW", default_value_t = DEFAULT_HEADER_WINDOW)]
    header_window: usize,

    /// Fraction of pages a header must appear on to be removed
    #[arg(
        long,
        env = "PDFREFLOW_BOILERPLATE_THRESHOLD",
        default_value_t = DEFAULT_BOILERPLATE_THRESHOLD
    )]
    boilerplate_threshold: f64,

    /// Pages with less flowed text than this are dropped
    #[arg(long, env = "PDFREFLOW_MIN_PAGE_CHARS", default_value_t = DEFAULT_MIN_PAGE_CHARS)]
    min_page_chars: usize,
}

impl TuningArgs {
    fn to_options(&self) -> Result<ReflowOptions, Box<dyn std::error::Error>> {
        let pages = match self.pages.as_deref() {
            Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
            None => PageSelection::All,
        };

        let mut options = ReflowOptions::new()
            .with_height_tolerance(self.height_tolerance)
            .with_header_window(self.header_window)
            .with_boilerplate_threshold(self.boilerplate_threshold)
            .with_min_page_chars(self.min_page_chars)
            .with_parallel(!self.sequential)
            .with_pages(pages);
        if self.strict {
            options = options.strict();
        }
        options.validate()?;
        log::debug!("Reflow options: {:?}", options);
        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// `<p>` paragraph markup
    Html,
    /// Plain text, one paragraph per line
    Text,
    /// Paragraphs, metadata and statistics as JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            format,
            compact,
            tuning,
        }) => cmd_convert(&input, output.as_deref(), format, compact, &tuning),
        Some(Commands::Segments {
            input,
            compact,
            tuning,
        }) => cmd_segments(&input, compact, &tuning),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Bridge { b64_file, format }) => cmd_bridge(b64_file.as_deref(), format),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert to HTML on stdout if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, None, FormatArg::Html, false, &cli.tuning)
            } else {
                println!("{}", "Usage: pdfreflow <FILE>".yellow());
                println!("       pdfreflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    format: FormatArg,
    compact: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = tuning.to_options()?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading PDF...");
    let source = PdfTextSource::open(input)?;
    pb.inc(1);

    pb.set_message(format!("Reflowing {} pages...", source.page_count()));
    let result = reflow_pdf(&source, &options)?;
    pb.inc(1);

    pb.set_message("Rendering...");
    let content = match (format, compact) {
        (FormatArg::Json, true) => result.to_json(JsonFormat::Compact)?,
        (format, _) => result.format(format.into())?,
    };
    pb.inc(1);
    pb.finish_and_clear();

    if let Some(path) = output {
        fs::write(path, &content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    eprintln!("{} {}", "Done:".green().bold(), result.stats);
    if !result.stats.boilerplate_keys.is_empty() {
        eprintln!(
            "  {} {}",
            "Removed headers:".dimmed(),
            result.stats.boilerplate_keys.join(" | ")
        );
    }

    Ok(())
}

fn cmd_segments(
    input: &Path,
    compact: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = tuning.to_options()?;
    let source = PdfTextSource::open(input)?;
    let doc = segment_document(&source, &options)?;

    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfTextSource::open(input)?;
    let metadata = source.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    for line in metadata.summary_lines() {
        match line.split_once(": ") {
            Some((label, value)) => println!("{}: {}", label.bold(), value),
            None => println!("{}", line),
        }
    }

    // Reflow with defaults for a quick content overview
    let result = reflow_pdf(&source, &ReflowOptions::default())?;

    println!();
    println!("{}", "Reflow Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &result.stats;
    println!("{}: {}", "Rendered pages".bold(), stats.pages_rendered);
    println!("{}: {}", "Discarded pages".bold(), stats.pages_discarded);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} of {}",
        "Boilerplate segments".bold(),
        stats.segments_removed,
        stats.segment_count
    );
    for key in &stats.boilerplate_keys {
        println!("  {} {}", "-".dimmed(), key);
    }
    if !stats.failed_pages.is_empty() {
        println!("{}: {:?}", "Failed pages".yellow().bold(), stats.failed_pages);
    }

    Ok(())
}

fn cmd_bridge(b64_file: Option<&Path>, format: FormatArg) -> Result<(), Box<dyn std::error::Error>> {
    let text = match b64_file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let sink = EnvelopeSink::new(|line: String| println!("{}", line));
    let mut bridge = ReaderBridge::new(sink).with_format(format.into());
    bridge.convert_base64(Some(text.as_str()));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfreflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF page reflow tool");
    println!();
    println!("License: MIT");
}
