//! mdpage CLI - Markdown pagination tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdpage::naming::artifact_filename;
use mdpage::{
    extract_blocks, layout_markdown, FixedPitchMeasure, JsonFormat, LayoutOptions, Margins,
    PageSize, TableHeaderPolicy,
};

#[derive(Parser)]
#[command(name = "mdpage")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Paginate Markdown into positioned draw instructions", long_about = None)]
struct Cli {
    /// Input Markdown file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a document and print its draw instructions as JSON
    Layout {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print a plain-text preview, page by page
    Preview {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the extracted blocks as JSON
    Blocks {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show layout statistics
    Info {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Lay out several files into timestamped JSON files
    Convert {
        /// Input Markdown files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Label used in output names instead of each file stem
        #[arg(long)]
        label: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Debug)]
struct LayoutArgs {
    /// Page size
    #[arg(long, value_enum, default_value = "a4", env = "MDPAGE_PAGE_SIZE")]
    page_size: PaperSize,

    /// Margin on all sides, in points
    #[arg(long, default_value = "50")]
    margin: f32,

    /// Body font size, in points
    #[arg(long, default_value = "11")]
    font_size: f32,

    /// Document title drawn on the first page
    #[arg(long)]
    title: Option<String>,

    /// Subtitle drawn below the title
    #[arg(long)]
    subtitle: Option<String>,

    /// Use today's date as the subtitle
    #[arg(long, conflicts_with = "subtitle")]
    dated: bool,

    /// Header row handling for tables split across pages
    #[arg(long, value_enum, default_value = "repeat")]
    table_headers: HeaderMode,

    /// Skip Unicode NFC normalization
    #[arg(long)]
    no_normalize: bool,
}

impl LayoutArgs {
    fn to_options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new()
            .with_page_size(self.page_size.into())
            .with_margins(Margins::all(self.margin))
            .with_body_font_size(self.font_size)
            .with_table_headers(self.table_headers.into())
            .with_normalization(!self.no_normalize);

        if let Some(ref title) = self.title {
            options = options.with_title(title.clone());
        }
        if let Some(ref subtitle) = self.subtitle {
            options = options.with_subtitle(subtitle.clone());
        } else if self.dated {
            options = options.with_subtitle(chrono::Local::now().format("%Y-%m-%d").to_string());
        }
        options
    }
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            page_size: PaperSize::A4,
            margin: 50.0,
            font_size: 11.0,
            title: None,
            subtitle: None,
            dated: false,
            table_headers: HeaderMode::Repeat,
            no_normalize: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PaperSize {
    /// ISO A4 (595 x 842 pt)
    A4,
    /// US Letter (612 x 792 pt)
    Letter,
    /// US Legal (612 x 1008 pt)
    Legal,
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::Letter,
            PaperSize::Legal => PageSize::Legal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeaderMode {
    /// Repeat the header row on every page
    Repeat,
    /// Draw the header row on the first page only
    Continue,
}

impl From<HeaderMode> for TableHeaderPolicy {
    fn from(mode: HeaderMode) -> Self {
        match mode {
            HeaderMode::Repeat => TableHeaderPolicy::Repeat,
            HeaderMode::Continue => TableHeaderPolicy::Continue,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Layout {
            input,
            output,
            compact,
            layout,
        }) => cmd_layout(&input, output.as_deref(), compact, &layout),
        Some(Commands::Preview {
            input,
            output,
            layout,
        }) => cmd_preview(&input, output.as_deref(), &layout),
        Some(Commands::Blocks { input, compact }) => cmd_blocks(&input, compact),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Convert {
            inputs,
            output,
            label,
            layout,
        }) => cmd_convert(&inputs, &output, label.as_deref(), &layout).map(|_| ()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: preview if input is provided
            if let Some(input) = cli.input {
                cmd_preview(&input, None, &LayoutArgs::default())
            } else {
                println!("{}", "Usage: mdpage <FILE>".yellow());
                println!("       mdpage --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let layout = layout_markdown(&text, &args.to_options(), &FixedPitchMeasure::default())?;
    let json = mdpage::render::to_json(&layout, json_format(compact))?;
    write_output(output, &json)?;
    Ok(())
}

fn cmd_preview(
    input: &Path,
    output: Option<&Path>,
    args: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let measure = FixedPitchMeasure::default();
    let layout = layout_markdown(&text, &args.to_options(), &measure)?;

    if layout.is_empty() {
        println!("{}", "Document is empty".yellow());
        return Ok(());
    }

    let preview = mdpage::render::to_text(&layout, &measure)?;
    write_output(output, &preview)?;
    Ok(())
}

fn cmd_blocks(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let blocks = extract_blocks(&text, &LayoutOptions::default());

    let json = if compact {
        serde_json::to_string(&blocks)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_info(input: &Path, args: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let options = args.to_options();
    let layout = layout_markdown(&text, &options, &FixedPitchMeasure::default())?;
    let geometry = layout.geometry;
    let stats = &layout.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} x {} pt",
        "Page".bold(),
        geometry.width,
        geometry.height
    );
    println!("{}: {}", "Pages".bold(), layout.page_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!(
        "{}: {} ({} segments)",
        "Tables".bold(),
        stats.table_count,
        stats.table_segment_count
    );
    println!("{}: {}", "Rules".bold(), stats.rule_count);
    println!("{}: {}", "Text runs".bold(), stats.text_run_count);

    if stats.skipped_count > 0 {
        println!(
            "{}: {}",
            "Skipped (empty)".yellow(),
            stats.skipped_count
        );
    }

    Ok(())
}

fn cmd_convert(
    inputs: &[PathBuf],
    output_dir: &Path,
    label: Option<&str>,
    args: &LayoutArgs,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = args.to_options();
    let measure = FixedPitchMeasure::default();
    let mut written = Vec::with_capacity(inputs.len());

    for input in inputs {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(stem.to_string());

        let text = fs::read_to_string(input)?;
        let layout = layout_markdown(&text, &options, &measure)?;
        let json = mdpage::render::to_json(&layout, JsonFormat::Pretty)?;

        let name = artifact_filename(label.unwrap_or(&stem), "json", &chrono::Local::now());
        let path = output_dir.join(name);
        fs::write(&path, &json)?;
        log::debug!("{} -> {}", input.display(), path.display());

        written.push(path);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(written)
}

fn cmd_version() {
    println!("{} {}", "mdpage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown pagination tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/mdpage".dimmed());
    println!("License: MIT");
}
