//! unwiki CLI - wiki table extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unwiki::fetch::FetchOptions;
use unwiki::render::{self, filename_with_extension};
use unwiki::{
    Document, HtmlParser, JsonFormat, LineEnding, ParseOptions, RenderOptions, TableExtractor,
    TITLE_NOT_FOUND,
};

#[derive(Parser)]
#[command(name = "unwiki")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "List wiki tables and export them as CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables of a page with their titles and row counts
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export one table as CSV
    Csv {
        #[command(flatten)]
        source: SourceArgs,

        /// Table index, as shown by `list`
        #[arg(value_name = "INDEX")]
        index: usize,

        /// Output file (defaults to a name derived from the page title)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Tab-separated output
        #[arg(long)]
        tsv: bool,

        /// Use LF line endings instead of CRLF
        #[arg(long)]
        lf: bool,

        /// Pad rows to the widest row
        #[arg(long)]
        pad: bool,

        /// Fold expansion rows into their primary rows
        #[arg(long)]
        merge_rows: bool,
    },

    /// Export one table as JSON
    Json {
        #[command(flatten)]
        source: SourceArgs,

        /// Table index, as shown by `list`
        #[arg(value_name = "INDEX")]
        index: usize,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fold expansion rows into their primary rows
        #[arg(long)]
        merge_rows: bool,
    },

    /// Show page information
    Info {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct SourceArgs {
    /// Page URL (http or https) or saved HTML file
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Class marking data tables
    #[arg(long, env = "UNWIKI_TABLE_CLASS", default_value = "wikitable")]
    table_class: String,

    /// Skip row merges that cannot be made instead of failing
    #[arg(long)]
    lenient: bool,

    /// Only search a table's own preceding siblings for its title
    #[arg(long)]
    siblings_only: bool,

    /// User agent sent when fetching
    #[arg(long, env = "UNWIKI_USER_AGENT")]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

impl SourceArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new().with_table_class(self.table_class.as_str());
        if self.lenient {
            options = options.lenient();
        }
        if self.siblings_only {
            options = options.siblings_only();
        }
        options
    }

    fn fetch_options(&self) -> FetchOptions {
        let mut options = FetchOptions::new().with_timeout(Duration::from_secs(self.timeout));
        if let Some(ref agent) = self.user_agent {
            options = options.with_user_agent(agent.as_str());
        }
        options
    }

    fn load(&self, options: ParseOptions) -> Result<Document, Box<dyn std::error::Error>> {
        log::debug!(
            "Loading {} (table class {:?}, {:?}, {:?}, merge rows: {})",
            self.source,
            options.table_class,
            options.error_mode,
            options.title_scope,
            options.merge_on_extract
        );

        if !is_url(&self.source) {
            return Ok(HtmlParser::open_with_options(&self.source, options)?.parse());
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}...", self.source));

        let fetch_options = self.fetch_options();
        log::debug!(
            "Fetching with user agent {:?}, timeout {:?}",
            fetch_options.user_agent,
            fetch_options.timeout
        );

        let result = unwiki::fetch::fetch_document(&self.source, options, &fetch_options);
        pb.finish_and_clear();
        let doc = result?;
        log::info!("Found {} tables", doc.metadata.table_count);
        Ok(doc)
    }
}

fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { source, json } => cmd_list(&source, json),
        Commands::Csv {
            source,
            index,
            output,
            stdout,
            tsv,
            lf,
            pad,
            merge_rows,
        } => {
            let mut render_options = RenderOptions::new().with_padding(pad);
            if tsv {
                render_options = render_options.tsv();
            }
            if lf {
                render_options = render_options.with_line_ending(LineEnding::Lf);
            }
            cmd_csv(
                &source,
                index,
                output.as_deref(),
                stdout,
                &render_options,
                merge_rows,
            )
        }
        Commands::Json {
            source,
            index,
            output,
            compact,
            merge_rows,
        } => cmd_json(&source, index, output.as_deref(), compact, merge_rows),
        Commands::Info { source } => cmd_info(&source),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_list(source: &SourceArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let options = source.parse_options();
    let doc = source.load(options.clone())?;
    let listing = TableExtractor::with_options(&doc, options).list();

    if json {
        println!("{}", render::to_json(&listing, JsonFormat::Pretty)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("{}", "No tables found".yellow());
        return Ok(());
    }

    for table in &listing {
        let title = if table.title == TITLE_NOT_FOUND {
            table.title.dimmed()
        } else {
            table.title.bold()
        };
        println!(
            "{:>3}  {}  {}",
            table.index.to_string().cyan(),
            title,
            format!("({} rows)", table.row_count).dimmed()
        );
        if let Some(ref issue) = table.issue {
            println!("     {} {}", "warning:".yellow(), issue);
        }
    }

    Ok(())
}

fn cmd_csv(
    source: &SourceArgs,
    index: usize,
    output: Option<&Path>,
    stdout: bool,
    render_options: &RenderOptions,
    merge_rows: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = source.parse_options().with_merge_on_extract(merge_rows);
    let doc = source.load(options.clone())?;
    let grid = TableExtractor::with_options(&doc, options).extract(index)?;
    let content = render::to_csv(&grid, render_options)?;

    if stdout {
        print!("{}", content);
        return Ok(());
    }

    let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(filename_with_extension(
            doc.title(),
            index,
            render_options.extension(),
        ))
    });
    fs::write(&path, &content)?;
    println!(
        "{} {} ({} rows)",
        "Saved to".green(),
        path.display(),
        grid.non_empty_rows().count()
    );

    Ok(())
}

fn cmd_json(
    source: &SourceArgs,
    index: usize,
    output: Option<&Path>,
    compact: bool,
    merge_rows: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = source.parse_options().with_merge_on_extract(merge_rows);
    let doc = source.load(options.clone())?;
    let grid = TableExtractor::with_options(&doc, options).extract(index)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&grid, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = source.parse_options();
    let doc = source.load(options.clone())?;
    let extractor = TableExtractor::with_options(&doc, options);
    let listing = extractor.list();
    let spanned = extractor
        .tables()
        .iter()
        .filter(|t| t.has_merged_cells())
        .count();

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Source".bold(), source.source);
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref charset) = doc.metadata.charset {
        println!("{}: {}", "Charset".bold(), charset);
    }
    if let Some(parsed_at) = doc.metadata.parsed_at {
        println!("{}: {}", "Parsed".bold(), parsed_at.to_rfc3339());
    }

    println!();
    println!("{}", "Table Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let rows: usize = listing.iter().map(|t| t.row_count).sum();
    let titled = listing.iter().filter(|t| t.has_title()).count();
    let issues = listing.iter().filter(|t| t.issue.is_some()).count();

    println!("{}: {}", "Tables".bold(), doc.metadata.table_count);
    println!("{}: {}", "Titled".bold(), titled);
    println!("{}: {}", "Rows".bold(), rows);
    println!("{}: {}", "With spans".bold(), spanned);
    if issues > 0 {
        println!("{}: {}", "Merge issues".bold().yellow(), issues);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unwiki".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Wiki table extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unwiki".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_args(source: &str) -> SourceArgs {
        SourceArgs {
            source: source.to_string(),
            table_class: "wikitable".to_string(),
            lenient: false,
            siblings_only: false,
            user_agent: None,
            timeout: 30,
        }
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://en.wikipedia.org/wiki/Film"));
        assert!(is_url("HTTP://example.org"));
        assert!(!is_url("page.html"));
        assert!(!is_url("./https/page.html"));
    }

    #[test]
    fn test_load_local_file() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(
            &path,
            r#"<h2>Cast</h2><table class="wikitable"><tr><td>x</td></tr></table>"#,
        )
        .unwrap();

        let args = source_args(path.to_str().unwrap());
        let doc = args.load(args.parse_options()).unwrap();
        assert_eq!(doc.metadata.table_count, 1);
    }

    #[test]
    fn test_parse_options_from_flags() {
        let mut args = source_args("page.html");
        args.table_class = "sortable".to_string();
        args.lenient = true;
        args.siblings_only = true;

        let options = args.parse_options();
        assert_eq!(options.table_class, "sortable");
        assert_eq!(options.error_mode, unwiki::ErrorMode::Lenient);
        assert_eq!(options.title_scope, unwiki::TitleScope::Siblings);
    }
}
