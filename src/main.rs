use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use xmledit::{
    expand, reduce,
    utils::{load_document, write_file},
    Depth, FormatConfig, Formatter, Order, Result, XmlFormatter,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path
    #[arg(short, long)]
    file: String,

    /// Output file path
    #[arg(short, long)]
    output: Option<String>,

    /// Collapse single-text child elements into attributes
    #[arg(short, long, conflicts_with = "expand")]
    reduce: bool,

    /// Promote attributes into child elements
    #[arg(short, long)]
    expand: bool,

    /// Expand attributes even when a child of the same name exists
    #[arg(long, requires = "expand")]
    force: bool,

    /// Allow reducing elements whose text spans several lines
    #[arg(long, requires = "reduce")]
    multiline: bool,

    /// Levels to rewrite or search below the root (negative for all)
    #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
    depth: i64,

    /// Print every element with this name instead of the whole document
    #[arg(long)]
    find: Option<String>,

    /// Report matches level by level instead of in document order
    #[arg(long)]
    level_order: bool,

    /// Write attributes as child elements
    #[arg(long)]
    attributes_as_elements: bool,

    /// Emit a doctype line after the prolog
    #[arg(long)]
    doctype: Option<String>,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false) // Don't show target
        .without_time() // Don't show timestamps
        .init(); // Initialize the subscriber

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let depth = Depth::from_signed(args.depth);

    info!("Reading file: {}", args.file);
    let mut root = load_document(&args.file)?;

    if args.reduce {
        let count = reduce(&mut root, depth, args.multiline);
        info!("Reduced {} elements", count);
    } else if args.expand {
        let count = expand(&mut root, depth, args.force);
        info!("Expanded {} attributes", count);
    }

    let mut config = FormatConfig {
        indent_spaces: args.indent,
        attributes_as_elements: args.attributes_as_elements,
        doctype: args.doctype,
        ..FormatConfig::default()
    };

    // Queries print matching subtrees only
    if let Some(name) = &args.find {
        let order = if args.level_order {
            Order::Level
        } else {
            Order::Tree
        };
        config.prolog = false;
        config.doctype = None;

        let matches = root.find_all(name, depth, order);
        info!("Found {} <{}> elements", matches.len(), name);
        let mut output = String::new();
        for node in matches {
            output.push_str(&XmlFormatter.format(node, &config)?);
        }
        return emit(args.output.as_deref(), &output);
    }

    let output = XmlFormatter.format(&root, &config)?;
    emit(args.output.as_deref(), &output)
}

fn emit(path: Option<&str>, text: &str) -> Result<()> {
    // Write to file or print to stdout
    match path {
        Some(path) => write_file(path, text),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
