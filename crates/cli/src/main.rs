use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use report::CompareReport;
use std::path::{Path, PathBuf};
use stub_index::{KindFilter, QueryFilter, StubIndex, StubKind, StubParser};
use stub_tree::{
    PrintVisitor, StatisticsVisitor, StructureTree, TreeBuilder, TreeTransformer, Visitor,
};

mod config;
mod report;

#[derive(Parser)]
#[command(name = "stubs")]
#[command(about = "Declaration stub index and structure tree explorer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML file with builder and parser settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract declarations from files and query the index
    Index(IndexArgs),

    /// Print the structure tree of a file
    Tree(TreeArgs),

    /// Compare the structure trees of two files
    Compare(CompareArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// Source files to index
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Exact declaration name
    #[arg(long)]
    name: Option<String>,

    /// Declaration kind: class, function or variable
    #[arg(long)]
    kind: Option<StubKind>,

    /// File path filter (substring when combined with --name/--kind)
    #[arg(long)]
    file: Option<String>,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TreeArgs {
    /// Source file
    file: PathBuf,

    /// Keep only files, types, functions and variables
    #[arg(long)]
    simplify: bool,

    /// Append node statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// First source file
    left: PathBuf,

    /// Second source file
    right: PathBuf,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Index(args) => args.json,
        Commands::Compare(args) => args.json,
        Commands::Tree(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Index(args) => run_index(args, &config)?,
        Commands::Tree(args) => run_tree(args, &config)?,
        Commands::Compare(args) => run_compare(args, &config)?,
    }

    Ok(())
}

fn run_index(args: IndexArgs, config: &CliConfig) -> Result<()> {
    let parser = StubParser::new(config.builder.parser.clone());

    let mut index = StubIndex::new();
    for path in &args.files {
        let stubs = parser
            .parse_file(path)
            .with_context(|| format!("Failed to index {}", path.display()))?;
        index.extend(stubs);
    }
    log::info!("Indexed {} stubs from {} files", index.len(), args.files.len());

    let filter = QueryFilter {
        kind: args.kind.map_or(KindFilter::Any, KindFilter::Exactly),
        name: args.name,
        file: args.file,
    };
    let results = index.query(&filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", report::render_stubs(&results));
    }
    Ok(())
}

fn run_tree(args: TreeArgs, config: &CliConfig) -> Result<()> {
    let mut tree = StructureTree::new();
    let root = build_tree(&mut tree, &args.file, config)?;

    let shown = if args.simplify {
        TreeTransformer::new(&mut tree)
            .simplify(root)
            .context("Simplified tree is empty")?
    } else {
        root
    };

    let mut printer = PrintVisitor::new();
    printer.visit(&tree, shown);
    print!("{}", printer.output());

    if args.stats {
        let mut stats = StatisticsVisitor::new();
        stats.visit(&tree, root);
        println!("{stats}");
    }
    Ok(())
}

fn run_compare(args: CompareArgs, config: &CliConfig) -> Result<()> {
    let mut tree = StructureTree::new();
    let left = build_tree(&mut tree, &args.left, config)?;
    let right = build_tree(&mut tree, &args.right, config)?;

    let report = CompareReport::new(&tree, left, right);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_compare(&report));
    }
    Ok(())
}

fn build_tree(
    tree: &mut StructureTree,
    path: &Path,
    config: &CliConfig,
) -> Result<stub_tree::NodeId> {
    TreeBuilder::new(config.builder.clone())
        .build_from_file(tree, path)
        .with_context(|| format!("Failed to build tree for {}", path.display()))
}
