use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sketch_canvas::keygen::UlidKeyGen;
use sketch_canvas::requests::{CreateCanvas, DrawRect, FloodFill};
use sketch_canvas::store::DirStore;
use sketch_canvas::{CanvasService, Point, Rectangle, ServiceConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sketch-canvas",
    version,
    about = "Draw on ASCII canvases kept in a document store"
)]
struct Cli {
    /// Directory holding the canvas documents
    #[arg(short = 's', long, default_value = "canvases", global = true)]
    store: PathBuf,

    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Super-verbose mode
    #[arg(long = "vv", global = true)]
    super_verbose: bool,

    /// Widest canvas that may be created
    #[arg(long, global = true)]
    max_width: Option<u32>,

    /// Tallest canvas that may be created
    #[arg(long, global = true)]
    max_height: Option<u32>,

    /// Keys per page when listing without --limit
    #[arg(long, global = true)]
    page_limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a blank canvas and print its key
    Create {
        #[arg(long, default_value = "")]
        name: String,
        width: u32,
        height: u32,
    },
    /// List document keys
    List {
        #[arg(long, default_value_t = 0)]
        cursor: u64,
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Print a canvas
    Show {
        key: String,
        /// Print the stored record instead of the grid
        #[arg(long)]
        json: bool,
    },
    /// Delete a canvas
    Delete { key: String },
    /// Draw a rectangle with an optional fill and outline character
    Rect {
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        #[arg(long, allow_hyphen_values = true)]
        y: i64,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long, default_value = "")]
        fill: String,
        #[arg(long, default_value = "")]
        outline: String,
    },
    /// Flood fill the region around a cell
    Fill {
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        #[arg(long, allow_hyphen_values = true)]
        y: i64,
        #[arg(long)]
        fill: String,
    },
    /// Answer JSON commands read line by line from stdin
    Serve,
}

fn init_logging(cli: &Cli) {
    let level = if cli.super_verbose {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn config(cli: &Cli) -> Result<ServiceConfig> {
    let defaults = ServiceConfig::default();
    let config = ServiceConfig {
        page_limit: cli.page_limit.unwrap_or(defaults.page_limit),
        max_width: cli.max_width.unwrap_or(defaults.max_width),
        max_height: cli.max_height.unwrap_or(defaults.max_height),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let store = DirStore::open(&cli.store)
        .with_context(|| format!("failed to open canvas store at {}", cli.store.display()))?;
    let service = CanvasService::new(store, UlidKeyGen::new(), config(&cli)?);

    match cli.command {
        Command::Create { name, width, height } => {
            let key = service.create_document(CreateCanvas { name, width, height })?;
            println!("{}", key);
        }
        Command::List { cursor, limit } => {
            let page = service.list_documents(cursor, limit)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Show { key, json } => {
            let mut canvas = service.get_document(&key)?;
            if json {
                println!("{}", String::from_utf8(canvas.encode()?)?);
            } else {
                println!("{}", canvas.render());
            }
        }
        Command::Delete { key } => {
            service.delete_document(&key)?;
        }
        Command::Rect {
            key,
            x,
            y,
            width,
            height,
            fill,
            outline,
        } => {
            let req = DrawRect {
                rect: Rectangle::new(Point::new(x, y), width, height),
                fill,
                outline,
            };
            let mut canvas = service
                .draw_rect(&key, &req)
                .with_context(|| format!("failed to draw rectangle on {}", key))?;
            println!("{}", canvas.render());
        }
        Command::Fill { key, x, y, fill } => {
            let req = FloodFill {
                origin: Point::new(x, y),
                fill,
            };
            let mut canvas = service
                .flood_fill(&key, &req)
                .with_context(|| format!("failed to flood fill {}", key))?;
            println!("{}", canvas.render());
        }
        Command::Serve => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            sketch_canvas::serve::serve_lines(&service, stdin.lock(), stdout.lock())
                .context("serve loop failed")?;
        }
    }

    Ok(())
}
