use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use simpleframe::data::{convert, loader};
use simpleframe::{CastMap, Frame};

/// Load a table file and print it.
#[derive(Parser, Debug)]
#[command(name = "simpleframe", version, about)]
struct Args {
    /// Input file (.csv, .parquet or .json column-dict).
    path: PathBuf,

    /// Convert a column, e.g. `--cast price=float`. Kinds: int, float, bool, str, date.
    #[arg(long = "cast", value_name = "NAME=KIND")]
    casts: Vec<String>,

    /// Text treated as a missing value while casting.
    #[arg(long, value_name = "TEXT")]
    na: Option<String>,

    /// Print the column-dict as JSON instead of a preview.
    #[arg(long)]
    json: bool,
}

fn parse_casts(specs: &[String]) -> Result<CastMap> {
    let mut casts = CastMap::new();
    for spec in specs {
        let (name, kind) = spec
            .split_once('=')
            .with_context(|| format!("cast `{spec}` is not NAME=KIND"))?;
        let Some(convert) = convert::by_name(kind) else {
            bail!("unknown cast kind `{kind}` for column `{name}`");
        };
        casts.insert(name, convert);
    }
    Ok(casts)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut frame: Frame = loader::load_file(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        frame.len(),
        frame.width(),
        args.path.display()
    );

    let casts = parse_casts(&args.casts)?;
    if !casts.is_empty() {
        frame = frame
            .cast(&casts, args.na.as_deref())
            .context("casting columns")?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        println!("{frame}");
        for (name, col) in frame.columns() {
            println!("{name}: {:?}", col.col_type());
        }
    }
    Ok(())
}
