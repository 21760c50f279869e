use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use voxhelper::config::Config;
use voxhelper::{load, log, symbols_in_model, Legend, LogSeverity, PaletteTable, Result};

#[derive(Parser)]
#[command(name = "voxhelper", about = "Inspect and build .vox voxel models")]
struct Cli {
    /// Palette table resource (XML, or JSON by extension)
    #[arg(long, global = true)]
    palette: Option<PathBuf>,
    /// Minimum log severity: debug, info, warning, error, fatal
    #[arg(long, global = true)]
    log_level: Option<LogSeverity>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the size, voxel count and symbol counts of a model
    Info {
        /// Model to inspect
        file: PathBuf,
    },
    /// Build a model from a text grid
    Build {
        /// Symbols in index order, the first one is the empty background
        #[arg(long)]
        legend: String,
        /// Text grid: rows of symbols, layers separated by blank lines
        #[arg(long, short)]
        input: PathBuf,
        /// Output .vox file path
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn info(config: &Config, file: &Path) -> Result<()> {
    let model = load(file)?;
    let (w, h, d) = model.dimensions();
    log(
        format!("{}: {}x{}x{}, {} voxels", file.display(), w, h, d, model.voxel_count()),
        LogSeverity::Info,
    );

    let table = match PaletteTable::load(&config.palette_path) {
        Ok(table) => table,
        Err(err) => {
            log(
                format!("No symbol counts, palette table unavailable: {}", err),
                LogSeverity::Warning,
            );
            return Ok(());
        }
    };

    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut unknown = 0;
    for (symbol, &v) in symbols_in_model(&model, &table).iter().zip(model.voxels()) {
        match symbol {
            Some(c) => *counts.entry(*c).or_default() += 1,
            None if v != 0 => unknown += 1,
            None => {}
        }
    }
    for (symbol, count) in counts {
        log(format!("  {}: {}", symbol, count), LogSeverity::Info);
    }
    if unknown > 0 {
        log(format!("  unmatched colors: {}", unknown), LogSeverity::Info);
    }
    Ok(())
}

fn build(config: &Config, legend: &str, input: &Path, output: &Path) -> Result<()> {
    let table = PaletteTable::load(&config.palette_path)?;
    let legend = Legend::new(legend)?;
    let grid = legend.encode(&fs::read_to_string(input)?)?;
    grid.save(&legend.colors(&table)?, output)?;
    log(
        format!(
            "Saved {}x{}x{} model to {}",
            grid.width,
            grid.height,
            grid.depth,
            output.display()
        ),
        LogSeverity::Info,
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.palette, cli.log_level);
    voxhelper::logger_init(config.log_level);

    let result = match &cli.command {
        Command::Info { file } => info(&config, file),
        Command::Build {
            legend,
            input,
            output,
        } => build(&config, legend, input, output),
    };

    if let Err(err) = result {
        log(format!("{}", err), LogSeverity::Error);
        std::process::exit(1);
    }
}
