use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use image::{DynamicImage, ImageFormat};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use photo_sheet::{LayoutDirection, SheetConfig, SheetOverrides, SheetRenderer};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out copies of ID photos on a print sheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tile one photo over a sheet as many times as it fits
    Grid(GridArgs),
    /// Place four one-inch and two two-inch photos on one sheet
    Mixed(MixedArgs),
    /// Render a sheet for every image found in a directory
    Batch(BatchArgs),
    /// Print the solved layout and photo positions without rendering
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct GridArgs {
    /// Input photo path
    input: PathBuf,
    /// Output image path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: SheetSettings,
}

#[derive(Parser, Debug)]
struct MixedArgs {
    /// One-inch photo path
    small: PathBuf,
    /// Two-inch photo path
    large: PathBuf,
    /// Output image path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: SheetSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of input photos
    input: PathBuf,
    /// Output directory for sheets
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    settings: SheetSettings,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    settings: SheetSettings,
}

#[derive(Parser, Debug, Clone)]
struct SheetSettings {
    /// TOML file with sheet settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Grid orientation strategy
    #[arg(long, value_enum)]
    direction: Option<DirectionChoice>,
    /// Draw light gray cutting guides around every photo
    #[arg(long, overrides_with = "no_crop_line")]
    crop_line: bool,
    /// Leave cutting guides off, even when the config file enables them
    #[arg(long, overrides_with = "crop_line")]
    no_crop_line: bool,
    /// Sheet width in pixels
    #[arg(long)]
    canvas_width: Option<u32>,
    /// Sheet height in pixels
    #[arg(long)]
    canvas_height: Option<u32>,
    /// Width every photo copy is resized to
    #[arg(long)]
    cell_width: Option<u32>,
    /// Height every photo copy is resized to
    #[arg(long)]
    cell_height: Option<u32>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DirectionChoice {
    Auto,
    Horizontal,
    Vertical,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Grid(args) => grid(args),
        Commands::Mixed(args) => mixed(args),
        Commands::Batch(args) => batch(args),
        Commands::Plan(args) => plan(args),
    }
}

fn grid(args: GridArgs) -> Result<()> {
    let renderer = SheetRenderer::new(args.settings.to_config()?);
    let photo = open_photo(&args.input)?;
    let output = renderer
        .render(&photo)
        .with_context(|| format!("failed to lay out {:?}", args.input))?;

    output.sheet.save(&args.output).with_context(|| format!("failed to write {:?}", args.output))?;
    info!("wrote {} photos to {:?}", output.plan.len(), args.output);
    Ok(())
}

fn mixed(args: MixedArgs) -> Result<()> {
    let renderer = SheetRenderer::new(args.settings.to_config()?);
    let small = open_photo(&args.small)?;
    let large = open_photo(&args.large)?;
    let sheet = renderer
        .render_mixed(&small, &large)
        .with_context(|| format!("failed to lay out {:?} and {:?}", args.small, args.large))?;

    sheet.save(&args.output).with_context(|| format!("failed to write {:?}", args.output))?;
    info!("wrote mixed sheet to {:?}", args.output);
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let renderer = SheetRenderer::new(args.settings.to_config()?);
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let inputs = collect_images(&args.input)?;
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sheets",
        )?
        .progress_chars("=> "),
    );

    let mut failed = 0;
    for input in &inputs {
        if let Err(err) = render_one(&renderer, input, &args.out_dir) {
            progress.suspend(|| warn!("skipping {:?}: {err:#}", input));
            failed += 1;
        }
        progress.inc(1);
    }

    progress.finish_with_message(format!("Sheets written to {:?}", args.out_dir));
    if failed > 0 {
        anyhow::bail!("{failed} of {} photos could not be laid out", inputs.len());
    }
    Ok(())
}

fn plan(args: PlanArgs) -> Result<()> {
    let renderer = SheetRenderer::new(args.settings.to_config()?);
    let (layout, plan) = renderer.plan();
    let mode = layout.mode;

    println!(
        "{} columns x {} rows ({:?}), block {}x{}, cell {}x{}",
        mode.columns,
        mode.rows,
        mode.orientation,
        layout.block.width,
        layout.block.height,
        plan.cell.width,
        plan.cell.height
    );
    for position in &plan.positions {
        println!("{} {}", position.x, position.y);
    }

    if mode.is_degenerate() {
        warn!("photo does not fit the sheet");
    }
    Ok(())
}

fn render_one(renderer: &SheetRenderer, input: &Path, out_dir: &Path) -> Result<()> {
    let photo = open_photo(input)?;
    let output = renderer.render(&photo)?;

    let stem = input.file_stem().and_then(|stem| stem.to_str()).unwrap_or("photo");
    let path = out_dir.join(format!("{stem}_sheet.png"));
    output.sheet.save(&path).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

fn open_photo(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to open image {:?}", path))
}

fn collect_images(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| ImageFormat::from_path(path).is_ok())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }
    Ok(entries)
}

impl SheetSettings {
    fn to_config(&self) -> Result<SheetConfig> {
        let file = match &self.config {
            Some(path) => load_overrides(path)?,
            None => SheetOverrides::default(),
        };

        let mut config = SheetConfig::default();
        file.merge(self.to_overrides()).apply(&mut config);
        Ok(config)
    }

    fn to_overrides(&self) -> SheetOverrides {
        SheetOverrides {
            layout_direction: self.direction.map(DirectionChoice::to_direction),
            crop_line: match (self.crop_line, self.no_crop_line) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        }
    }
}

fn load_overrides(path: &Path) -> Result<SheetOverrides> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read config {:?}", path))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {:?}", path))
}

impl DirectionChoice {
    fn to_direction(self) -> LayoutDirection {
        match self {
            DirectionChoice::Auto => LayoutDirection::Auto,
            DirectionChoice::Horizontal => LayoutDirection::Horizontal,
            DirectionChoice::Vertical => LayoutDirection::Vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file_values() {
        let cli = Cli::parse_from([
            "photo_sheet_cli",
            "plan",
            "--direction",
            "vertical",
            "--canvas-width",
            "1200",
        ]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };

        let file: SheetOverrides =
            toml::from_str("canvas_width = 900\ncanvas_height = 1000\ncrop_line = true").unwrap();
        let mut config = SheetConfig::default();
        file.merge(args.settings.to_overrides()).apply(&mut config);

        assert_eq!(config.direction, LayoutDirection::Vertical);
        assert_eq!((config.canvas.width, config.canvas.height), (1200, 1000));
        assert!(config.crop_line);
    }

    #[test]
    fn no_crop_line_flag_disables_file_setting() {
        let cli = Cli::parse_from(["photo_sheet_cli", "plan", "--no-crop-line"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };

        let file: SheetOverrides = toml::from_str("crop_line = true").unwrap();
        let mut config = SheetConfig::default();
        file.merge(args.settings.to_overrides()).apply(&mut config);
        assert!(!config.crop_line);
    }

    #[test]
    fn last_crop_line_flag_wins() {
        let cli = Cli::parse_from(["photo_sheet_cli", "plan", "--no-crop-line", "--crop-line"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };
        assert_eq!(args.settings.to_overrides().crop_line, Some(true));

        let cli = Cli::parse_from(["photo_sheet_cli", "plan"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan subcommand");
        };
        assert_eq!(args.settings.to_overrides().crop_line, None);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let parsed: Result<SheetOverrides, _> = toml::from_str("gap_horizontal = 10");
        assert!(parsed.is_err());
    }

    #[test]
    fn config_file_directions_use_lowercase_names() {
        let parsed: SheetOverrides = toml::from_str("layout_direction = \"horizontal\"").unwrap();
        assert_eq!(parsed.layout_direction, Some(LayoutDirection::Horizontal));
    }
}
