use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use image::{GrayImage, RgbImage, RgbaImage};
use linear_sampler::{
    Filter, FilterFn, LinearImage, MipChain, Region, SamplerConfig, SinglePixel, mipmap_count,
    resample, sample_point,
};
use serde::{Deserialize, Serialize};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ls_gallery")]
#[command(about = "Run linear-sampler resampling on image fixtures")]
struct Cli {
    /// Log level spec used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize an image and write the result with its metadata
    #[command(name = "resize")]
    Resize(ResizeArgs),
    /// Evaluate an image at one normalized coordinate
    #[command(name = "sample")]
    Sample(SampleArgs),
    /// Tabulate every kernel shape as CSV
    #[command(name = "kernels")]
    Kernels(KernelsArgs),
    /// Build a mip chain and write every level
    #[command(name = "mipmaps")]
    Mipmaps(MipmapsArgs),
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    #[arg(long, required = true)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ResizeArgs {
    #[command(flatten)]
    common: InputArgs,
    #[arg(long)]
    width: usize,
    #[arg(long)]
    height: usize,
    /// Horizontal filter, and vertical too unless --vfilter is given
    #[arg(long)]
    filter: Option<Filter>,
    #[arg(long)]
    vfilter: Option<Filter>,
    /// Kernel radius multiplier
    #[arg(long)]
    radius: Option<f32>,
    /// Source region as `left,top,right,bottom` in normalized coordinates
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,
    /// JSON sampler configuration; flags above override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "out/resize")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct SampleArgs {
    #[command(flatten)]
    common: InputArgs,
    #[arg(long)]
    x: f32,
    #[arg(long)]
    y: f32,
    #[arg(long, default_value = "DEFAULT")]
    filter: Filter,
}

#[derive(Args, Debug, Clone)]
struct KernelsArgs {
    #[arg(long, default_value = "out/kernels")]
    out: PathBuf,
    /// Samples per kernel over `[0, radius]`
    #[arg(long, default_value_t = 65)]
    samples: usize,
}

#[derive(Args, Debug, Clone)]
struct MipmapsArgs {
    #[command(flatten)]
    common: InputArgs,
    #[arg(long, default_value = "DEFAULT")]
    filter: Filter,
    /// Levels including the base; defaults to the full chain
    #[arg(long)]
    levels: Option<usize>,
    #[arg(long, default_value = "out/mipmaps")]
    out: PathBuf,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
struct MetaResize {
    input_size: [usize; 2],
    output_size: [usize; 2],
    channels: usize,
    config: SamplerConfig,
    elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct SampleDto {
    x: f32,
    y: f32,
    filter: String,
    values: Vec<f32>,
}

#[derive(Debug, Clone, Serialize)]
struct KernelDto {
    name: &'static str,
    file: String,
    bounding_radius: f32,
}

#[derive(Debug, Clone, Serialize)]
struct MetaKernels {
    samples: usize,
    kernels: Vec<KernelDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaMipmaps {
    filter: String,
    full_chain_levels: usize,
    built_levels: usize,
    level_sizes: Vec<[usize; 2]>,
    elapsed_ms: f64,
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;

    match cli.cmd {
        Command::Resize(args) => run_resize(args),
        Command::Sample(args) => run_sample(args),
        Command::Kernels(args) => run_kernels(args),
        Command::Mipmaps(args) => run_mipmaps(args),
    }
}

fn setup_logging(level: &str) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log level spec '{level}'"))?
        .log_to_stderr()
        .start()
        .context("starting logger")
}

fn run_resize(args: ResizeArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("target size must be non-zero, got {}x{}.", args.width, args.height);
    }

    let mut config = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<SamplerConfig>(path)?
        }
        None => SamplerConfig::default(),
    };
    if let Some(filter) = args.filter {
        config.horizontal_filter = filter;
        config.vertical_filter = filter;
    }
    if let Some(filter) = args.vfilter {
        config.vertical_filter = filter;
    }
    if let Some(radius) = args.radius {
        config.filter_radius_multiplier = radius;
    }
    if let Some(region) = args.region {
        config.source_region = region;
    }
    if !config.boundaries.all_exclude() {
        bail!("only the exclude boundary mode is supported, got {:?}.", config.boundaries);
    }

    let img = load_input(&args.common.input)?;
    let out_dir = prepare_out_dir(&args.out)?;

    let start = Instant::now();
    let resized = resample(&img, args.width, args.height, &config);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    log::info!(
        "resized {}x{} -> {}x{} ({}/{}) in {elapsed_ms:.2} ms",
        img.width(),
        img.height(),
        resized.width(),
        resized.height(),
        config.horizontal_filter,
        config.vertical_filter
    );

    save_linear(out_dir.join("resized.png"), &resized)?;
    write_json(
        out_dir.join("meta.json"),
        &MetaResize {
            input_size: [img.width(), img.height()],
            output_size: [resized.width(), resized.height()],
            channels: resized.channels(),
            config,
            elapsed_ms,
        },
    )
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let img = load_input(&args.common.input)?;

    let mut px = SinglePixel::new();
    sample_point(&img, args.x, args.y, args.filter, &mut px);
    let values = px.get().map(<[f32]>::to_vec).unwrap_or_default();

    let dto = SampleDto {
        x: args.x,
        y: args.y,
        filter: args.filter.to_string(),
        values,
    };
    let text = serde_json::to_string_pretty(&dto).context("serializing sample")?;
    println!("{text}");
    Ok(())
}

fn run_kernels(args: KernelsArgs) -> Result<()> {
    if args.samples < 2 {
        bail!("need at least 2 samples per kernel, got {}.", args.samples);
    }
    let out_dir = prepare_out_dir(&args.out)?;

    let table = [
        ("box", FilterFn::BOX),
        ("gaussian", FilterFn::GAUSSIAN),
        ("hermite", FilterFn::HERMITE),
        ("mitchell", FilterFn::MITCHELL),
        ("lanczos", FilterFn::LANCZOS),
    ];

    let mut kernels = Vec::with_capacity(table.len());
    for (name, kernel) in table {
        let step = kernel.bounding_radius / (args.samples - 1) as f32;
        let rows: Vec<(f32, f32)> = (0..args.samples)
            .map(|i| {
                let t = i as f32 * step;
                (t, kernel.eval(t))
            })
            .collect();

        let file = format!("{name}.csv");
        write_csv(out_dir.join(&file), &rows)?;
        kernels.push(KernelDto {
            name,
            file,
            bounding_radius: kernel.bounding_radius,
        });
    }

    log::info!("wrote {} kernel tables to {}", kernels.len(), out_dir.display());
    write_json(
        out_dir.join("meta.json"),
        &MetaKernels {
            samples: args.samples,
            kernels,
        },
    )
}

fn run_mipmaps(args: MipmapsArgs) -> Result<()> {
    let img = load_input(&args.common.input)?;
    let out_dir = prepare_out_dir(&args.out)?;

    let full_chain_levels = mipmap_count(&img) + 1;
    let requested = args.levels.unwrap_or(full_chain_levels);

    let start = Instant::now();
    let mut chain = MipChain::new();
    chain.build(&img, args.filter, requested);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let mut sizes = Vec::with_capacity(chain.num_levels());
    for (i, level) in chain.levels().iter().enumerate() {
        sizes.push([level.width(), level.height()]);
        save_linear(out_dir.join(format!("level_{i}.png")), level)?;
    }
    log::info!("built {} mip levels in {elapsed_ms:.2} ms", chain.num_levels());

    write_json(
        out_dir.join("meta.json"),
        &MetaMipmaps {
            filter: args.filter.to_string(),
            full_chain_levels,
            built_levels: chain.num_levels(),
            level_sizes: sizes,
            elapsed_ms,
        },
    )
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_region(s: &str) -> Result<Region, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid region '{s}': {e}"))?;
    match parts[..] {
        [left, top, right, bottom] => Ok(Region::new(left, top, right, bottom)),
        _ => Err(format!(
            "region needs 4 comma-separated values, got {}",
            parts.len()
        )),
    }
}

/// Decodes a PNG into a 3- or 4-channel image with values in `[0, 1]`.
fn load_input(path: &Path) -> Result<LinearImage> {
    ensure_file_exists(path, "input")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;

    let (channels, (w, h), data) = if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        (4, rgba.dimensions(), rgba.into_raw())
    } else {
        let rgb = dyn_img.to_rgb8();
        (3, rgb.dimensions(), rgb.into_raw())
    };
    let (w, h) = (w as usize, h as usize);
    log::debug!("loaded {} ({w}x{h}, {channels} channels)", path.display());

    LinearImage::from_u8(w, h, channels, &data)
        .with_context(|| format!("constructing linear image from {}", path.display()))
}

fn save_linear(path: PathBuf, img: &LinearImage) -> Result<()> {
    let (w, h) = (img.width() as u32, img.height() as u32);
    let bytes = img.to_u8();
    let saved = match img.channels() {
        1 => GrayImage::from_raw(w, h, bytes)
            .context("constructing GrayImage from raw bytes")?
            .save(&path),
        3 => RgbImage::from_raw(w, h, bytes)
            .context("constructing RgbImage from raw bytes")?
            .save(&path),
        4 => RgbaImage::from_raw(w, h, bytes)
            .context("constructing RgbaImage from raw bytes")?
            .save(&path),
        n => bail!("cannot save an image with {n} channels as PNG."),
    };
    saved.with_context(|| format!("saving image {}", path.display()))
}

fn prepare_out_dir(out: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    Ok(out.to_path_buf())
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn write_csv(path: PathBuf, rows: &[(f32, f32)]) -> Result<()> {
    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "t,weight").context("writing csv header")?;
    for (t, w) in rows {
        writeln!(file, "{t},{w}").context("writing csv row")?;
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_region;

    #[test]
    fn region_parses_four_values() {
        let r = parse_region("0.25, 0,1,0.75").expect("valid region");
        assert_eq!((r.left, r.top, r.right, r.bottom), (0.25, 0.0, 1.0, 0.75));
    }

    #[test]
    fn region_rejects_wrong_arity_and_garbage() {
        assert!(parse_region("0,0,1").is_err());
        assert!(parse_region("0,0,1,x").is_err());
    }
}
