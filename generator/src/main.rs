use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use terrain::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON file with a terrain config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The seed for terrain generation
    #[arg(short, long)]
    seed: Option<u32>,

    /// Quads along X
    #[arg(long)]
    width: Option<usize>,

    /// Quads along Z
    #[arg(long)]
    depth: Option<usize>,

    /// Noise sampling offset along X
    #[arg(long, allow_negative_numbers = true)]
    origin_x: Option<f32>,

    /// Noise sampling offset along Z
    #[arg(long, allow_negative_numbers = true)]
    origin_z: Option<f32>,

    /// Number of fractal octaves
    #[arg(long)]
    octaves: Option<u32>,

    /// Per-octave frequency multiplier
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Per-octave amplitude multiplier, expected in [0, 1]
    #[arg(long)]
    gain: Option<f64>,

    /// Input coordinate scale for the noise lookup
    #[arg(long)]
    noise_scale: Option<f64>,

    /// Multiplier turning fractal noise into vertex heights
    #[arg(long, allow_negative_numbers = true)]
    height_scale: Option<f32>,

    /// Normalize colors against a range that always includes 0
    #[arg(long, conflicts_with = "fixed_range")]
    zero_seeded: bool,

    /// Normalize colors against a fixed MIN MAX height range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    fixed_range: Option<Vec<f32>>,

    /// Sample heights on all cores
    #[arg(long)]
    parallel: bool,

    /// The output PNG file path
    #[arg(short, long, default_value = "target/terrain.png")]
    output: PathBuf,

    /// Enable wireframe overlay of the triangulation
    #[arg(long)]
    wireframe: bool,

    /// Pixels per world unit when rendering the image
    #[arg(long, default_value_t = 10)]
    pixels: u32,

    /// Print the effective config as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<TerrainConfig> {
        let mut config = match &self.config {
            Some(path) => TerrainConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TerrainConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(x) = self.origin_x {
            config.origin.x = x;
        }
        if let Some(z) = self.origin_z {
            config.origin.z = z;
        }
        if let Some(height_scale) = self.height_scale {
            config.height_scale = height_scale;
        }

        let noise = config.noise;
        config.noise = NoiseParameters::new(
            self.octaves.unwrap_or(noise.octaves()),
            self.lacunarity.unwrap_or(noise.lacunarity()),
            self.gain.unwrap_or(noise.gain()),
            self.noise_scale.unwrap_or(noise.scale()),
        );

        if self.zero_seeded {
            config.normalization = HeightNormalization::ZeroSeeded;
        }
        if let Some(range) = &self.fixed_range {
            config.normalization = HeightNormalization::Fixed {
                min: range[0],
                max: range[1],
            };
        }

        Ok(config)
    }
}

struct TerrainVisualizer {
    pixels: u32,
}

impl TerrainVisualizer {
    fn new(pixels: u32) -> Result<Self> {
        if pixels == 0 {
            bail!("--pixels must be at least 1");
        }
        Ok(Self { pixels })
    }

    /// Pixel dimensions of the preview for a `width` x `depth` quad grid.
    fn image_size(&self, width: usize, depth: usize) -> Result<(u32, u32)> {
        let scaled = |quads: usize| {
            u32::try_from(quads)
                .ok()
                .and_then(|q| q.checked_mul(self.pixels))
        };
        match (scaled(width), scaled(depth)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => bail!(
                "a {}x{} grid at {} pixels per unit is too large to render",
                width,
                depth,
                self.pixels
            ),
        }
    }

    /// Top-down view with vertex colors blended bilinearly across each quad.
    fn render_colors(&self, mesh: &TerrainMesh) -> Result<RgbImage> {
        let (img_w, img_h) = self.image_size(mesh.width, mesh.depth)?;
        let row = mesh.width + 1;
        let px = self.pixels as f32;

        Ok(RgbImage::from_fn(img_w, img_h, |x, y| {
            let gx = (x as f32 + 0.5) / px;
            let gz = (y as f32 + 0.5) / px;
            let cx = (gx.floor() as usize).min(mesh.width - 1);
            let cz = (gz.floor() as usize).min(mesh.depth - 1);
            let (fx, fz) = (gx - cx as f32, gz - cz as f32);

            let c00 = mesh.colors[cz * row + cx];
            let c10 = mesh.colors[cz * row + cx + 1];
            let c01 = mesh.colors[(cz + 1) * row + cx];
            let c11 = mesh.colors[(cz + 1) * row + cx + 1];

            let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
            let blend = |a: f32, b: f32, c: f32, d: f32| lerp(lerp(a, b, fx), lerp(c, d, fx), fz);
            let color = Rgba::new(
                blend(c00.r, c10.r, c01.r, c11.r),
                blend(c00.g, c10.g, c01.g, c11.g),
                blend(c00.b, c10.b, c01.b, c11.b),
                1.0,
            )
            .to_rgba8();

            Rgb([color[0], color[1], color[2]])
        }))
    }

    /// Draws every triangle edge over `base`.
    fn wireframe_on_colors(&self, base: &RgbImage, mesh: &TerrainMesh) -> RgbImage {
        let mut img = base.clone();
        let (w, h) = img.dimensions();
        let color = Rgb([255, 0, 0]);
        let scale = self.pixels as f32;
        let p = |i: u32| {
            let v = mesh.vertices[i as usize];
            (
                (v.x * scale).clamp(0.0, w as f32 - 1.0),
                (v.z * scale).clamp(0.0, h as f32 - 1.0),
            )
        };

        for [a, b, c] in mesh.triangles() {
            for (s, e) in [(a, b), (b, c), (c, a)] {
                draw_line_segment_mut(&mut img, p(s), p(e), color);
            }
        }
        img
    }

    fn save(&self, mesh: &TerrainMesh, wireframe: bool, output_path: &Path) -> Result<()> {
        let mut img = self.render_colors(mesh)?;
        if wireframe {
            img = self.wireframe_on_colors(&img, mesh);
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        img.save(output_path)
            .with_context(|| format!("saving image to {}", output_path.display()))?;
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.resolve_config()?;
    if args.print_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    let gradient = terrain_gradient()?;
    let visualizer = TerrainVisualizer::new(args.pixels)?;
    visualizer.image_size(config.width, config.depth)?;

    log::info!(
        "Generating {}x{} terrain tile at ({}, {}) with seed {}...",
        config.width,
        config.depth,
        config.origin.x,
        config.origin.z,
        config.seed
    );

    let builder = TerrainMeshBuilder::from_config(&config);
    let mesh = if args.parallel {
        builder.build_parallel(
            config.origin,
            config.width,
            config.depth,
            config.height_scale,
            &gradient,
        )
    } else {
        builder.build(
            config.origin,
            config.width,
            config.depth,
            config.height_scale,
            &gradient,
        )
    }
    .context("building terrain mesh")?;
    mesh.check_invariants()?;

    log::info!(
        "Built mesh with {} vertices and {} triangles, colors normalized over {:.3}..{:.3}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.height_range.min,
        mesh.height_range.max
    );

    log::info!("Saving terrain preview to {}...", args.output.display());
    visualizer.save(&mesh, args.wireframe, &args.output)?;
    log::info!("Done!");

    Ok(())
}
