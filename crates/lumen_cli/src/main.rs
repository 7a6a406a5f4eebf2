//! Lumen command line renderer.
//!
//! Loads a JSON scene (or the built-in reference scene), applies any
//! overrides given on the command line and writes the rendered image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use lumen_core::{is_ppm_path, PpmWriter, RenderSettings, SceneDescription, Shading};
use lumen_renderer::{render, render_image, seeded_rng, World};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "lumen", about = "Path trace a sphere scene", rename_all = "kebab-case")]
struct Opt {
    /// Scene file (JSON). The reference scene is used when omitted.
    #[structopt(long, parse(from_os_str))]
    scene: Option<PathBuf>,

    /// Output image. `.ppm` is streamed as text, other extensions are
    /// encoded by format.
    #[structopt(short, long, default_value = "output.ppm", parse(from_os_str))]
    output: PathBuf,

    #[structopt(long)]
    width: Option<u32>,

    #[structopt(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[structopt(short, long)]
    samples: Option<u32>,

    #[structopt(long)]
    max_depth: Option<u32>,

    /// Fixed random seed for reproducible renders
    #[structopt(long)]
    seed: Option<u64>,

    /// Apply gamma 2.2 to the averaged pixel
    #[structopt(long)]
    gamma: bool,

    /// Shade hits by surface normal instead of tracing paths
    #[structopt(long)]
    normals: bool,

    /// Log filter used when RUST_LOG is not set
    #[structopt(long, default_value = "info")]
    log_level: String,

    /// Write the reference scene to this path and exit
    #[structopt(long, parse(from_os_str))]
    write_default_scene: Option<PathBuf>,
}

impl Opt {
    /// Layer command line overrides on top of the scene's own settings.
    fn apply(&self, mut settings: RenderSettings) -> RenderSettings {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.gamma {
            settings.gamma = true;
        }
        if self.normals {
            settings.shading = Shading::Normals;
        }
        settings
    }
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&opt.log_level))
        .init();

    if let Some(path) = &opt.write_default_scene {
        SceneDescription::reference()
            .save(path)
            .with_context(|| format!("writing reference scene to {}", path.display()))?;
        log::info!("Wrote reference scene to {}", path.display());
        return Ok(());
    }

    let scene = match &opt.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the reference scene");
            SceneDescription::reference()
        }
    };

    let settings = opt.apply(scene.settings.clone());
    let world = World::from_description(&scene, &settings).context("building world")?;

    if is_ppm_path(&opt.output) {
        let mut writer = PpmWriter::create(&opt.output)
            .with_context(|| format!("creating {}", opt.output.display()))?;
        let mut rng = seeded_rng(settings.seed);
        render(&world, &settings, &mut writer, &mut rng).context("rendering")?;
        log::debug!("Streamed {} pixels", writer.written());
    } else {
        let image = render_image(&world, &settings).context("rendering")?;
        image
            .save(&opt.output)
            .with_context(|| format!("saving {}", opt.output.display()))?;
    }

    log::info!("Saved {}", opt.output.display());
    Ok(())
}
