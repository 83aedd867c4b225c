//! Command-line renderer.
//!
//! Usage: glint <scene.json> <output-stem> [--naive]
//!
//! Writes `<output-stem>.png` and `<output-stem>_depth.png`. The
//! `--naive` flag forces the linear-scan container regardless of what
//! the scene file asks for.

mod setup;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glint_core::SceneDescription;
use glint_render::{render, RenderConfig};

struct Args {
    scene_path: PathBuf,
    output_stem: PathBuf,
    force_naive: bool,
}

fn parse_args() -> Result<Args> {
    let mut scene_path = None;
    let mut output_stem = None;
    let mut force_naive = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--naive" => force_naive = true,
            "--help" | "-h" => {
                bail!("usage: glint <scene.json> <output-stem> [--naive]");
            }
            _ if scene_path.is_none() => scene_path = Some(PathBuf::from(arg)),
            _ if output_stem.is_none() => output_stem = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {}", arg),
        }
    }

    match (scene_path, output_stem) {
        (Some(scene_path), Some(output_stem)) => Ok(Args {
            scene_path,
            output_stem,
            force_naive,
        }),
        _ => bail!("usage: glint <scene.json> <output-stem> [--naive]"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let description = SceneDescription::load(&args.scene_path)
        .with_context(|| format!("loading scene {}", args.scene_path.display()))?;

    let base_dir = args
        .scene_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let scene = setup::build_scene(&description, base_dir, args.force_naive)?;
    let camera = setup::build_camera(&description);

    if args.force_naive {
        log::info!("Container override: naive linear scan");
    }

    let config = RenderConfig {
        samples_per_pixel: description.settings.samples_per_pixel,
        seed: description.settings.seed,
        ..Default::default()
    };

    let (frame, stats) = render(&scene, &camera, &config);
    log::info!(
        "Traced {} rays, deepest recursion {}",
        stats.rays_cast,
        stats.deepest_recursion
    );

    let color_path = args.output_stem.with_extension("png");
    frame
        .save_color(&color_path)
        .with_context(|| format!("writing {}", color_path.display()))?;

    let mut depth_name = args
        .output_stem
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    depth_name.push("_depth");
    let depth_path = args.output_stem.with_file_name(depth_name).with_extension("png");
    frame
        .save_depth(&depth_path)
        .with_context(|| format!("writing {}", depth_path.display()))?;

    Ok(())
}
