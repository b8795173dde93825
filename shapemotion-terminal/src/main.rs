/// Shapemotion terminal demo
///
/// Plays animated shape scenes with the ASCII rasterizer.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - +/-: Zoom
///   - Space: Pause the scene clock
///   - N: Next scene
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs;
use shapemotion_core::{stl, Color, Texture, TextureAssets};
use shapemotion_terminal::{cli::Cli, scenes, TerminalApp};

fn load_textures() -> anyhow::Result<TextureAssets> {
    let mut textures = TextureAssets::new();
    textures.insert(
        "checker",
        Texture::checkerboard(64, 8, Color::WHITE, Color::rgb(0.8, 0.3, 0.1))?,
    );
    Ok(textures)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for name in scenes::SCENE_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    // Textures are loaded once and shared by every scene
    let textures = load_textures()?;
    info!("loaded {} textures", textures.len());

    let mut app = TerminalApp::new(textures, cli.fps)?;
    match &cli.stl {
        Some(path) => {
            let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let mesh = stl::parse_stl(&data).with_context(|| format!("parsing {}", path.display()))?;
            info!("loaded {} triangles from {}", mesh.triangles.len(), path.display());
            app.show_mesh(&path.display().to_string(), mesh)?;
        }
        None => app.show_scene(&cli.scene)?,
    }

    app.run()
}
