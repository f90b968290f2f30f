//! Turtle Mesher CLI
//!
//! Compose turtle models from a resource pack and export them as OBJ.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use turtle_mesher::{
    load_resource_pack, CraftingTableUpgrade, ModelManager, ObjExport, RendererConfig, ToolUpgrade,
    TurtleFamily, TurtleRenderer, TurtleSide, TurtleState, TurtleUpgrade,
};

#[derive(Parser)]
#[command(name = "turtle-mesher")]
#[command(author, version, about = "Compose turtle models and export them as meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a turtle to OBJ
    Turtle {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Output file name (without extension)
        #[arg(long, default_value = "turtle")]
        name: String,

        /// Turtle family: normal or advanced
        #[arg(short, long, default_value = "normal")]
        family: TurtleFamily,

        /// Dye colour as hex RRGGBB
        #[arg(short, long, value_parser = parse_colour)]
        colour: Option<u32>,

        /// Overlay model location
        #[arg(long)]
        overlay: Option<String>,

        /// Turtle label
        #[arg(long)]
        label: Option<String>,

        /// Left upgrade id ("minecraft:crafting_table" or a tool item id)
        #[arg(long)]
        left: Option<String>,

        /// Right upgrade id
        #[arg(long)]
        right: Option<String>,

        /// Facing in degrees
        #[arg(long, default_value = "180")]
        yaw: f32,

        /// Export the static item model instead of the placed turtle
        #[arg(long)]
        item: bool,

        /// Renderer config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show information about a resource pack
    Info {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,
    },
}

fn parse_colour(s: &str) -> Result<u32, String> {
    let hex = s.trim_start_matches('#');
    u32::from_str_radix(hex, 16)
        .ok()
        .filter(|c| *c <= 0xFF_FFFF)
        .ok_or_else(|| format!("Invalid colour: '{}'. Use RRGGBB", s))
}

fn upgrade_for(id: &str) -> Arc<dyn TurtleUpgrade> {
    match id {
        "minecraft:crafting_table" | "crafting_table" => Arc::new(CraftingTableUpgrade::default()),
        _ => Arc::new(ToolUpgrade::new(id)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Turtle {
            resource_pack,
            output,
            name,
            family,
            colour,
            overlay,
            label,
            left,
            right,
            yaw,
            item,
            config,
        } => {
            let mut state = TurtleState::new(family).with_yaw(yaw);
            state.colour = colour;
            state.overlay = overlay;
            state.label = label;
            state.left_upgrade = left.as_deref().map(upgrade_for);
            state.right_upgrade = right.as_deref().map(upgrade_for);

            let config = match config {
                Some(path) => RendererConfig::load(path)?,
                None => RendererConfig::default(),
            };
            render_turtle(&resource_pack, &output, &name, &state, config, item)?;
        }
        Commands::Info { resource_pack } => {
            show_pack_info(&resource_pack)?;
        }
    }

    Ok(())
}

fn render_turtle(
    resource_pack_path: &Path,
    output_dir: &Path,
    name: &str,
    state: &TurtleState,
    config: RendererConfig,
    item: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading resource pack from {:?}", resource_pack_path);
    let pack = load_resource_pack(resource_pack_path)?;
    let models = ModelManager::from_pack(&pack)?;

    for side in TurtleSide::ALL {
        if let Some(upgrade) = state.upgrade(side) {
            log::info!("  {} upgrade: {}", side, upgrade.id());
        }
    }

    let renderer = TurtleRenderer::new(config);
    let mesh = if item {
        renderer.render_item(state, &models)?
    } else {
        renderer.render(state, &models)?
    };
    println!(
        "Generated {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    if let Some(bounds) = mesh.bounds() {
        println!("  Bounds: {:?} to {:?}", bounds.min, bounds.max);
    }

    let export = ObjExport::from_mesh(&mesh, name)?;
    export.write_to(output_dir)?;
    println!("Exported OBJ to {:?}", output_dir.join(format!("{}.obj", name)));
    Ok(())
}

fn show_pack_info(resource_pack_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading resource pack from {:?}", resource_pack_path);
    let pack = load_resource_pack(resource_pack_path)?;

    println!("\nResource Pack Info:");
    println!("  Models: {}", pack.model_count());
    println!("  Namespaces: {}", pack.namespaces().join(", "));
    Ok(())
}
