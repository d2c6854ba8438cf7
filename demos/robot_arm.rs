use std::path::PathBuf;

use blockscene::{BlockReference, Scene};
use clap::Parser;
use glam::DVec3;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

const ROBOT_ARM: &str = include_str!("robot_arm.json");

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(help = "Path to a scene .json file. Loads the bundled seven link arm if omitted.")]
	scene_path: Option<PathBuf>,
	#[arg(long, default_value_t = 0.0, help = "Angle in radians to bend every link below the root about its x axis")]
	bend: f64,
	#[arg(long, help = "Log at debug level")]
	verbose: bool,
}

fn bend_links(node: &mut BlockReference, radians: f64) {
	for child in node.children_mut() {
		child.rotate_about_pivot(radians, DVec3::X);
		bend_links(child, radians);
	}
}

fn main() {
	let cli = Cli::parse();

	tracing_subscriber::registry()
		.with(fmt::layer())
		.with(if cli.verbose { LevelFilter::TRACE } else { LevelFilter::INFO })
		.init();

	let mut scene = match &cli.scene_path {
		Some(path) => Scene::from_json_str(&std::fs::read_to_string(path).unwrap()).unwrap(),
		None => Scene::from_json_str(ROBOT_ARM).unwrap(),
	};

	if cli.bend != 0.0 {
		bend_links(&mut scene.root, cli.bend);
	}
	scene.update();

	println!("{scene}");

	match scene.tight_bounding_box() {
		Some(bbox) => println!("bounds: {} .. {}", bbox.min, bbox.max),
		None => println!("bounds: (empty)"),
	}

	let mut tip = &scene.root;
	while let Some(child) = tip.children().first() {
		tip = child;
	}
	println!("tip origin: {}", tip.world_xform().transform_point3(DVec3::ZERO));
}
