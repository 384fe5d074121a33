// src/main.rs

use std::process;

use clap::Parser;
use log::{info, warn};

use midpoint_displacement::{
    DisplacedPathBuilder, DisplacementConfig, DrawPath, EdgeType, MidpointDisplacement,
    PathElement, Point2,
};

#[derive(Parser)]
#[command(version, about = "Draw a midpoint-displaced line as SVG")]
struct Cli {
    /// Start point as "x,y"
    #[arg(long, default_value = "0,100", value_parser = parse_point)]
    from: Point2,

    /// Target point as "x,y"; repeat to chain several edges
    #[arg(long = "to", default_value = "400,100", value_parser = parse_point)]
    targets: Vec<Point2>,

    /// Recursion depth
    #[arg(long, default_value_t = 6)]
    steps: u32,

    /// Displacement magnitude of the first midpoint
    #[arg(long, default_value_t = 40.0)]
    displacement: f64,

    /// Per-level decay exponent; higher is smoother
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    roughness: f64,

    /// Seed for the random stream
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// "straight" or "curved"
    #[arg(long, default_value = "straight")]
    edge: String,

    /// Stroke width in the SVG output
    #[arg(long, default_value_t = 1.0)]
    stroke_width: f64,
}

fn parse_point(s: &str) -> Result<Point2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad x coordinate in \"{s}\": {e}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad y coordinate in \"{s}\": {e}"))?;
    Ok(Point2::new(x, y))
}

fn build_path(cli: &Cli) -> midpoint_displacement::Result<DrawPath> {
    let edge_type: EdgeType = cli.edge.parse()?;
    let config = DisplacementConfig::new(cli.steps, cli.displacement, cli.roughness)?;
    if config.steps() == 0 || config.maximum_displacement() == 0.0 {
        warn!("configuration produces no displacement; output is a plain polyline");
    }

    let mut builder =
        DisplacedPathBuilder::new(MidpointDisplacement::new(config), edge_type, cli.seed);
    builder.move_to(cli.from)?;
    for target in &cli.targets {
        builder.displaced_line_to(*target)?;
    }
    Ok(builder.into_path())
}

fn bounds(path: &DrawPath) -> (Point2, Point2) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut include = |p: &Point2| {
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
    };
    for element in path.elements() {
        match element {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => include(p),
            PathElement::CubicTo {
                control1,
                control2,
                end,
            } => {
                include(control1);
                include(control2);
                include(end);
            }
        }
    }
    (min, max)
}

fn render_svg(path: &DrawPath, stroke_width: f64) -> String {
    let (min, max) = bounds(path);
    let margin = stroke_width.max(1.0) * 4.0;
    let width = (max.x - min.x) + 2.0 * margin;
    let height = (max.y - min.y) + 2.0 * margin;
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">\n",
            "  <path d=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"{}\"/>\n",
            "</svg>\n"
        ),
        min.x - margin,
        min.y - margin,
        width,
        height,
        width.ceil(),
        height.ceil(),
        path.to_svg_data(),
        stroke_width
    )
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let path = match build_path(&cli) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    info!("built path with {} elements", path.elements().len());

    print!("{}", render_svg(&path, cli.stroke_width));
}
