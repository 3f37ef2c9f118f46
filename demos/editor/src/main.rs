use argh::FromArgs;
use std::path::PathBuf;

use retouch::{
    imgproc::{filter::FilterKind, padding::BorderMode},
    Axis, Direction, EditOp, EditSession, SessionConfig,
};

#[derive(FromArgs)]
/// Load an image, apply a sequence of edits and save the result
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the edited image, the extension selects the format
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// edit to apply, repeatable and applied in order: gray, blur:<strength>,
    /// sharpen:<strength>, edge:<strength>, width+, width-, height+, height-
    #[argh(option)]
    op: Vec<String>,

    /// optional path to write the display preview to
    #[argh(option)]
    preview_path: Option<PathBuf>,

    /// the viewport bound of the preview as WIDTHxHEIGHT
    #[argh(option, default = "String::from(\"500x500\")")]
    viewport: String,

    /// mirror the borders instead of replicating the edge pixels
    #[argh(switch)]
    reflect: bool,
}

fn parse_op(op: &str) -> Result<EditOp, String> {
    let resize = |axis, direction| EditOp::Resize { axis, direction };

    match op.trim() {
        "gray" | "grayscale" => Ok(EditOp::Grayscale),
        "width+" => Ok(resize(Axis::Width, Direction::Increase)),
        "width-" => Ok(resize(Axis::Width, Direction::Decrease)),
        "height+" => Ok(resize(Axis::Height, Direction::Increase)),
        "height-" => Ok(resize(Axis::Height, Direction::Decrease)),
        other => {
            let (kind, strength) = other
                .split_once(':')
                .ok_or_else(|| format!("unknown edit: {other}"))?;
            let kind = kind.parse::<FilterKind>()?;
            let strength = strength
                .parse::<f64>()
                .map_err(|e| format!("invalid strength in {other}: {e}"))?;
            Ok(EditOp::Filter { kind, strength })
        }
    }
}

fn parse_viewport(viewport: &str) -> Result<[usize; 2], String> {
    let invalid = || format!("invalid viewport: {viewport}");
    let (width, height) = viewport.split_once('x').ok_or_else(invalid)?;
    let width = width.trim().parse::<usize>().map_err(|_| invalid())?;
    let height = height.trim().parse::<usize>().map_err(|_| invalid())?;
    Ok([width, height])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // validate every edit before touching the input
    let ops = args
        .op
        .iter()
        .map(String::as_str)
        .map(parse_op)
        .collect::<Result<Vec<_>, _>>()?;

    let border = if args.reflect {
        BorderMode::Reflect101
    } else {
        BorderMode::Replicate
    };

    let config = SessionConfig::default()
        .with_viewport(parse_viewport(&args.viewport)?.into())
        .with_border(border);

    let mut session = EditSession::with_config(config);

    let image = session.load(&args.image_path)?;
    log::info!(
        "loaded {} ({} {})",
        args.image_path.display(),
        image.size(),
        image.layout()
    );

    for op in ops {
        let image = session.apply(op)?;
        log::info!("{:?} -> {} {}", op, image.size(), image.layout());
    }

    session.save(&args.output_path)?;
    println!("saved edited image to {}", args.output_path.display());

    if let Some(preview_path) = args.preview_path {
        let preview = session.display_buffer()?;
        retouch::io::functional::write_image_any(&preview_path, &preview)?;
        println!("saved {} preview to {}", preview.size(), preview_path.display());
    }

    Ok(())
}
