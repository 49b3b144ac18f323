//! Renders the quadratic Bezier reference diagram to `diagram.svg`.

mod svg;

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::svg::{Canvas, Point};

const OUTPUT: &str = "diagram.svg";

/// One labelled curve: a quadratic Bezier plus the straight chord joining its ends.
struct Composition {
    label: &'static str,
    colour: &'static str,
    start: Point,
    control: Point,
    end: Point,
}

const COMPOSITIONS: [Composition; 4] = [
    Composition {
        label: "Quadrant I",
        colour: "#d62728",
        start: Point::new(1.0, 0.0),
        control: Point::new(1.0, 1.0),
        end: Point::new(0.0, 1.0),
    },
    Composition {
        label: "Quadrant II",
        colour: "#2ca02c",
        start: Point::new(0.0, 1.0),
        control: Point::new(-1.0, 1.0),
        end: Point::new(-1.0, 0.0),
    },
    Composition {
        label: "Quadrant III",
        colour: "#1f77b4",
        start: Point::new(-1.0, 0.0),
        control: Point::new(-1.0, -1.0),
        end: Point::new(0.0, -1.0),
    },
    Composition {
        label: "Quadrant IV",
        colour: "#ff7f0e",
        start: Point::new(0.0, -1.0),
        control: Point::new(1.0, -1.0),
        end: Point::new(1.0, 0.0),
    },
];

fn build_diagram() -> Canvas {
    let mut canvas = Canvas::new(480.0, 480.0, (-2.0, 2.0), (-2.0, 2.0));
    canvas.grid(1.0);

    let origin = Point::new(0.0, 0.0);
    canvas.circle(origin, 1.0, "#444444");
    canvas.marker(origin, "black");

    for composition in COMPOSITIONS.iter() {
        canvas.quad_bezier(
            composition.start,
            composition.control,
            composition.end,
            composition.colour,
        );
        canvas.line(composition.start, composition.end, composition.colour, true);
        canvas.legend_entry(composition.label, composition.colour);
    }

    canvas
}

/// INFO-level fmt logger without timestamps; same setup in both binaries.
fn setup_logger() -> Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    Registry::default()
        .with(LevelFilter::from(Level::INFO))
        .with(layer().with_ansi(true).with_target(false).without_time())
        .try_init()?;

    Ok(())
}

fn main() -> Result<()> {
    setup_logger()?;

    let canvas = build_diagram();
    fs::write(OUTPUT, canvas.to_string()).context(format!("Couldn't write {OUTPUT}"))?;
    info!(
        elements = canvas.elements.len(),
        legend = canvas.legend.len(),
        "Wrote {OUTPUT}"
    );

    Ok(())
}
