//! Render a sample mil-dot reticle with BDC marks to SVG on stdout.
//!
//! ```text
//! cargo run --example render_svg --features tracing -- 400 300 > reticle.svg
//! RUST_LOG=graticule=debug cargo run --example render_svg --features tracing
//! ```

use graticule::editor::{EditSession, ElementTemplate};
use graticule::overlay::{TrajectoryPoint, center_marks, trajectory_markers};
use graticule::{
    BdcPoint, Measurement, Position, ReticleCircle, ReticleDefinition, ReticleLine, ReticlePath, ReticleRenderer,
    ReticleText, SvgCanvas, TextAnchor, parse_measurement, parse_position,
};
use tracing_subscriber::EnvFilter;

fn sample_reticle() -> miette::Result<ReticleDefinition> {
    let thin = parse_measurement("0.05mil")?;
    let dot = parse_measurement("0.1mil")?;

    let mut reticle = ReticleDefinition::new("Mil-Dot")
        .with_size(parse_position("(20mil, 20mil)")?)
        .with_zero(parse_position("(10mil, 10mil)")?);

    for (start, end) in [
        (Position::mil(-10.0, 0.0), Position::mil(10.0, 0.0)),
        (Position::mil(0.0, -10.0), Position::mil(0.0, 10.0)),
    ] {
        let mut line = ReticleLine::new(start, end);
        line.line_width = Some(thin);
        reticle.elements.push(line.into());
    }

    for i in (-5..=5).filter(|i| *i != 0) {
        let v = f64::from(i);
        for center in [Position::mil(v, 0.0), Position::mil(0.0, v)] {
            let mut circle = ReticleCircle::new(center, dot);
            circle.fill = true;
            reticle.elements.push(circle.into());
        }
    }

    // Half-circle ring under the crosshair
    let mut ring = ReticlePath::new()
        .move_to(Position::mil(-3.0, 0.0))
        .arc_to(Measurement::mil(3.0), Position::mil(3.0, 0.0), false, false);
    ring.line_width = Some(thin);
    ring.color = "darkred".to_string();
    reticle.elements.push(ring.into());

    let mut label = ReticleText::new(Position::mil(5.0, 0.5), Measurement::mil(0.6), "5");
    label.anchor = TextAnchor::Center;
    reticle.elements.push(label.into());

    reticle.bdc_points = (1..=3)
        .map(|i| {
            BdcPoint::new(
                Position::mil(0.0, -2.0 * f64::from(i)),
                Measurement::mil(1.0),
                Measurement::mil(0.5),
            )
        })
        .collect();

    Ok(reticle)
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).map(|a| a.parse::<f64>());
    let width = args.next().transpose().map_err(|e| miette::miette!("bad width: {e}"))?.unwrap_or(400.0);
    let height = args.next().transpose().map_err(|e| miette::miette!("bad height: {e}"))?.unwrap_or(width);

    let mut session = EditSession::open(sample_reticle()?);
    // The new element stays selected, so the overlay draws it highlighted
    let marker = session.add(ElementTemplate::Circle);
    if let graticule::ReticleElement::Circle(circle) = session.element_mut(marker)? {
        circle.center = Position::mil(-4.0, 4.0);
        circle.radius = Measurement::mil(0.5);
    }

    let reticle = session.reticle();
    let mut overlay = session.overlay();
    overlay.extend(center_marks(reticle, Some(Measurement::mil(1.0)), "red"));
    overlay.extend(trajectory_markers(
        reticle,
        &[
            TrajectoryPoint::new(Position::mil(0.3, -1.2)).with_label("300"),
            TrajectoryPoint::new(Position::mil(0.5, -3.1)).with_label("500"),
        ],
        "green",
    ));

    let mut canvas = SvgCanvas::new(width, height);
    let outcome = ReticleRenderer::new(width, height).render(&mut canvas, reticle, &[], &overlay);
    tracing::info!(?outcome, "rendered {}", reticle.name);

    canvas.write_to(std::io::stdout().lock())?;
    Ok(())
}
