//! Builds a few splines and logs their derived geometry.
//!
//! Usage:
//! ```text
//! cargo run --example trace                            # summary at INFO
//! RUST_LOG=geospline=trace cargo run --example trace   # also log cache rebuilds
//! ```

use geospline::{Point2, Result, Spline, SplineKind, SplineProps};
use tracing::info;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for the demo and the crate.
    // Override with RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trace=info".parse().unwrap_or_default())
        .add_directive("geospline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let outline = [
        Point2::new(0.0, 0.0),
        Point2::new(40.0, -10.0),
        Point2::new(80.0, 20.0),
        Point2::new(60.0, 70.0),
        Point2::new(10.0, 50.0),
    ];

    for kind in [
        SplineKind::CatmullRom,
        SplineKind::cardinal(0.2)?,
        SplineKind::BSpline,
        SplineKind::Linear,
        SplineKind::CubicBezier,
        SplineKind::QuadraticBezier,
    ] {
        let mut spline = Spline::with_props(
            kind,
            SplineProps {
                resolution: 12,
                closed: true,
            },
        )?;
        spline.add_control_points(&outline);

        let probe = Point2::new(45.0, 30.0);
        let near = spline.closest_point(&probe);
        info!(
            ?kind,
            curve_segments = spline.curve_segments().len(),
            polyline_points = spline.polyline_points().len(),
            length = spline.length(),
            aabb = ?spline.aabb(),
            contains_probe = spline.contains_point(&probe),
            closest_distance = near.map(|c| c.distance),
            "spline summary"
        );

        // Hover-style hit test, as an editing tool would run it every frame.
        let cursor = Point2::new(41.0, -7.0);
        if let Some(hit) = spline.closest_control_point_within_range(&cursor, 6.0) {
            info!(?kind, index = hit.index, distance = hit.distance, "cursor over control point");
        } else if spline.is_point_near_curve(&cursor, 6.0) {
            info!(?kind, "cursor over curve");
        }
    }

    Ok(())
}
