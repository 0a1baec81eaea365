use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::{info, warn};
use topos::geometry::primitives::{Point, SPolygon};

use crate::io::ext_repr::{ExtInstance, ExtSPolygon};

/// Converts the items of `ext_instance` into polygons, in packing order, together with the strip width.
/// `width_override` takes precedence over the width stored in the instance.
pub fn import_instance(
    ext_instance: &ExtInstance,
    width_override: Option<f64>,
) -> Result<(Vec<SPolygon>, f64)> {
    let container_width = match (width_override, ext_instance.container_width) {
        (Some(w), Some(w_inst)) => {
            info!("[IMPORT] container width {w} overrides the instance width {w_inst}");
            w
        }
        (Some(w), None) | (None, Some(w)) => w,
        (None, None) => bail!(
            "instance {} has no container width, use --container-width to provide one",
            ext_instance.name
        ),
    };
    ensure!(
        container_width.is_finite() && container_width > 0.0,
        "container width must be positive, got {container_width}"
    );

    let polygons = ext_instance
        .items
        .iter()
        .map(|item| {
            import_simple_polygon(&item.shape)
                .with_context(|| format!("invalid shape for item {}", item.id))
        })
        .collect::<Result<Vec<SPolygon>>>()?;

    info!(
        "[IMPORT] instance {}: {} items, container width {}",
        ext_instance.name,
        polygons.len(),
        container_width
    );
    Ok((polygons, container_width))
}

pub fn import_simple_polygon(sp: &ExtSPolygon) -> Result<SPolygon> {
    let mut points = sp.0.iter().map(|(x, y)| Point(*x, *y)).collect_vec();
    //Strip the last vertex if it is the same as the first one
    if points.len() > 1 && points[0].almost_eq(&points[points.len() - 1]) {
        points.pop();
    }
    eliminate_degenerate_points(&mut points);
    if points.len() != points.iter().unique().count() {
        bail!("simple polygon has non-consecutive duplicate vertices");
    }
    Ok(SPolygon::new(points)?)
}

/// Removes consecutive duplicates, e.g. [1, 2, 2, 3] -> [1, 2, 3]
pub fn eliminate_degenerate_points(points: &mut Vec<Point>) {
    let mut i = 0;
    while points.len() > 1 && i < points.len() {
        let j = (i + 1) % points.len();
        if points[i].almost_eq(&points[j]) {
            warn!(
                "[IMPORT] degenerate point of input simple polygon eliminated (idx: {}, {:?}, {:?})",
                i, points[i], points[j]
            );
            points.remove(i);
        } else {
            i += 1;
        }
    }
}
