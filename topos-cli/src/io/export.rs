use std::time::Instant;

use jiff::Timestamp;
use topos::placement::Arrangement;

use crate::io::ext_repr::{ExtInstance, ExtPlacedItem, ExtSolution};

/// Converts an arrangement of the items of `ext_instance` into its external representation.
pub fn export(
    ext_instance: &ExtInstance,
    arrangement: &Arrangement,
    container_width: f64,
    epoch: Instant,
) -> ExtSolution {
    let placed_items = arrangement
        .placed
        .iter()
        .map(|pp| ExtPlacedItem {
            item_id: ext_instance.items[pp.index].id,
            translation: (pp.translation.0, pp.translation.1),
        })
        .collect();

    let skipped_items = arrangement
        .skipped
        .iter()
        .map(|&i| ext_instance.items[i].id)
        .collect();

    let bbox_area = arrangement.width() * arrangement.height();
    let item_area = arrangement.placed.iter().map(|pp| pp.shape.area).sum::<f64>();
    let density = match bbox_area > 0.0 {
        true => item_area / bbox_area,
        false => 0.0,
    };

    ExtSolution {
        container_width,
        width: arrangement.width(),
        height: arrangement.height(),
        density,
        borders: arrangement.borders,
        placed_items,
        skipped_items,
        run_time_ms: epoch.elapsed().as_millis() as u64,
        timestamp: Timestamp::now().to_string(),
    }
}
