use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::NestError;
use crate::geometry::TOLERANCE;
use crate::geometry::geo_traits::{CollidesWith, Translatable};
use crate::geometry::overlap::interiors_overlap;
use crate::geometry::primitives::{Point, SPolygon, Vector};
use crate::nfp::{Nfp, NfpCache, Orbiter};
use crate::placement::cost::{ReferenceOffsets, top_left_cost};
use crate::placement::{Borders, FeasibleRegion};
use crate::util::assertions;
use crate::util::{FailurePolicy, PackConfig};

/// A polygon in its final position
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPolygon {
    /// Index of the polygon in the input sequence
    pub index: usize,
    /// Translation applied to the input polygon
    pub translation: Vector,
    /// The translated polygon
    pub shape: SPolygon,
}

/// Outcome of a packing run
#[derive(Clone, Debug, PartialEq)]
pub struct Arrangement {
    pub placed: Vec<PlacedPolygon>,
    pub borders: Borders,
    /// Indices of polygons left out under [`FailurePolicy::Skip`]
    pub skipped: Vec<usize>,
}

impl Arrangement {
    pub fn width(&self) -> f64 {
        self.borders.width()
    }

    pub fn height(&self) -> f64 {
        self.borders.height()
    }
}

/// Position chosen for an incoming polygon, with the cost it was chosen for
#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    point: Point,
    cost: f64,
}

/// Places polygons one by one, each at the cheapest point on the boundary of the
/// union of its no-fit polygons with everything placed before it.
pub struct PlacementEngine {
    container_width: f64,
    cache: NfpCache,
    placed: Vec<PlacedPolygon>,
    borders: Option<Borders>,
    skipped: Vec<usize>,
    cancel_flag: Option<Arc<AtomicBool>>,
    config: PackConfig,
}

impl PlacementEngine {
    /// Validates the input and builds the no-fit polygon cache.
    pub fn new(
        polygons: &[SPolygon],
        container_width: f64,
        config: PackConfig,
    ) -> Result<Self, NestError> {
        Self::build(polygons, container_width, config, None)
    }

    /// Like [`PlacementEngine::new`], with a flag that aborts the run with [`NestError::Cancelled`] once raised.
    pub fn with_cancel_flag(
        polygons: &[SPolygon],
        container_width: f64,
        config: PackConfig,
        flag: Arc<AtomicBool>,
    ) -> Result<Self, NestError> {
        Self::build(polygons, container_width, config, Some(flag))
    }

    fn build(
        polygons: &[SPolygon],
        container_width: f64,
        config: PackConfig,
        cancel_flag: Option<Arc<AtomicBool>>,
    ) -> Result<Self, NestError> {
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(NestError::InvalidContainer(container_width));
        }
        if polygons.is_empty() {
            return Err(NestError::DegenerateInput("no polygons to pack".to_string()));
        }
        if let Some((index, p)) = polygons
            .iter()
            .enumerate()
            .find(|(_, p)| p.bbox.width() > container_width + TOLERANCE)
        {
            return Err(NestError::ExceedsContainer {
                index,
                width: p.bbox.width(),
                container_width,
            });
        }

        let orbiter = match &cancel_flag {
            Some(flag) => Orbiter::new(config.orbit).with_cancel_flag(flag.clone()),
            None => Orbiter::new(config.orbit),
        };
        let cache = NfpCache::new(polygons, config.cache, orbiter)?;

        Ok(PlacementEngine {
            container_width,
            cache,
            placed: vec![],
            borders: None,
            skipped: vec![],
            cancel_flag,
            config,
        })
    }

    /// Places the polygon with input index `index`.
    /// The first polygon is placed where it is, every next one against the arrangement.
    pub fn place(&mut self, index: usize, polygon: &SPolygon) -> Result<&PlacedPolygon, NestError> {
        if self
            .cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
        {
            return Err(NestError::Cancelled);
        }
        if polygon.bbox.width() > self.container_width + TOLERANCE {
            return Err(NestError::ExceedsContainer {
                index,
                width: polygon.bbox.width(),
                container_width: self.container_width,
            });
        }

        let translation = match self.borders {
            None => Vector::ZERO,
            Some(borders) => {
                let reference = polygon.reference_vertex();
                let target = self.select_position(index, polygon, &borders)?;
                target - reference
            }
        };

        let shape = polygon.translate(translation);
        match self.borders.as_mut() {
            Some(borders) => borders.update(&shape.bbox),
            None => self.borders = Some(Borders::from_bbox(&shape.bbox)),
        }
        debug_assert!(
            !self
                .placed
                .iter()
                .any(|pp| interiors_overlap(&pp.shape, &shape)),
            "polygon {index} overlaps the arrangement"
        );

        info!(
            "[TOPOS] placed polygon {} with translation ({:.3}, {:.3}), arrangement {:.3} x {:.3}",
            index,
            translation.0,
            translation.1,
            self.borders.map_or(0.0, |b| b.width()),
            self.borders.map_or(0.0, |b| b.height())
        );

        self.placed.push(PlacedPolygon {
            index,
            translation,
            shape,
        });
        Ok(&self.placed[self.placed.len() - 1])
    }

    /// Records that the polygon with input index `index` was left out.
    pub fn skip(&mut self, index: usize) {
        self.skipped.push(index);
    }

    /// Position for the reference vertex of `polygon` on the boundary of its feasible region.
    fn select_position(
        &mut self,
        index: usize,
        polygon: &SPolygon,
        borders: &Borders,
    ) -> Result<Point, NestError> {
        let mut nfps: Vec<Nfp> = Vec::with_capacity(self.placed.len());
        for pp in self.placed.iter() {
            match self.cache.get(&pp.shape, polygon) {
                Ok(nfp) => nfps.push(nfp),
                Err(NestError::Cancelled) => return Err(NestError::Cancelled),
                Err(e) => warn!(
                    "[TOPOS] no usable NFP between placed polygon {} and polygon {}: {}",
                    pp.index, index, e
                ),
            }
        }
        if nfps.is_empty() {
            return Err(NestError::NoFeasiblePlacement { index });
        }

        let region = FeasibleRegion::union_of(&nfps);
        let offsets = ReferenceOffsets::of(polygon);
        let flush_left = borders.left + offsets.left;
        let flush_right = borders.right - offsets.right;

        let points = region
            .vertices()
            .into_iter()
            .chain(region.crossings_at_x(flush_left))
            .chain(region.crossings_at_x(flush_right))
            .filter(|p| {
                borders.width_if_extended(p.0 - offsets.left, p.0 + offsets.right)
                    <= self.container_width + TOLERANCE
            })
            .collect_vec();

        let candidates = points
            .par_iter()
            .map(|p| Candidate {
                point: *p,
                cost: top_left_cost(*p, offsets, borders),
            })
            .collect::<Vec<_>>()
            .into_iter()
            .sorted_by_key(|c| {
                (
                    OrderedFloat((c.cost / TOLERANCE).round()),
                    OrderedFloat(c.point.0),
                    OrderedFloat(c.point.1),
                )
            })
            .collect_vec();
        debug!(
            "[TOPOS] polygon {}: {} NFPs, {} candidates",
            index,
            nfps.len(),
            candidates.len()
        );

        let reference = polygon.reference_vertex();
        candidates
            .iter()
            .find(|c| {
                let trial = polygon.translate(c.point - reference);
                self.placed.iter().all(|pp| {
                    !pp.shape.bbox.collides_with(&trial.bbox) || !interiors_overlap(&pp.shape, &trial)
                })
            })
            .map(|c| c.point)
            .ok_or(NestError::NoFeasiblePlacement { index })
    }

    pub fn placed(&self) -> &[PlacedPolygon] {
        &self.placed
    }

    pub fn borders(&self) -> Option<Borders> {
        self.borders
    }

    pub fn cache(&self) -> &NfpCache {
        &self.cache
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Moves the arrangement so that its bottom-left corner lies in the origin.
    pub fn finalize(self) -> Result<Arrangement, NestError> {
        let borders = self
            .borders
            .ok_or_else(|| NestError::DegenerateInput("no polygon was placed".to_string()))?;
        let shift = Vector(-borders.left, -borders.bottom);

        let placed = self
            .placed
            .into_iter()
            .map(|pp| PlacedPolygon {
                index: pp.index,
                translation: pp.translation + shift,
                shape: pp.shape.translate(shift),
            })
            .collect_vec();
        let borders = borders.translate(shift);
        debug_assert!(assertions::arrangement_is_valid(&placed, &borders));
        debug_assert!(assertions::compacted(&borders));

        let stats = self.cache.stats();
        info!(
            "[TOPOS] arrangement of {} polygons: {:.3} x {:.3}, {} skipped (NFP cache: {} hits, {} misses, {} direct)",
            placed.len(),
            borders.width(),
            borders.height(),
            self.skipped.len(),
            stats.hits,
            stats.misses,
            stats.direct
        );

        Ok(Arrangement {
            placed,
            borders,
            skipped: self.skipped,
        })
    }
}

/// Packs `polygons`, in order, into a strip of width `container_width`.
pub fn pack(
    polygons: &[SPolygon],
    container_width: f64,
    config: PackConfig,
) -> Result<Arrangement, NestError> {
    let mut engine = PlacementEngine::new(polygons, container_width, config)?;
    run(&mut engine, polygons)?;
    engine.finalize()
}

/// [`pack`] with a cancellation flag, checked before every placement and in every orbit iteration.
pub fn pack_with_cancel_flag(
    polygons: &[SPolygon],
    container_width: f64,
    config: PackConfig,
    flag: Arc<AtomicBool>,
) -> Result<Arrangement, NestError> {
    let mut engine = PlacementEngine::with_cancel_flag(polygons, container_width, config, flag)?;
    run(&mut engine, polygons)?;
    engine.finalize()
}

fn run(engine: &mut PlacementEngine, polygons: &[SPolygon]) -> Result<(), NestError> {
    let policy = engine.config.failure_policy;
    for (index, polygon) in polygons.iter().enumerate() {
        match engine.place(index, polygon).map(|_| ()) {
            Ok(()) => {}
            Err(NestError::NoFeasiblePlacement { index }) if policy == FailurePolicy::Skip => {
                warn!("[TOPOS] no feasible placement for polygon {index}, skipped");
                engine.skip(index);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
