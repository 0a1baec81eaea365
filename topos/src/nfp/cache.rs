use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use slotmap::{SlotMap, new_key_type};

use crate::NestError;
use crate::geometry::geo_traits::{Shape, Translatable};
use crate::geometry::primitives::{Point, SPolygon, Vector};
use crate::nfp::Nfp;
use crate::nfp::orbiter::Orbiter;
use crate::util::{CacheConfig, CacheMode};

new_key_type! {
    /// Key of a unique shape in the [`NfpCache`]
    pub struct ShapeKey;
}

/// Translation-invariant fingerprint of a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSignature {
    /// Area rounded to the nearest integer
    pub rounded_area: i64,
    /// Vector of the first edge
    pub first_edge: Vector,
}

impl ShapeSignature {
    pub fn of(poly: &SPolygon) -> Self {
        ShapeSignature {
            rounded_area: poly.area.round() as i64,
            first_edge: poly.first_edge_vector(),
        }
    }
}

/// A registered shape, as it was at registration time
#[derive(Clone, Debug)]
pub struct ShapeEntry {
    pub shape: SPolygon,
    pub signature: ShapeSignature,
    /// Centroid at registration, the frame in which cached no-fit polygons are stored
    pub centroid: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Requests involving an unregistered or ambiguous shape, computed without caching
    pub direct: usize,
}

/// Memoizes no-fit polygons between pairs of shapes.
///
/// Results are stored relative to the centroid of the stationary shape, which makes them valid
/// for any translation of the pair. Requests are answered in the frame of the stationary
/// polygon as it is passed in.
#[derive(Debug)]
pub struct NfpCache {
    shapes: SlotMap<ShapeKey, ShapeEntry>,
    nfps: HashMap<(ShapeKey, ShapeKey), Result<Nfp, NestError>>,
    orbiter: Orbiter,
    config: CacheConfig,
    stats: CacheStats,
}

impl NfpCache {
    /// Registers all unique shapes among `polygons`.
    /// In [`CacheMode::Eager`] every ordered pair is computed before returning.
    pub fn new(
        polygons: &[SPolygon],
        config: CacheConfig,
        orbiter: Orbiter,
    ) -> Result<Self, NestError> {
        let mut cache = NfpCache {
            shapes: SlotMap::with_key(),
            nfps: HashMap::new(),
            orbiter,
            config,
            stats: CacheStats::default(),
        };
        for poly in polygons {
            cache.register(poly);
        }
        info!(
            "[CACHE] registered {} unique shapes out of {} polygons",
            cache.shapes.len(),
            polygons.len()
        );
        if config.mode == CacheMode::Eager {
            cache.populate()?;
        }
        Ok(cache)
    }

    /// Adds `poly` to the registry unless an identical shape (up to translation) is already present.
    pub fn register(&mut self, poly: &SPolygon) -> ShapeKey {
        if let Some(key) = self
            .shapes
            .iter()
            .find(|(_, e)| e.shape.equals_up_to_translation(poly))
            .map(|(k, _)| k)
        {
            return key;
        }
        self.shapes.insert(ShapeEntry {
            shape: poly.clone(),
            signature: ShapeSignature::of(poly),
            centroid: poly.centroid(),
        })
    }

    /// Computes all ordered pairs of registered shapes on a bounded worker pool.
    fn populate(&mut self) -> Result<(), NestError> {
        let pairs = self
            .shapes
            .keys()
            .cartesian_product(self.shapes.keys())
            .collect_vec();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.n_workers.unwrap_or(0))
            .build()
            .map_err(|e| NestError::WorkerPool(e.to_string()))?;

        let (shapes, orbiter) = (&self.shapes, &self.orbiter);
        let results: Vec<_> = pool.install(|| {
            pairs
                .par_iter()
                .map(|&(s_key, o_key)| {
                    let stationary = &shapes[s_key];
                    let sliding = &shapes[o_key];
                    let nfp = orbiter
                        .nfp(&stationary.shape, &sliding.shape)
                        .map(|nfp| nfp.translate(to_origin(stationary.centroid)));
                    ((s_key, o_key), nfp)
                })
                .collect()
        });

        if results.iter().any(|(_, r)| r == &Err(NestError::Cancelled)) {
            return Err(NestError::Cancelled);
        }
        let n_failed = results.iter().filter(|(_, r)| r.is_err()).count();
        if n_failed > 0 {
            warn!("[CACHE] {n_failed} of {} pairs have no usable NFP", results.len());
        }
        debug!("[CACHE] populated {} pairs", results.len());
        self.nfps.extend(results);
        Ok(())
    }

    /// Resolves a polygon to a registered shape: rounded area first, then the first-edge vector,
    /// finally structural equality up to translation.
    ///
    /// `Ok(None)` means the shape is unknown, [`NestError::CacheAmbiguous`] that it could not be pinned down.
    pub(crate) fn resolve(&self, poly: &SPolygon) -> Result<Option<ShapeKey>, NestError> {
        let signature = ShapeSignature::of(poly);
        let by_area = self
            .shapes
            .iter()
            .filter(|(_, e)| e.signature.rounded_area == signature.rounded_area)
            .collect_vec();

        let narrowed = match by_area.len() {
            0 | 1 => by_area,
            _ => by_area
                .into_iter()
                .filter(|(_, e)| e.signature.first_edge.almost_eq(&signature.first_edge))
                .collect_vec(),
        };

        let matching = narrowed
            .into_iter()
            .filter(|(_, e)| e.shape.equals_up_to_translation(poly))
            .map(|(k, _)| k)
            .collect_vec();

        match matching.as_slice() {
            [] => Ok(None),
            [key] => Ok(Some(*key)),
            keys => Err(NestError::CacheAmbiguous(keys.len())),
        }
    }

    /// Registered shape `poly` is a translation of. Unknown and ambiguous shapes resolve to `None`.
    pub fn lookup(&self, poly: &SPolygon) -> Option<ShapeKey> {
        match self.resolve(poly) {
            Ok(key) => key,
            Err(e) => {
                warn!("[CACHE] {e}, shape treated as unregistered");
                None
            }
        }
    }

    /// No-fit polygon of `sliding` around `stationary`, positioned around `stationary` as passed in.
    pub fn get(&mut self, stationary: &SPolygon, sliding: &SPolygon) -> Result<Nfp, NestError> {
        let keys = self.lookup(stationary).zip(self.lookup(sliding));
        let Some((s_key, o_key)) = keys else {
            self.stats.direct += 1;
            return self.orbiter.nfp(stationary, sliding);
        };

        let centroid = stationary.centroid();
        if let Some(cached) = self.nfps.get(&(s_key, o_key)) {
            self.stats.hits += 1;
            return cached.as_ref().map(|nfp| nfp.translate(from_origin(centroid))).map_err(Clone::clone);
        }

        self.stats.misses += 1;
        let result = self.orbiter.nfp(stationary, sliding);
        if self.config.persist && result != Err(NestError::Cancelled) {
            let relative = result
                .as_ref()
                .map(|nfp| nfp.translate(to_origin(centroid)))
                .map_err(Clone::clone);
            self.nfps.insert((s_key, o_key), relative);
        }
        result
    }

    pub fn entry(&self, key: ShapeKey) -> Option<&ShapeEntry> {
        self.shapes.get(key)
    }

    pub fn n_shapes(&self) -> usize {
        self.shapes.len()
    }

    pub fn n_cached(&self) -> usize {
        self.nfps.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

fn to_origin(p: Point) -> Vector {
    Vector(-p.0, -p.1)
}

fn from_origin(p: Point) -> Vector {
    Vector(p.0, p.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::CacheMode;

    fn square(dx: f64) -> SPolygon {
        let points = [(0.0, 0.0), (1.0, 0.0), (1.0 + dx, 1.0), (0.0, 1.0)];
        SPolygon::new(points.into_iter().map(Point::from).collect()).unwrap()
    }

    fn lazy() -> CacheConfig {
        CacheConfig {
            mode: CacheMode::Lazy,
            ..CacheConfig::default()
        }
    }

    #[test]
    fn resolve_reports_ambiguity() {
        let cache = NfpCache::new(&[square(0.0), square(1.5e-6)], lazy(), Orbiter::default()).unwrap();
        assert_eq!(cache.resolve(&square(0.75e-6)), Err(NestError::CacheAmbiguous(2)));
        assert!(matches!(cache.resolve(&square(0.0)), Ok(Some(_))));
        assert_eq!(cache.resolve(&square(0.5)), Ok(None));
    }
}
