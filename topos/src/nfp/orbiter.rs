use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use itertools::Itertools;
use log::{debug, trace};

use crate::geometry::TOLERANCE;
use crate::geometry::geo_traits::{DistanceTo, Translatable};
use crate::geometry::overlap::{interiors_overlap, touching};
use crate::geometry::primitives::{Edge, Point, SPolygon, Vector};
use crate::nfp::Nfp;
use crate::nfp::intersection::classify_intersections;
use crate::nfp::rules::candidate_vector;
use crate::util::{FPA, OrbitConfig};
use crate::{DegenerateCause, NestError};

/// States of a single orbit of a sliding polygon around a stationary one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitState {
    /// Contacts are evaluated to pick the next translation
    Touching,
    /// A translation has been chosen and is applied next
    Sliding(Vector),
    /// The reference vertex returned to the start point
    Complete,
    Degenerate(DegenerateCause),
    /// The iteration cap was reached
    Timeout,
    Cancelled,
}

impl OrbitState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrbitState::Touching | OrbitState::Sliding(_))
    }
}

/// Result of an orbit, successful or not.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitOutcome {
    /// Terminal state
    pub state: OrbitState,
    /// Every recorded position of the sliding reference vertex, starting with the start point
    pub trace: Vec<Point>,
    /// Number of translations performed
    pub iterations: usize,
}

impl OrbitOutcome {
    pub fn into_nfp(self) -> Result<Nfp, NestError> {
        let iterations = self.iterations;
        match self.state {
            OrbitState::Complete => {
                let nfp = Nfp::from_trace(&self.trace);
                match nfp.n_vertices() >= 3 && FPA(nfp.area()) != FPA(0.0) {
                    true => Ok(nfp),
                    false => Err(NestError::NfpNoFeasibleVector {
                        iterations,
                        cause: DegenerateCause::Stuck,
                    }),
                }
            }
            OrbitState::Timeout => Err(NestError::NfpTimeout { iterations }),
            OrbitState::Cancelled => Err(NestError::Cancelled),
            OrbitState::Degenerate(DegenerateCause::Overlap) => {
                Err(NestError::NfpOverlap { iterations })
            }
            OrbitState::Degenerate(cause) => {
                Err(NestError::NfpNoFeasibleVector { iterations, cause })
            }
            OrbitState::Touching | OrbitState::Sliding(_) => {
                unreachable!("orbit outcome in non-terminal state")
            }
        }
    }
}

/// Traces no-fit polygons by orbiting a sliding polygon around a stationary one.
#[derive(Clone, Debug, Default)]
pub struct Orbiter {
    pub config: OrbitConfig,
    cancel_flag: Option<Arc<AtomicBool>>,
}

/// Mutable state threaded through the orbit loop
struct Orbit {
    sliding: SPolygon,
    ref_idx: usize,
    start: Point,
    trace: Vec<Point>,
    iterations: usize,
    prev_direction: Option<Vector>,
    state: OrbitState,
}

impl Orbit {
    fn reference(&self) -> Point {
        self.sliding.vertex(self.ref_idx)
    }
}

impl Orbiter {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            cancel_flag: None,
        }
    }

    /// The orbit checks `flag` once per iteration and stops in [`OrbitState::Cancelled`] when it is raised.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }

    /// No-fit polygon of `sliding` around `stationary`, in the frame of `stationary`.
    pub fn nfp(&self, stationary: &SPolygon, sliding: &SPolygon) -> Result<Nfp, NestError> {
        self.orbit(stationary, sliding).into_nfp()
    }

    /// Runs the full orbit.
    /// The sliding polygon starts with its reference vertex on the lowest vertex of `stationary`,
    /// and its position before the orbit is irrelevant.
    pub fn orbit(&self, stationary: &SPolygon, sliding: &SPolygon) -> OrbitOutcome {
        let ref_idx = sliding.reference_index();
        let start = stationary.lowest_vertex();
        let sliding = sliding.translate(start - sliding.vertex(ref_idx));

        let mut orbit = Orbit {
            sliding,
            ref_idx,
            start,
            trace: vec![start],
            iterations: 0,
            prev_direction: None,
            state: OrbitState::Touching,
        };

        while !orbit.state.is_terminal() {
            orbit.state = match orbit.state {
                OrbitState::Touching => self.touch(stationary, &mut orbit),
                OrbitState::Sliding(v) => self.slide(stationary, &mut orbit, v),
                terminal => terminal,
            };
        }

        debug!(
            "[ORBIT] {:?} after {} iterations, {} trace points",
            orbit.state,
            orbit.iterations,
            orbit.trace.len()
        );

        OrbitOutcome {
            state: orbit.state,
            trace: orbit.trace,
            iterations: orbit.iterations,
        }
    }

    /// Derives and selects the next translation from the current contacts.
    fn touch(&self, stationary: &SPolygon, orbit: &mut Orbit) -> OrbitState {
        if self.cancelled() {
            return OrbitState::Cancelled;
        }
        if orbit.iterations >= self.config.max_iterations {
            return OrbitState::Timeout;
        }
        orbit.iterations += 1;

        let intersections = classify_intersections(stationary, &orbit.sliding);
        let candidates = intersections
            .iter()
            .filter_map(candidate_vector)
            .fold(vec![], |mut acc: Vec<Vector>, v| {
                if !acc.iter().any(|w| w.almost_eq(&v)) {
                    acc.push(v);
                }
                acc
            });
        trace!(
            "[ORBIT] iteration {}: {} contacts, candidates {:?}",
            orbit.iterations,
            intersections.len(),
            candidates
        );

        let previous = match orbit.trace.len() {
            n if n >= 2 => Some(orbit.trace[n - 2]),
            _ => None,
        };
        let reference = orbit.reference();

        let evaluated = candidates
            .into_iter()
            .map(|v| (v, trim(stationary, &orbit.sliding, v)))
            .collect_vec();
        if !evaluated.is_empty() && evaluated.iter().all(|(_, t)| t.length() < TOLERANCE) {
            return OrbitState::Degenerate(DegenerateCause::Stuck);
        }

        let selected = evaluated
            .into_iter()
            .filter(|(_, trimmed)| {
                trimmed.length() >= TOLERANCE
                    && previous.is_none_or(|p| !(reference + *trimmed).almost_eq(&p))
                    && {
                        let trial = orbit.sliding.translate(*trimmed * 0.5);
                        !interiors_overlap(stationary, &trial) && touching(stationary, &trial)
                    }
            })
            .min_by(|(v1, _), (v2, _)| {
                FPA(v1.length())
                    .partial_cmp(&FPA(v2.length()))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| match orbit.prev_direction {
                        Some(prev) => prev
                            .clockwise_angle_to(*v1)
                            .total_cmp(&prev.clockwise_angle_to(*v2)),
                        None => std::cmp::Ordering::Equal,
                    })
            });

        match selected {
            Some((_, trimmed)) => OrbitState::Sliding(trimmed),
            None => OrbitState::Degenerate(DegenerateCause::NoFeasibleVector),
        }
    }

    /// Applies the chosen translation and checks for completion.
    fn slide(&self, stationary: &SPolygon, orbit: &mut Orbit, v: Vector) -> OrbitState {
        let from = orbit.reference();
        let to = from + v;

        //the move passes over the start point: cut it short and close the loop
        let passes_start = orbit.trace.len() > 1
            && Edge { start: from, end: to }.distance_to(&orbit.start) < TOLERANCE;
        let v = match passes_start {
            true => orbit.start - from,
            false => v,
        };

        orbit.sliding = orbit.sliding.translate(v);
        orbit.prev_direction = Some(v);
        let reference = orbit.reference();
        orbit.trace.push(reference);

        if passes_start || reference.almost_eq(&orbit.start) {
            OrbitState::Complete
        } else if interiors_overlap(stationary, &orbit.sliding) {
            OrbitState::Degenerate(DegenerateCause::Overlap)
        } else {
            OrbitState::Touching
        }
    }
}

/// Shortens `v` to the distance at which the sliding polygon first runs into the stationary one:
/// sliding vertices are cast along `v` onto stationary edges, stationary vertices against `v` onto sliding edges.
fn trim(stationary: &SPolygon, sliding: &SPolygon, v: Vector) -> Vector {
    let Some(dir) = v.normalize() else {
        return Vector::ZERO;
    };

    let forward = sliding
        .vertices
        .iter()
        .flat_map(|p| stationary.edge_iter().filter_map(move |e| e.ray_hit(*p, dir)));
    let backward = stationary
        .vertices
        .iter()
        .flat_map(|p| sliding.edge_iter().filter_map(move |e| e.ray_hit(*p, -dir)));

    let limit = forward
        .chain(backward)
        .filter(|s| *s > TOLERANCE)
        .fold(v.length(), f64::min);

    dir * limit
}
