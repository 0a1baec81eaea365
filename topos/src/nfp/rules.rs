use crate::geometry::geo_enums::Orientation;
use crate::geometry::geo_enums::Orientation::{Clockwise as CW, CounterClockwise as CCW, Parallel as PAR};
use crate::geometry::primitives::Vector;
use crate::nfp::intersection::ContactTag::{End as E, Interior as I, Start as S};
use crate::nfp::intersection::{ContactTag, Intersection};

/// Direction in which the sliding polygon may continue from a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Slide along the stationary edge, towards its end
    AlongStationary,
    /// Slide along the sliding edge reversed, until its end vertex reaches the contact point
    AlongSlidingReversed,
    Discard,
}

use Continuation::{AlongSlidingReversed as REV, AlongStationary as STA, Discard as DIS};

/// Continuation for every (stationary tag, sliding tag, orientation) combination.
/// Orientation is that of the sliding edge relative to the stationary edge.
#[rustfmt::skip]
pub const CONTINUATION_RULES: [(ContactTag, ContactTag, Orientation, Continuation); 27] = [
    //both edges start at the contact
    (S, S, CCW, REV), (S, S, CW, STA), (S, S, PAR, STA),
    //only the stationary edge starts at the contact
    (S, E, CCW, STA), (S, E, CW, DIS), (S, E, PAR, DIS),
    (S, I, CCW, STA), (S, I, CW, DIS), (S, I, PAR, DIS),
    //only the sliding edge starts at the contact (clockwise seen from the sliding edge)
    (E, S, CCW, REV), (E, S, CW, DIS), (E, S, PAR, DIS),
    (I, S, CCW, REV), (I, S, CW, DIS), (I, S, PAR, DIS),
    //neither edge starts at the contact
    (E, E, CCW, STA), (E, E, CW, DIS), (E, E, PAR, DIS),
    (E, I, CCW, STA), (E, I, CW, REV), (E, I, PAR, DIS),
    (I, E, CCW, STA), (I, E, CW, DIS), (I, E, PAR, DIS),
    (I, I, CCW, STA), (I, I, CW, DIS), (I, I, PAR, DIS),
];

pub fn continuation(stationary: ContactTag, sliding: ContactTag, orientation: Orientation) -> Continuation {
    CONTINUATION_RULES
        .iter()
        .find(|(st, sl, o, _)| *st == stationary && *sl == sliding && *o == orientation)
        .map(|(_, _, _, c)| *c)
        .unwrap_or(DIS)
}

/// Translation proposed by a single contact, `None` if the contact is discarded
/// or the proposed translation has no length.
pub fn candidate_vector(int: &Intersection) -> Option<Vector> {
    let v = match continuation(int.stationary_tag, int.sliding_tag, int.orientation()) {
        STA => int.stationary_edge.end - int.point,
        REV => int.point - int.sliding_edge.end,
        DIS => return None,
    };
    v.normalize().map(|_| v)
}
