#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use itertools::Itertools;
    use log::LevelFilter;
    use test_case::test_case;

    use topos::NestError;
    use topos::geometry::TOLERANCE;
    use topos::geometry::geo_traits::Translatable;
    use topos::geometry::overlap::{interiors_overlap, touching};
    use topos::geometry::primitives::{Point, SPolygon, Vector};
    use topos::nfp::{ContactTag, OrbitState, Orbiter, classify_intersections};
    use topos::util::OrbitConfig;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    fn polygon(points: &[(f64, f64)]) -> SPolygon {
        SPolygon::new(points.iter().map(|p| Point::from(*p)).collect()).unwrap()
    }

    fn unit_square() -> SPolygon {
        polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    fn rectangle(w: f64, h: f64) -> SPolygon {
        polygon(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
    }

    fn triangle() -> SPolygon {
        polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)])
    }

    fn diamond() -> SPolygon {
        polygon(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)])
    }

    fn l_shape() -> SPolygon {
        polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)])
    }

    //slot of [1, 2] x [1, 3]
    fn u_shape() -> SPolygon {
        polygon(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ])
    }

    #[test]
    fn unit_square_nfp() {
        init_logger();
        let square = unit_square();
        let nfp = Orbiter::default().nfp(&square, &square).unwrap();

        //as translations of the sliding square
        let translations = nfp.translations_of(&square);
        let expected = [
            Vector(-1.0, -1.0),
            Vector(1.0, -1.0),
            Vector(1.0, 1.0),
            Vector(-1.0, 1.0),
        ];
        assert_eq!(translations.len(), 4);
        let offset = expected
            .iter()
            .position(|v| v.almost_eq(&translations[0]))
            .expect("first translation is a corner of the expected square");
        for (i, t) in translations.iter().enumerate() {
            assert!(t.almost_eq(&expected[(i + offset) % 4]), "{translations:?}");
        }
    }

    #[test]
    fn unit_square_orbit_trace() {
        let square = unit_square();
        let outcome = Orbiter::default().orbit(&square, &square);
        assert_eq!(outcome.state, OrbitState::Complete);
        assert_eq!(outcome.iterations, 8);
        let expected = [
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
            (-1.0, 2.0),
            (-1.0, 1.0),
            (-1.0, 0.0),
            (0.0, 0.0),
        ];
        assert_eq!(outcome.trace.len(), expected.len());
        for (p, e) in outcome.trace.iter().zip(expected) {
            assert!(p.almost_eq(&e.into()), "{:?}", outcome.trace);
        }
    }

    #[test]
    fn triangle_square_nfp() {
        let nfp = Orbiter::default().nfp(&triangle(), &unit_square()).unwrap();
        let expected = [(2.0, 0.0), (2.0, 1.0), (1.0, 3.0), (0.0, 3.0), (-1.0, 1.0), (-1.0, 0.0)];
        assert_eq!(nfp.n_vertices(), expected.len(), "{:?}", nfp.vertices);
        for e in expected {
            assert!(
                nfp.vertices.iter().any(|p| p.almost_eq(&e.into())),
                "missing {e:?} in {:?}",
                nfp.vertices
            );
        }
    }

    #[test_case(unit_square(), unit_square(); "square around square")]
    #[test_case(rectangle(2.0, 1.0), unit_square(); "square around rectangle")]
    #[test_case(unit_square(), rectangle(1.0, 3.0); "tall rectangle around square")]
    #[test_case(triangle(), unit_square(); "square around triangle")]
    #[test_case(unit_square(), triangle(); "triangle around square")]
    #[test_case(diamond(), unit_square(); "square around diamond")]
    #[test_case(diamond(), diamond(); "diamond around diamond")]
    #[test_case(triangle(), diamond(); "diamond around triangle")]
    #[test_case(l_shape(), l_shape(); "l around l")]
    #[test_case(u_shape(), rectangle(0.5, 0.5); "small square around u")]
    fn nfp_positions_touch_without_overlap(stationary: SPolygon, sliding: SPolygon) {
        init_logger();
        let outcome = Orbiter::default().orbit(&stationary, &sliding);
        assert_eq!(outcome.state, OrbitState::Complete, "{:?}", outcome.trace);
        assert!(outcome.iterations <= 75);

        let nfp = outcome.into_nfp().unwrap();
        let reference = sliding.reference_vertex();

        //every vertex of the nfp and the midpoint of every nfp edge
        let positions = nfp
            .vertices
            .iter()
            .circular_tuple_windows()
            .flat_map(|(p1, p2)| [*p1, Point((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0)])
            .collect_vec();

        for p in positions {
            let placed = sliding.translate(p - reference);
            assert!(!interiors_overlap(&stationary, &placed), "overlap at {p:?}");
            assert!(touching(&stationary, &placed), "no contact at {p:?}");
        }
    }

    #[test]
    fn small_square_enters_the_slot() {
        init_logger();
        let u = u_shape();
        let square = rectangle(0.5, 0.5);
        let outcome = Orbiter::default().orbit(&u, &square);
        assert_eq!(outcome.state, OrbitState::Complete, "{:?}", outcome.trace);

        //reference vertex is the top-left corner, so inside the slot x is in [1.0, 1.5]
        let nfp = outcome.into_nfp().unwrap();
        let in_slot = |p: &Point| p.1 < 2.0 && p.0 > 1.0 - TOLERANCE && p.0 < 1.5 + TOLERANCE;
        assert!(nfp.vertices.iter().any(in_slot), "{:?}", nfp.vertices);

        //the slot floor is reached
        assert!(nfp.vertices.iter().any(|p| (p.1 - 1.5).abs() < TOLERANCE && in_slot(p)));
    }

    #[test]
    fn nfp_is_translation_invariant() {
        let orbiter = Orbiter::default();
        let a = triangle();
        let b = unit_square();
        let v = Vector(3.5, -7.25);

        let nfp = orbiter.nfp(&a, &b).unwrap();
        let moved = orbiter.nfp(&a.translate(v), &b.translate(Vector(-10.0, 4.0))).unwrap();

        assert_eq!(nfp.n_vertices(), moved.n_vertices());
        for (p, q) in nfp.vertices.iter().zip(moved.vertices.iter()) {
            assert!((*p + v).almost_eq(q));
        }
    }

    #[test]
    fn orbit_times_out() {
        let square = unit_square();
        let orbiter = Orbiter::new(OrbitConfig { max_iterations: 3 });
        let outcome = orbiter.orbit(&square, &square);
        assert_eq!(outcome.state, OrbitState::Timeout);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(
            outcome.into_nfp(),
            Err(NestError::NfpTimeout { iterations: 3 })
        );
    }

    #[test]
    fn orbit_is_cancelled() {
        let square = unit_square();
        let flag = Arc::new(AtomicBool::new(true));
        let orbiter = Orbiter::default().with_cancel_flag(flag);
        assert_eq!(orbiter.nfp(&square, &square), Err(NestError::Cancelled));
    }

    #[test]
    fn square_start_contacts_are_tagged() {
        let square = unit_square();
        //sliding square directly below, top-left corner on the origin
        let sliding = square.translate(Vector(0.0, -1.0));
        let intersections = classify_intersections(&square, &sliding);

        //collinear edges along y = 0 produce no contacts
        assert!(
            intersections
                .iter()
                .all(|i| i.point.almost_eq(&Point(0.0, 0.0)) || i.point.almost_eq(&Point(1.0, 0.0)))
        );

        let at_origin_both_start = intersections.iter().find(|i| {
            i.point.almost_eq(&Point(0.0, 0.0)) && i.stationary_starts() && i.sliding_starts()
        });
        assert!(at_origin_both_start.is_some());

        let at_corner = intersections
            .iter()
            .find(|i| i.point.almost_eq(&Point(1.0, 0.0)) && i.stationary_tag == ContactTag::Start)
            .unwrap();
        assert_eq!(at_corner.sliding_tag, ContactTag::Start);
    }
}
