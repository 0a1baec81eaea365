#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use test_case::test_case;

    use topos::NestError;
    use topos::geometry::TOLERANCE;
    use topos::geometry::geo_traits::Translatable;
    use topos::geometry::primitives::{Point, SPolygon, Vector};
    use topos::placement::{Borders, PlacementEngine, pack, pack_with_cancel_flag};
    use topos::util::assertions;
    use topos::util::{CacheConfig, CacheMode, FailurePolicy, OrbitConfig, PackConfig};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn polygon(points: &[(f64, f64)]) -> SPolygon {
        SPolygon::new(points.iter().map(|p| Point::from(*p)).collect()).unwrap()
    }

    fn unit_square() -> SPolygon {
        polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    fn mixed_shapes() -> Vec<SPolygon> {
        vec![
            polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]),
            polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]),
            unit_square().translate(Vector(7.0, 3.0)),
            polygon(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)]),
            polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]).translate(Vector(-4.0, 1.5)),
        ]
    }

    fn lazy_config() -> PackConfig {
        PackConfig {
            cache: CacheConfig {
                mode: CacheMode::Lazy,
                ..CacheConfig::default()
            },
            ..PackConfig::default()
        }
    }

    #[test_case(PackConfig::default(); "eager")]
    #[test_case(lazy_config(); "lazy")]
    fn three_unit_squares(config: PackConfig) {
        init_logger();
        let squares = vec![unit_square(); 3];
        let arrangement = pack(&squares, 10.0, config).unwrap();

        assert_eq!(arrangement.placed.len(), 3);
        assert!(arrangement.skipped.is_empty());
        assert!(arrangement.width() <= 3.0 + TOLERANCE);
        assert!(arrangement.width() * arrangement.height() >= 3.0 - TOLERANCE);
        assert!(assertions::compacted(&arrangement.borders));
        assert!(assertions::arrangement_is_valid(
            &arrangement.placed,
            &arrangement.borders
        ));
    }

    #[test]
    fn identical_squares_do_not_overlap() {
        let squares = vec![unit_square(), unit_square()];
        let arrangement = pack(&squares, 5.0, PackConfig::default()).unwrap();
        assert_eq!(arrangement.placed.len(), 2);
        assert!(assertions::no_overlaps(&arrangement.placed));
    }

    #[test_case(2.0; "narrow strip")]
    #[test_case(3.0; "medium strip")]
    #[test_case(20.0; "wide strip")]
    fn arrangement_respects_container_width(container_width: f64) {
        init_logger();
        let squares = vec![unit_square(); 5];
        let arrangement = pack(&squares, container_width, PackConfig::default()).unwrap();

        assert_eq!(arrangement.placed.len(), 5);
        assert!(arrangement.width() <= container_width + TOLERANCE);
        assert!(assertions::arrangement_is_valid(
            &arrangement.placed,
            &arrangement.borders
        ));
    }

    #[test]
    fn mixed_shapes_are_packed_without_overlap() {
        init_logger();
        let shapes = mixed_shapes();
        let arrangement = pack(&shapes, 4.0, PackConfig::default()).unwrap();

        assert_eq!(arrangement.placed.len(), shapes.len());
        assert!(arrangement.width() <= 4.0 + TOLERANCE);
        assert!(assertions::arrangement_is_valid(
            &arrangement.placed,
            &arrangement.borders
        ));
        assert!(assertions::compacted(&arrangement.borders));
    }

    fn concave_shapes() -> Vec<SPolygon> {
        let u = polygon(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let l = polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]);
        let small = polygon(&[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.5)]);
        vec![u, small.clone(), small, l.clone(), l]
    }

    #[test_case(PackConfig::default(); "eager")]
    #[test_case(lazy_config(); "lazy")]
    fn concave_shapes_are_packed_without_overlap(config: PackConfig) {
        init_logger();
        let shapes = concave_shapes();
        let config = PackConfig {
            failure_policy: FailurePolicy::Skip,
            ..config
        };
        let arrangement = pack(&shapes, 6.0, config).unwrap();

        assert_eq!(arrangement.placed.len() + arrangement.skipped.len(), shapes.len());
        let indices = arrangement.placed.iter().map(|pp| pp.index).collect::<Vec<_>>();
        assert!(indices.starts_with(&[0, 1, 2]), "{indices:?}");
        assert!(arrangement.width() <= 6.0 + TOLERANCE);
        assert!(assertions::arrangement_is_valid(
            &arrangement.placed,
            &arrangement.borders
        ));
    }

    #[test]
    fn placed_shapes_are_translated_inputs() {
        let shapes = mixed_shapes();
        let arrangement = pack(&shapes, 4.0, PackConfig::default()).unwrap();

        for pp in arrangement.placed.iter() {
            let expected = shapes[pp.index].translate(pp.translation);
            for (p, q) in pp.shape.vertices.iter().zip(expected.vertices.iter()) {
                assert!(p.almost_eq(q));
            }
        }
        let indices = arrangement.placed.iter().map(|pp| pp.index).collect::<Vec<_>>();
        assert_eq!(indices, (0..shapes.len()).collect::<Vec<_>>());
    }

    #[test]
    fn packing_is_deterministic() {
        let shapes = mixed_shapes();
        let first = pack(&shapes, 4.0, PackConfig::default()).unwrap();
        let second = pack(&shapes, 4.0, PackConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn input_positions_are_irrelevant() {
        let shapes = mixed_shapes();
        let moved = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| s.translate(Vector(3.0 * i as f64, -2.0 * i as f64)))
            .collect::<Vec<_>>();

        let a = pack(&shapes, 4.0, PackConfig::default()).unwrap();
        let b = pack(&moved, 4.0, PackConfig::default()).unwrap();
        assert!((a.width() - b.width()).abs() < 1e-3);
        assert!((a.height() - b.height()).abs() < 1e-3);
    }

    #[test]
    fn borders_only_grow() {
        let shapes = mixed_shapes();
        let mut engine = PlacementEngine::new(&shapes, 4.0, lazy_config()).unwrap();

        let mut previous: Option<Borders> = None;
        for (index, shape) in shapes.iter().enumerate() {
            engine.place(index, shape).unwrap();
            let borders = engine.borders().unwrap();
            if let Some(prev) = previous {
                assert!(borders.left <= prev.left + TOLERANCE);
                assert!(borders.bottom <= prev.bottom + TOLERANCE);
                assert!(borders.right >= prev.right - TOLERANCE);
                assert!(borders.top >= prev.top - TOLERANCE);
            }
            assert!(assertions::placed_within_borders(engine.placed(), &borders));
            previous = Some(borders);
        }
        assert_eq!(engine.placed().len(), shapes.len());
    }

    #[test]
    fn first_polygon_stays_in_place() {
        let shapes = mixed_shapes();
        let mut engine = PlacementEngine::new(&shapes, 4.0, lazy_config()).unwrap();
        let placed = engine.place(0, &shapes[0]).unwrap();
        assert!(placed.translation.almost_eq(&Vector::ZERO));
    }

    #[test]
    fn polygon_wider_than_container() {
        let shapes = vec![
            unit_square(),
            polygon(&[(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)]),
        ];
        let result = pack(&shapes, 2.0, PackConfig::default());
        assert_eq!(
            result,
            Err(NestError::ExceedsContainer {
                index: 1,
                width: 3.0,
                container_width: 2.0
            })
        );
    }

    #[test_case(0.0; "zero")]
    #[test_case(-1.0; "negative")]
    #[test_case(f64::NAN; "not a number")]
    fn invalid_container(container_width: f64) {
        let result = pack(&[unit_square()], container_width, PackConfig::default());
        assert!(matches!(result, Err(NestError::InvalidContainer(_))));
    }

    #[test]
    fn empty_input() {
        let result = pack(&[], 10.0, PackConfig::default());
        assert!(matches!(result, Err(NestError::DegenerateInput(_))));
    }

    fn failing_orbit_config(failure_policy: FailurePolicy) -> PackConfig {
        PackConfig {
            orbit: OrbitConfig { max_iterations: 1 },
            failure_policy,
            ..PackConfig::default()
        }
    }

    #[test]
    fn unplaceable_polygons_are_skipped() {
        init_logger();
        let squares = vec![unit_square(); 3];
        let arrangement = pack(&squares, 10.0, failing_orbit_config(FailurePolicy::Skip)).unwrap();

        assert_eq!(arrangement.placed.len(), 1);
        assert_eq!(arrangement.skipped, vec![1, 2]);
    }

    #[test]
    fn unplaceable_polygon_aborts() {
        let squares = vec![unit_square(); 3];
        let result = pack(&squares, 10.0, failing_orbit_config(FailurePolicy::Abort));
        assert_eq!(result, Err(NestError::NoFeasiblePlacement { index: 1 }));
    }

    #[test_case(PackConfig::default(); "eager")]
    #[test_case(lazy_config(); "lazy")]
    fn raised_cancel_flag(config: PackConfig) {
        let flag = Arc::new(AtomicBool::new(true));
        let squares = vec![unit_square(); 3];
        let result = pack_with_cancel_flag(&squares, 10.0, config, flag);
        assert_eq!(result, Err(NestError::Cancelled));
    }

    #[test]
    fn lowered_cancel_flag_does_not_interfere() {
        let flag = Arc::new(AtomicBool::new(false));
        let squares = vec![unit_square(); 3];
        let arrangement = pack_with_cancel_flag(&squares, 10.0, PackConfig::default(), flag).unwrap();
        assert_eq!(arrangement.placed.len(), 3);
    }
}
