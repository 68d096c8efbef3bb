use kmstep::{metrics, ClusteringEngine, Error, Phase};
use proptest::prelude::*;

fn coords() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..30)
}

/// Engine over `points` with `k` centroids, some points pinned
fn setup(
    points: &[(f64, f64)],
    k: usize,
    pins: &[(usize, usize)],
    seed: u64,
) -> ClusteringEngine {
    let mut engine = ClusteringEngine::seeded(seed);
    engine.load_dataset(points).unwrap();
    for _ in 1..k {
        engine.add_centroid().unwrap();
    }
    for &(p, c) in pins {
        engine.pin_point(p % points.len(), c % k).unwrap();
    }
    engine
}

proptest! {
    #[test]
    fn prop_load_seeds_on_a_point(points in coords(), seed in any::<u64>()) {
        let mut engine = ClusteringEngine::seeded(seed);
        engine.load_dataset(&points).unwrap();
        prop_assert_eq!(engine.centroids().len(), 1);
        prop_assert!(points.contains(&engine.centroids()[0].position()));
        prop_assert_eq!(engine.phase(), Phase::Assign);
        prop_assert_eq!(engine.iteration_count(), 0);
    }

    #[test]
    fn prop_phase_alternates(points in coords(), k in 1usize..5, n in 0usize..6) {
        let mut engine = setup(&points, k, &[], 1);
        let start = engine.phase();
        let mut expected = start;
        for _ in 0..(2 * n) {
            prop_assert_eq!(engine.step().unwrap(), expected);
            expected = expected.next();
        }
        prop_assert_eq!(engine.phase(), start);
        prop_assert_eq!(engine.iteration_count(), 2 * n as u64);
    }

    #[test]
    fn prop_assign_respects_pins_and_distance(
        points in coords(),
        k in 1usize..5,
        pins in prop::collection::vec((0usize..30, 0usize..5), 0..6),
        seed in any::<u64>(),
    ) {
        let mut engine = setup(&points, k, &pins, seed);
        let before = engine.points().to_vec();
        prop_assert_eq!(engine.step().unwrap(), Phase::Assign);

        for (old, new) in before.iter().zip(engine.points()) {
            if old.is_fixed() {
                prop_assert!(new.is_fixed());
                prop_assert_eq!(new.cluster(), old.cluster());
            } else {
                let c = new.cluster().unwrap();
                let d = metrics::distance(new.position(), engine.centroids()[c].position());
                for (i, other) in engine.centroids().iter().enumerate() {
                    let od = metrics::distance(new.position(), other.position());
                    prop_assert!(d <= od);
                    if i < c {
                        prop_assert!(od > d);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_update_moves_to_means(
        points in coords(),
        k in 1usize..5,
        pins in prop::collection::vec((0usize..30, 0usize..5), 0..6),
        seed in any::<u64>(),
    ) {
        let mut engine = setup(&points, k, &pins, seed);
        engine.step().unwrap();
        let old = engine.centroids().to_vec();
        let assigned = engine.points().to_vec();
        prop_assert_eq!(engine.step().unwrap(), Phase::Update);

        for (i, centroid) in engine.centroids().iter().enumerate() {
            let members: Vec<(f64, f64)> = assigned
                .iter()
                .filter(|p| p.cluster() == Some(i))
                .map(|p| p.position())
                .collect();
            if members.is_empty() {
                prop_assert_eq!(centroid.position(), old[i].position());
            } else {
                let n = members.len() as f64;
                let mx = members.iter().map(|m| m.0).sum::<f64>() / n;
                let my = members.iter().map(|m| m.1).sum::<f64>() / n;
                prop_assert!((centroid.x - mx).abs() < 1e-9);
                prop_assert!((centroid.y - my).abs() < 1e-9);
            }
            prop_assert_eq!(centroid.color, old[i].color);
        }
        // Update never touches membership
        prop_assert_eq!(engine.points(), &assigned[..]);
    }

    #[test]
    fn prop_add_centroid_appends_only(
        points in coords(),
        k in 1usize..5,
        steps in 0usize..4,
        seed in any::<u64>(),
    ) {
        let mut engine = setup(&points, k, &[(0, 0)], seed);
        for _ in 0..steps {
            engine.step().unwrap();
        }
        let before = engine.points().to_vec();
        let centroids = engine.centroids().to_vec();
        let phase = engine.phase();

        let idx = engine.add_centroid().unwrap();
        prop_assert_eq!(idx, k);
        prop_assert_eq!(engine.centroids().len(), k + 1);
        prop_assert_eq!(&engine.centroids()[..k], &centroids[..]);
        prop_assert!(points.contains(&engine.centroids()[k].position()));
        prop_assert_eq!(engine.points(), &before[..]);
        prop_assert_eq!(engine.phase(), phase);
        prop_assert_eq!(engine.iteration_count(), steps as u64);
    }

    #[test]
    fn prop_failed_load_is_noop(points in coords(), k in 1usize..4, seed in any::<u64>()) {
        let mut engine = setup(&points, k, &[(0, 0)], seed);
        engine.step().unwrap();
        let pts = engine.points().to_vec();
        let cs = engine.centroids().to_vec();

        prop_assert!(matches!(engine.load_dataset(&[]), Err(Error::InvalidDataset(_))));
        prop_assert_eq!(engine.points(), &pts[..]);
        prop_assert_eq!(engine.centroids(), &cs[..]);
        prop_assert_eq!(engine.phase(), Phase::Update);
        prop_assert_eq!(engine.iteration_count(), 1);
    }
}

#[test]
fn test_pin_then_unpin_scenario() {
    // Point (0,0); centroids (10,0) and (0,10)
    let mut engine = ClusteringEngine::seeded(3);
    engine.load_dataset(&[(0.0, 0.0), (1.0, 10.0)]).unwrap();
    engine.add_centroid().unwrap();
    engine.move_centroid(0, 10.0, 0.0).unwrap();
    engine.move_centroid(1, 0.0, 10.0).unwrap();

    engine.pin_point(0, 1).unwrap();
    engine.step().unwrap();
    assert_eq!(engine.points()[0].cluster(), Some(1));
    engine.step().unwrap();
    // Pinned (0,0) and free (1,10) average into centroid 1
    assert_eq!(engine.centroids()[1].position(), (0.5, 5.0));
    assert_eq!(engine.centroids()[0].position(), (10.0, 0.0));

    engine.unpin_point(0).unwrap();
    engine.move_centroid(1, 0.0, 10.0).unwrap();
    engine.step().unwrap();
    assert_eq!(engine.points()[0].cluster(), Some(0));
}
