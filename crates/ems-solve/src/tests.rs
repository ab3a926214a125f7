//! Unit tests for ems-solve.
//!
//! Optimality is checked against brute-force enumeration of all simple
//! paths, both on hand-crafted networks and on seeded random graphs.

#[cfg(test)]
mod helpers {
    use ems_core::{EdgeAttrs, GeoPoint, VertexId, VertexKind, WeightModel};
    use ems_graph::{DispatchGraph, DispatchGraphBuilder};

    /// Edge attributes with fixed mid-range reliabilities, parameterized on
    /// time and cost only.
    pub fn attrs(travel_time: f64, cost: f64) -> EdgeAttrs {
        EdgeAttrs::new(travel_time, 0.6, 0.5, 0.7, cost).unwrap()
    }

    /// Two hospitals with direct roads to the emergency site, identical
    /// risk/cost, different travel times:
    ///
    /// ```text
    /// H1 → E   time 10
    /// H2 → E   time 5
    /// ```
    pub fn two_hospital_net() -> (DispatchGraph, [VertexId; 3]) {
        let mut b = DispatchGraphBuilder::new();
        let h1 = b.add_vertex("H1", VertexKind::Hospital, GeoPoint::new(0.0, 0.0)).unwrap();
        let h2 = b.add_vertex("H2", VertexKind::Hospital, GeoPoint::new(0.0, 2.0)).unwrap();
        let e  = b.add_vertex("E", VertexKind::EmergencySite, GeoPoint::new(1.0, 1.0)).unwrap();
        b.add_edge(h1, e, attrs(10.0, 1.0)).unwrap();
        b.add_edge(h2, e, attrs(5.0, 1.0)).unwrap();
        (b.build(), [h1, h2, e])
    }

    /// A network with parallel and multi-hop routes so the solver has real
    /// choices to make:
    ///
    /// ```text
    /// H1 → A → E        (cheap two-hop)
    /// H1 → E            (expensive direct)
    /// H2 → A            (H2 shares the A → E leg)
    /// H2 → B → E        (alternative)
    /// ```
    pub fn diamond_net() -> (DispatchGraph, [VertexId; 5]) {
        let mut b = DispatchGraphBuilder::new();
        let h1 = b.add_vertex("H1", VertexKind::Hospital, GeoPoint::new(0.0, 0.0)).unwrap();
        let h2 = b.add_vertex("H2", VertexKind::Hospital, GeoPoint::new(0.0, 4.0)).unwrap();
        let a  = b.add_vertex("A", VertexKind::Intermediate, GeoPoint::new(1.0, 1.0)).unwrap();
        let bb = b.add_vertex("B", VertexKind::Intermediate, GeoPoint::new(1.0, 3.0)).unwrap();
        let e  = b.add_vertex("E", VertexKind::EmergencySite, GeoPoint::new(2.0, 2.0)).unwrap();

        b.add_edge(h1, a, attrs(2.0, 0.5)).unwrap();
        b.add_edge(a, e, attrs(3.0, 0.7)).unwrap();
        b.add_edge(h1, e, attrs(12.0, 3.0)).unwrap();
        b.add_edge(h2, a, attrs(4.0, 1.0)).unwrap();
        b.add_edge(h2, bb, attrs(1.0, 0.2)).unwrap();
        b.add_edge(bb, e, attrs(8.0, 2.0)).unwrap();

        (b.build(), [h1, h2, a, bb, e])
    }

    /// Minimum composite cost over all simple paths `from → to` in the
    /// original direction, by exhaustive DFS.  Ground truth for optimality
    /// tests; exponential, so only for small graphs.
    pub fn brute_force(
        graph: &DispatchGraph,
        model: &WeightModel,
        from: VertexId,
        to: VertexId,
    ) -> Option<f64> {
        fn dfs(
            graph: &DispatchGraph,
            model: &WeightModel,
            current: VertexId,
            to: VertexId,
            visited: &mut Vec<bool>,
            acc: f64,
            best: &mut Option<f64>,
        ) {
            if current == to {
                *best = Some(best.map_or(acc, |b: f64| b.min(acc)));
                return;
            }
            visited[current.index()] = true;
            for edge in graph.out_edges(current) {
                let next = graph.edge_to[edge.index()];
                if !visited[next.index()] {
                    let w = model.composite(&graph.edge_attrs[edge.index()]);
                    dfs(graph, model, next, to, visited, acc + w, best);
                }
            }
            visited[current.index()] = false;
        }

        let mut best = None;
        let mut visited = vec![false; graph.vertex_count()];
        dfs(graph, model, from, to, &mut visited, 0.0, &mut best);
        best
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod solver {
    use ems_core::{VertexId, WeightModel};
    use ems_graph::DispatchGraphBuilder;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::solver::ReverseSolve;
    use crate::SolveError;

    #[test]
    fn source_settles_at_zero() {
        let (g, [_, _, e]) = super::helpers::two_hospital_net();
        let solve = ReverseSolve::run(&g, &WeightModel::standard(), e, &[]).unwrap();
        assert_eq!(solve.distance_to(e), Some(0.0));
        assert!(solve.table().settled[e.index()]);
        assert_eq!(solve.table().pred_vertex[e.index()], VertexId::INVALID);
    }

    #[test]
    fn optimality_on_diamond() {
        // Solver distance equals the brute-force minimum for every vertex.
        let (g, vertices) = super::helpers::diamond_net();
        let model = WeightModel::standard();
        let e = vertices[4];
        let solve = ReverseSolve::run(&g, &model, e, &[]).unwrap();

        for &v in &vertices {
            let expected = super::helpers::brute_force(&g, &model, v, e);
            match expected {
                Some(cost) => {
                    let got = solve.distance_to(v).expect("reachable vertex");
                    assert!((got - cost).abs() < 1e-12, "vertex {v}: got {got}, want {cost}");
                }
                None => assert_eq!(solve.distance_to(v), None),
            }
        }
    }

    #[test]
    fn optimality_on_random_graphs() {
        // Brute-force cross-check on seeded random graphs: 20 graphs,
        // 6–9 vertices, random attributes within their domains.
        let model = WeightModel::standard();
        for seed in 0..20u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let n = rng.gen_range(6..=9);

            let mut b = DispatchGraphBuilder::new();
            let ids: Vec<VertexId> = (0..n)
                .map(|i| {
                    b.add_vertex(
                        format!("V{i}"),
                        ems_core::VertexKind::Intermediate,
                        ems_core::GeoPoint::new(i as f32, 0.0),
                    )
                    .unwrap()
                })
                .collect();

            for &u in &ids {
                for &v in &ids {
                    if u != v && rng.gen_bool(0.35) {
                        let attrs = ems_core::EdgeAttrs::new(
                            rng.gen_range(0.0..30.0),
                            rng.gen_range(0.0..=1.0),
                            rng.gen_range(0.0..=1.0),
                            rng.gen_range(0.0..=1.0),
                            rng.gen_range(0.0..10.0),
                        )
                        .unwrap();
                        b.add_edge(u, v, attrs).unwrap();
                    }
                }
            }
            let g = b.build();
            let emergency = ids[0];
            let solve = ReverseSolve::run(&g, &model, emergency, &[]).unwrap();

            for &v in &ids {
                let expected = super::helpers::brute_force(&g, &model, v, emergency);
                let got = solve.distance_to(v);
                match (got, expected) {
                    (Some(got), Some(want)) => assert!(
                        (got - want).abs() < 1e-9,
                        "seed {seed}, vertex {v}: got {got}, want {want}"
                    ),
                    (None, None) => {}
                    other => panic!("seed {seed}, vertex {v}: mismatch {other:?}"),
                }
            }
        }
    }

    #[test]
    fn forward_path_direction_and_cost() {
        // The reconstructed path runs hospital → emergency, and re-summing
        // original-direction edge weights reproduces the solver distance.
        let (g, [h1, h2, _, _, e]) = super::helpers::diamond_net();
        let model = WeightModel::standard();
        let solve = ReverseSolve::run(&g, &model, e, &[]).unwrap();

        for h in [h1, h2] {
            let path = solve.forward_path(h).unwrap();
            assert_eq!(*path.first().unwrap(), h);
            assert_eq!(*path.last().unwrap(), e);

            let mut sum = 0.0;
            for pair in path.windows(2) {
                let edge = g.find_edge(pair[0], pair[1]).expect("forward edge exists");
                sum += model.composite(&g.edge_attrs[edge.index()]);
            }
            let dist = solve.distance_to(h).unwrap();
            assert!((sum - dist).abs() < 1e-12, "hospital {h}: {sum} vs {dist}");
        }
    }

    #[test]
    fn early_exit_matches_full_solve() {
        let (g, [h1, h2, _, _, e]) = super::helpers::diamond_net();
        let model = WeightModel::standard();

        let full = ReverseSolve::run(&g, &model, e, &[]).unwrap();
        let early = ReverseSolve::run(&g, &model, e, &[h1, h2]).unwrap();

        for h in [h1, h2] {
            assert_eq!(early.distance_to(h), full.distance_to(h));
            assert_eq!(early.forward_path(h), full.forward_path(h));
        }
    }

    #[test]
    fn unknown_vertices_rejected() {
        let (g, [h1, _, e]) = super::helpers::two_hospital_net();
        let model = WeightModel::standard();

        let result = ReverseSolve::run(&g, &model, VertexId(99), &[h1]);
        assert!(matches!(result, Err(SolveError::UnknownVertex(VertexId(99)))));

        let result = ReverseSolve::run(&g, &model, e, &[VertexId(42)]);
        assert!(matches!(result, Err(SolveError::UnknownVertex(VertexId(42)))));
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use ems_core::{GeoPoint, VertexKind, WeightModel};
    use ems_graph::DispatchGraphBuilder;

    use crate::{plan_dispatch, HospitalOutcome, SolveError};

    #[test]
    fn faster_hospital_wins() {
        // Identical risk/cost on both edges, so the time term decides.
        let (g, [h1, h2, e]) = super::helpers::two_hospital_net();
        let model = WeightModel::standard();
        let result = plan_dispatch(&g, &model, e, &[h1, h2]).unwrap();

        assert_eq!(result.selected, h2);
        assert_eq!(result.path, vec![h2, e]);
        assert_eq!(result.ranking.len(), 2);
        assert_eq!(result.ranking[0].hospital, h2);
        assert_eq!(result.ranking[1].hospital, h1);

        // Cost gap is purely the weighted, normalized time difference.
        let h1_cost = result.ranking[1].composite_cost().unwrap();
        let gap = h1_cost - result.total_cost;
        assert!((gap - 0.619 * (10.0 - 5.0) / 10.0).abs() < 1e-12);
    }

    #[test]
    fn unreachable_hospital_listed_not_ranked() {
        // H1 has no directed path to E; it must appear in the ranking
        // as unreachable, after every reachable hospital.
        let mut b = DispatchGraphBuilder::new();
        let h1 = b.add_vertex("H1", VertexKind::Hospital, GeoPoint::new(0.0, 0.0)).unwrap();
        let h2 = b.add_vertex("H2", VertexKind::Hospital, GeoPoint::new(0.0, 2.0)).unwrap();
        let e  = b.add_vertex("E", VertexKind::EmergencySite, GeoPoint::new(1.0, 1.0)).unwrap();
        b.add_edge(h2, e, super::helpers::attrs(5.0, 1.0)).unwrap();
        // note: edge E → H1 exists but the dispatch direction does not.
        b.add_edge(e, h1, super::helpers::attrs(2.0, 0.5)).unwrap();
        let g = b.build();

        let result = plan_dispatch(&g, &WeightModel::standard(), e, &[h1, h2]).unwrap();
        assert_eq!(result.selected, h2);
        assert_eq!(result.ranking.len(), 2);
        assert_eq!(result.ranking[1].hospital, h1);
        assert_eq!(result.ranking[1].outcome, HospitalOutcome::Unreachable);
        assert_eq!(result.reachable_count(), 1);
    }

    #[test]
    fn no_reachable_hospital_is_an_error() {
        let mut b = DispatchGraphBuilder::new();
        let h = b.add_vertex("H", VertexKind::Hospital, GeoPoint::new(0.0, 0.0)).unwrap();
        let e = b.add_vertex("E", VertexKind::EmergencySite, GeoPoint::new(1.0, 1.0)).unwrap();
        let g = b.build(); // no edges at all

        let err = plan_dispatch(&g, &WeightModel::standard(), e, &[h]).unwrap_err();
        assert!(matches!(err, SolveError::NoRouteFound { emergency } if emergency == e));
    }

    #[test]
    fn empty_hospital_set_is_an_error() {
        let (g, [_, _, e]) = super::helpers::two_hospital_net();
        let err = plan_dispatch(&g, &WeightModel::standard(), e, &[]).unwrap_err();
        assert!(matches!(err, SolveError::NoRouteFound { .. }));
    }

    #[test]
    fn equal_cost_tie_breaks_on_vertex_id() {
        // Two hospitals with byte-identical edges to E: the lower VertexId
        // must win, and the ranking order must be stable.
        let mut b = DispatchGraphBuilder::new();
        let h1 = b.add_vertex("H1", VertexKind::Hospital, GeoPoint::new(0.0, 0.0)).unwrap();
        let h2 = b.add_vertex("H2", VertexKind::Hospital, GeoPoint::new(0.0, 2.0)).unwrap();
        let e  = b.add_vertex("E", VertexKind::EmergencySite, GeoPoint::new(1.0, 1.0)).unwrap();
        let attrs = super::helpers::attrs(5.0, 1.0);
        b.add_edge(h1, e, attrs).unwrap();
        b.add_edge(h2, e, attrs).unwrap();
        let g = b.build();

        let result = plan_dispatch(&g, &WeightModel::standard(), e, &[h2, h1]).unwrap();
        assert_eq!(result.selected, h1);
        assert_eq!(result.ranking[0].hospital, h1);
        assert_eq!(result.ranking[1].hospital, h2);
        assert_eq!(
            result.ranking[0].composite_cost(),
            result.ranking[1].composite_cost()
        );
    }

    #[test]
    fn repeated_queries_identical() {
        // Same graph, same query: identical selection, path, and ranking.
        let (g, [h1, h2, _, _, e]) = super::helpers::diamond_net();
        let model = WeightModel::standard();

        let first = plan_dispatch(&g, &model, e, &[h1, h2]).unwrap();
        let second = plan_dispatch(&g, &model, e, &[h1, h2]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn breakdown_sums_route_edges() {
        let (g, [h1, _, a, _, e]) = super::helpers::diamond_net();
        let model = WeightModel::standard();
        let result = plan_dispatch(&g, &model, e, &[h1]).unwrap();

        // Best route for H1 is the two-hop H1 → A → E.
        assert_eq!(result.path, vec![h1, a, e]);
        assert_eq!(result.breakdown.travel_time, 2.0 + 3.0);
        assert_eq!(result.breakdown.cost, 0.5 + 0.7);

        // Composite cost decomposes into its three criterion terms.
        let time_term = 0.619 * result.breakdown.travel_time / 10.0;
        let cost_term = 0.096 * result.breakdown.cost / 10.0;
        let rebuilt = time_term + result.breakdown.risk.total() + cost_term;
        assert!((rebuilt - result.total_cost).abs() < 1e-12);
    }
}

// ── Tunis scenario ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tunis {
    use ems_core::{EdgeAttrs, GeoPoint, VertexId, VertexKind, WeightModel};
    use ems_graph::{DispatchGraph, DispatchGraphBuilder};

    use crate::plan_dispatch;

    /// The source study's Tunis network: four hospitals dispatching toward
    /// an incident at Tunisia Mall.  Reliabilities are `1 − risk` of the
    /// study's per-edge risk factors.
    fn tunis() -> DispatchGraph {
        let mut b = DispatchGraphBuilder::new();
        let v = |b: &mut DispatchGraphBuilder, label: &str, kind| {
            b.add_vertex(label, kind, GeoPoint::new(36.8, 10.2)).unwrap()
        };

        let mongi   = v(&mut b, "Mongi_Slim", VertexKind::Hospital);
        let charles = v(&mut b, "Charles_Nicolle", VertexKind::Hospital);
        let habib   = v(&mut b, "Habib_Thamer", VertexKind::Hospital);
        let rabta   = v(&mut b, "Rabta", VertexKind::Hospital);
        let ain     = v(&mut b, "Ain_Zaghouan", VertexKind::Intermediate);
        let jardin  = v(&mut b, "Jardin_Carthage", VertexKind::Intermediate);
        let moncef  = v(&mut b, "Avenue_Moncef_Bey", VertexKind::Intermediate);
        let sadoun  = v(&mut b, "Bab_Sadoun", VertexKind::Intermediate);
        let bhar    = v(&mut b, "Beb_Bhar", VertexKind::Intermediate);
        let mall    = v(&mut b, "Tunisia_Mall", VertexKind::EmergencySite);

        let edge = |b: &mut DispatchGraphBuilder,
                    from: VertexId,
                    to: VertexId,
                    t: f64,
                    c: f64,
                    risk: (f64, f64, f64)| {
            let attrs =
                EdgeAttrs::new(t, 1.0 - risk.0, 1.0 - risk.1, 1.0 - risk.2, c).unwrap();
            b.add_edge(from, to, attrs).unwrap();
        };

        edge(&mut b, mongi, ain, 3.0, 0.76, (0.4, 0.5, 0.3));
        edge(&mut b, mongi, jardin, 5.0, 1.77, (0.3, 0.4, 0.2));
        edge(&mut b, charles, sadoun, 2.0, 0.88, (0.5, 0.6, 0.4));
        edge(&mut b, charles, bhar, 9.0, 1.89, (0.4, 0.5, 0.3));
        edge(&mut b, habib, moncef, 5.0, 1.07, (0.3, 0.4, 0.2));
        edge(&mut b, rabta, sadoun, 5.0, 0.88, (0.4, 0.5, 0.4));
        edge(&mut b, ain, mall, 6.0, 1.83, (0.6, 0.7, 0.5));
        edge(&mut b, jardin, mall, 9.0, 1.96, (0.2, 0.3, 0.1));
        edge(&mut b, moncef, mall, 19.0, 7.575, (0.3, 0.4, 0.2));
        edge(&mut b, sadoun, mall, 22.0, 8.21, (0.5, 0.6, 0.4));
        edge(&mut b, bhar, mall, 22.0, 8.21, (0.4, 0.5, 0.3));

        b.build()
    }

    #[test]
    fn mongi_slim_selected_via_ain_zaghouan() {
        let g = tunis();
        let model = WeightModel::standard();
        let emergency = g.emergency_site().unwrap();
        let hospitals: Vec<_> = g.hospitals().collect();

        let result = plan_dispatch(&g, &model, emergency, &hospitals).unwrap();

        let labels: Vec<_> = result.path.iter().map(|&v| g.label(v)).collect();
        assert_eq!(labels, ["Mongi_Slim", "Ain_Zaghouan", "Tunisia_Mall"]);
        assert!((result.total_cost - 0.871_473_6).abs() < 1e-9);

        let order: Vec<_> = result.ranking.iter().map(|r| g.label(r.hospital)).collect();
        assert_eq!(order, ["Mongi_Slim", "Habib_Thamer", "Charles_Nicolle", "Rabta"]);
        assert_eq!(result.reachable_count(), 4);
    }

    #[test]
    fn ranking_agrees_with_brute_force() {
        let g = tunis();
        let model = WeightModel::standard();
        let emergency = g.emergency_site().unwrap();
        let hospitals: Vec<_> = g.hospitals().collect();

        let result = plan_dispatch(&g, &model, emergency, &hospitals).unwrap();
        for rank in &result.ranking {
            let want = super::helpers::brute_force(&g, &model, rank.hospital, emergency)
                .expect("every Tunis hospital reaches the mall");
            let got = rank.composite_cost().unwrap();
            assert!((got - want).abs() < 1e-12, "{}: {got} vs {want}", g.label(rank.hospital));
        }
    }

    #[test]
    fn breakdown_matches_study_totals() {
        let g = tunis();
        let model = WeightModel::standard();
        let emergency = g.emergency_site().unwrap();
        let hospitals: Vec<_> = g.hospitals().collect();

        let result = plan_dispatch(&g, &model, emergency, &hospitals).unwrap();
        // Mongi_Slim → Ain_Zaghouan → Tunisia_Mall: 3 + 6 min, 0.76 + 1.83 TND.
        assert!((result.breakdown.travel_time - 9.0).abs() < 1e-12);
        assert!((result.breakdown.cost - 2.59).abs() < 1e-12);
        assert!((result.breakdown.risk.total() - 0.289_509_6).abs() < 1e-9);
    }
}

// ── Batch queries ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod batch {
    use ems_core::WeightModel;

    use crate::{plan_dispatch, plan_dispatch_batch, DispatchQuery};

    #[test]
    fn batch_matches_single_queries() {
        let (g, [h1, h2, _, _, e]) = super::helpers::diamond_net();
        let model = WeightModel::standard();

        let queries = vec![
            DispatchQuery { emergency: e, hospitals: vec![h1, h2] },
            DispatchQuery { emergency: e, hospitals: vec![h1] },
            DispatchQuery { emergency: e, hospitals: vec![h2] },
        ];
        let batch = plan_dispatch_batch(&g, &model, &queries);
        assert_eq!(batch.len(), 3);

        for (query, outcome) in queries.iter().zip(&batch) {
            let single = plan_dispatch(&g, &model, query.emergency, &query.hospitals).unwrap();
            assert_eq!(outcome.as_ref().unwrap(), &single);
        }
    }
}
