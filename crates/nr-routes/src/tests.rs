//! Unit tests for nr-routes.
//!
//! Most tests drive the public [`RoadMap`](crate::RoadMap) facade and compare
//! route descriptions as text.

#[cfg(test)]
mod helpers {
    use nr_core::RouteId;

    use crate::RoadMap;

    pub fn map(roads: &[(&str, &str, u32, i32)]) -> RoadMap {
        let mut m = RoadMap::new();
        for &(a, b, length, year) in roads {
            m.add_road(a, b, length, year).unwrap();
        }
        m
    }

    /// `A-B-C` (length 20) beats the direct `A-C` (length 25).
    pub fn triangle() -> RoadMap {
        map(&[
            ("A", "B", 10, 2000),
            ("B", "C", 10, 1990),
            ("A", "C", 25, 2020),
        ])
    }

    /// The triangle plus a detour `A-D-B` of length 12.
    pub fn triangle_with_detour() -> RoadMap {
        let mut m = triangle();
        m.add_road("A", "D", 6, 2001).unwrap();
        m.add_road("D", "B", 6, 2002).unwrap();
        m
    }

    pub fn desc(m: &RoadMap, id: u32) -> String {
        m.describe_route(RouteId(id))
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use nr_core::{MapError, RouteId};

    use super::helpers::{desc, triangle};

    #[test]
    fn shortest_route_through_b() {
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
    }

    #[test]
    fn removing_the_only_bridge_fails_and_changes_nothing() {
        // The only way around A-B runs through C, which the route already
        // visits; the splice would not be a simple path.
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();

        let err = m.remove_road("A", "B").unwrap_err();
        assert!(matches!(err, MapError::NoUniquePath { .. }), "{err:?}");
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
        assert_eq!(m.graph().segment_count(), 3);
    }

    #[test]
    fn removing_road_without_routes_falls_back_to_direct_road() {
        let mut m = triangle();
        m.remove_road("A", "B").unwrap();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;25;2020;C");
    }

    #[test]
    fn extend_onto_own_city_is_self_intersecting() {
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(
            m.extend_route(RouteId(1), "A"),
            Err(MapError::SelfIntersectingRoute(RouteId(1), "A".into()))
        );
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
    }

    #[test]
    fn semicolon_in_name_creates_nothing() {
        let mut m = triangle();
        assert_eq!(
            m.add_road("a;b", "C", 5, 2000),
            Err(MapError::InvalidName("a;b".into()))
        );
        assert_eq!(m.graph().city_count(), 3);
        assert_eq!(m.graph().segment_count(), 3);
        assert!(m.graph().city_id("a;b").is_none());
    }
}

// ── Automatic routes ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use nr_core::{MapConfig, MapError, RouteId};

    use super::helpers::{desc, map, triangle};
    use crate::RoadMap;

    #[test]
    fn id_range_is_checked() {
        let mut m = triangle();
        let out_of_range = MapError::InvalidArgument("route id out of range");
        assert_eq!(m.new_route(RouteId(0), "A", "C"), Err(out_of_range.clone()));
        assert_eq!(m.new_route(RouteId(1000), "A", "C"), Err(out_of_range.clone()));
        assert_eq!(m.remove_route(RouteId(1000)), Err(out_of_range));
        m.new_route(RouteId(999), "A", "C").unwrap();
        assert_eq!(desc(&m, 999), "999;A;10;2000;B;10;1990;C");
    }

    #[test]
    fn configured_id_limit() {
        let mut m = RoadMap::with_config(MapConfig { max_route_id: 5, ..MapConfig::default() });
        m.add_road("A", "B", 1, 2000).unwrap();
        assert!(m.new_route(RouteId(6), "A", "B").is_err());
        m.new_route(RouteId(5), "A", "B").unwrap();
        assert_eq!(m.config().max_route_id, 5);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(m.new_route(RouteId(1), "B", "C"), Err(MapError::DuplicateRouteId(RouteId(1))));
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
    }

    #[test]
    fn endpoints_must_exist_and_differ() {
        let mut m = triangle();
        assert_eq!(m.new_route(RouteId(1), "A", "Z"), Err(MapError::NoSuchCity("Z".into())));
        assert!(matches!(
            m.new_route(RouteId(1), "A", "A"),
            Err(MapError::InvalidArgument(_))
        ));
        assert_eq!(m.new_route(RouteId(1), "", "A"), Err(MapError::InvalidName(String::new())));
        assert!(m.route(RouteId(1)).is_none());
    }

    #[test]
    fn unreachable_city_gives_no_route() {
        let mut m = triangle();
        m.add_road("X", "Y", 1, 2000).unwrap();
        assert!(matches!(
            m.new_route(RouteId(1), "A", "X"),
            Err(MapError::NoUniquePath { .. })
        ));
        assert_eq!(m.route_ids().count(), 0);
    }

    #[test]
    fn equal_paths_with_equal_oldest_year_are_ambiguous() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("B", "D", 1, 2010),
            ("A", "C", 1, 2010),
            ("C", "D", 1, 2000),
        ]);
        assert!(matches!(
            m.new_route(RouteId(1), "A", "D"),
            Err(MapError::NoUniquePath { .. })
        ));
        assert_eq!(desc(&m, 1), "");
    }

    #[test]
    fn equal_paths_prefer_younger_oldest_segment() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("B", "D", 1, 2010),
            ("A", "C", 1, 2005),
            ("C", "D", 1, 2010),
        ]);
        m.new_route(RouteId(1), "A", "D").unwrap();
        assert_eq!(desc(&m, 1), "1;A;1;2005;C;1;2010;D");
    }

    #[test]
    fn extend_appends_best_path_from_last_city() {
        let mut m = triangle();
        m.add_road("C", "D", 5, 2010).unwrap();
        m.new_route(RouteId(1), "A", "B").unwrap();
        m.extend_route(RouteId(1), "D").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C;5;2010;D");
    }

    #[test]
    fn extend_does_not_pass_through_the_route() {
        // B-A-Z is shorter but would revisit A.
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("A", "Z", 1, 2000),
            ("B", "Z", 10, 2000),
        ]);
        m.new_route(RouteId(1), "A", "B").unwrap();
        m.extend_route(RouteId(1), "Z").unwrap();
        assert_eq!(desc(&m, 1), "1;A;1;2000;B;10;2000;Z");
        assert_eq!(m.route(RouteId(1)).unwrap().len(), 3);
    }

    #[test]
    fn extend_failure_leaves_route_unchanged() {
        let mut m = map(&[("A", "B", 1, 2000), ("A", "Z", 1, 2000)]);
        m.new_route(RouteId(1), "A", "B").unwrap();
        assert!(matches!(
            m.extend_route(RouteId(1), "Z"),
            Err(MapError::NoUniquePath { .. })
        ));
        assert_eq!(m.extend_route(RouteId(2), "Z"), Err(MapError::NoSuchRoute(RouteId(2))));
        assert_eq!(desc(&m, 1), "1;A;1;2000;B");
    }

    #[test]
    fn remove_route_keeps_roads() {
        let mut m = triangle();
        m.new_route(RouteId(7), "A", "C").unwrap();
        m.remove_route(RouteId(7)).unwrap();
        assert_eq!(desc(&m, 7), "");
        assert_eq!(m.remove_route(RouteId(7)), Err(MapError::NoSuchRoute(RouteId(7))));
        assert_eq!(m.graph().segment_count(), 3);
        assert_eq!(m.graph().city_count(), 3);
        // The number is free again.
        m.new_route(RouteId(7), "C", "A").unwrap();
        assert_eq!(desc(&m, 7), "7;C;10;1990;B;10;2000;A");
    }

    #[test]
    fn route_ids_are_ascending() {
        let mut m = triangle();
        m.new_route(RouteId(30), "A", "C").unwrap();
        m.new_route(RouteId(2), "B", "C").unwrap();
        m.new_route(RouteId(11), "A", "B").unwrap();
        let ids: Vec<_> = m.route_ids().collect();
        assert_eq!(ids, vec![RouteId(2), RouteId(11), RouteId(30)]);
        assert_eq!(m.routes().len(), 3);
    }

    #[test]
    fn structured_description() {
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();
        let d = m.route_description(RouteId(1)).unwrap();
        assert_eq!(d.cities().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(d.total_length(), 20);
        assert!(m.route_description(RouteId(2)).is_none());
        assert!(m.route_description(RouteId(0)).is_none());
    }
}

// ── Declared routes ───────────────────────────────────────────────────────────

#[cfg(test)]
mod custom {
    use nr_core::{MapError, RouteId};

    use super::helpers::{desc, map};
    use crate::{Leg, RoadMap};

    #[test]
    fn round_trip() {
        let mut m = RoadMap::new();
        assert_eq!(m.new_custom_route(RouteId(5), "Kraków"), Ok(RouteId(5)));
        assert_eq!(desc(&m, 5), "5;Kraków");
        m.extend_custom_route(RouteId(5), 80, 1999, "Tarnów").unwrap();
        m.extend_custom_route(RouteId(5), 100, -5, "Rzeszów").unwrap();
        assert_eq!(desc(&m, 5), "5;Kraków;80;1999;Tarnów;100;-5;Rzeszów");
        assert_eq!(m.graph().city_count(), 3);
        assert_eq!(m.graph().segment_count(), 2);
    }

    #[test]
    fn existing_road_with_newer_year_is_repaired() {
        let mut m = map(&[("A", "B", 10, 2000)]);
        m.new_custom_route(RouteId(1), "A").unwrap();
        m.extend_custom_route(RouteId(1), 10, 2010, "B").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2010;B");
        assert_eq!(m.graph().segment_count(), 1);
    }

    #[test]
    fn existing_road_must_agree() {
        let mut m = map(&[("A", "B", 10, 2000)]);
        m.new_custom_route(RouteId(1), "A").unwrap();
        assert!(matches!(
            m.extend_custom_route(RouteId(1), 11, 2000, "B"),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            m.extend_custom_route(RouteId(1), 10, 1999, "B"),
            Err(MapError::InvalidArgument(_))
        ));
        assert_eq!(desc(&m, 1), "1;A");
        m.extend_custom_route(RouteId(1), 10, 2000, "B").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B");
    }

    #[test]
    fn invalid_legs_rejected() {
        let mut m = RoadMap::new();
        m.new_custom_route(RouteId(1), "A").unwrap();
        assert!(matches!(m.extend_custom_route(RouteId(1), 0, 2000, "B"), Err(MapError::InvalidArgument(_))));
        assert!(matches!(m.extend_custom_route(RouteId(1), 1, 0, "B"), Err(MapError::InvalidArgument(_))));
        assert_eq!(
            m.extend_custom_route(RouteId(1), 1, 2000, "B\n"),
            Err(MapError::InvalidName("B\n".into()))
        );
        assert_eq!(
            m.extend_custom_route(RouteId(2), 1, 2000, "B"),
            Err(MapError::NoSuchRoute(RouteId(2)))
        );
        assert_eq!(m.graph().city_count(), 1);
    }

    #[test]
    fn revisiting_a_city_is_self_intersecting() {
        let mut m = RoadMap::new();
        m.new_custom_route(RouteId(1), "A").unwrap();
        m.extend_custom_route(RouteId(1), 1, 2000, "B").unwrap();
        m.extend_custom_route(RouteId(1), 1, 2000, "C").unwrap();
        assert_eq!(
            m.extend_custom_route(RouteId(1), 1, 2000, "A"),
            Err(MapError::SelfIntersectingRoute(RouteId(1), "A".into()))
        );
        assert_eq!(m.graph().segment_count(), 2);
    }

    #[test]
    fn custom_route_needs_free_id() {
        let mut m = RoadMap::new();
        m.new_custom_route(RouteId(1), "A").unwrap();
        assert_eq!(m.new_custom_route(RouteId(1), "B"), Err(MapError::DuplicateRouteId(RouteId(1))));
        assert!(m.new_custom_route(RouteId(0), "B").is_err());
        assert!(m.graph().city_id("B").is_none());
    }

    #[test]
    fn declare_whole_route() {
        let mut m = map(&[("B", "C", 7, 1995)]);
        m.declare_route(
            RouteId(3),
            "A",
            &[Leg::new(5, 2000, "B"), Leg::new(7, 2001, "C"), Leg::new(2, 1980, "D")],
        )
        .unwrap();
        assert_eq!(desc(&m, 3), "3;A;5;2000;B;7;2001;C;2;1980;D");
        assert_eq!(m.graph().segment_count(), 3);
    }

    #[test]
    fn rejected_declaration_changes_nothing() {
        let mut m = map(&[("B", "C", 7, 1995)]);
        let cases: &[&[Leg]] = &[
            &[],
            &[Leg::new(5, 2000, "B"), Leg::new(1, 2000, "A")],
            &[Leg::new(5, 2000, "B"), Leg::new(1, 2000, "X"), Leg::new(1, 2000, "B")],
            &[Leg::new(5, 2000, "B"), Leg::new(8, 2000, "C")],
            &[Leg::new(5, 2000, "B"), Leg::new(7, 1990, "C")],
            &[Leg::new(5, 2000, "X"), Leg::new(0, 2000, "Y")],
            &[Leg::new(5, 2000, "X;Y")],
        ];
        for legs in cases {
            assert!(m.declare_route(RouteId(3), "A", legs).is_err(), "{legs:?}");
            assert!(m.route(RouteId(3)).is_none());
            assert_eq!(m.graph().city_count(), 2);
            assert_eq!(m.graph().segment_count(), 1);
        }
    }
}

// ── Road removal ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod removal {
    use nr_core::{MapError, RouteId};

    use super::helpers::{desc, map, triangle, triangle_with_detour};
    use crate::Leg;

    #[test]
    fn route_is_spliced_around_removed_road() {
        let mut m = triangle_with_detour();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");

        m.remove_road("A", "B").unwrap();
        assert_eq!(desc(&m, 1), "1;A;6;2001;D;6;2002;B;10;1990;C");
        assert!(m.graph().segment_between("A", "B").is_err());
        assert_eq!(m.graph().city_count(), 4);
    }

    #[test]
    fn splice_follows_route_direction() {
        let mut m = triangle_with_detour();
        m.new_route(RouteId(1), "C", "A").unwrap();
        m.remove_road("B", "A").unwrap();
        assert_eq!(desc(&m, 1), "1;C;10;1990;B;6;2002;D;6;2001;A");
    }

    #[test]
    fn route_not_driving_along_road_is_untouched() {
        // Route 1 visits both A and C but never uses the road A-C.
        let mut m = triangle();
        m.new_route(RouteId(1), "A", "C").unwrap();
        m.remove_road("A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
        assert_eq!(m.graph().segment_count(), 2);
    }

    #[test]
    fn all_routes_or_none() {
        let mut m = map(&[
            ("X", "Y", 1, 2000),
            ("X", "P", 2, 2000),
            ("P", "Y", 3, 2000),
        ]);
        m.new_route(RouteId(1), "X", "Y").unwrap();
        // Route 2 already holds P, the only way around X-Y.
        m.declare_route(
            RouteId(2),
            "W",
            &[Leg::new(3, 2000, "X"), Leg::new(1, 2000, "Y"), Leg::new(3, 2000, "P")],
        )
        .unwrap();

        assert!(matches!(m.remove_road("X", "Y"), Err(MapError::NoUniquePath { .. })));
        assert_eq!(desc(&m, 1), "1;X;1;2000;Y");
        assert_eq!(desc(&m, 2), "2;W;3;2000;X;1;2000;Y;3;2000;P");
        assert_eq!(m.graph().segment_count(), 4);

        m.remove_route(RouteId(2)).unwrap();
        m.remove_road("X", "Y").unwrap();
        assert_eq!(desc(&m, 1), "1;X;2;2000;P;3;2000;Y");
        assert_eq!(m.graph().segment_count(), 3);
    }

    #[test]
    fn ambiguous_detour_blocks_removal() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("A", "P", 1, 2000),
            ("P", "B", 1, 2000),
            ("A", "Q", 1, 2000),
            ("Q", "B", 1, 2000),
        ]);
        m.new_route(RouteId(1), "A", "B").unwrap();
        assert!(matches!(m.remove_road("A", "B"), Err(MapError::NoUniquePath { .. })));
        assert_eq!(desc(&m, 1), "1;A;1;2000;B");
    }

    #[test]
    fn unknown_roads() {
        let mut m = triangle();
        assert_eq!(m.remove_road("A", "Z"), Err(MapError::NoSuchCity("Z".into())));
        m.add_road("X", "Y", 1, 2000).unwrap();
        assert_eq!(
            m.remove_road("A", "X"),
            Err(MapError::NoSuchSegment("A".into(), "X".into()))
        );
        assert_eq!(m.remove_road("A", "A;"), Err(MapError::InvalidName("A;".into())));
    }

    #[test]
    fn removed_road_can_be_added_again() {
        let mut m = triangle();
        m.remove_road("A", "B").unwrap();
        assert!(m.repair_road("A", "B", 2020).is_err());
        m.add_road("A", "B", 3, 2021).unwrap();
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;3;2021;B;10;1990;C");
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loading {
    use nr_core::RouteId;

    use super::helpers::desc;
    use crate::RoadMap;

    #[test]
    fn routes_over_loaded_roads() {
        let csv = "city_a,city_b,length,year\nA,B,10,2000\nB,C,10,1990\nA,C,25,2020\n";
        let mut m = RoadMap::new();
        assert_eq!(m.load_roads(csv.as_bytes()).unwrap(), 3);
        m.new_route(RouteId(1), "A", "C").unwrap();
        assert_eq!(desc(&m, 1), "1;A;10;2000;B;10;1990;C");
    }
}

// ── Randomized operation sequences ────────────────────────────────────────────

#[cfg(test)]
mod randomized {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use nr_core::RouteId;

    use crate::RoadMap;

    const CITIES: [&str; 8] = ["Ełk", "Koło", "Hel", "Ustka", "Reda", "Brzeg", "Iława", "Nysa"];
    const ROUTES: u32 = 6;

    /// Everything observable about a map, in a comparable form.
    #[derive(Debug, PartialEq, Eq)]
    struct Snapshot {
        cities:   usize,
        segments: Vec<(String, String, u32, i32)>,
        routes:   Vec<String>,
    }

    fn snapshot(m: &RoadMap) -> Snapshot {
        let g = m.graph();
        let mut segments = Vec::new();
        for (city, _) in g.cities() {
            for (_, s) in g.segments_of(city) {
                if s.city_a == city {
                    segments.push((
                        g.city_name(s.city_a).to_owned(),
                        g.city_name(s.city_b).to_owned(),
                        s.length,
                        s.year,
                    ));
                }
            }
        }
        segments.sort();
        Snapshot {
            cities: g.city_count(),
            segments,
            routes: m.route_ids().map(|id| m.describe_route(id)).collect(),
        }
    }

    fn check_routes(m: &RoadMap) {
        let g = m.graph();
        for route in m.routes().iter() {
            let path = route.path();
            assert!(!path.is_empty());
            for (i, city) in path.iter().enumerate() {
                assert!(!path[i + 1..].contains(city), "route {} revisits a city", route.id());
            }
            for pair in path.windows(2) {
                assert!(
                    g.find_segment(pair[0], pair[1]).is_some(),
                    "route {} uses a missing road",
                    route.id()
                );
            }
            assert!(!m.describe_route(route.id()).is_empty());
        }
    }

    fn city(rng: &mut SmallRng) -> &'static str {
        CITIES[rng.gen_range(0..CITIES.len())]
    }

    #[test]
    fn invariants_hold_and_failures_are_atomic() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut m = RoadMap::new();
        let mut successes = 0;

        for _ in 0..2000 {
            let before = snapshot(&m);
            let id = RouteId(rng.gen_range(1..=ROUTES));
            let result = match rng.gen_range(0..8) {
                0 | 1 => m.add_road(city(&mut rng), city(&mut rng), rng.gen_range(1..6), rng.gen_range(1990..2000)),
                2 => m.repair_road(city(&mut rng), city(&mut rng), rng.gen_range(1990..2010)),
                3 => m.remove_road(city(&mut rng), city(&mut rng)),
                4 => m.new_route(id, city(&mut rng), city(&mut rng)),
                5 => m.extend_route(id, city(&mut rng)),
                6 => {
                    if rng.gen_bool(0.3) {
                        m.remove_route(id)
                    } else {
                        m.new_custom_route(id, city(&mut rng)).map(|_| ())
                    }
                }
                _ => m.extend_custom_route(id, rng.gen_range(1..6), rng.gen_range(1990..2010), city(&mut rng)),
            };

            match result {
                Ok(()) => successes += 1,
                Err(e) => assert_eq!(snapshot(&m), before, "failed call changed the map: {e}"),
            }
            check_routes(&m);
        }

        assert!(successes > 100, "only {successes} calls succeeded");
    }
}
