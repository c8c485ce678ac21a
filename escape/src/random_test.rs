#[cfg(test)]
mod random_tests {
    use crate::{KeyCardParser, Person, Prison, RoomKey, reachable_rooms};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{HashMap, HashSet, VecDeque};

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn holder() -> Person {
        Person::new("Edmond", "Dantes")
    }

    struct RandomPrison {
        prison: Prison,
        keys: Vec<RoomKey>,
        edges: Vec<(usize, usize)>,
        home: usize,
    }

    impl RandomPrison {
        fn generate(rng: &mut StdRng) -> Self {
            let mut prison = Prison::new();
            let n = rng.gen_range(1..24);
            let mut keys = Vec::with_capacity(n);
            for i in 0..n {
                let mut allowed = HashSet::new();
                if rng.gen_bool(0.5) {
                    allowed.insert(Person::new(format!("inmate{i}"), "Doe"));
                }
                // room ids deliberately collide now and then
                keys.push(prison.add_room((i % 7) as i32, allowed));
            }

            let mut edges = Vec::new();
            for _ in 0..rng.gen_range(0..n * 2) {
                let a = rng.gen_range(0..n);
                let b = rng.gen_range(0..n);
                prison.connect(keys[a], keys[b]).unwrap();
                edges.push((a, b));
            }

            let home = rng.gen_range(0..n);
            let mut cells = HashMap::from([(holder(), keys[home])]);
            for i in 0..n {
                cells.insert(Person::new(format!("inmate{i}"), "Doe"), keys[i]);
            }
            prison.set_cells(cells).unwrap();

            Self {
                prison,
                keys,
                edges,
                home,
            }
        }

        /// Reachable room indices computed from the raw edge list.
        fn expected_reach(&self) -> HashSet<usize> {
            let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
            for &(a, b) in &self.edges {
                adj.entry(a).or_default().push(b);
                adj.entry(b).or_default().push(a);
            }
            let mut seen = HashSet::from([self.home]);
            let mut queue = VecDeque::from([self.home]);
            while let Some(cur) = queue.pop_front() {
                for &next in adj.get(&cur).into_iter().flatten() {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            seen
        }
    }

    #[test]
    fn reachability_matches_bfs() {
        let mut rng = StdRng::seed_from_u64(2019);
        for _ in 0..200 {
            let rp = RandomPrison::generate(&mut rng);
            let order = reachable_rooms(&rp.prison, rp.keys[rp.home]);

            let unique: HashSet<RoomKey> = order.iter().copied().collect();
            assert_eq!(unique.len(), order.len(), "room visited twice");

            let got: HashSet<usize> = order.iter().map(|k| k.index()).collect();
            assert_eq!(got, rp.expected_reach());
        }
    }

    #[test]
    fn reserved_card_grants_exactly_reachable_rooms() {
        init_logging();
        let mut rng = StdRng::seed_from_u64(29);
        let parser = KeyCardParser::new();
        let me = holder();

        for _ in 0..200 {
            let rp = RandomPrison::generate(&mut rng);
            let reach = rp.expected_reach();
            let before: Vec<String> = rp.keys.iter().map(|k| rp.prison[*k].to_string()).collect();

            let card = parser.read(&rp.prison, "Edmond,Dantes").unwrap();
            assert_eq!(card, me);

            for (i, key) in rp.keys.iter().enumerate() {
                let room = &rp.prison[*key];
                assert_eq!(room.allows_entrance(&me), reach.contains(&i));
                if i == rp.home {
                    assert!(room.to_string().contains("Dantes"));
                } else {
                    assert_eq!(room.to_string(), before[i]);
                }
            }
        }
    }

    #[test]
    fn ordinary_cards_leave_rooms_untouched() {
        init_logging();
        let mut rng = StdRng::seed_from_u64(7);
        let parser = KeyCardParser::new();

        for _ in 0..50 {
            let rp = RandomPrison::generate(&mut rng);
            let before: Vec<_> = rp.keys.iter().map(|k| rp.prison[*k].allowed_persons()).collect();

            for i in 0..rp.keys.len() {
                let card = format!("inmate{i},Doe");
                let person = parser.read(&rp.prison, &card).unwrap();
                assert_eq!(person.first_name(), format!("inmate{i}"));
            }

            let after: Vec<_> = rp.keys.iter().map(|k| rp.prison[*k].allowed_persons()).collect();
            assert_eq!(before, after);
        }
    }
}
