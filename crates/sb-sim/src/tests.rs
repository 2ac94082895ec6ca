//! Integration-style unit tests for sb-sim.
//!
//! Every test builds a `Simulator` from a small `SimConfig` and checks the
//! finished tree; none depend on the exact trees a seed produces.

#[cfg(test)]
mod helpers {
    use sb_core::{MigrationParams, Sample, SimConfig, State};
    use sb_tree::SeedbankTree;

    pub fn active_at_zero(n: usize, scale: f64) -> SimConfig {
        let samples = (0..n).map(|i| Sample::active(format!("s{i}"), 0.0)).collect();
        SimConfig::new(samples, scale)
    }

    /// Mixed states, staggered times, seedbank migration.
    pub fn mixed() -> SimConfig {
        SimConfig::new(
            vec![
                Sample::active("a", 0.0),
                Sample::active("b", 0.0),
                Sample::dormant("c", 0.0),
                Sample::dormant("d", 0.3),
                Sample::active("e", 0.7),
                Sample::new("f", State::Dormant, 1.2),
            ],
            1.0,
        )
        .with_migration(MigrationParams::SeedbankRatio { base_rate: 1.0, size_ratio: 2.0 })
    }

    /// Check the structural, timing and length properties every simulated
    /// tree must have.
    pub fn assert_well_formed(tree: &SeedbankTree, n_samples: usize) {
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.leaf_count(), n_samples);
        assert_eq!(tree.internal_count(), n_samples - 1);

        for node in tree.nodes() {
            let Some(parent) = node.parent else { continue };
            let top = tree[parent].height;
            assert!(node.height < top, "{} not below its parent", node.id);

            let mut floor = node.height;
            for change in &node.changes {
                assert!(change.time > floor && change.time <= top);
                floor = change.time;
            }

            let summed: f64 = node.segments(top).iter().map(|(_, lo, hi)| hi - lo).sum();
            assert!((summed - (top - node.height)).abs() < 1e-9);
        }
    }
}

#[cfg(test)]
mod scenarios {
    use sb_core::{MigrationParams, Sample, SimConfig, State};
    use sb_tree::to_newick;

    use super::helpers::{active_at_zero, assert_well_formed};
    use crate::simulate;

    #[test]
    fn three_active_no_migration() {
        let tree = simulate(active_at_zero(3, 1.0), 42).unwrap();
        assert_well_formed(&tree, 3);
        assert_eq!(tree.total_changes(), 0);
        let text = to_newick(&tree).unwrap();
        assert!(!text.contains("dormant"), "{text}");
        assert!(text.ends_with(';'));
    }

    #[test]
    fn dormant_sample_wakes_before_coalescing() {
        let config = SimConfig::new(
            vec![Sample::active("a", 0.0), Sample::dormant("d", 0.0)],
            1.0e6,
        )
        .with_migration(MigrationParams::Directional { active_to_dormant: 0.0, dormant_to_active: 1.0 });

        for seed in 0..20 {
            let tree = simulate(config.clone(), seed).unwrap();
            assert_well_formed(&tree, 2);
            let d = tree.leaves().find(|n| n.label == "d").unwrap();
            assert_eq!(d.change_count(), 1);
            assert_eq!(d.changes[0].state, State::Active);
            let a = tree.leaves().find(|n| n.label == "a").unwrap();
            assert_eq!(a.change_count(), 0);
        }
    }

    #[test]
    fn single_sample_is_its_own_root() {
        let config = SimConfig::new(vec![Sample::dormant("only", 2.5)], 1.0)
            .with_migration(MigrationParams::Symmetric { rate: 1.0 });
        let tree = simulate(config, 1).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.internal_count(), 0);
        let root = tree.root_node().unwrap();
        assert_eq!(root.label, "only");
        assert_eq!(root.height, 2.5);
        assert_eq!(root.change_count(), 0);
        assert_eq!(tree.stats().total_length(), 0.0);
        assert_eq!(to_newick(&tree).unwrap(), "only[&type=\"dormant\"]:0;");
    }

    #[test]
    fn late_samples_sit_at_their_activation_time() {
        let config = SimConfig::new(
            vec![Sample::active("early", 0.0), Sample::active("late", 5.0), Sample::active("x", 0.0)],
            1.0,
        );
        for seed in 0..20 {
            let tree = simulate(config.clone(), seed).unwrap();
            assert_well_formed(&tree, 3);
            let late = tree.leaves().find(|n| n.label == "late").unwrap();
            assert_eq!(late.height, 5.0);
            assert!(tree.parent_height(late.id).unwrap() > 5.0);
        }
    }
}

#[cfg(test)]
mod properties {
    use super::helpers::{assert_well_formed, mixed};
    use crate::simulate;

    #[test]
    fn mixed_configs_are_well_formed() {
        let config = mixed();
        for seed in 0..200 {
            let tree = simulate(config.clone(), seed).unwrap();
            assert_well_formed(&tree, config.sample_count());
        }
    }

    #[test]
    fn migration_actually_happens() {
        let config = mixed();
        let changes: usize = (0..50).map(|s| simulate(config.clone(), s).unwrap().total_changes()).sum();
        assert!(changes > 0);
    }
}

#[cfg(test)]
mod kingman {
    use super::helpers::active_at_zero;
    use crate::run_replicates;

    /// With no migration the tree is a Kingman coalescent:
    /// E[TMRCA] = 2 (1 - 1/n), E[total length] = 2 * sum_{k<n} 1/k.
    #[test]
    fn expectations_match() {
        let n = 5;
        let reps = 4000;
        let config = active_at_zero(n, 1.0);
        let stats: Vec<_> = run_replicates(&config, 2024, reps)
            .into_iter()
            .map(|r| r.result.unwrap().stats())
            .collect();

        let mean_tmrca = stats.iter().map(|s| s.tmrca).sum::<f64>() / reps as f64;
        let mean_length = stats.iter().map(|s| s.total_length()).sum::<f64>() / reps as f64;
        let expected_tmrca = 2.0 * (1.0 - 1.0 / n as f64);
        let expected_length = 2.0 * (1..n).map(|k| 1.0 / k as f64).sum::<f64>();

        assert!((mean_tmrca - expected_tmrca).abs() < 0.08, "tmrca {mean_tmrca}");
        assert!((mean_length - expected_length).abs() < 0.2, "length {mean_length}");
    }

    #[test]
    fn scale_stretches_time() {
        let reps = 3000;
        let config = active_at_zero(2, 3.0);
        let mean = run_replicates(&config, 99, reps)
            .into_iter()
            .map(|r| r.result.unwrap().stats().tmrca)
            .sum::<f64>()
            / reps as f64;
        // Two lineages coalesce at rate 1 / N.
        assert!((mean - 3.0).abs() < 0.25, "mean {mean}");
    }
}

#[cfg(test)]
mod determinism {
    use sb_core::replicate_seed;
    use sb_tree::to_newick;

    use super::helpers::mixed;
    use crate::{NoopObserver, SimBuilder, run_replicates, simulate};

    #[test]
    fn same_seed_same_tree() {
        let a = to_newick(&simulate(mixed(), 123).unwrap()).unwrap();
        let b = to_newick(&simulate(mixed(), 123).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = to_newick(&simulate(mixed(), 1).unwrap()).unwrap();
        let b = to_newick(&simulate(mixed(), 2).unwrap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn config_seed_is_used_and_builder_overrides_it() {
        let from_config = SimBuilder::new(mixed().with_seed(5)).build().unwrap();
        assert_eq!(from_config.seed(), 5);
        let overridden = SimBuilder::new(mixed().with_seed(5)).seed(6).build().unwrap();
        assert_eq!(overridden.seed(), 6);

        let t1 = from_config.run(&mut NoopObserver).unwrap();
        let t2 = simulate(mixed(), 5).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn replicates_match_individual_runs() {
        let reps = run_replicates(&mixed(), 77, 4);
        assert_eq!(reps.len(), 4);
        for (i, r) in reps.into_iter().enumerate() {
            assert_eq!(r.index, i);
            assert_eq!(r.seed, replicate_seed(77, i as u64));
            let alone = simulate(mixed(), r.seed).unwrap();
            assert_eq!(r.result.unwrap(), alone);
        }
    }
}

#[cfg(test)]
mod errors {
    use sb_core::{ConfigError, Sample, SimConfig};

    use super::helpers::active_at_zero;
    use crate::{SimBuilder, SimError, run_replicates, simulate};

    #[test]
    fn empty_config_is_rejected_before_running() {
        let config = SimConfig::new(vec![], 1.0);
        assert!(matches!(
            SimBuilder::new(config).seed(0).build(),
            Err(SimError::Config(ConfigError::NoSamples))
        ));
    }

    #[test]
    fn negative_scale_is_rejected() {
        assert_eq!(
            simulate(active_at_zero(2, -1.0), 0),
            Err(SimError::Config(ConfigError::InvalidActiveScale(-1.0)))
        );
    }

    #[test]
    fn zero_rates_with_two_dormant_lineages_stall() {
        let config = SimConfig::new(vec![Sample::dormant("x", 0.0), Sample::dormant("y", 1.0)], 1.0);
        assert_eq!(
            simulate(config, 3),
            Err(SimError::Stalled { time: 1.0, active: 0, dormant: 2 })
        );
    }

    #[test]
    fn one_active_one_dormant_without_migration_stall() {
        let config = SimConfig::new(vec![Sample::active("x", 0.0), Sample::dormant("y", 0.0)], 1.0);
        assert!(matches!(simulate(config, 3), Err(SimError::Stalled { active: 1, dormant: 1, .. })));
    }

    #[test]
    fn failing_replicates_are_reported_individually() {
        let config = SimConfig::new(vec![Sample::dormant("x", 0.0), Sample::dormant("y", 0.0)], 1.0);
        let reps = run_replicates(&config, 0, 3);
        assert_eq!(reps.len(), 3);
        assert!(reps.iter().all(|r| matches!(r.result, Err(SimError::Stalled { .. }))));
    }
}

#[cfg(test)]
mod apply {
    use sb_core::{NodeId, SimRng, State};
    use sb_events::Event;
    use sb_pool::LineagePool;
    use sb_tree::SeedbankTree;

    use crate::{SimError, apply_event};

    fn setup(n_active: usize) -> (LineagePool, SeedbankTree) {
        let mut pool = LineagePool::new();
        let mut tree = SeedbankTree::new();
        for i in 0..n_active {
            let id = tree.add_leaf(format!("s{i}"), State::Active, 0.0);
            pool.add_live(State::Active, id).unwrap();
        }
        (pool, tree)
    }

    #[test]
    fn coalescence_replaces_two_with_one() {
        let (mut pool, mut tree) = setup(3);
        let mut rng = SimRng::new(0);
        let event = Event::Coalescence { state: State::Active, time: 1.0 };
        let parent = apply_event(&event, &mut pool, &mut tree, &mut rng).unwrap().unwrap();

        assert_eq!(pool.live(State::Active).len(), 2);
        assert!(pool.live(State::Active).contains(parent));
        assert_eq!(tree[parent].height, 1.0);
        assert_eq!(tree[parent].state, State::Active);
        let (l, r) = tree[parent].children.unwrap();
        assert!(!pool.is_live(l) && !pool.is_live(r));
    }

    #[test]
    fn migration_moves_and_records() {
        let (mut pool, mut tree) = setup(1);
        let mut rng = SimRng::new(0);
        let event = Event::migration(State::Active, 0.5);
        assert_eq!(apply_event(&event, &mut pool, &mut tree, &mut rng), Ok(None));
        assert_eq!(pool.live(State::Dormant).as_slice(), &[NodeId(0)]);
        assert_eq!(tree[NodeId(0)].final_state(), State::Dormant);
        assert_eq!(tree[NodeId(0)].changes[0].time, 0.5);
    }

    #[test]
    fn migration_round_trip_between_sets() {
        let (mut pool, mut tree) = setup(3);
        let mut rng = SimRng::new(9);
        apply_event(&Event::migration(State::Active, 0.5), &mut pool, &mut tree, &mut rng).unwrap();
        let sleeper = pool.live(State::Dormant).as_slice()[0];
        assert_eq!(pool.live(State::Active).len(), 2);
        assert!(!pool.live(State::Active).contains(sleeper));

        apply_event(&Event::migration(State::Dormant, 0.75), &mut pool, &mut tree, &mut rng).unwrap();
        assert!(pool.live(State::Dormant).is_empty());
        assert_eq!(pool.live(State::Active).len(), 3);
        assert!(pool.live(State::Active).contains(sleeper));
        assert_eq!(tree[sleeper].change_count(), 2);
        assert_eq!(tree[sleeper].final_state(), State::Active);
    }

    #[test]
    fn pairs_are_picked_uniformly() {
        // 4 lineages, 6 pairs: each pair should be merged about 1/6 of the time.
        let mut rng = SimRng::new(31);
        let mut counts = [[0u32; 4]; 4];
        let n = 30_000;
        for _ in 0..n {
            let (mut pool, mut tree) = setup(4);
            let event = Event::Coalescence { state: State::Active, time: 1.0 };
            let parent = apply_event(&event, &mut pool, &mut tree, &mut rng).unwrap().unwrap();
            let (l, r) = tree[parent].children.unwrap();
            let (lo, hi) = (l.index().min(r.index()), l.index().max(r.index()));
            counts[lo][hi] += 1;
        }
        for lo in 0..4 {
            for hi in (lo + 1)..4 {
                let freq = counts[lo][hi] as f64 / n as f64;
                assert!((freq - 1.0 / 6.0).abs() < 0.015, "({lo},{hi}) {freq}");
            }
        }
    }

    #[test]
    fn errors_on_empty_sets_and_null() {
        let (mut pool, mut tree) = setup(1);
        let mut rng = SimRng::new(0);
        let coal = Event::Coalescence { state: State::Active, time: 1.0 };
        assert!(matches!(
            apply_event(&coal, &mut pool, &mut tree, &mut rng),
            Err(SimError::NotEnoughLineages { needed: 2, live: 1, .. })
        ));
        let wake = Event::migration(State::Dormant, 1.0);
        assert!(matches!(
            apply_event(&wake, &mut pool, &mut tree, &mut rng),
            Err(SimError::NotEnoughLineages { needed: 1, live: 0, .. })
        ));
        assert_eq!(
            apply_event(&Event::Null, &mut pool, &mut tree, &mut rng),
            Err(SimError::NullEventApplied)
        );
    }
}

#[cfg(test)]
mod observer {
    use sb_core::{MigrationParams, Sample, SimConfig, State};
    use sb_events::EventKind;
    use sb_tree::SeedbankTree;

    use super::helpers::mixed;
    use crate::{Decision, SimBuilder, SimObserver, StepRecord};

    #[derive(Default)]
    struct Recorder {
        started:  Option<(u64, usize)>,
        records:  Vec<StepRecord>,
        finished: usize,
    }

    impl SimObserver for Recorder {
        fn on_sim_start(&mut self, seed: u64, samples: usize) {
            self.started = Some((seed, samples));
        }
        fn on_step(&mut self, record: &StepRecord) {
            self.records.push(record.clone());
        }
        fn on_sim_end(&mut self, _tree: &SeedbankTree) {
            self.finished += 1;
        }
    }

    #[test]
    fn every_step_is_reported() {
        let config = mixed();
        let n = config.sample_count();
        let mut rec = Recorder::default();
        let tree = SimBuilder::new(config).seed(8).build().unwrap().run(&mut rec).unwrap();

        assert_eq!(rec.started, Some((8, n)));
        assert_eq!(rec.finished, 1);

        let count = |d: fn(&Decision) -> bool| rec.records.iter().filter(|r| d(&r.decision)).count();
        assert_eq!(count(|d| matches!(d, Decision::Sample(_))), n);
        assert_eq!(count(|d| *d == Decision::Event(EventKind::Coalescence)), n - 1);
        let migrations = count(|d| {
            matches!(d, Decision::Event(EventKind::ActiveToDormant | EventKind::DormantToActive))
        });
        assert_eq!(migrations, tree.total_changes());

        for (i, r) in rec.records.iter().enumerate() {
            assert_eq!(r.step, i as u64);
            assert_eq!(r.uniform.is_some(), r.propensities.total() > 0.0);
            match r.decision {
                Decision::Sample(_) => assert!(r.time < r.candidate_time),
                Decision::Event(_) => assert_eq!(r.time, r.candidate_time),
            }
        }
        let times: Vec<f64> = rec.records.iter().map(|r| r.time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]), "time went backwards");
        assert_eq!(*times.last().unwrap(), tree.root_node().unwrap().height);
    }

    #[test]
    fn discarded_candidates_are_kept_in_the_record() {
        let config = SimConfig::new(
            vec![Sample::active("a", 0.0), Sample::active("b", 0.0), Sample::active("c", 3.0)],
            100.0,
        )
        .with_migration(MigrationParams::Symmetric { rate: 0.01 });
        let mut rec = Recorder::default();
        SimBuilder::new(config).seed(4).build().unwrap().run(&mut rec).unwrap();

        // The first row activates a from an empty pool: nothing is drawn.
        let first = &rec.records[0];
        assert_eq!(first.decision, Decision::Sample(State::Active));
        assert_eq!(first.uniform, None);
        assert_eq!(first.candidate_time, f64::INFINITY);
        // c activates while lineages are live, so a candidate was drawn and lost.
        let late = rec
            .records
            .iter()
            .find(|r| r.decision == Decision::Sample(State::Active) && r.time == 3.0)
            .unwrap();
        assert!(late.propensities.total() > 0.0);
        let u = late.uniform.unwrap();
        assert!((0.0..late.propensities.total()).contains(&u));
        assert!(late.candidate_time.is_finite() && late.candidate_time > 3.0);
    }

    #[test]
    fn sample_rows_name_their_state() {
        let mut rec = Recorder::default();
        SimBuilder::new(mixed()).seed(1).build().unwrap().run(&mut rec).unwrap();
        let dormant_samples = rec
            .records
            .iter()
            .filter(|r| r.decision == Decision::Sample(State::Dormant))
            .count();
        assert_eq!(dormant_samples, 3);
        assert_eq!(Decision::Sample(State::Dormant).as_str(), "sample");
    }
}
