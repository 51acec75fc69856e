mod common;

use common::synthetic_field::{constant_field, ramp_field};
use orient_field::engine::{map_field, partition, reduce_field, RegionBlock, RegionMapper, RegionReducer};
use orient_field::{EngineError, Field, Region, ScalarField};

/// Doubles every sample; reads beyond its own region to exercise shared
/// read-only input access.
struct DoubleWithNeighbour;

impl RegionMapper<f32, f32> for DoubleWithNeighbour {
    fn map_region(
        &self,
        input: &Field<f32>,
        block: &mut RegionBlock<f32>,
    ) -> Result<(), EngineError> {
        let extent = input.geometry().extent.clone();
        let region = block.region().clone();
        region.for_each_index(|index| {
            let mut neighbour = index.to_vec();
            neighbour[0] = (neighbour[0] + 1).min(extent[0] - 1);
            let v = input.get(index, 0) + input.get(&neighbour, 0);
            block.set(index, 0, v);
        });
        Ok(())
    }
}

struct MeanReducer;

impl RegionReducer<f32> for MeanReducer {
    type Partial = (f64, usize);

    fn partial(&self, input: &Field<f32>, region: &Region) -> Result<Self::Partial, EngineError> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        region.for_each_index(|index| {
            sum += input.get(index, 0) as f64;
            count += 1;
        });
        Ok((sum, count))
    }

    fn combine(&self, partials: Vec<Self::Partial>) -> Result<Self::Partial, EngineError> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for (s, c) in partials {
            sum += s;
            count += c;
        }
        Ok((sum / count.max(1) as f64, count))
    }
}

#[test]
fn partition_covers_every_domain_disjointly() {
    let _ = env_logger::builder().is_test(true).try_init();
    for extent in [vec![100], vec![17, 9], vec![6, 6, 6], vec![3, 1, 40]] {
        let domain = Region::full(&extent);
        for count in [1, 2, 4, 7, 32] {
            let regions = partition(&domain, count).unwrap();
            let covered: usize = regions.iter().map(Region::num_samples).sum();
            assert_eq!(covered, domain.num_samples());
            for (i, a) in regions.iter().enumerate() {
                assert!(domain.contains(a));
                for b in regions.iter().skip(i + 1) {
                    assert!(a.is_disjoint(b));
                }
            }
        }
    }
}

#[test]
fn partition_of_hundred_into_four_gives_contiguous_quarters() {
    let regions = partition(&Region::full(&[100]), 4).unwrap();
    let expected: Vec<Region> = (0..4)
        .map(|i| Region::new(vec![i * 25], vec![25]))
        .collect();
    assert_eq!(regions, expected);
}

#[test]
fn map_is_bit_identical_across_thread_counts() {
    let _ = env_logger::builder().is_test(true).try_init();
    let input = ramp_field(&[23, 11, 3], 1);
    let reference = map_field(&input, 1, &DoubleWithNeighbour, 1).unwrap();
    for threads in [2, 3, 5, 8, 64] {
        let out: ScalarField = map_field(&input, 1, &DoubleWithNeighbour, threads).unwrap();
        assert_eq!(
            out.as_slice(),
            reference.as_slice(),
            "thread count {threads} changed the output"
        );
        assert_eq!(out.geometry(), input.geometry());
    }
}

#[test]
fn map_rejects_zero_threads() {
    let input = constant_field(&[8, 8], 1.0);
    assert!(matches!(
        map_field::<f32, f32, _>(&input, 1, &DoubleWithNeighbour, 0),
        Err(EngineError::ZeroThreadCount)
    ));
}

#[test]
fn reduce_mean_matches_across_thread_counts() {
    let _ = env_logger::builder().is_test(true).try_init();
    let geometry = orient_field::FieldGeometry::new(vec![25, 17]);
    let samples: Vec<f32> = (0..25 * 17).map(|i| (i as f32 * 0.31).sin()).collect();
    let input = ScalarField::from_samples(geometry, samples);

    let (single, n1) = reduce_field(&input, &MeanReducer, 1).unwrap();
    let (six, n6) = reduce_field(&input, &MeanReducer, 6).unwrap();
    assert_eq!(n1, 25 * 17);
    assert_eq!(n6, 25 * 17);
    assert!((single - six).abs() < 1e-9, "{single} vs {six}");
}

#[test]
fn reduce_is_reproducible_run_to_run() {
    let input = ramp_field(&[64, 8], 0);
    let (a, _) = reduce_field(&input, &MeanReducer, 6).unwrap();
    let (b, _) = reduce_field(&input, &MeanReducer, 6).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn worker_failure_surfaces_after_all_regions_join() {
    struct FailLast;
    impl RegionMapper<f32, f32> for FailLast {
        fn map_region(
            &self,
            input: &Field<f32>,
            block: &mut RegionBlock<f32>,
        ) -> Result<(), EngineError> {
            if block.region().end(0) == input.geometry().extent[0] {
                return Err(EngineError::WorkerPanic);
            }
            Ok(())
        }
    }
    let input = constant_field(&[32], 0.0);
    let err = map_field::<f32, f32, _>(&input, 1, &FailLast, 4).unwrap_err();
    assert!(matches!(err, EngineError::WorkerPanic));
}
