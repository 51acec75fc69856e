//! Fork-join reduce driver: concurrent per-region partials, sequential fold
//! in partition-emission order.

use std::thread;

use log::debug;

use crate::engine::partition;
use crate::error::EngineError;
use crate::field::Field;
use crate::region::Region;

/// Per-region aggregation run by a reduce worker.
pub trait RegionReducer<T: Copy>: Sync {
    /// The per-region partial result moved back to the fold.
    type Partial: Send;

    /// Aggregate over one region of `input`.
    fn partial(&self, input: &Field<T>, region: &Region) -> Result<Self::Partial, EngineError>;

    /// Fold the collected partials.
    ///
    /// The engine passes partials strictly in partition-emission order, never
    /// completion order, so a floating-point fold reproduces exactly across
    /// runs.
    fn combine(&self, partials: Vec<Self::Partial>) -> Result<Self::Partial, EngineError>;
}

/// Run `reducer` over `input` with `threads` fork-join workers and fold the
/// partial results.
///
/// All workers are joined before any partial is inspected; the first failing
/// region in emission order decides the returned error.
pub fn reduce_field<T, R>(
    input: &Field<T>,
    reducer: &R,
    threads: usize,
) -> Result<R::Partial, EngineError>
where
    T: Copy + Sync,
    R: RegionReducer<T>,
{
    let domain = input.geometry().domain();
    let regions = partition(&domain, threads)?;
    debug!(
        "reduce_field: extent {:?} -> {} regions ({} requested)",
        input.geometry().extent,
        regions.len(),
        threads
    );

    let partials: Vec<Result<R::Partial, EngineError>> = thread::scope(|scope| {
        let handles: Vec<_> = regions
            .iter()
            .map(|region| scope.spawn(move || reducer.partial(input, region)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(Err(EngineError::WorkerPanic)))
            .collect()
    });

    let partials = partials.into_iter().collect::<Result<Vec<_>, _>>()?;
    reducer.combine(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldGeometry;

    /// Sum/count mean accumulator.
    struct MeanReducer;

    impl RegionReducer<f32> for MeanReducer {
        type Partial = (f64, usize);

        fn partial(
            &self,
            input: &Field<f32>,
            region: &Region,
        ) -> Result<Self::Partial, EngineError> {
            let mut sum = 0.0f64;
            let mut count = 0usize;
            region.for_each_index(|index| {
                sum += input.get(index, 0) as f64;
                count += 1;
            });
            Ok((sum, count))
        }

        fn combine(&self, partials: Vec<Self::Partial>) -> Result<Self::Partial, EngineError> {
            let (sum, count) = partials
                .into_iter()
                .fold((0.0, 0), |(s, c), (ps, pc)| (s + ps, c + pc));
            Ok((sum / count.max(1) as f64, 0))
        }
    }

    /// Records which region offsets reach the fold, to pin the combine order.
    struct OffsetCollector;

    impl RegionReducer<f32> for OffsetCollector {
        type Partial = Vec<Vec<usize>>;

        fn partial(
            &self,
            _input: &Field<f32>,
            region: &Region,
        ) -> Result<Self::Partial, EngineError> {
            Ok(vec![region.offset().to_vec()])
        }

        fn combine(&self, partials: Vec<Self::Partial>) -> Result<Self::Partial, EngineError> {
            Ok(partials.into_iter().flatten().collect())
        }
    }

    #[test]
    fn mean_agrees_between_one_and_six_threads() {
        let geom = FieldGeometry::new(vec![10, 10]);
        let input = Field::from_samples(
            geom,
            (0..100).map(|i| (i as f32 * 0.77).cos()).collect(),
        );
        let (single, _) = reduce_field(&input, &MeanReducer, 1).unwrap();
        let (six, _) = reduce_field(&input, &MeanReducer, 6).unwrap();
        assert!((single - six).abs() < 1e-9, "{single} vs {six}");
    }

    #[test]
    fn combine_sees_partials_in_partition_order() {
        let input: Field<f32> = Field::new(FieldGeometry::new(vec![32]), 1);
        let offsets = reduce_field(&input, &OffsetCollector, 4).unwrap();
        let expected: Vec<Vec<usize>> = partition(&input.geometry().domain(), 4)
            .unwrap()
            .iter()
            .map(|r| r.offset().to_vec())
            .collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn failing_region_surfaces_after_join() {
        struct FailSecond;
        impl RegionReducer<f32> for FailSecond {
            type Partial = ();
            fn partial(
                &self,
                _input: &Field<f32>,
                region: &Region,
            ) -> Result<Self::Partial, EngineError> {
                if region.offset()[0] > 0 {
                    Err(EngineError::WorkerPanic)
                } else {
                    Ok(())
                }
            }
            fn combine(&self, _partials: Vec<Self::Partial>) -> Result<Self::Partial, EngineError> {
                Ok(())
            }
        }
        let input: Field<f32> = Field::new(FieldGeometry::new(vec![8]), 1);
        assert!(reduce_field(&input, &FailSecond, 2).is_err());
    }
}
