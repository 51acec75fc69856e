//! Fork-join map driver: one worker thread per region, output stitched in
//! partition-emission order.

use std::thread;

use log::debug;

use crate::engine::partition;
use crate::error::EngineError;
use crate::field::Field;
use crate::region::Region;

/// Per-region transform run by a map worker.
///
/// The strategy value is shared by all workers, so implementations must be
/// `Sync` and must not mutate shared state (interior-mutability counters for
/// diagnostics aside). A worker writes exclusively through the staging block
/// handed to it.
pub trait RegionMapper<T: Copy, U: Copy>: Sync {
    /// Fill `block` with output samples for `block.region()`, reading any
    /// part of `input`.
    fn map_region(&self, input: &Field<T>, block: &mut RegionBlock<U>) -> Result<(), EngineError>;
}

impl<T, U, F> RegionMapper<T, U> for F
where
    T: Copy,
    U: Copy,
    F: Fn(&Field<T>, &mut RegionBlock<U>) -> Result<(), EngineError> + Sync,
{
    fn map_region(&self, input: &Field<T>, block: &mut RegionBlock<U>) -> Result<(), EngineError> {
        self(input, block)
    }
}

/// Region-shaped staging buffer a worker owns exclusively.
///
/// Samples are addressed with absolute field indices; the layout matches
/// [`Region::for_each_index`] order so the engine can stitch blocks back into
/// the output without translation.
pub struct RegionBlock<U> {
    region: Region,
    channels: usize,
    strides: Vec<usize>,
    data: Vec<U>,
}

impl<U: Copy + Default> RegionBlock<U> {
    pub(crate) fn new(region: Region, channels: usize) -> Self {
        let mut strides = vec![0; region.ndim()];
        let mut step = 1;
        for (stride, &len) in strides.iter_mut().zip(region.size().iter()) {
            *stride = step;
            step *= len;
        }
        let len = region.num_samples() * channels;
        Self {
            region,
            channels,
            strides,
            data: vec![U::default(); len],
        }
    }
}

impl<U: Copy> RegionBlock<U> {
    /// The region this block covers.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Output channels per voxel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn voxel_offset(&self, index: &[usize]) -> usize {
        debug_assert!(
            self.region.contains_index(index),
            "index {index:?} outside block region"
        );
        index
            .iter()
            .zip(self.region.offset().iter().zip(self.strides.iter()))
            .map(|(&i, (&o, &s))| (i - o) * s)
            .sum()
    }

    /// Set channel `c` at the absolute field index `index`.
    #[inline]
    pub fn set(&mut self, index: &[usize], c: usize, value: U) {
        let i = self.voxel_offset(index) * self.channels + c;
        self.data[i] = value;
    }

    /// Write all channels of the voxel at the absolute field index `index`.
    #[inline]
    pub fn write_voxel(&mut self, index: &[usize], sample: &[U]) {
        debug_assert_eq!(sample.len(), self.channels);
        let start = self.voxel_offset(index) * self.channels;
        self.data[start..start + self.channels].copy_from_slice(sample);
    }
}

/// Run `mapper` over `input` with `threads` fork-join workers, producing a
/// field of `out_channels` components and the input's exact geometry.
///
/// The domain is partitioned once; every worker fills a private staging block
/// and all workers are joined before any result is inspected. Blocks are then
/// scattered into the output strictly in partition-emission order, so the
/// output is bit-identical for every thread count. The first failing region
/// (in emission order, never completion order) decides the returned error; no
/// partial output escapes.
pub fn map_field<T, U, M>(
    input: &Field<T>,
    out_channels: usize,
    mapper: &M,
    threads: usize,
) -> Result<Field<U>, EngineError>
where
    T: Copy + Sync,
    U: Copy + Default + Send,
    M: RegionMapper<T, U>,
{
    let domain = input.geometry().domain();
    let regions = partition(&domain, threads)?;
    debug!(
        "map_field: extent {:?} -> {} regions ({} requested)",
        input.geometry().extent,
        regions.len(),
        threads
    );

    let blocks: Vec<Result<RegionBlock<U>, EngineError>> = thread::scope(|scope| {
        let handles: Vec<_> = regions
            .into_iter()
            .map(|region| {
                scope.spawn(move || {
                    let mut block = RegionBlock::new(region, out_channels);
                    mapper.map_region(input, &mut block)?;
                    Ok(block)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(Err(EngineError::WorkerPanic)))
            .collect()
    });

    let mut output = Field::new(input.geometry().clone(), out_channels);
    for block in blocks {
        scatter(&mut output, block?)?;
    }
    Ok(output)
}

/// Copy a staging block into the output field.
fn scatter<U: Copy>(output: &mut Field<U>, block: RegionBlock<U>) -> Result<(), EngineError> {
    if !output.geometry().domain().contains(&block.region) {
        return Err(EngineError::RegionOutOfDomain {
            offset: block.region.offset().to_vec(),
            size: block.region.size().to_vec(),
            extent: output.geometry().extent.clone(),
        });
    }
    let channels = block.channels;
    let mut src = 0;
    let region = block.region.clone();
    region.for_each_index(|index| {
        let dst = output.linear(index) * channels;
        output.as_mut_slice()[dst..dst + channels]
            .copy_from_slice(&block.data[src..src + channels]);
        src += channels;
    });
    Ok(())
}
