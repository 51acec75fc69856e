//! Deterministic splitting of an index domain into disjoint regions.

use crate::error::EngineError;
use crate::region::Region;

/// Split `domain` into up to `count` pairwise-disjoint regions covering it
/// exactly.
///
/// The current largest-volume region is repeatedly halved along its longest
/// axis (ties go to the highest axis index) until `count` regions exist or
/// nothing is left to split, so a domain with fewer samples than `count`
/// yields fewer regions. The result is deterministic for a fixed
/// `(domain, count)` pair and regions are emitted in ascending spatial order.
pub fn partition(domain: &Region, count: usize) -> Result<Vec<Region>, EngineError> {
    if count == 0 {
        return Err(EngineError::ZeroThreadCount);
    }
    let mut regions = vec![domain.clone()];
    if domain.is_empty() {
        return Ok(regions);
    }

    while regions.len() < count {
        let Some(target) = widest_splittable(&regions) else {
            break;
        };
        let (low, high) = halve(&regions[target]);
        regions[target] = low;
        regions.insert(target + 1, high);
    }
    Ok(regions)
}

/// Index of the largest-volume region with a splittable axis, preferring the
/// earliest on ties so region order stays stable.
fn widest_splittable(regions: &[Region]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, region) in regions.iter().enumerate() {
        if region.size().iter().all(|&s| s < 2) {
            continue;
        }
        let volume = region.num_samples();
        match best {
            Some((_, best_volume)) if volume <= best_volume => {}
            _ => best = Some((i, volume)),
        }
    }
    best.map(|(i, _)| i)
}

/// Cut a region in two along its longest axis.
fn halve(region: &Region) -> (Region, Region) {
    let mut axis = 0;
    for (a, &len) in region.size().iter().enumerate() {
        if len >= region.size()[axis] {
            axis = a;
        }
    }
    let len = region.size()[axis];
    debug_assert!(len >= 2, "halve called on an unsplittable region");
    let low_len = len.div_ceil(2);

    let mut low_size = region.size().to_vec();
    low_size[axis] = low_len;
    let low = Region::new(region.offset().to_vec(), low_size);

    let mut high_offset = region.offset().to_vec();
    high_offset[axis] += low_len;
    let mut high_size = region.size().to_vec();
    high_size[axis] = len - low_len;
    let high = Region::new(high_offset, high_size);

    (low, high)
}
