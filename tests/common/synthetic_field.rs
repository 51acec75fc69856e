use orient_field::{FieldGeometry, ScalarField};

/// Field with the same value at every voxel.
pub fn constant_field(extent: &[usize], value: f32) -> ScalarField {
    let geometry = FieldGeometry::new(extent.to_vec());
    let samples = vec![value; geometry.num_samples()];
    ScalarField::from_samples(geometry, samples)
}

/// `f(index) = index[axis]` over the given extent.
pub fn ramp_field(extent: &[usize], axis: usize) -> ScalarField {
    assert!(axis < extent.len(), "ramp axis out of range");
    let geometry = FieldGeometry::new(extent.to_vec());
    let mut samples = Vec::with_capacity(geometry.num_samples());
    geometry
        .domain()
        .for_each_index(|index| samples.push(index[axis] as f32));
    ScalarField::from_samples(geometry, samples)
}

/// 2-D sinusoidal stripes whose gradient points along `angle` (radians,
/// measured from the x axis).
pub fn striped_field(width: usize, height: usize, angle: f32) -> ScalarField {
    let geometry = FieldGeometry::new(vec![width, height]);
    let (nx, ny) = (angle.cos(), angle.sin());
    let mut samples = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let phase = 0.5 * (nx * x as f32 + ny * y as f32);
            samples.push(phase.sin());
        }
    }
    ScalarField::from_samples(geometry, samples)
}
