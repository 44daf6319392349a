//! Linear rescaling of raw counts into display ranges.

/// Map `value` from `[min, max]` into `[out_min, out_max]`.
///
/// When `min == max` every input is treated as normalized 1.0, so all values
/// land on `out_max` instead of dividing by zero.
pub fn linear_rescale(value: f64, min: f64, max: f64, out_min: f64, out_max: f64) -> f64 {
	let normalized = if max == min {
		1.0
	} else {
		(value - min) / (max - min)
	};
	out_min + normalized * (out_max - out_min)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_endpoints_to_output_range() {
		assert_eq!(linear_rescale(1.0, 1.0, 3.0, 10.0, 50.0), 10.0);
		assert_eq!(linear_rescale(3.0, 1.0, 3.0, 10.0, 50.0), 50.0);
		assert_eq!(linear_rescale(2.0, 1.0, 3.0, 10.0, 50.0), 30.0);
	}

	#[test]
	fn equal_bounds_collapse_to_output_max() {
		assert_eq!(linear_rescale(7.0, 7.0, 7.0, 1.0, 10.0), 10.0);
		assert_eq!(linear_rescale(0.0, 0.0, 0.0, 10.0, 50.0), 50.0);
	}
}
