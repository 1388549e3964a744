use argminmax::ArgMinMax;

/// Linear mapping of one numeric interval onto another.
///
/// The dual-axis chart draws volume inside the price axis' coordinate space;
/// `apply` takes a volume to plot space and `invert` brings a plot-space
/// grid mark back to volume units for the secondary axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    pub src: (f64, f64),
    pub dst: (f64, f64),
}

impl AxisTransform {
    pub fn new(src: (f64, f64), dst: (f64, f64)) -> Self {
        Self { src, dst }
    }

    fn scale(&self) -> f64 {
        let src_len = self.src.1 - self.src.0;
        if src_len.abs() < f64::EPSILON {
            // Degenerate source interval (e.g. a single volume value)
            1.0
        } else {
            (self.dst.1 - self.dst.0) / src_len
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.dst.0 + (value - self.src.0) * self.scale()
    }

    pub fn invert(&self, value: f64) -> f64 {
        let scale = self.scale();
        if scale.abs() < f64::EPSILON {
            return self.src.0;
        }
        self.src.0 + (value - self.dst.0) / scale
    }
}

/// Smallest and largest value, skipping `NaN`. `None` when nothing is left.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.iter().any(|v| v.is_nan()) {
        let present: Vec<f64> = vec.iter().copied().filter(|v| !v.is_nan()).collect();
        return get_min_max(&present);
    }
    if vec.is_empty() {
        return None;
    }
    let (min_index, max_index) = vec.argminmax();
    Some((vec[min_index], vec[max_index]))
}

/// Rescales values to 0.0..=1.0 (min -> 0.0, max -> 1.0).
/// A constant input maps every value to 1.0.
pub fn normalize_min_max(vec: &[f64]) -> Vec<f64> {
    let Some((min, max)) = get_min_max(vec) else {
        return Vec::new();
    };
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return vec![1.0; vec.len()];
    }
    vec.iter().map(|&x| (x - min) / span).collect()
}

/// Pads a range by `pct` of its length on both ends so plotted marks don't
/// sit on the frame. Zero-length ranges are widened by `pct` of the value.
pub fn padded_range(min: f64, max: f64, pct: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span.abs() < f64::EPSILON {
        (min.abs() * pct).max(1.0)
    } else {
        span * pct
    };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_helpers() {
        let v = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(get_min_max(&v), Some((1.0, 4.0)));
        assert_eq!(get_min_max(&[]), None);
        assert_eq!(get_min_max(&[f64::MAX]), Some((f64::MAX, f64::MAX)));
        assert_eq!(get_min_max(&[f64::NAN, 32000.0, 31000.0]), Some((31000.0, 32000.0)));
        assert_eq!(get_min_max(&[f64::NAN]), None);
    }

    #[test]
    fn test_normalize_min_max() {
        assert_eq!(normalize_min_max(&[10.0, 20.0, 15.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(normalize_min_max(&[7.0, 7.0]), vec![1.0, 1.0]);
        assert!(normalize_min_max(&[]).is_empty());
    }

    #[test]
    fn test_axis_transform_apply_and_invert() {
        let t = AxisTransform::new((0.0, 1000.0), (30000.0, 32000.0));
        assert!((t.apply(500.0) - 31000.0).abs() < 1e-9);
        assert!((t.invert(31000.0) - 500.0).abs() < 1e-9);
        assert!((t.invert(t.apply(123.0)) - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_transform_degenerate_source() {
        let t = AxisTransform::new((5.0, 5.0), (0.0, 10.0));
        assert!(t.apply(5.0).is_finite());
        assert!(t.invert(3.0).is_finite());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0.0, 100.0, 0.05), (-5.0, 105.0));
        let (lo, hi) = padded_range(200.0, 200.0, 0.05);
        assert!(lo < 200.0 && hi > 200.0);
    }
}
