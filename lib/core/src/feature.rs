use crate::{Error, ReportId, Result, Vector};

/// Length of a color histogram: 16 bins for each of R, G, B
pub const HISTOGRAM_LEN: usize = 48;

/// A batched NHWC float tensor, as fed to the visual feature extractor
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn new(shape: [usize; 4], data: Vec<f32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::InvalidDimension {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// `[batch, height, width, channels]`
    #[inline]
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.shape[1]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.shape[2]
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.shape[3]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Derived features of one report, alive for a single matching request
///
/// Buffers are owned; dropping the set releases them on every exit path.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub report_id: ReportId,
    pub embedding: Vector,
    pub histogram: Vector,
}

impl FeatureSet {
    pub fn new(report_id: ReportId, embedding: Vector, histogram: Vector) -> Self {
        Self {
            report_id,
            embedding,
            histogram,
        }
    }

    /// Sum of histogram entries; 1.0 when any pixel contributed
    pub fn histogram_mass(&self) -> f32 {
        self.histogram.as_slice().iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_shape_must_match_data() {
        let ok = ImageTensor::new([1, 2, 2, 3], vec![0.0; 12]).unwrap();
        assert_eq!(ok.height(), 2);
        assert_eq!(ok.channels(), 3);

        let err = ImageTensor::new([1, 2, 2, 3], vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 12, actual: 11 }));
    }
}
