//! Feature extraction stage
//!
//! Turns each eligible report into a [`FeatureSet`]: read the image bytes,
//! decode by extension, embed a nearest-neighbor 224x224 copy, and build the
//! color histogram. Image failures drop the report from pairing; anything
//! else aborts the run.

use crate::extractor::FeatureExtractor;
use crate::histogram::ColorHistogram;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use pawmatch_core::{
    Error, FeatureSet, ImageAccessError, ImageStore, ImageTensor, Report, Result, Vector,
};
use std::path::Path;
use tracing::{debug, warn};

/// A report together with the features extracted for it
#[derive(Debug, Clone)]
pub struct ExtractedReport {
    pub report: Report,
    pub features: FeatureSet,
}

/// Output of a full extraction pass
#[derive(Debug, Default)]
pub struct Extraction {
    /// Reports that produced features, in input order
    pub reports: Vec<ExtractedReport>,
    /// Reports excluded because their image could not be accessed
    pub skipped: Vec<(Report, ImageAccessError)>,
}

/// Runs image loading, embedding and histogram building per report
pub struct FeatureExtractionStage<'a> {
    images: &'a dyn ImageStore,
    extractor: &'a dyn FeatureExtractor,
    histogram: ColorHistogram,
}

impl<'a> FeatureExtractionStage<'a> {
    pub fn new(
        images: &'a dyn ImageStore,
        extractor: &'a dyn FeatureExtractor,
        histogram: ColorHistogram,
    ) -> Self {
        Self {
            images,
            extractor,
            histogram,
        }
    }

    /// Extract features for every report, preserving order
    ///
    /// Fails if the extractor errors or returns embeddings of differing
    /// dimensionality within this pass.
    pub fn extract_all(&self, reports: Vec<Report>) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        let mut expected_dim: Option<usize> = None;

        for report in reports {
            let image = match self.load(&report) {
                Ok(image) => image,
                Err(e) => {
                    warn!(report_id = %report.id, pet_id = report.pet_id, "skipping report: {}", e);
                    extraction.skipped.push((report, e));
                    continue;
                }
            };

            let features = self.extract(&report, &image)?;
            drop(image);

            match expected_dim {
                None => expected_dim = Some(features.embedding.dim()),
                Some(dim) if dim != features.embedding.dim() => {
                    return Err(Error::InvalidDimension {
                        expected: dim,
                        actual: features.embedding.dim(),
                    });
                }
                Some(_) => {}
            }

            extraction.reports.push(ExtractedReport { report, features });
        }

        debug!(
            extracted = extraction.reports.len(),
            skipped = extraction.skipped.len(),
            "feature extraction finished"
        );
        Ok(extraction)
    }

    /// Read and decode the report's image
    pub fn load(&self, report: &Report) -> std::result::Result<RgbImage, ImageAccessError> {
        let path = report
            .image_path
            .as_deref()
            .ok_or(ImageAccessError::MissingPath)?;
        let format = image_format_for(path)?;
        let bytes = self.images.read(path)?;
        decode(&bytes, format, path)
    }

    /// Embed and histogram an already decoded image
    pub fn extract(&self, report: &Report, image: &RgbImage) -> Result<FeatureSet> {
        let input = to_input_tensor(image, self.extractor.input_size())?;
        let embedding = self
            .extractor
            .embed(&input)
            .map_err(|e| Error::Internal(format!("embedding report {}: {:#}", report.id, e)))?;
        drop(input);

        if embedding.is_empty() {
            return Err(Error::Internal(format!(
                "extractor returned an empty embedding for report {}",
                report.id
            )));
        }

        let histogram = self.histogram.build(image);
        Ok(FeatureSet::new(report.id, Vector::new(embedding), histogram))
    }
}

/// Map a path's extension to a decoder; only jpg, jpeg and png are accepted
pub fn image_format_for(path: &str) -> std::result::Result<ImageFormat, ImageAccessError> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        _ => Err(ImageAccessError::UnsupportedExtension(path.to_string())),
    }
}

/// Decode bytes with an explicit format, dropping any alpha channel
pub fn decode(
    bytes: &[u8],
    format: ImageFormat,
    path: &str,
) -> std::result::Result<RgbImage, ImageAccessError> {
    let decoded = match format {
        ImageFormat::Jpeg | ImageFormat::Png => image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImageAccessError::Decode {
                path: path.to_string(),
                reason: e.to_string(),
            })?,
        _ => return Err(ImageAccessError::UnsupportedExtension(path.to_string())),
    };
    Ok(decoded.to_rgb8())
}

/// Nearest-neighbor resize to `size`x`size`, float channels, batch dimension added
pub fn to_input_tensor(image: &RgbImage, size: u32) -> Result<ImageTensor> {
    let resized = imageops::resize(image, size, size, FilterType::Nearest);
    let data: Vec<f32> = resized.as_raw().iter().map(|v| *v as f32).collect();
    let side = size as usize;
    ImageTensor::new([1, side, side, 3], data)
}
