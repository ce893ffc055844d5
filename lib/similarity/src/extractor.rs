//! Visual feature extractor seam
//!
//! The embedding model is a process-wide, read-only dependency. It is handed
//! to the engine through an [`ExtractorHandle`] that starts empty and is filled
//! once the model has loaded; until then matching answers
//! [`Error::ServiceUnavailable`].

use pawmatch_core::{Error, ImageTensor, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Default square input size of the embedding backbone
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Produces a fixed-length embedding from a batched image tensor
pub trait FeatureExtractor: Send + Sync {
    /// Side length of the square input the model expects
    fn input_size(&self) -> u32 {
        DEFAULT_INPUT_SIZE
    }

    /// Embed a `[1, size, size, 3]` tensor of raw 0-255 channel values
    fn embed(&self, input: &ImageTensor) -> anyhow::Result<Vec<f32>>;
}

/// Shared slot holding the loaded extractor
#[derive(Clone, Default)]
pub struct ExtractorHandle {
    slot: Arc<RwLock<Option<Arc<dyn FeatureExtractor>>>>,
}

impl ExtractorHandle {
    /// An empty handle; [`get`](Self::get) fails until [`install`](Self::install)
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is ready immediately
    pub fn ready(extractor: Arc<dyn FeatureExtractor>) -> Self {
        let handle = Self::new();
        handle.install(extractor);
        handle
    }

    pub fn install(&self, extractor: Arc<dyn FeatureExtractor>) {
        *self.slot.write() = Some(extractor);
    }

    pub fn is_ready(&self) -> bool {
        self.slot.read().is_some()
    }

    pub fn get(&self) -> Result<Arc<dyn FeatureExtractor>> {
        self.slot.read().clone().ok_or_else(|| {
            Error::ServiceUnavailable("visual feature extractor is not initialized".to_string())
        })
    }
}

#[cfg(feature = "onnx")]
pub use onnx::OnnxExtractor;

#[cfg(feature = "onnx")]
mod onnx {
    use super::{FeatureExtractor, DEFAULT_INPUT_SIZE};
    use anyhow::{Context, Result};
    use ort::session::Session;
    use ort::value::Tensor;
    use pawmatch_core::ImageTensor;
    use parking_lot::Mutex;
    use std::path::Path;

    /// ONNX image backbone with its classifier head removed
    ///
    /// The first model output is flattened into the embedding.
    pub struct OnnxExtractor {
        session: Mutex<Session>,
        input_size: u32,
    }

    impl OnnxExtractor {
        pub fn load(model_path: &Path) -> Result<Self> {
            let session = Session::builder()?
                .commit_from_file(model_path)
                .context("Failed to load visual feature model")?;
            Ok(Self {
                session: Mutex::new(session),
                input_size: DEFAULT_INPUT_SIZE,
            })
        }
    }

    impl FeatureExtractor for OnnxExtractor {
        fn input_size(&self) -> u32 {
            self.input_size
        }

        fn embed(&self, input: &ImageTensor) -> Result<Vec<f32>> {
            let tensor = Tensor::from_array((input.shape(), input.as_slice().to_vec()))?;
            // run() needs &mut Session
            let mut session = self.session.lock();
            let outputs = session.run(ort::inputs![tensor])?;
            let (_, data) = outputs[0].try_extract_tensor::<f32>()?;
            Ok(data.to_vec())
        }
    }
}
