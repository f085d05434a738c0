use glam::Vec3;

/// A single point of the tracking provider's feature cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCloudSample {
    /// Position in world coordinates.
    pub position: Vec3,
    /// Confidence of the point in `[0, 1]`.
    pub confidence: f32,
}

/// The feature points observed in a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    samples: Vec<PointCloudSample>,
}

impl PointCloud {
    /// Create a new point cloud from samples.
    pub fn new(samples: Vec<PointCloudSample>) -> Self {
        Self { samples }
    }

    /// Create a point cloud from a packed `x, y, z, confidence` buffer.
    ///
    /// A trailing incomplete group is ignored.
    pub fn from_xyzc(buffer: &[f32]) -> Self {
        let samples = buffer
            .chunks_exact(4)
            .map(|c| PointCloudSample {
                position: Vec3::new(c[0], c[1], c[2]),
                confidence: c[3],
            })
            .collect();
        Self { samples }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get as reference the samples of the point cloud.
    pub fn samples(&self) -> &[PointCloudSample] {
        &self.samples
    }

    /// Iterate over every `stride`-th sample, starting with the first one.
    ///
    /// A zero stride is treated as one.
    pub fn strided(&self, stride: usize) -> impl Iterator<Item = &PointCloudSample> + '_ {
        self.samples.iter().step_by(stride.max(1))
    }
}
