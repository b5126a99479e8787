/// Initialization parameters for the GPU layer.
///
/// Add configuration flags only when a concrete platform or backend
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical sync and is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. A hint only.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Vsync-locked presentation when `vsync`, otherwise the lowest-latency
    /// mode the surface offers. Both fall back to FIFO.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
