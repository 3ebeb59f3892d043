// ============================================================
// Layer 6 — Device Selection
// ============================================================
// Burn picks its backend at compile time. With the default
// `wgpu` feature the models run on whatever adapter wgpu finds
// first (discrete GPU, then integrated, then a software
// adapter). Built with `--no-default-features` everything runs
// on the ndarray CPU backend.

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray<f32>;

/// Backend used for training (gradients tracked)
pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

pub type Device = <InferBackend as burn::tensor::backend::Backend>::Device;

pub fn init_device() -> Device {
    let device = Device::default();
    if cfg!(feature = "wgpu") {
        tracing::info!("Running on the GPU backend: {:?}", device);
    } else {
        tracing::info!("Running on the CPU backend");
    }
    device
}
