// VIEW: Projection, UI and rendering
pub mod gpu_init;
pub mod projection;
pub mod render;
pub mod ui;

pub use gpu_init::{GpuContext, GpuInitError};
pub use projection::FrameView;
pub use render::RenderState;
