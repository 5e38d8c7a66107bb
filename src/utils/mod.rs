pub mod error;
pub mod fps;

pub use error::RenderError;
pub use fps::FrameCounter;
