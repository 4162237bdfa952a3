pub mod decode;
pub mod png_encode;
pub mod presenter;

pub use decode::decode_source;
pub use png_encode::encode_png;
pub use presenter::{ExportedImage, Presenter, RenderInput};
