#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use gwdt_image as image;

#[doc(inline)]
pub use gwdt_imgproc as imgproc;
