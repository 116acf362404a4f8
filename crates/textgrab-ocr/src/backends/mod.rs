#[cfg(feature = "backend-mock")]
pub mod mock;

#[cfg(feature = "backend-tesseract")]
pub mod tesseract;
