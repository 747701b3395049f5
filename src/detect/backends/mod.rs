//! Detector backend implementations.
//!
//! Real model backends (ONNX runtimes, vendor SDKs) plug in behind
//! `DetectorBackend`; only the stub ships in the default build.

mod stub;

pub use stub::StubBackend;
