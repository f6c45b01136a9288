pub mod build;
pub mod kernel_release;
pub mod target;

pub use build::BuildConfig;
pub use kernel_release::KernelRelease;
pub use target::TargetVariant;
