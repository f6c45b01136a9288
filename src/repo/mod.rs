//! Kernel package resolution against Amazon Linux yum repositories.
//!
//! Each repository generation of a target is probed in order: the mirror
//! list yields the live repository, its `primary.sqlite` index is fetched
//! and decompressed, and the kernel packages matching the requested
//! release are collected.

pub mod compression;
pub mod fetch;
pub mod index;
pub mod mirror;
pub mod resolver;

pub use compression::Compression;
pub use fetch::VisitedSet;
pub use index::{KernelPackageQuery, PackageIndex, PackageRecord};
pub use resolver::{EXPECTED_PACKAGE_COUNT, PackageResolver, ResolvedUrlSet};
