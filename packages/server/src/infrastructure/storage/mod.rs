//! File storage implementations.

pub mod disk;

pub use disk::DiskFileStorage;
