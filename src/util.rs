//! Shared utility modules used across segdict components.

pub mod atomic_float;
