//! # Core Module
//!
//! Shared configuration for the collision and projection code.
//!
//! ## Organization
//!
//! - **Config**: collision tolerances, projection and viewport parameters,
//!   logging level
//! - **Foundation**: vector and matrix math (re-exported)

pub mod config;

pub use crate::foundation;

pub use config::{
    CollisionConfig,
    Config,
    ConfigError,
    GeometryConfig,
    LoggingConfig,
    ProjectionConfig,
    RayBound,
    ViewportConfig,
};
