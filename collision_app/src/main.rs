//! Collision demo application
//!
//! Loads a scene (or uses the built-in one), evaluates every collision
//! predicate once and logs the results with the projected segment.
//!
//! ```text
//! collision_demo [settings.toml | settings.ron]
//! ```

mod scene;

use geometry_core::core::config::Config;
use geometry_core::foundation::logging;
use log::info;

use scene::{DemoSettings, Frame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let settings = match &path {
        Some(path) => DemoSettings::load_from_file(path)?,
        None => DemoSettings::default(),
    };

    logging::init_with_level(&settings.geometry.logging.log_level);
    info!("Starting collision demo");
    match &path {
        Some(path) => info!("Loaded settings from {path}"),
        None => info!("Using built-in scene"),
    }

    settings.geometry.validate()?;

    let frame = Frame::evaluate(&settings)?;
    frame.log_summary();

    info!("Collision demo finished");
    Ok(())
}
