pub mod deploy;
pub mod destroy;
pub mod diff;
pub mod synth;

use anyhow::Result;
use hellostack_config::EnvironmentConfig;
use hellostack_core::{Stage, SynthesizedStack};

/// Build and render the stage for a resolved environment. Shared by
/// every subcommand; synthesis itself has no side effects.
pub(crate) fn synthesize(environment: &EnvironmentConfig) -> Result<Vec<SynthesizedStack>> {
    let stage = Stage::for_environment(environment.clone())?;
    Ok(stage.synth()?)
}
