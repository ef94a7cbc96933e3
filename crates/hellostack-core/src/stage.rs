// Stage: the deployable grouping for one environment
//
// Owns the stacks declared for that environment. Lives only for the
// duration of one synth/deploy invocation; deployed-resource state is
// the orchestrator's to keep.

use crate::hello_api;
use crate::stack::{Stack, SynthError};
use hellostack_config::EnvironmentConfig;

#[derive(Debug)]
pub struct Stage {
    environment: EnvironmentConfig,
    stacks: Vec<Stack>,
}

/// A rendered stack, ready to hand to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedStack {
    pub stack_name: String,
    pub template_json: String,
}

impl Stage {
    /// Instantiate the stage for a resolved environment, declaring its
    /// stacks. Construction has no side effects; resource creation is
    /// the orchestrator's later apply phase.
    pub fn for_environment(environment: EnvironmentConfig) -> Result<Self, SynthError> {
        let stacks = vec![hello_api::hello_api_stack(&environment)?];
        Ok(Self {
            environment,
            stacks,
        })
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Render every stack in declaration order.
    pub fn synth(&self) -> Result<Vec<SynthesizedStack>, SynthError> {
        self.stacks
            .iter()
            .map(|stack| {
                Ok(SynthesizedStack {
                    stack_name: stack.name().to_string(),
                    template_json: stack.synth()?,
                })
            })
            .collect()
    }
}
