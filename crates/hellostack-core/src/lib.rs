// hellostack-core - Template model and stack declarations
//
// Pure data and builders: no I/O, no cloud calls. Synthesis turns
// declarations into canonical CloudFormation JSON; everything past
// that point belongs to the external orchestrator.

pub mod hello_api;
pub mod stack;
pub mod stage;
pub mod template;

pub use hello_api::{hello_api_stack, stack_name, DEFAULT_CODE_KEY, PARAM_CODE_BUCKET, PARAM_CODE_KEY};
pub use stack::{Stack, StackBuilder, SynthError};
pub use stage::{Stage, SynthesizedStack};
pub use template::{Output, Parameter, Resource, Template};
