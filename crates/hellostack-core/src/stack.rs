// Stack: a named, ordered set of declared resources
//
// The builder records declarations in order and surfaces name
// collisions when the template is built, before anything reaches the
// orchestrator.

use crate::template::{Output, Parameter, Resource, Template};
use std::collections::BTreeSet;

/// Declaration errors surfaced at synthesis time.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("duplicate logical id '{logical_id}' in stack '{stack}'")]
    DuplicateLogicalId { stack: String, logical_id: String },

    #[error("invalid logical id '{logical_id}' in stack '{stack}': {reason}")]
    InvalidLogicalId {
        stack: String,
        logical_id: String,
        reason: String,
    },

    #[error("failed to render template for stack '{stack}'")]
    Render {
        stack: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One resource-definition unit, ready to synthesize.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    template: Template,
    resource_order: Vec<String>,
}

impl Stack {
    pub fn builder(name: impl Into<String>) -> StackBuilder {
        StackBuilder {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Deployable stack name (environment-derived by convention).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical ids in declaration order.
    pub fn resource_order(&self) -> &[String] {
        &self.resource_order
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Render the canonical template JSON.
    pub fn synth(&self) -> Result<String, SynthError> {
        self.template
            .to_canonical_json()
            .map_err(|source| SynthError::Render {
                stack: self.name.clone(),
                source,
            })
    }
}

/// Collects declarations in order; collisions and malformed logical
/// ids are reported by `build`.
pub struct StackBuilder {
    name: String,
    description: Option<String>,
    parameters: Vec<(String, Parameter)>,
    resources: Vec<(String, Resource)>,
    outputs: Vec<(String, Output)>,
}

impl StackBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameter(mut self, logical_id: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.push((logical_id.into(), parameter));
        self
    }

    pub fn resource(mut self, logical_id: impl Into<String>, resource: Resource) -> Self {
        self.resources.push((logical_id.into(), resource));
        self
    }

    pub fn output(mut self, logical_id: impl Into<String>, output: Output) -> Self {
        self.outputs.push((logical_id.into(), output));
        self
    }

    pub fn build(self) -> Result<Stack, SynthError> {
        let mut template = Template::new(
            self.description
                .unwrap_or_else(|| format!("hellostack stack {}", self.name)),
        );

        let mut resource_order = Vec::with_capacity(self.resources.len());

        // Each template section is its own logical-id namespace.
        let mut seen = BTreeSet::new();
        for (id, parameter) in self.parameters {
            check_logical_id(&self.name, &id, &mut seen)?;
            template.parameters.insert(id, parameter);
        }

        let mut seen = BTreeSet::new();
        for (id, resource) in self.resources {
            check_logical_id(&self.name, &id, &mut seen)?;
            resource_order.push(id.clone());
            template.resources.insert(id, resource);
        }

        let mut seen = BTreeSet::new();
        for (id, output) in self.outputs {
            check_logical_id(&self.name, &id, &mut seen)?;
            template.outputs.insert(id, output);
        }

        Ok(Stack {
            name: self.name,
            template,
            resource_order,
        })
    }
}

fn check_logical_id(
    stack: &str,
    logical_id: &str,
    seen: &mut BTreeSet<String>,
) -> Result<(), SynthError> {
    if logical_id.is_empty() || !logical_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SynthError::InvalidLogicalId {
            stack: stack.to_string(),
            logical_id: logical_id.to_string(),
            reason: "logical ids must be non-empty and alphanumeric".to_string(),
        });
    }
    if !seen.insert(logical_id.to_string()) {
        return Err(SynthError::DuplicateLogicalId {
            stack: stack.to_string(),
            logical_id: logical_id.to_string(),
        });
    }
    Ok(())
}
