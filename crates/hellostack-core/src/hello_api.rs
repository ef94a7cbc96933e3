// The hello API stack declaration
//
// One Lambda function behind an HTTP API, bound on GET /, with the
// API's base URL exported. Sizing, runtime, and tags come from the
// resolved environment record; the function code location is a deploy
// time parameter.

use crate::stack::{Stack, SynthError};
use crate::template::{Output, Parameter, Resource};
use hellostack_config::EnvironmentConfig;
use serde_json::{json, Value};

/// Template parameter naming the bucket holding the function zip.
pub const PARAM_CODE_BUCKET: &str = "CodeBucket";
/// Template parameter naming the function zip object key.
pub const PARAM_CODE_KEY: &str = "CodeKey";
/// Default object key for the packaged handler.
pub const DEFAULT_CODE_KEY: &str = "hellostack-lambda-arm64.zip";

/// Deployable stack name for an environment.
pub fn stack_name(environment: &str) -> String {
    format!("hello-api-{}", environment)
}

/// Declare the hello API stack for one environment.
pub fn hello_api_stack(config: &EnvironmentConfig) -> Result<Stack, SynthError> {
    let name = stack_name(&config.name);

    Stack::builder(&name)
        .description(format!(
            "hellostack hello API ({}, account {}, {})",
            config.name, config.account, config.region
        ))
        .parameter(
            PARAM_CODE_BUCKET,
            Parameter::string("S3 bucket holding the packaged Lambda handler"),
        )
        .parameter(
            PARAM_CODE_KEY,
            Parameter::string("S3 key of the packaged Lambda handler")
                .with_default(DEFAULT_CODE_KEY),
        )
        .resource("ExecutionRole", execution_role())
        .resource("HelloFunction", hello_function(config, &name))
        .resource("HttpApi", http_api(&name))
        .resource("HelloIntegration", integration())
        .resource("RootRoute", root_route())
        .resource("DefaultStage", default_stage())
        .resource("InvokePermission", invoke_permission())
        .output(
            "ApiUrl",
            Output::new(
                "Base URL of the hello API",
                json!({
                    "Fn::Sub": "https://${HttpApi}.execute-api.${AWS::Region}.amazonaws.com"
                }),
            ),
        )
        .build()
}

fn execution_role() -> Resource {
    Resource::new(
        "AWS::IAM::Role",
        json!({
            "AssumeRolePolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "Service": "lambda.amazonaws.com" },
                    "Action": "sts:AssumeRole"
                }]
            },
            "ManagedPolicyArns": [
                "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"
            ]
        }),
    )
}

fn hello_function(config: &EnvironmentConfig, stack_name: &str) -> Resource {
    let mut properties = json!({
        "FunctionName": stack_name,
        "Runtime": config.runtime,
        "Handler": "bootstrap",
        "Architectures": ["arm64"],
        "MemorySize": config.memory_mb,
        "Timeout": config.timeout_secs,
        "Role": { "Fn::GetAtt": ["ExecutionRole", "Arn"] },
        "Code": {
            "S3Bucket": { "Ref": PARAM_CODE_BUCKET },
            "S3Key": { "Ref": PARAM_CODE_KEY }
        },
        "Tags": tag_list(config)
    });

    if config.detailed_monitoring {
        properties["TracingConfig"] = json!({ "Mode": "Active" });
    }

    Resource::new("AWS::Lambda::Function", properties)
}

fn tag_list(config: &EnvironmentConfig) -> Value {
    // BTreeMap iteration keeps the rendered tag order stable.
    let tags: Vec<Value> = config
        .tags
        .iter()
        .map(|(key, value)| json!({ "Key": key, "Value": value }))
        .collect();
    Value::Array(tags)
}

fn http_api(stack_name: &str) -> Resource {
    Resource::new(
        "AWS::ApiGatewayV2::Api",
        json!({
            "Name": stack_name,
            "ProtocolType": "HTTP",
            "CorsConfiguration": {
                "AllowOrigins": ["*"],
                "AllowMethods": ["*"],
                "AllowHeaders": ["*"]
            }
        }),
    )
}

fn integration() -> Resource {
    Resource::new(
        "AWS::ApiGatewayV2::Integration",
        json!({
            "ApiId": { "Ref": "HttpApi" },
            "IntegrationType": "AWS_PROXY",
            "IntegrationUri": { "Fn::GetAtt": ["HelloFunction", "Arn"] },
            "PayloadFormatVersion": "2.0"
        }),
    )
}

fn root_route() -> Resource {
    Resource::new(
        "AWS::ApiGatewayV2::Route",
        json!({
            "ApiId": { "Ref": "HttpApi" },
            "RouteKey": "GET /",
            "Target": { "Fn::Sub": "integrations/${HelloIntegration}" }
        }),
    )
}

fn default_stage() -> Resource {
    Resource::new(
        "AWS::ApiGatewayV2::Stage",
        json!({
            "ApiId": { "Ref": "HttpApi" },
            "StageName": "$default",
            "AutoDeploy": true
        }),
    )
}

fn invoke_permission() -> Resource {
    Resource::new(
        "AWS::Lambda::Permission",
        json!({
            "Action": "lambda:InvokeFunction",
            "FunctionName": { "Ref": "HelloFunction" },
            "Principal": "apigateway.amazonaws.com",
            "SourceArn": {
                "Fn::Sub": "arn:aws:execute-api:${AWS::Region}:${AWS::AccountId}:${HttpApi}/*/*"
            }
        }),
    )
}
