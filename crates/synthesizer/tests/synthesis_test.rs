//! End-to-end synthesis and merge tests

use gatebridge_common::{MergePolicy, Template};
use gatebridge_config::IntegrationConfig;
use gatebridge_synthesizer::TemplateSynthesizer;
use serde_json::json;

fn orders_config(bus_name: &str) -> IntegrationConfig {
    IntegrationConfig::from_json(&format!(
        r#"{{
            "prefix": "Ord",
            "domain": "api.example.com",
            "path": "orders",
            "title": "Orders API",
            "eventBridge": {{"sourceName": "svc.orders", "busName": "{}"}}
        }}"#,
        bus_name
    ))
    .unwrap()
}

#[test]
fn test_api_fragment_end_to_end() {
    let fragments = TemplateSynthesizer::new(orders_config("orders-bus"), "dev")
        .synthesize()
        .unwrap();

    let api = serde_json::to_value(fragments.get("OrdApiGatewayApi").unwrap()).unwrap();
    let post = &api["Properties"]["Body"]["paths"]["/"]["post"];
    let integration = &post["x-amazon-apigateway-integration"];

    assert_eq!(
        integration["requestParameters"],
        json!({
            "Detail": "$request.body.Detail",
            "DetailType": "$request.body.DetailType",
            "Source": "svc.orders",
            "EventBusName": "orders-bus"
        })
    );
    assert_eq!(
        integration["credentials"],
        json!({"Fn::GetAtt": ["OrdIamRole", "Arn"]})
    );
    assert_eq!(post["responses"]["default"]["description"], "Success");
}

#[test]
fn test_merge_into_template_preserves_existing_resources() {
    let mut template = Template::from_json(
        r#"{
            "Resources": {
                "OrdersHandler": {"Type": "AWS::Lambda::Function", "Properties": {}}
            }
        }"#,
    )
    .unwrap();

    let fragments = TemplateSynthesizer::new(orders_config("orders-bus"), "dev")
        .synthesize()
        .unwrap();
    let replaced = fragments
        .merge_into(&mut template, MergePolicy::Reject)
        .unwrap();

    assert!(replaced.is_empty());
    assert_eq!(template.resources.len(), 5);
    assert!(template.contains_resource("OrdersHandler"));
    assert!(template.contains_resource("OrdApiGatewayApiMapping"));
}

#[test]
fn test_remerge_with_same_prefix_overwrites_wholesale() {
    let mut template = Template::new();

    let first = TemplateSynthesizer::new(orders_config("first-bus"), "dev")
        .synthesize()
        .unwrap();
    first
        .merge_into(&mut template, MergePolicy::Reject)
        .unwrap();

    let second = TemplateSynthesizer::new(orders_config("second-bus"), "dev")
        .synthesize()
        .unwrap();

    // Default policy refuses the collision and names every fragment
    let err = second
        .merge_into(&mut template, MergePolicy::Reject)
        .unwrap_err();
    for logical_id in [
        "OrdApiGatewayApi",
        "OrdApiGatewayApiMapping",
        "OrdApiGatewayStage",
        "OrdIamRole",
    ] {
        assert!(err.to_string().contains(logical_id));
    }

    // Opting in to overwrite replaces the first invocation's fragments
    let replaced = second
        .merge_into(&mut template, MergePolicy::Overwrite)
        .unwrap();
    assert_eq!(replaced.len(), 4);

    let role = &template.resources["OrdIamRole"];
    let arn_tokens = role["Properties"]["Policies"][0]["PolicyDocument"]["Statement"]["Resource"]
        [0]["Fn::Join"][1]
        .as_array()
        .unwrap();
    assert_eq!(arn_tokens.last().unwrap(), &json!("event-bus/second-bus"));
}

#[test]
fn test_stage_name_flows_into_stage_fragment() {
    let fragments = TemplateSynthesizer::new(orders_config("orders-bus"), "production")
        .synthesize()
        .unwrap();

    let stage = serde_json::to_value(fragments.get("OrdApiGatewayStage").unwrap()).unwrap();
    assert_eq!(stage["Properties"]["StageName"], "production");
    assert_eq!(stage["Properties"]["AutoDeploy"], true);
}

#[test]
fn test_fragment_set_serializes_as_resource_map() {
    let fragments = TemplateSynthesizer::new(orders_config("orders-bus"), "dev")
        .synthesize()
        .unwrap();

    let rendered: serde_json::Value =
        serde_json::from_str(&fragments.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        rendered["OrdIamRole"]["Type"],
        json!("AWS::IAM::Role")
    );
    assert_eq!(
        rendered["OrdApiGatewayStage"]["Type"],
        json!("AWS::ApiGatewayV2::Stage")
    );
}
