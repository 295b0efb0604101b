use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use swagger2apis::interface_processor::InterfaceDescriptor;
use swagger2apis::operation_processor::ParameterPosition;
use swagger2apis::{transform, SwaggerDocument, TransformedModel, TypeDescriptor};

fn run(document: Value) -> TransformedModel {
    let document: SwaggerDocument = serde_json::from_value(document).unwrap();
    transform(&document)
}

fn interface<'a>(model: &'a TransformedModel, name: &str) -> &'a InterfaceDescriptor {
    model
        .interfaces
        .iter()
        .find(|i| i.name == name)
        .unwrap_or_else(|| panic!("missing interface {name}"))
}

#[test]
fn response_type_overrides_declared_required_list() {
    let model = run(json!({
        "swagger": "2.0",
        "paths": {
            "/users/{id}": {
                "get": {
                    "tags": ["user"],
                    "summary": "Get user",
                    "parameters": [
                        { "name": "id", "in": "path", "type": "integer", "required": true }
                    ],
                    "responses": {
                        "200": { "description": "OK", "schema": { "$ref": "#/definitions/User" } }
                    }
                }
            }
        },
        "definitions": {
            "User": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string" }
                }
            }
        }
    }));

    let api = &model.apis[0];
    assert_eq!(api.path, "/users/{id}");
    assert_eq!(api.method, "get");
    assert_eq!(api.description, "Get user");
    assert_eq!(api.parameters[0].position, ParameterPosition::Path);
    assert_eq!(api.response.ty, Some(TypeDescriptor::reference("IUser")));

    let user = interface(&model, "IUser");
    let flags: Vec<_> = user.properties.iter().map(|p| (p.name.as_str(), p.required)).collect();
    assert_eq!(flags, vec![("id", true), ("name", true)]);
}

#[test]
fn map_wrapper_around_array_of_references() {
    let model = run(json!({
        "definitions": {
            "Page": {
                "properties": {
                    "groups": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "array",
                            "items": { "$ref": "#/definitions/Item" }
                        }
                    }
                }
            },
            "Item": { "properties": { "sku": { "type": "string" } } }
        }
    }));

    let groups = &interface(&model, "IPage").properties[0];
    assert_eq!(
        groups.ty,
        TypeDescriptor::map_of(
            TypeDescriptor::primitive("string"),
            TypeDescriptor::array_of(TypeDescriptor::reference("IItem"))
        )
    );
}

#[test]
fn generic_map_encoding_in_array_items() {
    let model = run(json!({
        "paths": {
            "/stock": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": { "type": "array", "items": { "$ref": "#/definitions/Map«string,Item»" } }
                        }
                    }
                }
            }
        }
    }));

    let ty = model.apis[0].response.ty.clone().unwrap();
    assert_eq!(
        ty,
        TypeDescriptor::map_of(TypeDescriptor::primitive("string"), TypeDescriptor::primitive("Item"))
    );
    assert_eq!(ty.to_string(), "Record<string,Item>");
}

#[test]
fn unreachable_interfaces_keep_declared_required() {
    let model = run(json!({
        "paths": {
            "/orders": {
                "post": {
                    "parameters": [
                        { "name": "order", "in": "body", "schema": { "$ref": "#/definitions/OrderForm" } }
                    ],
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "definitions": {
            "OrderForm": {
                "required": ["sku", "qty"],
                "properties": {
                    "sku": { "type": "string" },
                    "qty": { "type": "integer" },
                    "note": { "type": "string" }
                }
            }
        }
    }));

    let form = interface(&model, "IOrderForm");
    for property in &form.properties {
        let declared = ["sku", "qty"].contains(&property.name.as_str());
        assert_eq!(property.required, declared, "{}", property.name);
    }
    assert_eq!(model.apis[0].response.ty, None);
}

#[test]
fn cyclic_references_resolve_by_name() {
    let model = run(json!({
        "paths": {
            "/tree": {
                "get": { "responses": { "200": { "schema": { "$ref": "#/definitions/Node" } } } }
            }
        },
        "definitions": {
            "Node": {
                "properties": {
                    "parent": { "$ref": "#/definitions/Node" },
                    "children": { "type": "array", "items": { "$ref": "#/definitions/Node" } }
                }
            }
        }
    }));

    let node = interface(&model, "INode");
    assert_eq!(node.properties[0].ty.to_string(), "INode");
    assert_eq!(node.properties[1].ty.to_string(), "INode[]");
    assert!(node.properties.iter().all(|p| p.required));
}

#[test]
fn serialized_model_uses_textual_types() {
    let model = run(json!({
        "paths": {
            "/ping": {
                "get": {
                    "tags": ["health"],
                    "parameters": [
                        { "name": "X-Trace", "in": "header", "type": "string" },
                        { "name": "verbose", "in": "query", "type": "boolean" }
                    ],
                    "responses": { "200": { "description": "pong", "schema": { "type": "string" } } }
                }
            }
        },
        "definitions": {
            "Pong": { "description": "reply", "properties": { "at": { "type": "string", "description": "time" } } }
        }
    }));

    assert_eq!(
        serde_json::to_value(&model).unwrap(),
        json!({
            "apis": [{
                "tags": ["health"],
                "path": "/ping",
                "method": "get",
                "description": "",
                "parameters": [{
                    "name": "verbose",
                    "description": "",
                    "type": "boolean",
                    "required": false,
                    "position": "query"
                }],
                "response": { "description": "pong", "type": "string" }
            }],
            "interfaces": [{
                "name": "IPong",
                "description": "reply",
                "properties": [{ "name": "at", "type": "string", "description": "time", "required": false }]
            }]
        })
    );
}

#[test]
fn malformed_documents_degrade() {
    let model = run(json!({ "paths": "nope", "definitions": [1, 2, 3] }));
    assert!(model.apis.is_empty());
    assert!(model.interfaces.is_empty());

    let model = run(json!({
        "paths": { "/x": { "get": { "parameters": "bad", "responses": { "200": { "schema": 7 } } } } },
        "definitions": { "Odd": { "properties": { "v": { "type": 3 } } } }
    }));
    assert!(model.apis[0].parameters.is_empty());
    assert_eq!(model.apis[0].response.ty, Some(TypeDescriptor::Unknown));
    assert_eq!(interface(&model, "IOdd").properties[0].ty, TypeDescriptor::Unknown);
}
