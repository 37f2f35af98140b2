//! End-to-end scenarios (§8): each builds an ESTree-shaped program as JSON
//! (the input shape §6 specifies; a real host would hand this crate the
//! output of an actual parser) and asserts on the final console entry,
//! mirroring how boa's `tests/compiler.rs` evaluates raw JS source and
//! checks the result - the source text here is just pre-parsed by hand.

use ecma_trace::ast::Node;
use ecma_trace::console::ConsoleKind;
use ecma_trace::step::BubbleUp;
use ecma_trace::value::Value;

fn parse(source: serde_json::Value) -> Node {
    serde_json::from_value(source).expect("test program must match the ESTree shape ast::Node deserializes")
}

fn last_log(steps: &[ecma_trace::step::Step]) -> (ConsoleKind, Vec<Value>) {
    let entry = steps.last().unwrap().console_snapshot.last().expect("expected a console entry");
    (entry.kind, entry.values.clone())
}

/// `let x = 1; let y = 2; console.log(x + y);`
#[test]
fn scenario_1_arithmetic_and_log() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "x"}, "init": {"type": "Literal", "value": 1}}
            ]},
            {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "y"}, "init": {"type": "Literal", "value": 2}}
            ]},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [{"type": "BinaryExpression", "operator": "+",
                    "left": {"type": "Identifier", "name": "x"}, "right": {"type": "Identifier", "name": "y"}}]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::number(3.0)]);
    assert!(steps.last().unwrap().bubble_up.is_none());
}

/// `function f(a, b=10){ return a*b; } console.log(f(3));`
#[test]
fn scenario_2_default_parameter() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "FunctionDeclaration", "id": {"type": "Identifier", "name": "f"},
             "params": [
                {"type": "Identifier", "name": "a"},
                {"type": "AssignmentPattern", "left": {"type": "Identifier", "name": "b"},
                 "right": {"type": "Literal", "value": 10}}
             ],
             "body": {"type": "BlockStatement", "body": [
                {"type": "ReturnStatement", "argument": {"type": "BinaryExpression", "operator": "*",
                    "left": {"type": "Identifier", "name": "a"}, "right": {"type": "Identifier", "name": "b"}}}
             ]}},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [{"type": "CallExpression", "callee": {"type": "Identifier", "name": "f"},
                    "arguments": [{"type": "Literal", "value": 3}]}]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::number(30.0)]);
}

/// `let x; try { x = y; } catch(e){ x = e.message; } console.log(x);`
#[test]
fn scenario_3_try_catch_reference_error() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "x"}, "init": null}
            ]},
            {"type": "TryStatement",
             "block": {"type": "BlockStatement", "body": [
                {"type": "ExpressionStatement", "expression": {"type": "AssignmentExpression", "operator": "=",
                    "left": {"type": "Identifier", "name": "x"}, "right": {"type": "Identifier", "name": "y"}}}
             ]},
             "handler": {"param": {"type": "Identifier", "name": "e"},
                "body": {"type": "BlockStatement", "body": [
                    {"type": "ExpressionStatement", "expression": {"type": "AssignmentExpression", "operator": "=",
                        "left": {"type": "Identifier", "name": "x"},
                        "right": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "e"},
                                  "property": {"type": "Identifier", "name": "message"}, "computed": false}}}
                ]}},
             "finalizer": null},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [{"type": "Identifier", "name": "x"}]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::string("y is not defined")]);
}

/// `const o = {a:1}; o.b = o.a + 2; console.log(o.a, o.b);`
#[test]
fn scenario_4_object_property_write() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "kind": "const", "declarations": [
                {"id": {"type": "Identifier", "name": "o"}, "init": {"type": "ObjectExpression", "properties": [
                    {"key": {"type": "Identifier", "name": "a"}, "value": {"type": "Literal", "value": 1},
                     "computed": false, "kind": "init"}
                ]}}
            ]},
            {"type": "ExpressionStatement", "expression": {"type": "AssignmentExpression", "operator": "=",
                "left": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "o"},
                         "property": {"type": "Identifier", "name": "b"}, "computed": false},
                "right": {"type": "BinaryExpression", "operator": "+",
                    "left": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "o"},
                             "property": {"type": "Identifier", "name": "a"}, "computed": false},
                    "right": {"type": "Literal", "value": 2}}}},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [
                    {"type": "MemberExpression", "object": {"type": "Identifier", "name": "o"},
                     "property": {"type": "Identifier", "name": "a"}, "computed": false},
                    {"type": "MemberExpression", "object": {"type": "Identifier", "name": "o"},
                     "property": {"type": "Identifier", "name": "b"}, "computed": false}
                ]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::number(1.0), Value::number(3.0)]);
}

/// `let s = ""; for (let i = 0; i < 3; i = i + 1) { s = s + i; } console.log(s);`
#[test]
fn scenario_5_for_loop_accumulation() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "s"}, "init": {"type": "Literal", "value": ""}}
            ]},
            {"type": "ForStatement",
             "init": {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "i"}, "init": {"type": "Literal", "value": 0}}
             ]},
             "test": {"type": "BinaryExpression", "operator": "<",
                "left": {"type": "Identifier", "name": "i"}, "right": {"type": "Literal", "value": 3}},
             "update": {"type": "AssignmentExpression", "operator": "=",
                "left": {"type": "Identifier", "name": "i"},
                "right": {"type": "BinaryExpression", "operator": "+",
                    "left": {"type": "Identifier", "name": "i"}, "right": {"type": "Literal", "value": 1}}},
             "body": {"type": "BlockStatement", "body": [
                {"type": "ExpressionStatement", "expression": {"type": "AssignmentExpression", "operator": "=",
                    "left": {"type": "Identifier", "name": "s"},
                    "right": {"type": "BinaryExpression", "operator": "+",
                        "left": {"type": "Identifier", "name": "s"}, "right": {"type": "Identifier", "name": "i"}}}}
             ]}},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [{"type": "Identifier", "name": "s"}]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::string("012")]);
}

/// `let a = [1,2,3]; a[1] = a[0] + a[2]; console.log(a[1]);`
#[test]
fn scenario_6_array_index_write() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "kind": "let", "declarations": [
                {"id": {"type": "Identifier", "name": "a"}, "init": {"type": "ArrayExpression", "elements": [
                    {"type": "Literal", "value": 1}, {"type": "Literal", "value": 2}, {"type": "Literal", "value": 3}
                ]}}
            ]},
            {"type": "ExpressionStatement", "expression": {"type": "AssignmentExpression", "operator": "=",
                "left": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "a"},
                         "property": {"type": "Literal", "value": 1}, "computed": true},
                "right": {"type": "BinaryExpression", "operator": "+",
                    "left": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "a"},
                             "property": {"type": "Literal", "value": 0}, "computed": true},
                    "right": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "a"},
                             "property": {"type": "Literal", "value": 2}, "computed": true}}}},
            {"type": "ExpressionStatement", "expression": {
                "type": "CallExpression",
                "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "console"},
                           "property": {"type": "Identifier", "name": "log"}, "computed": false},
                "arguments": [{"type": "MemberExpression", "object": {"type": "Identifier", "name": "a"},
                    "property": {"type": "Literal", "value": 1}, "computed": true}]
            }}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let (kind, values) = last_log(&steps);
    assert_eq!(kind, ConsoleKind::Log);
    assert_eq!(values, vec![Value::number(4.0)]);
}

/// An uncaught throw ends the program: no step is emitted after the final
/// throw, and that step still carries the error (§7).
#[test]
fn uncaught_throw_ends_the_program() {
    let program = parse(serde_json::json!({
        "type": "Program",
        "body": [
            {"type": "ExpressionStatement", "expression": {"type": "Identifier", "name": "neverDeclared"}}
        ]
    }));

    let steps = ecma_trace::run(&program).unwrap();
    let last = steps.last().unwrap();
    assert_eq!(last.bubble_up, Some(BubbleUp::Throw));
    assert_eq!(last.console_snapshot.last().unwrap().kind, ConsoleKind::Error);
}
