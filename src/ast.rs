//! The ESTree-shaped input AST (§6). Parsing is an external collaborator's
//! job (out of scope, §1) - this module only describes the shape a parser
//! is expected to hand the simulator and derives `serde::Deserialize` for
//! it, the same way boa's old tree-walker matched on `syntax::ast::node::Node`
//! in `exec/mod.rs` (there produced by boa's own parser; here produced by
//! whatever ESTree-compatible parser the host wires up).
//!
//! Only the node shapes the execution pass (§4.6) actually handles are
//! modeled; anything else deserializes fine (serde ignores unknown JSON
//! keys) but is unrepresentable, which is the point - an AST a parser would
//! never produce for the supported subset can't silently round-trip through
//! a godless catch-all variant.

use serde::Deserialize;

/// An identity-preserving handle to a node: the address of its `Node` in
/// the owned tree. Valid for the lifetime of the `Program` it came from,
/// exactly like comparing AST node pointers/ids downstream (§6).
pub type NodeId = usize;

pub fn node_id(node: &Node) -> NodeId {
    node as *const Node as NodeId
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl<'de> Deserialize<'de> for DeclKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "var" => Ok(DeclKind::Var),
            "let" => Ok(DeclKind::Let),
            "const" => Ok(DeclKind::Const),
            other => Err(serde::de::Error::custom(format!("unknown declaration kind {other}"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclarator {
    pub id: Box<Node>,
    pub init: Option<Box<Node>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatchClause {
    pub param: Option<Box<Node>>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectProperty {
    pub key: Box<Node>,
    pub value: Box<Node>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default = "default_property_kind")]
    pub kind: String,
}

fn default_property_kind() -> String {
    "init".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Program {
        body: Vec<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    EmptyStatement {},
    VariableDeclaration {
        kind: DeclKind,
        declarations: Vec<VariableDeclarator>,
    },
    FunctionDeclaration {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    FunctionExpression {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    ArrowFunctionExpression {
        params: Vec<Node>,
        body: Box<Node>,
    },
    AssignmentPattern {
        left: Box<Node>,
        right: Box<Node>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<CatchClause>,
        finalizer: Option<Box<Node>>,
    },
    BreakStatement {},
    ContinueStatement {},
    Identifier {
        name: String,
    },
    Literal {
        value: serde_json::Value,
    },
    ArrayExpression {
        elements: Vec<Option<Node>>,
    },
    ObjectExpression {
        properties: Vec<ObjectProperty>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<Node>,
        #[serde(default = "default_true")]
        prefix: bool,
    },
    UpdateExpression {
        operator: String,
        argument: Box<Node>,
        prefix: bool,
    },
    AssignmentExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    SequenceExpression {
        expressions: Vec<Node>,
    },
    // Out of normative scope (§4.6): modeled only so the execution pass can
    // emit a category-tagged descriptive step instead of failing.
    ClassDeclaration {
        id: Option<Box<Node>>,
        body: Box<Node>,
    },
    ClassBody {
        body: Vec<Node>,
    },
    MethodDefinition {
        key: Box<Node>,
        #[serde(default)]
        kind: String,
    },
    PropertyDefinition {
        key: Box<Node>,
        #[serde(default)]
        value: Option<Box<Node>>,
    },
}

fn default_true() -> bool {
    true
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::EmptyStatement {} => "EmptyStatement",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            Node::AssignmentPattern { .. } => "AssignmentPattern",
            Node::IfStatement { .. } => "IfStatement",
            Node::ForStatement { .. } => "ForStatement",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::ThrowStatement { .. } => "ThrowStatement",
            Node::TryStatement { .. } => "TryStatement",
            Node::BreakStatement {} => "BreakStatement",
            Node::ContinueStatement {} => "ContinueStatement",
            Node::Identifier { .. } => "Identifier",
            Node::Literal { .. } => "Literal",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::ObjectExpression { .. } => "ObjectExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::MemberExpression { .. } => "MemberExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::UpdateExpression { .. } => "UpdateExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
            Node::SequenceExpression { .. } => "SequenceExpression",
            Node::ClassDeclaration { .. } => "ClassDeclaration",
            Node::ClassBody { .. } => "ClassBody",
            Node::MethodDefinition { .. } => "MethodDefinition",
            Node::PropertyDefinition { .. } => "PropertyDefinition",
        }
    }
}

pub type NodeKind = &'static str;
