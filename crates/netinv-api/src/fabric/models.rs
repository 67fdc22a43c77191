// Fabric controller response types
//
// Every fabric controller reply is wrapped in `{ "totalCount": "N",
// "imdata": [...] }`, where each element is a single-key object naming the
// managed-object class. Attribute values are always strings.

use serde::{Deserialize, Serialize};

/// The `imdata` envelope shared by every fabric controller endpoint.
#[derive(Debug, Deserialize)]
pub struct ImData<T> {
    #[serde(default = "Vec::new")]
    pub imdata: Vec<T>,
}

// ── Login ────────────────────────────────────────────────────────────

/// One element of the `aaaLogin.json` reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginObject {
    pub aaa_login: LoginBody,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub attributes: LoginAttributes,
}

#[derive(Debug, Deserialize)]
pub struct LoginAttributes {
    pub token: String,
}

// ── Nodes ────────────────────────────────────────────────────────────

/// One element of the `fabricNode` class query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricNodeObject {
    pub fabric_node: FabricNodeBody,
}

#[derive(Debug, Deserialize)]
pub struct FabricNodeBody {
    pub attributes: FabricNode,
}

/// Attributes of a fabric member node (leaf, spine, or controller).
///
/// Only the inventory-relevant attributes are modelled; the controller
/// returns many more, which are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricNode {
    /// Distinguished name, e.g. `topology/pod-1/node-101`.
    #[serde(default)]
    pub dn: Option<String>,
    /// Numeric node id as a string.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `active`, `inactive`, `disabled`, `discovering`, ...
    #[serde(default)]
    pub fabric_st: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// TEP address of the node.
    #[serde(default)]
    pub address: Option<String>,
}
