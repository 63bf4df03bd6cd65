use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RoundtripId);
id_newtype!(DiagramId);
id_newtype!(ConnectorId);

/// Direction of a roundtrip synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMode {
    LeftToRight,
    RightToLeft,
}

impl SyncMode {
    /// Value used in the `syncMode` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SyncMode::LeftToRight => "LEFT_TO_RIGHT",
            SyncMode::RightToLeft => "RIGHT_TO_LEFT",
        }
    }
}

/// One of the two diagram slots of a roundtrip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    LeftHandSide,
    RightHandSide,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::LeftHandSide => "leftHandSide",
            Side::RightHandSide => "rightHandSide",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiagramId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modeler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<ConnectorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roundtrip {
    pub id: RoundtripId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_hand_side: Option<BpmnDiagram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hand_side: Option<BpmnDiagram>,
}

impl Roundtrip {
    pub fn diagram(&self, side: Side) -> Option<&BpmnDiagram> {
        match side {
            Side::LeftHandSide => self.left_hand_side.as_ref(),
            Side::RightHandSide => self.right_hand_side.as_ref(),
        }
    }

    pub fn set_diagram(&mut self, side: Side, diagram: BpmnDiagram) {
        match side {
            Side::LeftHandSide => self.left_hand_side = Some(diagram),
            Side::RightHandSide => self.right_hand_side = Some(diagram),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Folder,
    File,
}

/// An entry of a connector's repository tree, as picked in the diagram dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorNode {
    pub id: String,
    pub label: String,
    pub connector_id: ConnectorId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}
