use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// Outgoing notification queue towards the host UI.
///
/// The selection tools only push; the host drains once per frame and forwards
/// the messages to its frontend (panel visibility, status text, ...).
#[derive(Debug, Default)]
pub struct SelectionNotifications {
    outgoing: Vec<RpcNotification>,
}

impl SelectionNotifications {
    /// Queue a notification without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    pub fn drain(&mut self) -> Vec<RpcNotification> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }
}
