use cdnsight_domain::{HeadersReceived, PageLoad, TabId, TabStatus};
use serde::{Deserialize, Serialize};

/// Messages the extension sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    TabCreated { tab_id: TabId },
    TabRemoved { tab_id: TabId },
    HeadersReceived(HeadersReceived),
    PageLoad(PageLoad),
    /// Popup asking for the current status of a tab.
    Query { tab_id: TabId },
}

/// Messages the host sends to the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Status(TabStatus),
    Removed { tab_id: TabId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdnsight_domain::{HeaderEntry, TabState};
    use serde_json::json;

    #[test]
    fn test_parses_headers_received() {
        let raw = r#"{
            "type": "headers_received",
            "tab_id": 4,
            "response_headers": [{"name": "CF-RAY", "value": "8a1b-AMS"}],
            "remote_ip": "104.16.0.1"
        }"#;

        let msg: InboundMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(
            msg,
            InboundMessage::HeadersReceived(HeadersReceived {
                tab_id: 4,
                response_headers: vec![HeaderEntry::new("CF-RAY", "8a1b-AMS")],
                remote_ip: Some("104.16.0.1".to_string()),
            })
        );
    }

    #[test]
    fn test_page_load_defaults_to_incomplete() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"page_load","tab_id":2,"url":"https://a.example/"}"#)
                .unwrap();
        match msg {
            InboundMessage::PageLoad(load) => assert!(!load.navigation_complete),
            other => panic!("expected PageLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_str::<InboundMessage>(r#"{"type":"reload","tab_id":1}"#).is_err());
    }

    #[test]
    fn test_status_message_shape() {
        let status = TabStatus::new(9, TabState::default());
        let value = serde_json::to_value(OutboundMessage::Status(status)).unwrap();

        assert_eq!(value["type"], "status");
        assert_eq!(value["tab_id"], 9);
        assert_eq!(value["indicator"], "off");
        assert_eq!(value["state"]["uses_cdn"], false);
        assert_eq!(value["state"]["block_status"]["status"], "clean");
    }

    #[test]
    fn test_removed_message_shape() {
        let value = serde_json::to_value(OutboundMessage::Removed { tab_id: 3 }).unwrap();
        assert_eq!(value, json!({"type": "removed", "tab_id": 3}));
    }
}
