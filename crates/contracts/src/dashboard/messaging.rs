//! `postMessage` protocol between embedded iframes and the dashboard.
//!
//! Payloads are validated once at the boundary ([`decode_message`]) and then
//! turned into [`FrameAction`]s by [`react`]; the view only executes actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::whatsapp::{classify_click, contact_urls, is_whatsapp_related, LinkIntercept};
use crate::shared::portal::PortalConfig;

pub const MISSING_CONTACT: &str = "Missing phone number or message";
pub const UNKNOWN_ACTION: &str = "Unknown action";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WhatsAppAction {
    SendMessage,
    OpenWhatsapp,
    WhatsappClick,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPayload {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppRequest {
    #[serde(default)]
    pub action: Option<WhatsAppAction>,
    #[serde(default)]
    pub payload: Option<SendPayload>,
    /// Echoed back verbatim in the response
    #[serde(default)]
    pub request_id: Option<Value>,
    /// WhatsApp link to open instead of the group, for `open_whatsapp`
    #[serde(default)]
    pub url: Option<String>,
}

/// Structured messages understood by the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameMessage {
    WhatsappRequest(WhatsAppRequest),
    WhatsappClick {},
    IframeError {
        #[serde(default)]
        error: Option<String>,
    },
    NavigationEvent {
        url: String,
        #[serde(default, rename = "shouldOpenExternally")]
        should_open_externally: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Frame(FrameMessage),
    /// Free text that mentions WhatsApp
    WhatsAppText(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnauthorizedOrigin,
    Unrecognized,
}

/// Reply posted back into the iframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub success: bool,
    pub message: String,
    pub request_id: Option<Value>,
}

impl WhatsAppResponse {
    pub fn new(request_id: Option<Value>, success: bool, message: impl Into<String>) -> Self {
        Self {
            kind: "whatsapp_response".to_string(),
            success,
            message: message.into(),
            request_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Side effects the dashboard performs for one message
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAction {
    /// Open `primary`; if no live window appears, try `fallbacks` in order
    OpenWhatsApp {
        primary: String,
        fallbacks: Vec<String>,
    },
    ShowWhatsAppPanel,
    Notify { level: NoticeLevel, message: String },
    OpenExternal { url: String },
    Reply(WhatsAppResponse),
}

pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|prefix| origin.starts_with(prefix.as_str()))
}

/// Validate origin and shape of a message event payload.
pub fn decode_message(
    origin: &str,
    data: &Value,
    allowed: &[String],
) -> Result<InboundMessage, RejectReason> {
    if !origin_allowed(origin, allowed) {
        return Err(RejectReason::UnauthorizedOrigin);
    }
    match data {
        Value::String(text) if is_whatsapp_related(text) => {
            Ok(InboundMessage::WhatsAppText(text.clone()))
        }
        Value::Object(_) => serde_json::from_value::<FrameMessage>(data.clone())
            .map(InboundMessage::Frame)
            .map_err(|_| RejectReason::Unrecognized),
        _ => Err(RejectReason::Unrecognized),
    }
}

/// Host part of an absolute URL, without port or path
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let end = rest.find(['/', '?', '#', ':']).unwrap_or(rest.len());
    &rest[..end]
}

/// Decide what to do for a decoded message.
pub fn react(message: &InboundMessage, config: &PortalConfig) -> Vec<FrameAction> {
    match message {
        InboundMessage::WhatsAppText(_) => vec![FrameAction::ShowWhatsAppPanel],
        InboundMessage::Frame(FrameMessage::WhatsappClick {}) => {
            vec![FrameAction::ShowWhatsAppPanel]
        }
        InboundMessage::Frame(FrameMessage::WhatsappRequest(request)) => {
            react_to_whatsapp(request, config)
        }
        InboundMessage::Frame(FrameMessage::IframeError { error }) => vec![FrameAction::Notify {
            level: NoticeLevel::Warning,
            message: format!(
                "TikTok Cuan: {}",
                error.as_deref().unwrap_or("An error occurred")
            ),
        }],
        InboundMessage::Frame(FrameMessage::NavigationEvent {
            url,
            should_open_externally,
        }) => {
            let embedded_host = host_of(&config.embeds.tiktok_cuan);
            let inside_embed = !embedded_host.is_empty() && url.contains(embedded_host);
            if *should_open_externally && !inside_embed {
                vec![FrameAction::OpenExternal { url: url.clone() }]
            } else {
                Vec::new()
            }
        }
    }
}

/// Primary URL plus fallbacks
fn open_contact(phone: &str, message: &str, config: &PortalConfig) -> FrameAction {
    let mut urls = contact_urls(phone, message, &config.whatsapp.group_url);
    let primary = urls.remove(0);
    FrameAction::OpenWhatsApp {
        primary,
        fallbacks: urls,
    }
}

/// `open_whatsapp` with an optional link: a contact link opens that chat,
/// any other WhatsApp link opens as is, everything else opens the group.
fn open_requested(url: Option<&str>, config: &PortalConfig) -> FrameAction {
    let group_url = config.whatsapp.group_url.clone();
    match url.and_then(|u| classify_click(u, "", "")) {
        Some(LinkIntercept::Contact(target)) => open_contact(&target.phone, &target.message, config),
        Some(LinkIntercept::Link(link)) => FrameAction::OpenWhatsApp {
            primary: link,
            fallbacks: vec![group_url],
        },
        Some(LinkIntercept::OpenPanel) | None => FrameAction::OpenWhatsApp {
            primary: group_url.clone(),
            fallbacks: vec![group_url],
        },
    }
}

fn react_to_whatsapp(request: &WhatsAppRequest, config: &PortalConfig) -> Vec<FrameAction> {
    let request_id = request.request_id.clone();
    match request.action.as_ref() {
        Some(WhatsAppAction::SendMessage) => {
            let payload = request.payload.clone().unwrap_or_default();
            let (phone, message) = match (payload.phone_number, payload.message) {
                (Some(phone), Some(message)) if !phone.is_empty() && !message.is_empty() => {
                    (phone, message)
                }
                _ => {
                    return vec![FrameAction::Reply(WhatsAppResponse::new(
                        request_id,
                        false,
                        MISSING_CONTACT,
                    ))]
                }
            };
            vec![
                FrameAction::Notify {
                    level: NoticeLevel::Info,
                    message: format!("Opening WhatsApp for {}...", phone),
                },
                open_contact(&phone, &message, config),
                FrameAction::Reply(WhatsAppResponse::new(
                    request_id,
                    true,
                    "WhatsApp opened successfully",
                )),
            ]
        }
        Some(WhatsAppAction::OpenWhatsapp) => vec![
            FrameAction::Notify {
                level: NoticeLevel::Info,
                message: "Opening WhatsApp Group...".into(),
            },
            open_requested(request.url.as_deref(), config),
            FrameAction::Reply(WhatsAppResponse::new(request_id, true, "WhatsApp Group opened")),
        ],
        Some(WhatsAppAction::WhatsappClick) => vec![FrameAction::ShowWhatsAppPanel],
        Some(WhatsAppAction::Unknown) | None => vec![FrameAction::Reply(WhatsAppResponse::new(
            request_id,
            false,
            UNKNOWN_ACTION,
        ))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TIKTOK: &str = "https://zyqsemod.gensparkspace.com";

    fn allowed() -> Vec<String> {
        PortalConfig::default().allowed_origins
    }

    #[test]
    fn rejects_unknown_origin() {
        let data = json!({"type": "whatsapp_click"});
        assert_eq!(
            decode_message("https://evil.example", &data, &allowed()),
            Err(RejectReason::UnauthorizedOrigin)
        );
        assert!(decode_message("http://localhost:8080", &data, &allowed()).is_ok());
    }

    #[test]
    fn decodes_tagged_messages() {
        let data = json!({
            "type": "whatsapp_request",
            "action": "send_message",
            "payload": {"phoneNumber": "0812", "message": "Hi"},
            "requestId": 7
        });
        match decode_message(TIKTOK, &data, &allowed()).unwrap() {
            InboundMessage::Frame(FrameMessage::WhatsappRequest(request)) => {
                assert_eq!(request.action, Some(WhatsAppAction::SendMessage));
                assert_eq!(request.request_id, Some(json!(7)));
            }
            other => panic!("unexpected {:?}", other),
        }

        let nav = json!({"type": "navigation_event", "url": "https://x.org", "shouldOpenExternally": true});
        assert_eq!(
            decode_message(TIKTOK, &nav, &allowed()).unwrap(),
            InboundMessage::Frame(FrameMessage::NavigationEvent {
                url: "https://x.org".into(),
                should_open_externally: true
            })
        );
    }

    #[test]
    fn plain_strings_only_when_whatsapp_related() {
        assert_eq!(
            decode_message(TIKTOK, &json!("open wa.me please"), &allowed()),
            Ok(InboundMessage::WhatsAppText("open wa.me please".into()))
        );
        assert_eq!(
            decode_message(TIKTOK, &json!("hello"), &allowed()),
            Err(RejectReason::Unrecognized)
        );
        assert_eq!(
            decode_message(TIKTOK, &json!({"type": "something_else"}), &allowed()),
            Err(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn send_message_without_phone_replies_failure() {
        let message = InboundMessage::Frame(FrameMessage::WhatsappRequest(WhatsAppRequest {
            action: Some(WhatsAppAction::SendMessage),
            payload: Some(SendPayload {
                phone_number: None,
                message: Some("Hi".into()),
            }),
            request_id: Some(json!("r1")),
            url: None,
        }));
        assert_eq!(
            react(&message, &PortalConfig::default()),
            vec![FrameAction::Reply(WhatsAppResponse::new(
                Some(json!("r1")),
                false,
                MISSING_CONTACT
            ))]
        );
    }

    #[test]
    fn send_message_opens_web_then_mobile_then_api_then_group() {
        let config = PortalConfig::default();
        let message = InboundMessage::Frame(FrameMessage::WhatsappRequest(WhatsAppRequest {
            action: Some(WhatsAppAction::SendMessage),
            payload: Some(SendPayload {
                phone_number: Some("0812 3456".into()),
                message: Some("Halo".into()),
            }),
            request_id: None,
            url: None,
        }));
        let actions = react(&message, &config);
        assert!(actions.contains(&FrameAction::OpenWhatsApp {
            primary: "https://web.whatsapp.com/send?phone=628123456&text=Halo".into(),
            fallbacks: vec![
                "https://wa.me/628123456?text=Halo".into(),
                "https://api.whatsapp.com/send?phone=628123456&text=Halo".into(),
                config.whatsapp.group_url.clone()
            ],
        }));
        assert!(matches!(
            actions.last(),
            Some(FrameAction::Reply(WhatsAppResponse { success: true, .. }))
        ));
    }

    #[test]
    fn unknown_action_is_reported() {
        let data = json!({"type": "whatsapp_request", "action": "dance"});
        let message = decode_message(TIKTOK, &data, &allowed()).unwrap();
        assert_eq!(
            react(&message, &PortalConfig::default()),
            vec![FrameAction::Reply(WhatsAppResponse::new(None, false, UNKNOWN_ACTION))]
        );
    }

    #[test]
    fn navigation_inside_embed_stays_put() {
        let config = PortalConfig::default();
        let inside = InboundMessage::Frame(FrameMessage::NavigationEvent {
            url: "https://zyqsemod.gensparkspace.com/page".into(),
            should_open_externally: true,
        });
        assert!(react(&inside, &config).is_empty());

        let outside = InboundMessage::Frame(FrameMessage::NavigationEvent {
            url: "https://shop.example/item".into(),
            should_open_externally: true,
        });
        assert_eq!(
            react(&outside, &config),
            vec![FrameAction::OpenExternal {
                url: "https://shop.example/item".into()
            }]
        );
    }

    fn open_whatsapp(url: Option<&str>) -> InboundMessage {
        InboundMessage::Frame(FrameMessage::WhatsappRequest(WhatsAppRequest {
            action: Some(WhatsAppAction::OpenWhatsapp),
            payload: None,
            request_id: None,
            url: url.map(String::from),
        }))
    }

    fn opened(actions: &[FrameAction]) -> Option<(&str, &[String])> {
        actions.iter().find_map(|action| match action {
            FrameAction::OpenWhatsApp { primary, fallbacks } => {
                Some((primary.as_str(), fallbacks.as_slice()))
            }
            _ => None,
        })
    }

    #[test]
    fn open_whatsapp_follows_requested_link() {
        let config = PortalConfig::default();
        let group = config.whatsapp.group_url.clone();

        let actions = react(&open_whatsapp(None), &config);
        assert_eq!(opened(&actions), Some((group.as_str(), &[group.clone()][..])));

        let actions = react(&open_whatsapp(Some("https://wa.me/0812?text=Hi")), &config);
        let (primary, fallbacks) = opened(&actions).unwrap();
        assert_eq!(primary, "https://web.whatsapp.com/send?phone=62812&text=Hi");
        assert_eq!(fallbacks.last(), Some(&group));

        let invite = "https://chat.whatsapp.com/OtherGroup";
        let actions = react(&open_whatsapp(Some(invite)), &config);
        assert_eq!(opened(&actions), Some((invite, &[group.clone()][..])));

        // unrelated links never leave through the WhatsApp launcher
        let actions = react(&open_whatsapp(Some("https://evil.example/whatsapp")), &config);
        assert_eq!(opened(&actions), Some((group.as_str(), &[group.clone()][..])));
    }

    #[test]
    fn navigation_opens_externally_without_embed_host() {
        let mut config = PortalConfig::default();
        config.embeds.tiktok_cuan.clear();
        let outside = InboundMessage::Frame(FrameMessage::NavigationEvent {
            url: "https://shop.example/item".into(),
            should_open_externally: true,
        });
        assert_eq!(
            react(&outside, &config),
            vec![FrameAction::OpenExternal {
                url: "https://shop.example/item".into()
            }]
        );
    }

    #[test]
    fn host_extraction() {
        assert_eq!(host_of("https://zyqsemod.gensparkspace.com/"), "zyqsemod.gensparkspace.com");
        assert_eq!(host_of("http://localhost:3000/x"), "localhost");
        assert_eq!(host_of(""), "");
    }
}
