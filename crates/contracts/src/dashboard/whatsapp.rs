//! WhatsApp deep links and the multi-strategy launcher plan.
//!
//! Cross-origin popups cannot be inspected, so "success" only means a window
//! handle exists and is not closed after the probe delay.

use serde::{Deserialize, Serialize};

use crate::shared::portal::WhatsAppConfig;

/// Digits only, Indonesian country code enforced.
///
/// `0812-3456` → `628123456`, `812 3456` → `628123456`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix('0') {
        format!("62{}", rest)
    } else if digits.starts_with("62") {
        digits
    } else {
        format!("62{}", digits)
    }
}

pub fn web_send_url(phone: &str, message: &str) -> String {
    format!(
        "https://web.whatsapp.com/send?phone={}&text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

pub fn wa_me_url(phone: &str, message: &str) -> String {
    let phone = normalize_phone(phone);
    if message.is_empty() {
        format!("https://wa.me/{}", phone)
    } else {
        format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
    }
}

pub fn app_url(phone: &str, message: &str) -> String {
    format!(
        "whatsapp://send?phone={}&text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

pub fn api_url(phone: &str, message: &str) -> String {
    format!(
        "https://api.whatsapp.com/send?phone={}&text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

/// Every URL that can reach `phone`, most reliable first, ending with the group
pub fn contact_urls(phone: &str, message: &str, group_url: &str) -> Vec<String> {
    vec![
        web_send_url(phone, message),
        wa_me_url(phone, message),
        api_url(phone, message),
        group_url.to_string(),
    ]
}

pub fn tel_url(phone: &str) -> String {
    format!("tel:+{}", normalize_phone(phone))
}

/// True for free text or URLs that refer to WhatsApp
pub fn is_whatsapp_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("whatsapp") || lower.contains("wa.me") || lower.contains("chat.whatsapp")
}

/// Contact extracted from a WhatsApp link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppTarget {
    pub phone: String,
    pub message: String,
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(value)
        })
}

/// Parse `https://wa.me/<phone>?text=..`, `https://*.whatsapp.com/send?phone=..&text=..`
/// and `whatsapp://send?phone=..`.
///
/// Returns `None` when the link carries no phone number (e.g. group invites).
pub fn parse_whatsapp_url(url: &str) -> Option<WhatsAppTarget> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let phone = if let Some(index) = path.find("wa.me/") {
        path[index + "wa.me/".len()..]
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
    } else if path.contains("whatsapp.com/send") || path.starts_with("whatsapp://send") {
        query_param(query, "phone").unwrap_or_default()
    } else {
        return None;
    };

    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(WhatsAppTarget {
        phone: normalize_phone(&phone),
        message: query_param(query, "text").unwrap_or_default(),
    })
}

/// Marks portal controls that open WhatsApp themselves; clicks inside are not intercepted
pub const DIRECT_SELECTOR: &str = "[data-whatsapp-direct]";

/// What a click on a WhatsApp-looking element turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIntercept {
    /// Link names a contact
    Contact(WhatsAppTarget),
    /// WhatsApp link without a phone number, e.g. a group invite
    Link(String),
    /// Element mentions WhatsApp but carries no link
    OpenPanel,
}

/// Classify one element on the path of a click from its `href`, `class` and `id`.
pub fn classify_click(href: &str, class: &str, id: &str) -> Option<LinkIntercept> {
    let href_lower = href.to_lowercase();
    if href_lower.contains("wa.me")
        || href_lower.contains("whatsapp.com")
        || href_lower.starts_with("whatsapp://")
    {
        return Some(match parse_whatsapp_url(href) {
            Some(target) => LinkIntercept::Contact(target),
            None => LinkIntercept::Link(href.to_string()),
        });
    }
    let mentions = |s: &str| s.to_lowercase().contains("whatsapp");
    if mentions(&href_lower) || mentions(class) || mentions(id) {
        Some(LinkIntercept::OpenPanel)
    } else {
        None
    }
}

/// Ways of opening a URL, tried in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchStrategy {
    Popup,
    AnchorClick,
    FormSubmit,
    LocationAssign,
}

impl LaunchStrategy {
    pub const ORDER: [LaunchStrategy; 4] = [
        LaunchStrategy::Popup,
        LaunchStrategy::AnchorClick,
        LaunchStrategy::FormSubmit,
        LaunchStrategy::LocationAssign,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LaunchStrategy::Popup => "popup window",
            LaunchStrategy::AnchorClick => "link click",
            LaunchStrategy::FormSubmit => "form submission",
            LaunchStrategy::LocationAssign => "location assignment",
        }
    }
}

/// Window state observed after the probe delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchProbe {
    pub handle_present: bool,
    pub handle_closed: bool,
}

impl LaunchProbe {
    pub const NO_HANDLE: LaunchProbe = LaunchProbe {
        handle_present: false,
        handle_closed: false,
    };

    pub fn opened() -> Self {
        Self {
            handle_present: true,
            handle_closed: false,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.handle_present && !self.handle_closed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStep {
    /// Run `strategy`, wait `probe_delay_ms`, then report with [`WhatsAppLauncher::record`]
    Attempt {
        strategy: LaunchStrategy,
        url: String,
        probe_delay_ms: u32,
    },
    /// A strategy produced a live window
    Done { strategy: LaunchStrategy },
    /// Every strategy failed; show the manual panel
    ShowFallback,
}

/// Walks [`LaunchStrategy::ORDER`] until one strategy yields a live window.
#[derive(Debug, Clone)]
pub struct WhatsAppLauncher {
    url: String,
    probe_delay_ms: u32,
    next_index: usize,
    finished: bool,
}

impl WhatsAppLauncher {
    pub fn new(url: impl Into<String>, probe_delay_ms: u32) -> Self {
        Self {
            url: url.into(),
            probe_delay_ms,
            next_index: 0,
            finished: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// First step; call once.
    pub fn begin(&mut self) -> LaunchStep {
        self.advance()
    }

    /// Feed the probe result of the last attempted strategy.
    pub fn record(&mut self, probe: LaunchProbe) -> LaunchStep {
        if self.finished {
            return LaunchStep::ShowFallback;
        }
        if probe.succeeded() && self.next_index > 0 {
            self.finished = true;
            return LaunchStep::Done {
                strategy: LaunchStrategy::ORDER[self.next_index - 1],
            };
        }
        self.advance()
    }

    /// A strategy threw before anything could be probed.
    pub fn record_error(&mut self) -> LaunchStep {
        self.record(LaunchProbe::NO_HANDLE)
    }

    fn advance(&mut self) -> LaunchStep {
        match LaunchStrategy::ORDER.get(self.next_index) {
            Some(strategy) => {
                self.next_index += 1;
                LaunchStep::Attempt {
                    strategy: *strategy,
                    url: self.url.clone(),
                    probe_delay_ms: self.probe_delay_ms,
                }
            }
            None => {
                self.finished = true;
                LaunchStep::ShowFallback
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackAction {
    Link(String),
    Copy(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackOption {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub action: FallbackAction,
}

/// Manual alternatives shown when no strategy opened WhatsApp
pub fn fallback_options(config: &WhatsAppConfig, original_url: &str) -> Vec<FallbackOption> {
    let option = |icon: &str, title: &str, description: &str, action| FallbackOption {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
        action,
    };

    vec![
        option(
            "🌐",
            "WhatsApp Web",
            "Open WhatsApp Web and search for our contact",
            FallbackAction::Link("https://web.whatsapp.com/".into()),
        ),
        option(
            "🔗",
            "Direct Link",
            "Open the original link in a new tab",
            FallbackAction::Link(original_url.into()),
        ),
        option(
            "📞",
            "Direct Phone Contact",
            "Call us directly",
            FallbackAction::Link(tel_url(&config.support_phone)),
        ),
        option(
            "📱",
            "WhatsApp Mobile App",
            "Open in WhatsApp mobile app",
            FallbackAction::Link(app_url(&config.support_phone, &config.default_message)),
        ),
        option(
            "📋",
            "Copy Phone Number",
            "Copy and paste in WhatsApp",
            FallbackAction::Copy(config.support_phone_display.clone()),
        ),
    ]
}
