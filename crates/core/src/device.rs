//! Coarse user-agent classification for admin session records.
//!
//! Only the three values shown in the admin session list are extracted:
//! device class, browser family and operating system family. Order of the
//! checks matters because most browsers embed other browsers' tokens
//! (Edge and Chrome both claim `Safari/`, for example).

use serde::Serialize;

/// Device class of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Unknown,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Unknown => "unknown",
        }
    }
}

/// Parsed user-agent summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub device_type: DeviceType,
    pub browser: String,
    pub os: String,
}

const UNKNOWN: &str = "Unknown";

pub fn parse_user_agent(user_agent: Option<&str>) -> DeviceInfo {
    let Some(ua) = user_agent.filter(|ua| !ua.trim().is_empty()) else {
        return DeviceInfo {
            device_type: DeviceType::Unknown,
            browser: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
        };
    };

    DeviceInfo {
        device_type: detect_device(ua),
        browser: detect_browser(ua).to_string(),
        os: detect_os(ua).to_string(),
    }
}

fn detect_device(ua: &str) -> DeviceType {
    let lower = ua.to_ascii_lowercase();
    if lower.contains("ipad") || lower.contains("tablet") {
        DeviceType::Tablet
    } else if lower.contains("android") && !lower.contains("mobile") {
        DeviceType::Tablet
    } else if lower.contains("mobi") || lower.contains("iphone") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("Edg/") || ua.contains("Edge/") {
        "Edge"
    } else if ua.contains("SamsungBrowser/") {
        "Samsung Internet"
    } else if ua.contains("Whale/") {
        "Whale"
    } else if ua.contains("OPR/") || ua.contains("Opera") {
        "Opera"
    } else if ua.contains("Firefox/") || ua.contains("FxiOS/") {
        "Firefox"
    } else if ua.contains("Chrome/") || ua.contains("CriOS/") {
        "Chrome"
    } else if ua.contains("Safari/") {
        "Safari"
    } else {
        UNKNOWN
    }
}

fn detect_os(ua: &str) -> &'static str {
    if ua.contains("Windows") {
        "Windows"
    } else if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
        "iOS"
    } else if ua.contains("Mac OS X") || ua.contains("Macintosh") {
        "macOS"
    } else if ua.contains("Android") {
        "Android"
    } else if ua.contains("Linux") {
        "Linux"
    } else {
        UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
    const EDGE_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    #[test]
    fn desktop_chrome_on_windows() {
        let info = parse_user_agent(Some(CHROME_WINDOWS));
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(info.browser, "Chrome");
        assert_eq!(info.os, "Windows");
    }

    #[test]
    fn iphone_is_mobile_safari_on_ios() {
        let info = parse_user_agent(Some(SAFARI_IPHONE));
        assert_eq!(info.device_type, DeviceType::Mobile);
        assert_eq!(info.browser, "Safari");
        assert_eq!(info.os, "iOS");
    }

    #[test]
    fn edge_wins_over_chrome_token() {
        let info = parse_user_agent(Some(EDGE_MAC));
        assert_eq!(info.browser, "Edge");
        assert_eq!(info.os, "macOS");
    }

    #[test]
    fn android_without_mobile_token_is_tablet() {
        let info = parse_user_agent(Some(ANDROID_TABLET));
        assert_eq!(info.device_type, DeviceType::Tablet);
        assert_eq!(info.os, "Android");
    }

    #[test]
    fn missing_user_agent_is_unknown() {
        let info = parse_user_agent(None);
        assert_eq!(info.device_type, DeviceType::Unknown);
        assert_eq!(info.browser, "Unknown");
    }
}
