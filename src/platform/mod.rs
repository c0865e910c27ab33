//! Platform helpers
//!
//! Input capture and device detection shared by the hosts. Nothing here
//! touches the DOM; the wasm host forwards browser events into these types.

pub mod input;

pub use input::InputState;

/// User agent fragments of touch-first devices
const MOBILE_AGENTS: [&str; 7] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
];

/// Case-insensitive match against known phone and tablet user agents
pub fn is_mobile(user_agent: &str) -> bool {
    let agent = user_agent.to_lowercase();
    MOBILE_AGENTS.iter().any(|m| agent.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile(
            "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 Mobile Safari/537.36"
        ));
        assert!(is_mobile(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile("Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)"));
        assert!(is_mobile("Mozilla/5.0 (Windows Phone 10.0; Android 6.0.1)"));
        assert!(is_mobile("BlackBerry9700/5.0.0.351"));
        assert!(is_mobile("Mozilla/5.0 (webOS/1.4.0; U; en-US)"));
    }

    #[test]
    fn test_desktop_user_agents() {
        assert!(!is_mobile(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36"
        ));
        assert!(!is_mobile(
            "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0"
        ));
        assert!(!is_mobile(""));
    }
}
