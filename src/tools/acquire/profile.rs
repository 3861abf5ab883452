/// Browser Profile
///
/// The site serves its full desktop layout only to something that looks like
/// a desktop browser, so the profile keeps User-Agent, locale and window size
/// consistent with Chrome on Windows.
use super::types::AcquisitionConfig;

/// Chrome on Windows (most popular desktop platform)
pub const DESKTOP_CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Command-line switches passed to the browser process for this profile.
pub(crate) fn launch_args(config: &AcquisitionConfig) -> Vec<String> {
    let mut args = vec![
        format!("--user-agent={}", config.user_agent),
        format!("--lang={}", config.locale),
        format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        ),
        // Hides navigator.webdriver, the most common automation tell
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ];

    if config.headless {
        args.push("--hide-scrollbars".to_string());
        args.push("--mute-audio".to_string());
    }

    args
}
