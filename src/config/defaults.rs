use std::time::Duration;

/// Screenshot-capture endpoint the campaign targets.
pub const DEFAULT_TARGET_URL: &str = "https://192.168.164.5/capture_screenshot";
/// Page the capture service is asked to render.
pub const DEFAULT_CAPTURE_URL: &str = "https://google.com";
/// Render delay passed to the capture service.
pub const DEFAULT_CAPTURE_DELAY_SECS: u64 = 1;
/// Parallel requests issued at each step, in order.
pub const DEFAULT_CONCURRENCY_LEVELS: [usize; 6] = [2, 4, 8, 16, 32, 64];
/// Largest accepted concurrency level.
pub const MAX_CONCURRENCY_LEVEL: usize = 10_000;
/// Pause between steps so the target can release connections.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);
/// Hard limit for one exchange, body included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;
pub const DEFAULT_REQUIRED_KEYS: [&str; 3] = ["request_id", "screenshot", "session_id"];
/// Characters of a failing body kept for diagnostics.
pub const DEFAULT_EXCERPT_CHARS: usize = 100;
/// Override files checked in the working directory, first match wins.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["capture-load.toml", "capture-load.json"];
