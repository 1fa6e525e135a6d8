//! Shared UI constants such as colors, panel sizing, and scripts.

pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";
pub const BORDER_ACCENT: &str = "#3b82f6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_PRIMARY: &str = "#3b82f6";
pub const ACCENT_DANGER: &str = "#ef4444";

pub const MARKER_IDLE_COLOR: &str = "#ef4444";
pub const MARKER_SELECTED_COLOR: &str = "#3b82f6";

/// Fill and outline of the body figure, lit from the camera side.
pub const BODY_FILL: &str = "#d4d4d8";
pub const BODY_SHADE: &str = "#a1a1aa";
pub const VIEWPORT_BG_TOP: &str = "#1e293b";
pub const VIEWPORT_BG_BOTTOM: &str = "#0f172a";

pub const SIDEBAR_WIDTH: f64 = 320.0;
pub const SIDEBAR_COLLAPSED_WIDTH: f64 = 40.0;
pub const TITLE_BAR_HEIGHT: f64 = 36.0;
pub const STATUS_BAR_HEIGHT: f64 = 24.0;
pub const MAX_SIDEBAR_THUMBNAILS: usize = 3;

pub const VIEWPORT_HOST_ID: &str = "body-viewport-host";

pub const VIEWPORT_SIZE_SCRIPT: &str = r#"
const hostId = "body-viewport-host";
let last = null;

function sendSize() {
    const host = document.getElementById(hostId);
    if (!host) {
        return;
    }
    const next = {
        width: host.clientWidth || 0,
        height: host.clientHeight || 0
    };
    if (last &&
        Math.abs(last.width - next.width) < 0.5 &&
        Math.abs(last.height - next.height) < 0.5) {
        return;
    }
    last = next;
    dioxus.send(next);
}

function attach() {
    const host = document.getElementById(hostId);
    if (!host) {
        setTimeout(attach, 100);
        return;
    }
    const observer = new ResizeObserver(() => sendSize());
    observer.observe(host);
    window.addEventListener("resize", sendSize, { passive: true });
    sendSize();
}

attach();
await new Promise(() => {});
"#;

/// Reports whether a text field currently owns keyboard focus.
pub const INPUT_FOCUS_SCRIPT: &str = r#"
function isEditable(el) {
    if (!el) {
        return false;
    }
    const tag = el.tagName;
    return tag === "INPUT" || tag === "TEXTAREA" || el.isContentEditable;
}

let last = null;
function report() {
    const next = isEditable(document.activeElement);
    if (next === last) {
        return;
    }
    last = next;
    dioxus.send(next);
}

document.addEventListener("focusin", report, true);
document.addEventListener("focusout", () => setTimeout(report, 0), true);
report();
await new Promise(() => {});
"#;

/// Posts once per animation frame so the status bar can show the webview frame rate.
pub const FRAME_TICK_SCRIPT: &str = r#"
function frame() {
    dioxus.send(0);
    requestAnimationFrame(frame);
}
requestAnimationFrame(frame);
await new Promise(() => {});
"#;
