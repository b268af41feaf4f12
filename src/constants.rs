// DOM hooks and colours used by the web frontend.

// Dial
pub const DISC_ID: &str = "disc";
pub const TARGET_SELECTOR: &str = ".icon-btn";
pub const TONEARM_SELECTOR: &str = ".tonearm";
pub const ROTATION_PROPERTY: &str = "--rotation";
pub const LOCKED_CLASS: &str = "agarrado"; // locked target button
pub const PAUSED_CLASS: &str = "paused"; // tonearm lifted
pub const HIGHLIGHT_COLOR: &str = "#ff5050";
pub const RESTING_COLOR: &str = "rgba(128,128,128,0.7)";

// Tabs
pub const TAB_BUTTON_SELECTOR: &str = ".tab-btn";
pub const TAB_PAGE_SELECTOR: &str = ".tab-page";
pub const ACTIVE_CLASS: &str = "active";

// Tuner
pub const TUNER_ARC_ID: &str = "tunerArc";
pub const TUNER_NOTE_ID: &str = "tunerNote";
pub const TUNER_CENTS_ID: &str = "tunerCents";
pub const MIC_TOGGLE_ID: &str = "micToggle";
pub const MIC_ICON_ID: &str = "micIcon";
pub const MIC_ON_ICON: &str = "imgs/mic_on_icon.png";
pub const MIC_OFF_ICON: &str = "imgs/mic_off_icon.png";
pub const MARKER_CLASS: &str = "marker";
pub const CENTER_MARKER_CLASS: &str = "center";
pub const MIC_UNAVAILABLE_TEXT: &str = "Microfone indisponível";
