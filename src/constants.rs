/// Page wiring and frame tuning for the web frontend.
///
/// Element ids and class names are shared with `web/index.html` and
/// `web/style.css`; keep them in sync.
// Element ids
pub const CANVAS_ID: &str = "mascot-canvas";
pub const DOCK_ID: &str = "dock";
pub const CONTACT_MODAL_ID: &str = "contact-modal";
pub const CONTACT_CLOSE_ID: &str = "contact-close";
pub const HERO_ID: &str = "hero";
pub const HERO_CONTENT_ID: &str = "hero-content";

// Class names
pub const HIDDEN_CLASS: &str = "hidden";
pub const DOCK_HIDDEN_CLASS: &str = "dock-hidden";
pub const LABEL_VISIBLE_CLASS: &str = "visible";
pub const REVEAL_SELECTOR: &str = ".reveal:not(.in-view)";
pub const REVEALED_CLASS: &str = "in-view";

// Query parameter selecting the initial mascot
pub const MASCOT_QUERY_KEY: &str = "mascot";

// Frame delta clamp (seconds); long stalls (tab in background) step once
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
// Pose distance below which the mascot counts as settled on its target
pub const ARRIVAL_DISTANCE: f32 = 0.01;

// Scene lighting shared by every mascot
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const SUN_DIRECTION: [f32; 3] = [5.0, 5.0, 5.0];
pub const SUN_INTENSITY: f32 = 1.0;
pub const MAX_LIGHTS: usize = 8;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
// Glow intensity at which bloom runs at BLOOM_STRENGTH
pub const GLOW_REFERENCE: f32 = 3.0;

// External profile links used by the dock
pub const GITHUB_URL: &str = "https://github.com";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com";
