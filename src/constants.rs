/// Interaction tuning constants and the class/property names the behaviors touch.
///
/// Styling lives in the site's CSS; these names are the contract between the
/// two sides, so they are kept here rather than scattered through the code.
// Magnetic attraction
pub const MAGNETIC_STRENGTH_DEFAULT: f64 = 0.35;
pub const MAGNETIC_GAIN_X_PX: f64 = 20.0; // full-strength horizontal pull
pub const MAGNETIC_GAIN_Y_PX: f64 = 18.0; // slightly flatter vertical pull

// Tilt
pub const TILT_MAX_DEG_DEFAULT: f64 = 4.0;
pub const TILT_SCALE_DEFAULT: f64 = 1.0; // resting scale
pub const TILT_HOVER_SCALE_DEFAULT: f64 = 1.02;
pub const TILT_Y_DAMPING: f64 = 0.9; // rotateY is damped to reduce distortion
pub const TILT_PERSPECTIVE_PX: f64 = 900.0;
pub const TILT_TRANSITION: &str = "transform 220ms cubic-bezier(0.2, 0.8, 0.2, 1)";
pub const TILT_X_PROPERTY: &str = "--tilt-x";
pub const TILT_Y_PROPERTY: &str = "--tilt-y";

// Ripple
pub const RIPPLE_COVERAGE: f64 = 1.4; // diameter relative to the larger side
pub const RIPPLE_COLOR_DEFAULT: &str = "rgba(139, 92, 246, 0.35)";
pub const RIPPLE_DURATION_MS_DEFAULT: f64 = 420.0;
pub const RIPPLE_CLASS: &str = "ripple-effect";

// Reveal
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -10% 0px";
pub const REVEAL_CLASS: &str = "reveal";
pub const REVEALED_CLASS: &str = "is-revealed";
pub const REVEAL_DIRECTION_ATTR: &str = "data-reveal-direction";

// Declarative mounting (`<div data-fx="tilt ripple" data-fx-max-tilt="6">`)
pub const DATA_BEHAVIORS_ATTR: &str = "data-fx";
pub const DATA_OPTION_PREFIX: &str = "data-fx-";
pub const AUTO_MOUNT_ATTR: &str = "data-fx-auto"; // on <html>: mount at startup
pub const LOG_LEVEL_ATTR: &str = "data-fx-log"; // on <html>: log level name

// Style properties
pub const TRANSFORM: &str = "transform";
pub const TRANSFORM_STYLE: &str = "transform-style";
pub const TRANSITION: &str = "transition";
pub const POSITION: &str = "position";
pub const OVERFLOW: &str = "overflow";
