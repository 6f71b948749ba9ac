// CSS value formatting. Numbers print the way a browser template string would
// (`2`, `1.8`, `-10`), with negative zero folded to `0`.

use crate::constants::TILT_PERSPECTIVE_PX;

#[inline]
pub fn num(v: f64) -> String {
    format!("{}", v + 0.0)
}

#[inline]
pub fn px(v: f64) -> String {
    format!("{}px", num(v))
}

#[inline]
pub fn ms(v: f64) -> String {
    format!("{}ms", num(v))
}

/// Two-decimal text, as used for the `--tilt-*` custom properties.
///
/// Matches `Number.prototype.toFixed(2)`: an exact tie rounds away from zero,
/// where `{:.2}` would round it to even.
pub fn fixed2(v: f64) -> String {
    if is_hundredths_tie(v) {
        let hundredths = (v.abs() * 100.0).ceil().copysign(v);
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{:.2}", v)
}

// A double sits exactly halfway between two hundredths only when it is an odd
// number of eighths (0.125, 0.375, ...).
#[inline]
fn is_hundredths_tie(v: f64) -> bool {
    let eighths = v.abs() * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

pub fn translate3d(x: f64, y: f64) -> String {
    format!("translate3d({}, {}, 0)", px(x), px(y))
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64, scale: f64) -> String {
    format!(
        "perspective({}) rotateX({}deg) rotateY({}deg) scale({})",
        px(TILT_PERSPECTIVE_PX),
        num(rotate_x),
        num(rotate_y),
        num(scale)
    )
}
