use crate::error::{HudError, Result};
use crate::models::{ResizeMode, TransformSpec};

/// Output dimensions for a source of `width` x `height` pixels.
///
/// Fails with [`HudError::SizeTooSmall`] when either side rounds below 1px and
/// with [`HudError::SizeTooLarge`] when a side does not fit in `u32`.
pub fn target_dimensions(width: u32, height: u32, spec: &TransformSpec) -> Result<(u32, u32)> {
    let (w, h) = (f64::from(width), f64::from(height));
    let (target_w, target_h) = match spec.resize_mode {
        ResizeMode::None => (w, h),
        ResizeMode::Scale => ((w * spec.resize_value).round(), (h * spec.resize_value).round()),
        ResizeMode::FixedWidth => {
            let target_w = spec.resize_value.round();
            let target_h = if width == 0 {
                0.0
            } else {
                (h * spec.resize_value / w).round()
            };
            (target_w, target_h)
        }
    };

    if target_w < 1.0 || target_h < 1.0 || !target_w.is_finite() || !target_h.is_finite() {
        return Err(HudError::SizeTooSmall {
            width: target_w as i64,
            height: target_h as i64,
        });
    }
    if target_w > f64::from(u32::MAX) || target_h > f64::from(u32::MAX) {
        return Err(HudError::SizeTooLarge {
            width: target_w as u64,
            height: target_h as u64,
        });
    }
    Ok((target_w as u32, target_h as u32))
}
