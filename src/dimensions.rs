//! Output dimension policies.
//!
//! [`DimensionPolicy`] selects how extracted frames are sized relative to
//! the source's native dimensions, and [`resolve_dimensions`] computes the
//! final output size. Resolution is a pure function: no side effects,
//! deterministic for identical inputs.

use crate::error::ExtractError;

/// Mobile-policy maximum widths the request layer accepts.
///
/// These correspond to common handset display classes. The default is 720.
pub const MOBILE_WIDTH_PRESETS: [u32; 4] = [360, 480, 720, 1080];

/// Default maximum width for [`DimensionPolicy::Mobile`].
pub const DEFAULT_MOBILE_MAX_WIDTH: u32 = 720;

/// How extracted frames are sized relative to the source.
///
/// # Example
///
/// ```
/// use framepack::{DimensionPolicy, resolve_dimensions};
///
/// // Downscale a 1920×1080 source to fit a 720-wide mobile screen.
/// let policy = DimensionPolicy::Mobile { max_width: 720 };
/// assert_eq!(resolve_dimensions(&policy, 1920, 1080), (720, 405));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DimensionPolicy {
    /// Keep the source's native dimensions. This is the default.
    #[default]
    Original,
    /// Exact output dimensions, as given. The resolver does not clamp or
    /// adjust these; the request layer validates them (≥ 1).
    Custom {
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
    },
    /// Scale both dimensions by a factor (rounded to whole pixels).
    Scale(f64),
    /// Cap the width at `max_width`, preserving aspect ratio. Sources
    /// already narrower than (or equal to) the cap pass through unchanged.
    Mobile {
        /// Maximum output width in pixels.
        max_width: u32,
    },
}

impl DimensionPolicy {
    /// Validate policy parameters the way the request layer requires.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidDimensionPolicy`] for zero custom
    /// dimensions, a non-positive or non-finite scale factor, or a mobile
    /// max-width outside [`MOBILE_WIDTH_PRESETS`].
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        match *self {
            DimensionPolicy::Original => Ok(()),
            DimensionPolicy::Custom { width, height } => {
                if width == 0 || height == 0 {
                    return Err(ExtractError::InvalidDimensionPolicy(format!(
                        "custom dimensions must be at least 1×1, got {width}×{height}"
                    )));
                }
                Ok(())
            }
            DimensionPolicy::Scale(factor) => {
                if !(factor.is_finite() && factor > 0.0) {
                    return Err(ExtractError::InvalidDimensionPolicy(format!(
                        "scale factor must be a positive finite number, got {factor}"
                    )));
                }
                Ok(())
            }
            DimensionPolicy::Mobile { max_width } => {
                if !MOBILE_WIDTH_PRESETS.contains(&max_width) {
                    return Err(ExtractError::InvalidDimensionPolicy(format!(
                        "mobile max-width {max_width} is not one of the presets {MOBILE_WIDTH_PRESETS:?}"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Resolve the final output dimensions for a policy and source size.
///
/// Returns `(width, height)`. Pure and deterministic; calling it twice with
/// identical inputs yields identical outputs.
///
/// - `Original` passes the native dimensions through.
/// - `Custom` returns the requested dimensions as given.
/// - `Scale` multiplies both dimensions by the factor and rounds.
/// - `Mobile` scales to `max_width` preserving aspect ratio when the source
///   is wider than the cap, and passes through otherwise (including the
///   `native_width == max_width` boundary).
pub fn resolve_dimensions(
    policy: &DimensionPolicy,
    native_width: u32,
    native_height: u32,
) -> (u32, u32) {
    match *policy {
        DimensionPolicy::Original => (native_width, native_height),
        DimensionPolicy::Custom { width, height } => (width, height),
        DimensionPolicy::Scale(factor) => {
            let width = (native_width as f64 * factor).round() as u32;
            let height = (native_height as f64 * factor).round() as u32;
            (width.max(1), height.max(1))
        }
        DimensionPolicy::Mobile { max_width } => {
            if native_width > max_width {
                let height =
                    (max_width as f64 * native_height as f64 / native_width as f64).round() as u32;
                (max_width, height.max(1))
            } else {
                (native_width, native_height)
            }
        }
    }
}
