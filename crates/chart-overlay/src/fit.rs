// File: crates/chart-overlay/src/fit.rs
// Summary: Fit-policy math: where an image of a given natural size lands inside a region.

use crate::annotation::FitPolicy;
use crate::geometry::Rect;

/// Destination rectangle for an image of `natural_w × natural_h` drawn into `region`.
///
/// `Cover` and `Contain` compare the image aspect with the region aspect to pick
/// the axis that is scaled to the region; the other axis overflows (cover) or
/// leaves a centered gap (contain). The result may extend beyond `region`;
/// callers clip.
pub fn fit_rect(natural_w: f32, natural_h: f32, region: Rect, fit: FitPolicy) -> Rect {
    if !(natural_w > 0.0 && natural_h > 0.0) || region.is_empty() {
        return region;
    }
    let image_aspect = natural_w / natural_h;
    let region_aspect = region.width() / region.height();
    match fit {
        FitPolicy::Stretch => region,
        FitPolicy::Cover | FitPolicy::Contain => {
            let wider = image_aspect > region_aspect;
            let match_height = matches!((fit, wider), (FitPolicy::Cover, true) | (FitPolicy::Contain, false));
            let (w, h) = if match_height {
                (region.height() * image_aspect, region.height())
            } else {
                (region.width(), region.width() / image_aspect)
            };
            Rect::from_center(region.center(), w, h)
        }
        FitPolicy::None | FitPolicy::ScaleDown => Rect::from_center(region.center(), natural_w, natural_h),
    }
}
