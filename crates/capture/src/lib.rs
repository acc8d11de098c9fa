//! Screen capture to timestamped PNG files.
//!
//! Captures a rectangle of the primary display (or the whole screen) and
//! saves it under the screenshot directory, which is created on demand.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use screenshots::Screen;
use tracing::info;

use shotwire_core::{CapturedImage, Region, ShotError};

/// File name for a capture taken at `at`, second resolution.
pub fn screenshot_file_name(at: &DateTime<Local>) -> String {
    format!("screenshot_{}.png", at.format("%Y%m%d-%H%M%S"))
}

/// Capture `region` of the primary display (or the full screen when `None`)
/// and save it as a PNG under `dir`.
pub fn capture(dir: &Path, region: Option<Region>) -> Result<CapturedImage, ShotError> {
    if let Some(region) = &region {
        if region.width == 0 || region.height == 0 {
            return Err(ShotError::Capture(format!(
                "region {}x{} has no area",
                region.width, region.height
            )));
        }
    }

    fs::create_dir_all(dir)?;

    let screens = Screen::all().map_err(|e| ShotError::Capture(e.to_string()))?;
    let screen = screens
        .first()
        .ok_or_else(|| ShotError::Capture("no screens found".to_string()))?;

    let image = match &region {
        Some(r) => screen.capture_area(r.left, r.top, r.width, r.height),
        None => screen.capture(),
    }
    .map_err(|e| ShotError::Capture(e.to_string()))?;

    let captured_at = Local::now();
    let path = dir.join(screenshot_file_name(&captured_at));
    image
        .save(&path)
        .map_err(|e| ShotError::Capture(e.to_string()))?;

    info!(path = %path.display(), "screenshot saved");

    Ok(CapturedImage { path, captured_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_embeds_second_resolution_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 13, 2, 3).unwrap();
        assert_eq!(screenshot_file_name(&at), "screenshot_20240501-130203.png");
    }

    #[test]
    fn zero_area_region_is_rejected_before_capture() {
        let region = Region {
            left: 0,
            top: 0,
            width: 0,
            height: 100,
        };
        let err = capture(Path::new("screenshots"), Some(region)).unwrap_err();
        assert!(matches!(err, ShotError::Capture(_)));
    }
}
