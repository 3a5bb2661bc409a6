use image::{DynamicImage, GrayImage};
use ocrs::OcrEngineParams;
pub use ocrs::{ImageSource, OcrEngine};
use rten::Model;
use std::path::Path;

/// Characters a plate registration may contain. `I` is left out as too
/// easily confused with `1`; plate text is not natural language, so no
/// dictionary is consulted.
const PLATE_CHARS: &str = " 0123456789ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Initialize the OCR engine with models from the standard cache location.
pub fn init_ocr_engine() -> anyhow::Result<OcrEngine> {
    let home_dir = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;

    let cache_dir = Path::new(&home_dir).join(".cache/ocrs");
    let detection_model_path = cache_dir.join("text-detection.rten");
    let recognition_model_path = cache_dir.join("text-recognition.rten");

    if !detection_model_path.exists() || !recognition_model_path.exists() {
        anyhow::bail!(
            "OCR models not found. Please run: ocrs-cli --help (or download models manually)\n\
             Expected locations:\n  - {}\n  - {}",
            detection_model_path.display(),
            recognition_model_path.display()
        );
    }

    let detection_model = Model::load_file(&detection_model_path)?;
    let recognition_model = Model::load_file(&recognition_model_path)?;

    let engine = OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })?;

    Ok(engine)
}

/// Recognize plate text in a binarized patch.
///
/// The engine output is restricted to the plate character set, since the
/// engine itself has no whitelist configuration. Returns `None` when no
/// admissible text remains.
pub fn recognize_plate(engine: &OcrEngine, patch: &GrayImage) -> Option<(String, f32)> {
    let rgb = DynamicImage::ImageLuma8(patch.clone()).to_rgb8();

    let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions()).ok()?;
    let input = engine.prepare_input(source).ok()?;
    let text = engine.get_text(&input).ok()?;

    let filtered = filter_plate_text(&text);
    if filtered.is_empty() {
        None
    } else {
        // get_text reports no confidence; the detailed per-word API could
        // supply one later
        Some((filtered, 0.9))
    }
}

/// Uppercase the raw engine output, drop characters outside the plate set
/// and collapse runs of whitespace.
fn filter_plate_text(raw: &str) -> String {
    let kept: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| PLATE_CHARS.contains(*c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::filter_plate_text;

    #[test]
    fn keeps_plate_characters_and_uppercases() {
        assert_eq!(filter_plate_text("ab12-cd!"), "AB12CD");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(filter_plate_text(" LM62\n ABC  "), "LM62 ABC");
    }

    #[test]
    fn drops_confusable_letters() {
        assert_eq!(filter_plate_text("HI51"), "H51");
        assert_eq!(filter_plate_text("???"), "");
    }
}
