use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use platescan::detection::ocr;
use platescan::{BinarizeMethod, FramePipeline, PlateDetector, RectifyStrategy, ValidatorConfig};

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "Detect and read vehicle license plates in still frames")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Canny lower threshold
    #[arg(long, default_value_t = 60.0)]
    lower_threshold: f32,

    /// Canny upper threshold
    #[arg(long, default_value_t = 175.0)]
    upper_threshold: f32,

    /// Smallest accepted candidate area in pixels
    #[arg(long, default_value_t = 600.0)]
    min_area: f32,

    /// Largest accepted candidate area in pixels
    #[arg(long, default_value_t = 100_000.0)]
    max_area: f32,

    /// Derive the area bounds from the frame dimensions instead
    #[arg(long)]
    frame_relative_areas: bool,

    /// Correct candidate rotation instead of cropping the bounding box
    #[arg(long)]
    deskew: bool,

    /// Fixed binarization level (0-255); automatic Otsu threshold if unset
    #[arg(long, value_name = "LEVEL")]
    threshold_level: Option<u8>,

    /// Save the rectified patch to this path
    #[arg(long, value_name = "FILE")]
    save_patch: Option<PathBuf>,

    /// Skip OCR (faster, for testing detection only)
    #[arg(long)]
    skip_ocr: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    let frame = img.to_luma8();

    if args.verbose {
        println!("Frame loaded: {}x{}\n", frame.width(), frame.height());
    }

    let validator = if args.frame_relative_areas {
        ValidatorConfig::for_frame(frame.width(), frame.height())
    } else {
        ValidatorConfig {
            min_area: args.min_area,
            max_area: args.max_area,
            ..ValidatorConfig::default()
        }
    };

    let detector = PlateDetector::new()
        .with_thresholds(args.lower_threshold, args.upper_threshold)
        .with_validator(validator);

    let strategy = if args.deskew {
        RectifyStrategy::Deskew
    } else {
        RectifyStrategy::Crop
    };
    let method = match args.threshold_level {
        Some(level) => BinarizeMethod::Fixed(level),
        None => BinarizeMethod::Otsu,
    };

    let pipeline = FramePipeline::new()
        .with_detector(detector)
        .with_rectify_strategy(strategy)
        .with_binarize_method(method)
        .with_verbose(args.verbose);

    let result = pipeline.process(&frame);

    let Some(detection) = result.detection else {
        println!("No plate found.");
        return Ok(());
    };

    let rect = detection.candidate.rect;
    println!(
        "Plate candidate at ({:.1}, {:.1}), {:.0}x{:.0} px, {:.1} deg",
        rect.center.x, rect.center.y, rect.size.width, rect.size.height, rect.angle
    );

    if let Some(path) = &args.save_patch {
        detection
            .patch
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to save patch: {}", e))?;
        if args.verbose {
            println!("Patch saved to {:?}", path);
        }
    }

    if !args.skip_ocr {
        let engine = ocr::init_ocr_engine()?;
        match ocr::recognize_plate(&engine, &detection.patch) {
            Some((text, confidence)) => {
                println!("Registration: {} (confidence: {:.2})", text, confidence);
            }
            None => println!("No readable text on the plate patch."),
        }
    }

    Ok(())
}
