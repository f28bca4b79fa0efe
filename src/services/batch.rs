use palette_quant::{Color, PaletteConverter};
use std::path::{Path, PathBuf};

use crate::error::{BatchError, ConfigError, JobError};
use crate::models::{AppConfig, ConversionJob, Manifest};
use crate::rendering::encode_indexed_png;

/// Result of one successful job
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub destination: PathBuf,
    /// Encoded PNG size in bytes
    pub bytes: usize,
}

/// A job that failed, with the manifest `img` it came from
#[derive(Debug)]
pub struct JobFailure {
    pub img: String,
    pub error: JobError,
}

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failures: Vec<JobFailure>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.processed + self.failed()
    }

    /// True when every job succeeded (including an empty batch)
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs manifest entries through decode -> convert -> encode -> write.
///
/// Jobs run one after another; a failing job is logged and recorded in the
/// report, and the batch moves on.
pub struct BatchDriver {
    converter: PaletteConverter,
    asset_root: PathBuf,
    optimize_png: bool,
}

impl BatchDriver {
    pub fn new(converter: PaletteConverter, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            converter,
            asset_root: asset_root.into(),
            optimize_png: true,
        }
    }

    /// Enable or disable oxipng recompression (enabled by default)
    pub fn optimize_png(mut self, enabled: bool) -> Self {
        self.optimize_png = enabled;
        self
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Process every manifest entry in order.
    pub fn run(&self, manifest: &Manifest) -> BatchReport {
        let mut report = BatchReport::default();

        for entry in &manifest.entries {
            let result = ConversionJob::from_img(&entry.img, &self.asset_root)
                .and_then(|job| self.process(&job));

            match result {
                Ok(output) => {
                    tracing::debug!(
                        dst = %output.destination.display(),
                        bytes = output.bytes,
                        "Wrote thumbnail"
                    );
                    report.processed += 1;
                }
                Err(error) => {
                    tracing::error!(img = %entry.img, %error, "Job failed");
                    report.failures.push(JobFailure {
                        img: entry.img.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            processed = report.processed,
            failed = report.failed(),
            "Batch complete"
        );
        report
    }

    /// Run a single job.
    pub fn process(&self, job: &ConversionJob) -> Result<JobOutput, JobError> {
        tracing::info!(
            src = %job.source.display(),
            dst = %job.destination.display(),
            "Processing"
        );

        let (pixels, width, height) = load_rgb(&job.source)?;
        let conversion = self.converter.convert_detailed(&pixels, width, height)?;

        if !conversion.flat_channels.is_empty() {
            let channels: Vec<String> = conversion
                .flat_channels
                .iter()
                .map(|c| c.to_string())
                .collect();
            tracing::warn!(
                src = %job.source.display(),
                channels = %channels.join(","),
                "Flat color channel, no contrast to stretch"
            );
        }
        let cuts = conversion.cut_points;
        tracing::debug!(
            p0 = cuts.p0,
            p33 = cuts.p33,
            p66 = cuts.p66,
            p100 = cuts.p100,
            "Brightness cut points"
        );

        let png_bytes = encode_indexed_png(&conversion.image, self.optimize_png)?;
        write_output(&job.destination, &png_bytes)?;

        Ok(JobOutput {
            destination: job.destination.clone(),
            bytes: png_bytes.len(),
        })
    }
}

/// Convert every image listed in the manifest at `manifest_path`.
///
/// The palette and normalization settings are checked and the manifest is
/// loaded before any job runs; a problem with either fails the whole
/// command. Otherwise every job runs, and any failed job turns the result
/// into [`BatchError::JobsFailed`].
pub fn run_convert(config: &AppConfig, manifest_path: &Path) -> Result<BatchReport, BatchError> {
    let registry = config.palette_registry()?;
    let palette = registry
        .get(&config.palette)
        .map_err(ConfigError::from)?
        .clone();
    let options = config.normalize_options()?;
    tracing::info!(
        palette = %palette.name(),
        size = options.size,
        asset_root = %config.asset_root.display(),
        "Converting"
    );

    let manifest = Manifest::load(manifest_path)?;
    let converter = PaletteConverter::new(palette).options(options);
    let report = BatchDriver::new(converter, &config.asset_root)
        .optimize_png(config.optimize_png)
        .run(&manifest);

    if !report.is_success() {
        return Err(BatchError::JobsFailed {
            failed: report.failed(),
            total: report.total(),
        });
    }
    Ok(report)
}

/// Decode an image file into row-major RGB pixels.
///
/// The format is sniffed from the file contents; the extension is only a
/// fallback.
fn load_rgb(path: &Path) -> Result<(Vec<Color>, usize, usize), JobError> {
    let decoded = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| JobError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|&p| Color::from(p)).collect();
    Ok((pixels, width as usize, height as usize))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), JobError> {
    let write_err = |source| JobError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, bytes).map_err(write_err)
}
