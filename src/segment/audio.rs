//! WAV splitting.
//!
//! Executes a [`SegmentPlan`](crate::segment::SegmentPlan) over a WAV file,
//! writing each segment with the source's spec (channels, sample rate, bit
//! depth). A frame is one sample per channel; samples are interleaved.

use crate::segment::plan::{frames_per_segment, segment_file_name, SegmentPlan};
use std::fs;
use std::path::{Path, PathBuf};

/// Audio segmentation error types.
#[derive(Debug)]
pub enum SegmentError {
    /// File system error
    Io(String),
    /// WAV decode/encode error
    Wav(String),
    /// The source uses a sample format this tool does not handle
    UnsupportedFormat(String),
}

impl std::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentError::Io(msg) => write!(f, "IO error: {msg}"),
            SegmentError::Wav(msg) => write!(f, "WAV error: {msg}"),
            SegmentError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {msg}"),
        }
    }
}

impl std::error::Error for SegmentError {}

/// Outcome of splitting one recording.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Source recording
    pub input: PathBuf,
    /// Number of segment files written
    pub segments: u64,
    /// Source duration in seconds
    pub duration_secs: f64,
}

/// Split one WAV file into fixed-length segments under `output_dir`.
///
/// Segment files are named `<stem>_segment_<n>.wav`. The trailing segment
/// keeps the remaining frames rather than being padded or dropped.
pub fn split_wav(
    input: &Path,
    output_dir: &Path,
    segment_seconds: u32,
) -> Result<SplitOutcome, SegmentError> {
    let mut reader =
        hound::WavReader::open(input).map_err(|e| SegmentError::Wav(format!("{}: {e}", input.display())))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample > 16 {
        return Err(SegmentError::UnsupportedFormat(format!(
            "{}: only 16-bit integer PCM is supported (got {:?} at {} bits)",
            input.display(),
            spec.sample_format,
            spec.bits_per_sample
        )));
    }

    let total_frames = u64::from(reader.duration());
    let channels = u64::from(spec.channels);
    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<_, _>>()
        .map_err(|e| SegmentError::Wav(format!("{}: {e}", input.display())))?;

    fs::create_dir_all(output_dir)
        .map_err(|e| SegmentError::Io(format!("{}: {e}", output_dir.display())))?;

    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recording".to_string());

    let plan = SegmentPlan::new(total_frames, frames_per_segment(segment_seconds, spec.sample_rate));
    let mut written = 0u64;

    for segment in plan.segments() {
        let output = output_dir.join(segment_file_name(&base, segment.index, "wav"));
        let mut writer = hound::WavWriter::create(&output, spec)
            .map_err(|e| SegmentError::Wav(format!("{}: {e}", output.display())))?;

        let start = (segment.start_frame * channels) as usize;
        let end = start + (segment.frames * channels) as usize;
        for &sample in &samples[start..end] {
            writer
                .write_sample(sample)
                .map_err(|e| SegmentError::Wav(format!("{}: {e}", output.display())))?;
        }

        writer
            .finalize()
            .map_err(|e| SegmentError::Wav(format!("{}: {e}", output.display())))?;
        written += 1;
    }

    Ok(SplitOutcome {
        input: input.to_path_buf(),
        segments: written,
        duration_secs: total_frames as f64 / f64::from(spec.sample_rate),
    })
}

/// Split every `.wav` file directly under `input_dir`.
///
/// Each recording gets its own subdirectory of `output_dir` named after its
/// stem. Per-file failures are collected rather than aborting the batch.
pub fn split_directory(
    input_dir: &Path,
    output_dir: &Path,
    segment_seconds: u32,
) -> Result<Vec<Result<SplitOutcome, SegmentError>>, SegmentError> {
    let entries = fs::read_dir(input_dir)
        .map_err(|e| SegmentError::Io(format!("{}: {e}", input_dir.display())))?;

    let mut recordings: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("wav"))
                    .unwrap_or(false)
        })
        .collect();
    recordings.sort();

    Ok(recordings
        .into_iter()
        .map(|input| {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "recording".to_string());
            split_wav(&input, &output_dir.join(stem), segment_seconds)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("engagement-prep-audio-{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_test_wav(path: &Path, frames: u32, sample_rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
        for frame in 0..frames {
            for _ in 0..channels {
                writer.write_sample((frame % 100) as i16).expect("write sample");
            }
        }
        writer.finalize().expect("finalize wav");
    }

    #[test]
    fn test_split_wav_partial_last_segment() {
        let dir = scratch("partial");
        let input = dir.join("session.wav");
        let out = dir.join("segments");
        // 10 frames at 2 Hz, 2-second segments: 4 frames each, 3 segments.
        write_test_wav(&input, 10, 2, 1);

        let outcome = split_wav(&input, &out, 2).expect("split");
        assert_eq!(outcome.segments, 3);
        assert_eq!(outcome.duration_secs, 5.0);

        let last = hound::WavReader::open(out.join("session_segment_0002.wav")).expect("open");
        assert_eq!(last.duration(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_split_preserves_spec_and_samples() {
        let dir = scratch("spec");
        let input = dir.join("stereo.wav");
        let out = dir.join("segments");
        write_test_wav(&input, 8, 4, 2);

        split_wav(&input, &out, 1).expect("split");

        let mut reader = hound::WavReader::open(out.join("stereo_segment_0001.wav")).expect("open");
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 4);

        // Second segment starts at frame 4 of the ramp.
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.expect("sample")).collect();
        assert_eq!(samples[0], 4);
        assert_eq!(samples[1], 4);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_split_directory_collects_outcomes() {
        let dir = scratch("batch");
        let input_dir = dir.join("recordings");
        fs::create_dir_all(&input_dir).expect("create input dir");
        write_test_wav(&input_dir.join("a.wav"), 4, 2, 1);
        write_test_wav(&input_dir.join("b.wav"), 4, 2, 1);
        fs::write(input_dir.join("notes.txt"), "x").expect("write");

        let outcomes = split_directory(&input_dir, &dir.join("out"), 1).expect("split dir");
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert!(dir.join("out/a/a_segment_0000.wav").exists());
        assert!(dir.join("out/b/b_segment_0001.wav").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
