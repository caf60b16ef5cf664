//! Segment-boundary planning.
//!
//! Turns a total frame count and a fixed segment length into a sequence of
//! non-overlapping segments. The trailing segment keeps whatever frames
//! remain, so the segments partition the recording exactly.

/// One planned segment of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Zero-based segment index
    pub index: u64,
    /// First frame of the segment
    pub start_frame: u64,
    /// Number of frames in the segment
    pub frames: u64,
}

/// Frames covered by a fixed-duration segment at the given frame rate.
pub fn frames_per_segment(segment_seconds: u32, frame_rate: u32) -> u64 {
    u64::from(segment_seconds) * u64::from(frame_rate)
}

/// Output filename for one segment: `<base>_segment_<index>.<ext>` with a
/// zero-padded four-digit index.
pub fn segment_file_name(base: &str, index: u64, extension: &str) -> String {
    format!("{base}_segment_{index:04}.{extension}")
}

/// Plan for splitting a recording into fixed-length segments.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPlan {
    total_frames: u64,
    frames_per_segment: u64,
}

impl SegmentPlan {
    /// Create a plan over `total_frames` with `frames_per_segment` frames per
    /// segment.
    ///
    /// # Panics
    ///
    /// Panics if `frames_per_segment` is zero.
    pub fn new(total_frames: u64, frames_per_segment: u64) -> Self {
        assert!(
            frames_per_segment >= 1,
            "frames_per_segment must be at least 1"
        );
        Self {
            total_frames,
            frames_per_segment,
        }
    }

    /// Number of segments the plan produces (ceiling division).
    pub fn segment_count(&self) -> u64 {
        (self.total_frames + self.frames_per_segment - 1) / self.frames_per_segment
    }

    /// The planned segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).map(move |index| {
            let start_frame = index * self.frames_per_segment;
            let frames = self.frames_per_segment.min(self.total_frames - start_frame);
            Segment {
                index,
                start_frame,
                frames,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_split() {
        let plan = SegmentPlan::new(100, 25);
        assert_eq!(plan.segment_count(), 4);

        let segments: Vec<Segment> = plan.segments().collect();
        assert_eq!(segments[0].start_frame, 0);
        assert_eq!(segments[3].start_frame, 75);
        assert!(segments.iter().all(|s| s.frames == 25));
    }

    #[test]
    fn test_trailing_partial_segment() {
        let plan = SegmentPlan::new(10, 4);
        let segments: Vec<Segment> = plan.segments().collect();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].start_frame, 8);
        assert_eq!(segments[2].frames, 2);
    }

    #[test]
    fn test_segments_partition_the_recording() {
        let plan = SegmentPlan::new(12345, 700);
        let mut next_frame = 0u64;
        for segment in plan.segments() {
            assert_eq!(segment.start_frame, next_frame);
            next_frame += segment.frames;
        }
        assert_eq!(next_frame, 12345);
    }

    #[test]
    fn test_empty_recording_has_no_segments() {
        let plan = SegmentPlan::new(0, 700);
        assert_eq!(plan.segment_count(), 0);
        assert_eq!(plan.segments().count(), 0);
    }

    #[test]
    fn test_frames_per_segment() {
        // 7 seconds at 16 kHz
        assert_eq!(frames_per_segment(7, 16_000), 112_000);
    }

    #[test]
    fn test_segment_file_name_padding() {
        assert_eq!(
            segment_file_name("session_01", 3, "wav"),
            "session_01_segment_0003.wav"
        );
        assert_eq!(
            segment_file_name("s", 12345, "wav"),
            "s_segment_12345.wav"
        );
    }
}
