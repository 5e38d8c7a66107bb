/// Frames-per-second counter fed with monotonically increasing timestamps.
///
/// Every call to [`FrameCounter::tick`] counts one frame. Once a full second
/// has passed since the last report the accumulated count is returned and
/// both the counter and the reference timestamp are reset.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    frames: u32,
    last_report: f64,
}

impl FrameCounter {
    const REPORT_INTERVAL: f64 = 1.0;

    pub fn new(start: f64) -> Self {
        Self {
            frames: 0,
            last_report: start,
        }
    }

    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;

        if now - self.last_report >= Self::REPORT_INTERVAL {
            let frames = self.frames;
            self.frames = 0;
            self.last_report = now;
            Some(frames)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}
