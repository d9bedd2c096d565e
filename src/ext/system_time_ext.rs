use std::time::SystemTime;

pub trait SystemTimeExt {
    /// Seconds since the Unix epoch; zero for times before it.
    fn unix_seconds(&self) -> f64;
}

impl SystemTimeExt for SystemTime {
    fn unix_seconds(&self) -> f64 {
        self.duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default()
    }
}
