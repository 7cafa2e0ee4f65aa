//! Running outcome statistics fed by the search's playouts.

/// Sample count below which a statistic is not trusted to steer komi.
pub const TRUSTWORTHY_PLAYOUTS: u32 = 200;

/// Incremental running mean over playout outcomes.
///
/// The search adds one result per finished simulation (a score margin or a
/// win indicator, both Black POV); the controller reads a snapshot at move
/// granularity. Writers and the snapshot/reset pair must be synchronized by
/// the caller — this type itself is plain data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveStats {
    pub playouts: u32,
    pub mean: f32,
}

impl MoveStats {
    pub const fn new() -> MoveStats {
        MoveStats {
            playouts: 0,
            mean: 0.0,
        }
    }

    /// Record one playout outcome.
    #[inline]
    pub fn add(&mut self, result: f32) {
        self.playouts += 1;
        self.mean += (result - self.mean) / self.playouts as f32;
    }

    /// Snapshot the statistic and soft-reset it for fresh samples.
    ///
    /// The count drops to 1 but the mean is kept as a smoothing seed, so the
    /// next adaptation round starts from the previous estimate instead of
    /// zero confidence. A hard zero reset would change the smoothing and the
    /// trust gating on the next evaluation.
    #[inline]
    pub fn soft_reset(&mut self) -> MoveStats {
        let snapshot = *self;
        self.playouts = 1;
        snapshot
    }

    /// True once the sample count clears [`TRUSTWORTHY_PLAYOUTS`].
    #[inline]
    pub fn is_trustworthy(&self) -> bool {
        self.playouts >= TRUSTWORTHY_PLAYOUTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_tracks_running_mean() {
        let mut s = MoveStats::new();
        s.add(1.0);
        s.add(0.0);
        s.add(1.0);
        s.add(1.0);
        assert_eq!(s.playouts, 4);
        assert!((s.mean - 0.75).abs() < 1e-6);
    }

    #[test]
    fn soft_reset_keeps_mean_and_returns_snapshot() {
        let mut s = MoveStats::new();
        for _ in 0..250 {
            s.add(2.0);
        }
        let snap = s.soft_reset();
        assert_eq!(snap.playouts, 250);
        assert!((snap.mean - 2.0).abs() < 1e-5);

        // Post-reset: one seeded sample, same mean.
        assert_eq!(s.playouts, 1);
        assert!((s.mean - 2.0).abs() < 1e-5);
        assert!(!s.is_trustworthy());
    }

    #[test]
    fn seeded_mean_smooths_next_round() {
        let mut s = MoveStats::new();
        s.add(10.0);
        s.soft_reset();
        s.add(0.0);
        // Seed (10.0 @ weight 1) averaged with one fresh 0.0 sample.
        assert!((s.mean - 5.0).abs() < 1e-6);
    }

    #[test]
    fn trust_threshold_is_200() {
        let mut s = MoveStats::new();
        for _ in 0..TRUSTWORTHY_PLAYOUTS - 1 {
            s.add(0.5);
        }
        assert!(!s.is_trustworthy());
        s.add(0.5);
        assert!(s.is_trustworthy());
    }
}
