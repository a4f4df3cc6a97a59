use crate::models::Segment;

/// Default merge tolerance between consecutive deltas, in percentage
/// points.
pub const DEFAULT_TOL: f64 = 0.08;

/// Compresses a hero's level series into `(base, segments)`.
///
/// `series` holds `(level, value)` points with strictly increasing
/// levels and must contain at least one point. The base is the value
/// at the lowest level; each segment covers a run of consecutive
/// level-over-level deltas that stayed within `tol` of the running
/// delta.
///
/// Folding a delta into a run updates the running delta as
/// `(running + d) / 2`, which weights recent deltas more heavily than
/// a true mean would. Consumers of the output depend on these exact
/// numbers, so the streaming formula is kept as-is.
///
/// A non-positive `tol` is accepted and simply yields one segment per
/// transition (unless adjacent deltas are exactly equal).
pub fn compress(series: &[(i64, f64)], tol: f64) -> (f64, Vec<Segment>) {
    let base = round4(series[0].1);
    let mut segments = Vec::new();
    let mut run: Option<Run> = None;

    for pair in series.windows(2) {
        let level = pair[1].0;
        let delta = pair[1].1 - pair[0].1;

        run = match run {
            None => Some(Run::open(level, delta)),
            Some(mut current) if (delta - current.delta).abs() <= tol => {
                current.to = level;
                current.delta = (current.delta + delta) / 2.0;
                Some(current)
            }
            Some(current) => {
                segments.push(current.emit());
                Some(Run::open(level, delta))
            }
        };
    }

    if let Some(current) = run {
        segments.push(current.emit());
    }

    (base, segments)
}

/// An open run of merged deltas. The delta is kept at full precision
/// while the run is open; rounding happens only at emission.
struct Run {
    from: i64,
    to: i64,
    delta: f64,
}

impl Run {
    fn open(level: i64, delta: f64) -> Self {
        Run {
            from: level,
            to: level,
            delta,
        }
    }

    fn emit(&self) -> Segment {
        Segment {
            from: self.from,
            to: self.to,
            delta: round4(self.delta),
        }
    }
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
