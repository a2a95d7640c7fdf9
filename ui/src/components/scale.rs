//! Pixel-space helpers shared by the SVG chart components.

/// Linear map of `value` from `domain` into `range`. Ranges may run
/// backwards, which is how y-axes flip.
pub(crate) fn project(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if (d1 - d0).abs() < f64::EPSILON {
        return r0;
    }
    r0 + (value - d0) / (d1 - d0) * (r1 - r0)
}

/// Centre of slot `index` out of `count` equal slots spanning `range`.
pub(crate) fn slot_center(index: usize, count: usize, range: (f64, f64)) -> f64 {
    let (r0, r1) = range;
    if count == 0 {
        return r0;
    }
    r0 + (index as f64 + 0.5) * (r1 - r0) / count as f64
}

/// Round gridline positions covering `domain`, aiming for at most six lines.
pub(crate) fn ticks(domain: (f64, f64)) -> Vec<f64> {
    let (lo, hi) = domain;
    let span = hi - lo;
    if span <= 0.0 {
        return vec![lo];
    }

    let step = [1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0]
        .into_iter()
        .find(|step| span / step <= 6.0)
        .unwrap_or(100.0);

    let mut tick = (lo / step).ceil() * step;
    let mut out = Vec::new();
    while tick <= hi + 1e-9 {
        out.push(tick);
        tick += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_linearly_and_flips() {
        assert_eq!(project(5.0, (0.0, 10.0), (0.0, 100.0)), 50.0);
        // Inverted range, as used by y-axes.
        assert_eq!(project(0.0, (0.0, 10.0), (100.0, 0.0)), 100.0);
        assert_eq!(project(10.0, (0.0, 10.0), (100.0, 0.0)), 0.0);
    }

    #[test]
    fn slots_divide_the_range_evenly() {
        assert_eq!(slot_center(0, 2, (0.0, 100.0)), 25.0);
        assert_eq!(slot_center(1, 2, (0.0, 100.0)), 75.0);
    }

    #[test]
    fn ticks_cover_the_domain_with_round_steps() {
        let t = ticks((52.0, 79.0));
        assert!(t.len() >= 3 && t.len() <= 7);
        assert!(t.first().copied().unwrap() >= 52.0);
        assert!(t.last().copied().unwrap() <= 79.0);
        // Round multiples only.
        for tick in &t {
            assert_eq!(tick % 5.0, 0.0);
        }
    }

    #[test]
    fn degenerate_domain_gets_a_single_tick() {
        assert_eq!(ticks((60.0, 60.0)), vec![60.0]);
    }
}
