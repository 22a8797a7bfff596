//! Structural invariants over long pseudo-random insertion streams.

use zenstrip::*;

/// Small deterministic generator so failures reproduce exactly.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Uniform-ish value in `1..=max`.
    fn dim(&mut self, max: u32) -> u32 {
        (self.next_u64() % max as u64) as u32 + 1
    }
}

#[derive(Copy, Clone, Debug)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

fn check_skyline(segments: &[SkylineSegment<u32>], packed_width: u32, packed_height: u32) {
    let mut edge = 0;
    for (i, seg) in segments.iter().enumerate() {
        assert_eq!(seg.x, edge, "gap before segment {i}: {segments:?}");
        assert!(seg.width > 0, "empty segment {i}: {segments:?}");
        assert!(seg.height <= packed_height);
        if i > 0 {
            assert_ne!(
                segments[i - 1].height,
                seg.height,
                "unmerged neighbours at {i}: {segments:?}"
            );
        }
        edge += seg.width;
    }
    assert_eq!(edge, packed_width);
}

fn check_no_overlap(rects: &[Rect]) {
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}

fn run_fixed(strategy: SearchStrategy, seed: u64, strip_width: u32, count: usize) -> Vec<Rect> {
    let mut rng = Lcg(seed);
    let mut strip = StripPacker::new(strip_width)
        .unwrap()
        .search_strategy(strategy);
    let mut rects = Vec::with_capacity(count);
    let mut last_height = 0;
    for _ in 0..count {
        let (w, h) = (rng.dim(strip_width), rng.dim(strip_width * 2));
        let at = strip.insert(w, h).unwrap();
        assert!(at.x + w <= strip_width);
        assert!(at.y + h <= strip.packed_height());
        assert!(strip.packed_width() <= strip_width);
        assert!(strip.packed_height() >= last_height);
        last_height = strip.packed_height();

        let segments: Vec<_> = strip.skyline().collect();
        assert_eq!(segments.len(), strip.segment_count());
        check_skyline(&segments, strip.packed_width(), strip.packed_height());
        rects.push(Rect { x: at.x, y: at.y, w, h });
    }
    check_no_overlap(&rects);
    rects
}

fn run_rotatable(strategy: SearchStrategy, seed: u64, strip_width: u32, count: usize) -> Vec<Rect> {
    let mut rng = Lcg(seed);
    let mut strip = RotatableStripPacker::new(strip_width)
        .unwrap()
        .search_strategy(strategy);
    let mut rects = Vec::with_capacity(count);
    let mut last_height = 0;
    for _ in 0..count {
        // Width may exceed the strip; height never does, so one side fits.
        let (w, h) = (rng.dim(strip_width + strip_width / 2), rng.dim(strip_width));
        let at = strip.insert(w, h).unwrap();
        let (w, h) = if at.rotated { (h, w) } else { (w, h) };
        assert!(at.x + w <= strip_width);
        assert!(at.y + h <= strip.packed_height());
        assert!(strip.packed_height() >= last_height);
        last_height = strip.packed_height();

        let segments: Vec<_> = strip.skyline().collect();
        check_skyline(&segments, strip.packed_width(), strip.packed_height());
        rects.push(Rect { x: at.x, y: at.y, w, h });
    }
    check_no_overlap(&rects);
    rects
}

#[test]
fn fixed_stream_keeps_invariants() {
    for seed in 1..=8 {
        run_fixed(SearchStrategy::LevelPruned, seed, 100, 300);
    }
}

#[test]
fn rotatable_stream_keeps_invariants() {
    for seed in 1..=8 {
        run_rotatable(SearchStrategy::LevelPruned, seed, 100, 300);
    }
}

#[test]
fn narrow_rectangles_build_long_skylines() {
    // Many small widths keep lots of segments alive at once.
    let mut rng = Lcg(42);
    let mut strip = StripPacker::new(1000u32).unwrap();
    for _ in 0..500 {
        let (w, h) = (rng.dim(20), rng.dim(50));
        strip.insert(w, h).unwrap();
        let segments: Vec<_> = strip.skyline().collect();
        check_skyline(&segments, strip.packed_width(), strip.packed_height());
    }
    assert!(strip.segment_count() > 1);
}

#[test]
fn search_strategies_agree() {
    for seed in [3, 17, 99] {
        let pruned = run_fixed(SearchStrategy::LevelPruned, seed, 64, 200);
        let linear = run_fixed(SearchStrategy::Linear, seed, 64, 200);
        for (a, b) in pruned.iter().zip(&linear) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }

        let pruned = run_rotatable(SearchStrategy::LevelPruned, seed, 64, 200);
        let linear = run_rotatable(SearchStrategy::Linear, seed, 64, 200);
        for (a, b) in pruned.iter().zip(&linear) {
            assert_eq!((a.x, a.y, a.w, a.h), (b.x, b.y, b.w, b.h));
        }
    }
}

#[test]
fn reset_replays_identically() {
    let mut rng = Lcg(7);
    let dims: Vec<(u32, u32)> = (0..150).map(|_| (rng.dim(50), rng.dim(80))).collect();

    let mut strip = StripPacker::new(50u32).unwrap();
    let first: Vec<_> = dims.iter().map(|&(w, h)| strip.insert(w, h).unwrap()).collect();
    let height = strip.packed_height();

    strip.reset();
    assert_eq!(strip.packed_height(), 0);
    assert_eq!(strip.packed_width(), 0);
    assert_eq!(strip.segment_count(), 0);

    let second: Vec<_> = dims.iter().map(|&(w, h)| strip.insert(w, h).unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(strip.packed_height(), height);
}

#[test]
fn float_and_integer_packers_agree() {
    let mut rng = Lcg(11);
    let mut ints = StripPacker::new(40u32).unwrap();
    let mut floats = StripPacker::new(40.0f64).unwrap();
    for _ in 0..200 {
        let (w, h) = (rng.dim(40), rng.dim(60));
        let a = ints.insert(w, h).unwrap();
        let b = floats.insert(w as f64, h as f64).unwrap();
        assert_eq!((a.x as f64, a.y as f64), (b.x, b.y));
    }
    assert_eq!(ints.packed_height() as f64, floats.packed_height());
}
