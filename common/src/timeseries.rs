//! 時系列グラフ用のプレースホルダーデータ
//!
//! 実際の解析結果ではなく、表示確認用に乱数で生成する。
//! 選択ファイルや解析結果は参照しない。

use rand::Rng;
use serde::{Deserialize, Serialize};

/// サンプル数（time = 0..23）
pub const SAMPLE_COUNT: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSample {
    pub time: u32,
    pub area: f64,
    pub perimeter: f64,
    pub velocity: f64,
}

/// グラフ化する系列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Area,
    Perimeter,
    Velocity,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Area, SeriesKind::Perimeter, SeriesKind::Velocity];

    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::Area => "面積",
            SeriesKind::Perimeter => "周囲長",
            SeriesKind::Velocity => "速度",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SeriesKind::Area => "µm²",
            SeriesKind::Perimeter => "µm",
            SeriesKind::Velocity => "µm/min",
        }
    }

    /// SVG描画時の線の色
    pub fn color(&self) -> &'static str {
        match self {
            SeriesKind::Area => "#8884d8",
            SeriesKind::Perimeter => "#82ca9d",
            SeriesKind::Velocity => "#ff7300",
        }
    }

    pub fn value(&self, sample: &TimeSeriesSample) -> f64 {
        match self {
            SeriesKind::Area => sample.area,
            SeriesKind::Perimeter => sample.perimeter,
            SeriesKind::Velocity => sample.velocity,
        }
    }
}

/// 24点のサンプルを生成
pub fn generate_samples<R: Rng + ?Sized>(rng: &mut R) -> Vec<TimeSeriesSample> {
    (0..SAMPLE_COUNT as u32)
        .map(|time| TimeSeriesSample {
            time,
            area: round2(rng.gen_range(100.0..200.0)),
            perimeter: round2(rng.gen_range(40.0..60.0)),
            velocity: round2(rng.gen_range(0.0..5.0)),
        })
        .collect()
}

/// スレッドローカル乱数で生成（表示のたびに新しい系列）
pub fn generate_random() -> Vec<TimeSeriesSample> {
    generate_samples(&mut rand::thread_rng())
}

/// (time, value) の点列に変換
pub fn series(samples: &[TimeSeriesSample], kind: SeriesKind) -> Vec<(f64, f64)> {
    samples.iter().map(|s| (s.time as f64, kind.value(s))).collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exactly_24_ordered_samples() {
        let samples = generate_random();
        assert_eq!(samples.len(), SAMPLE_COUNT);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.time, i as u32);
        }
        assert!(samples.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_values_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for s in generate_samples(&mut rng) {
            assert!((100.0..=200.0).contains(&s.area));
            assert!((40.0..=60.0).contains(&s.perimeter));
            assert!((0.0..=5.0).contains(&s.velocity));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_samples(&mut StdRng::seed_from_u64(42));
        let b = generate_samples(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_each_generation_is_fresh() {
        let a = generate_random();
        let b = generate_random();
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn test_series_extraction() {
        let samples = generate_samples(&mut StdRng::seed_from_u64(3));
        let velocity = series(&samples, SeriesKind::Velocity);
        assert_eq!(velocity.len(), SAMPLE_COUNT);
        assert_eq!(velocity[5], (5.0, samples[5].velocity));
    }
}
