//! 折れ線グラフの座標計算
//!
//! 点列をSVGのviewBox座標に写像する。Y軸は上向き。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBox {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartBox {
    fn default() -> Self {
        Self { width: 480.0, height: 200.0, padding: 24.0 }
    }
}

/// 値の範囲（最小・最大）。全点が同値なら±1で広げる。
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if min == max {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min, max))
    }
}

/// 点列をグラフ領域の座標に変換
pub fn polyline_points(points: &[(f64, f64)], bounds: &ChartBox) -> Vec<(f64, f64)> {
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (
        value_range(points.iter().map(|p| p.0)),
        value_range(points.iter().map(|p| p.1)),
    ) else {
        return Vec::new();
    };

    let inner_w = (bounds.width - 2.0 * bounds.padding).max(0.0);
    let inner_h = (bounds.height - 2.0 * bounds.padding).max(0.0);

    points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| {
            let px = bounds.padding + (x - x_min) / (x_max - x_min) * inner_w;
            let py = bounds.padding + (1.0 - (y - y_min) / (y_max - y_min)) * inner_h;
            (px, py)
        })
        .collect()
}

/// SVG `points` 属性の文字列
pub fn svg_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}
