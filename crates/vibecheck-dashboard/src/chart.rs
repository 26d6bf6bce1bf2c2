//! Line chart of emotion counts over time.

use crate::aggregator::GroupedPoint;
use crate::traits::ChartRenderer;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};
use vibecheck_common::{Emotion, Result, VibeCheckError};
use vibecheck_config::ChartConfig;

/// Values of one emotion along the category axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionSeries {
    /// The emotion plotted.
    pub emotion: Emotion,
    /// Line color, `#rrggbb`.
    pub color: &'static str,
    /// One slot per category; `None` where the emotion did not occur.
    pub values: Vec<Option<u32>>,
}

impl EmotionSeries {
    /// Contiguous stretches of present values as `(category index, count)`.
    pub fn runs(&self) -> Vec<Vec<(i32, u32)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();

        for (index, value) in self.values.iter().enumerate() {
            match (value, i32::try_from(index)) {
                (Some(count), Ok(x)) => current.push((x, *count)),
                _ if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        runs
    }
}

/// Chart-ready view of a [`GroupedPoint`] sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    /// Period labels, in point order.
    pub categories: Vec<String>,
    /// One series per emotion, in first-appearance order.
    pub series: Vec<EmotionSeries>,
}

impl ChartSeries {
    /// Extracts one series per emotion present anywhere in `points`.
    pub fn from_points(points: &[GroupedPoint]) -> Self {
        let categories = points.iter().map(|p| p.label().to_string()).collect();

        let mut emotions: Vec<Emotion> = Vec::new();
        for entry in points.iter().flat_map(GroupedPoint::counts) {
            if !emotions.contains(&entry.emotion) {
                emotions.push(entry.emotion);
            }
        }

        let series = emotions
            .into_iter()
            .map(|emotion| EmotionSeries {
                emotion,
                color: emotion.color(),
                values: points.iter().map(|p| p.count(emotion)).collect(),
            })
            .collect();

        Self { categories, series }
    }

    /// Emotions with a series, in legend order.
    pub fn emotions(&self) -> Vec<Emotion> {
        self.series.iter().map(|s| s.emotion).collect()
    }

    /// Largest single count across all series.
    pub fn max_value(&self) -> u32 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }
}

/// SVG line chart renderer.
#[derive(Debug, Clone, Default)]
pub struct LineChartRenderer {
    config: ChartConfig,
}

impl LineChartRenderer {
    /// Renderer using the given size and colors.
    pub const fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    fn draw(&self, root: &DrawingArea<SVGBackend<'_>, Shift>, series: &ChartSeries) -> Result<()> {
        let background = self.parse_color(&self.config.background);
        let foreground = self.parse_color(&self.config.foreground);
        root.fill(&background)?;

        let last_index = i32::try_from(series.categories.len().saturating_sub(1))
            .unwrap_or(i32::MAX)
            .max(1);
        let y_max = series.max_value() + 1;

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(0..last_index, 0..y_max)?;

        let categories = &series.categories;
        let category_label = |index: &i32| {
            usize::try_from(*index)
                .ok()
                .and_then(|i| categories.get(i))
                .cloned()
                .unwrap_or_default()
        };
        let label_style = ("sans-serif", 14).into_font().color(&foreground);

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(categories.len())
            .x_label_formatter(&category_label)
            .y_labels(10)
            .label_style(label_style.clone())
            .axis_style(foreground)
            .bold_line_style(foreground.mix(0.15))
            .light_line_style(TRANSPARENT);
        if !self.config.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for emotion_series in &series.series {
            let color = self.parse_color(emotion_series.color);
            let mut labelled = false;

            for run in emotion_series.runs() {
                let line = chart.draw_series(LineSeries::new(
                    run.iter().copied(),
                    color.stroke_width(2),
                ))?;
                if !labelled {
                    line.label(emotion_series.emotion.label()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                    });
                    labelled = true;
                }

                chart.draw_series(
                    run.iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )?;
            }
        }

        chart
            .configure_series_labels()
            .label_font(label_style)
            .background_style(background.mix(0.85))
            .border_style(foreground)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        Ok(())
    }

    fn ensure_not_empty(series: &ChartSeries) -> Result<()> {
        if series.is_empty() {
            return Err(VibeCheckError::validation("Nenhum dado disponível para o gráfico."));
        }
        Ok(())
    }
}

impl ChartRenderer for LineChartRenderer {
    #[instrument(skip(self, series), fields(categories = series.categories.len()))]
    fn render_to_string(&self, series: &ChartSeries) -> Result<String> {
        Self::ensure_not_empty(series)?;

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.config.width, self.config.height))
                .into_drawing_area();
            self.draw(&root, series)?;
            root.present()?;
        }

        debug!("Rendered {} series ({} bytes)", series.series.len(), buffer.len());
        Ok(buffer)
    }

    #[instrument(skip(self, series), fields(path = %path.display()))]
    fn render_to_file(&self, series: &ChartSeries, path: &Path) -> Result<()> {
        Self::ensure_not_empty(series)?;

        let root = SVGBackend::new(path, (self.config.width, self.config.height)).into_drawing_area();
        self.draw(&root, series)?;
        root.present()?;

        debug!("Chart written to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "line"
    }
}
