//! Scrolling dual-trace plot with its annotations.
//!
//! The renderer is a pure function of the waveform state and the two history
//! windows; it draws onto any embedded-graphics [`DrawTarget`] and leaves
//! presenting the frame to the [`Surface`](crate::surface::Surface).
//!
//! Pixel constants are given for a 1024×768 canvas and scale with the
//! target's size.

pub mod palette;
pub mod shapes;

use core::fmt::{self, Write};

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::geometry::Vec2;
use crate::history::HistoryBuffer;
use crate::waveform::WaveformState;

use self::shapes::{arrow, dashed_line, double_arrow, DASH_LENGTH};

const REFERENCE_WIDTH: f64 = 1024.0;
const REFERENCE_HEIGHT: f64 = 768.0;

const TRACE_WIDTH: u32 = 1;
const LABEL_X_OFFSET: f64 = -250.0;
const LABEL_Y_OFFSET: f64 = -15.0;
const ARROW_UP_OFFSET: f64 = 100.0;
const ARROW_DOWN_OFFSET: f64 = 50.0;
const ARROW_HEAD: f64 = 20.0;
const PERIOD_ARROW_Y: f64 = 85.0;
const PERIOD_LABEL_Y: f64 = 100.0;
const AMPLITUDE_ARROW_X: f64 = 50.0;
const AMPLITUDE_TICK_HALF_WIDTH: f64 = 100.0;
const AMPLITUDE_LABEL_RISE: f64 = 60.0;
const LEGEND_RISE: f64 = 30.0;

/// Maps signal values and reference-canvas offsets onto a concrete canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
    /// Pixels per radian, negative so that positive values draw upwards
    height_scale: f64,
    baseline: f64,
}

impl Layout {
    pub fn new(size: Size) -> Self {
        let height = f64::from(size.height);
        Self {
            width: size.width,
            height: size.height,
            sx: f64::from(size.width) / REFERENCE_WIDTH,
            sy: height / REFERENCE_HEIGHT,
            height_scale: -height / (3.0 * core::f64::consts::PI),
            baseline: 0.75 * height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Vertical position of a signal value (radians), unrounded.
    #[inline]
    pub fn y_exact(&self, value: f64) -> f64 {
        self.height_scale * value + self.baseline
    }

    /// Pixel row of a signal value (radians).
    #[inline]
    pub fn y_for(&self, value: f64) -> i32 {
        self.y_exact(value).round() as i32
    }

    #[inline]
    fn dx(&self, reference: f64) -> f64 {
        reference * self.sx
    }

    #[inline]
    fn dy(&self, reference: f64) -> f64 {
        reference * self.sy
    }

    #[inline]
    fn center_x(&self) -> f64 {
        f64::from(self.width) / 2.0
    }
}

/// History index shown in `column` of a `width`-column plot.
///
/// Nearest-index resampling: column `i` shows sample
/// `round(i · (capacity − 1) / (width − 1))`.
#[inline]
pub fn resample_index(column: u32, capacity: usize, width: u32) -> usize {
    let last_index = capacity.saturating_sub(1);
    if width <= 1 {
        return last_index;
    }
    (f64::from(column) * last_index as f64 / f64::from(width - 1)).round() as usize
}

/// History indices shown in each of `width` columns.
pub fn resample_indices(capacity: usize, width: u32) -> Vec<usize> {
    if capacity == 0 {
        return Vec::new();
    }
    (0..width)
        .map(|column| resample_index(column, capacity, width))
        .collect()
}

/// The history window stretched or squeezed to `width` columns, oldest first.
pub fn resample(history: &HistoryBuffer, width: u32) -> Vec<f64> {
    resample_indices(history.len(), width)
        .into_iter()
        .filter_map(|index| history.get(index))
        .collect()
}

/// Screen points of one channel's trace, one per column, written into `points`.
pub fn trace_into(layout: &Layout, history: &HistoryBuffer, points: &mut Vec<Point>) {
    let width = layout.width();
    points.clear();
    points.extend((0..width).filter_map(|column| {
        history
            .get(resample_index(column, history.len(), width))
            .map(|value| Point::new(column as i32, layout.y_for(value)))
    }));
}

/// Draws the plot and its overlays.
///
/// Trace points and label text go through buffers kept between frames, so a
/// steady-state frame doesn't allocate.
#[derive(Clone, Debug)]
pub struct Renderer {
    reference_period: f64,
    legend: String,
    points0: Vec<Point>,
    points1: Vec<Point>,
    label: String,
}

impl Renderer {
    /// `reference_period` is the period at which the period arrow spans the
    /// full canvas width; `legend` is printed along the bottom edge.
    pub fn new(reference_period: f64, legend: impl Into<String>) -> Self {
        Self {
            reference_period,
            legend: legend.into(),
            points0: Vec::new(),
            points1: Vec::new(),
            label: String::new(),
        }
    }

    #[inline]
    pub fn legend(&self) -> &str {
        &self.legend
    }

    /// Fraction of the canvas width the period arrow spans.
    pub fn period_ratio(&self, period: f64) -> f64 {
        if self.reference_period > 0.0 {
            period / self.reference_period
        } else {
            0.0
        }
    }

    /// Draw a complete frame. Reads `state` and the histories only.
    pub fn draw<D>(
        &mut self,
        state: &WaveformState,
        history0: &HistoryBuffer,
        history1: &HistoryBuffer,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let layout = Layout::new(target.bounding_box().size);
        target.clear(palette::BACKGROUND)?;

        trace_into(&layout, history0, &mut self.points0);
        trace_into(&layout, history1, &mut self.points1);
        for (points, color) in [
            (&self.points0, palette::CHANNEL0),
            (&self.points1, palette::CHANNEL1),
        ] {
            Polyline::new(points)
                .into_styled(PrimitiveStyle::with_stroke(color, TRACE_WIDTH))
                .draw(target)?;
        }

        let newest = (self.points0.last().copied(), self.points1.last().copied());
        if let (Some(last0), Some(last1)) = newest {
            self.draw_channel_readouts(state, &layout, last0.into(), last1.into(), target)?;
        }
        self.draw_period(state, &layout, target)?;
        self.draw_amplitude_spans(state, &layout, target)?;

        Text::with_baseline(
            &self.legend,
            Point::new(0, (f64::from(layout.height()) - layout.dy(LEGEND_RISE)).round() as i32),
            MonoTextStyle::new(&FONT_10X20, palette::LEGEND),
            Baseline::Top,
        )
        .draw(target)?;

        Ok(())
    }

    /// Value labels at the newest sample of each trace and the offset arrows between them.
    fn draw_channel_readouts<D>(
        &mut self,
        state: &WaveformState,
        layout: &Layout,
        last0: Vec2,
        last1: Vec2,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let label_dx = layout.dx(LABEL_X_OFFSET);
        let label_dy = layout.dy(LABEL_Y_OFFSET);

        for (last, value, color) in [
            (last0, state.out0(), palette::CHANNEL0),
            (last1, state.out1(), palette::CHANNEL1),
        ] {
            let anchor = Vec2::new(last.x + label_dx, last.y);
            Text::with_text_style(
                self.label(format_args!("{:.0} deg", value.to_degrees())),
                Vec2::new(anchor.x, last.y + label_dy).to_point(),
                MonoTextStyle::new(&FONT_10X20, color),
                aligned(Alignment::Right),
            )
            .draw(target)?;
            dashed_line(target, color, anchor, last, 1, DASH_LENGTH)?;
        }

        let arrow_x = last1.x + label_dx / 2.0;
        let up = layout.dy(ARROW_UP_OFFSET);
        let down = layout.dy(ARROW_DOWN_OFFSET);
        let head = layout.dy(ARROW_HEAD);

        Text::with_text_style(
            self.label(format_args!(
                "Offset: {:.0} deg",
                (state.out1() - state.out0()).to_degrees()
            )),
            Vec2::new(arrow_x, last1.y - up + 2.0 * label_dy).to_point(),
            MonoTextStyle::new(&FONT_10X20, palette::OFFSET),
            aligned(Alignment::Center),
        )
        .draw(target)?;
        arrow(
            target,
            palette::OFFSET,
            Vec2::new(arrow_x, last1.y - up),
            Vec2::new(arrow_x, last1.y),
            head,
        )?;
        let arrow_x = last0.x + label_dx / 2.0;
        arrow(
            target,
            palette::OFFSET,
            Vec2::new(arrow_x, last0.y + down),
            Vec2::new(arrow_x, last0.y),
            head,
        )
    }

    /// Centered double arrow whose width tracks the period.
    fn draw_period<D>(
        &mut self,
        state: &WaveformState,
        layout: &Layout,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let center = layout.center_x();
        let half_span = self.period_ratio(state.period) * center;
        let y = layout.dy(PERIOD_ARROW_Y);

        Text::with_text_style(
            self.label(format_args!("Period: {:.0} s", state.period)),
            Vec2::new(center, layout.dy(PERIOD_LABEL_Y)).to_point(),
            MonoTextStyle::new(&FONT_10X20, palette::PERIOD),
            aligned(Alignment::Center),
        )
        .draw(target)?;
        double_arrow(
            target,
            palette::PERIOD,
            Vec2::new(center - half_span, y),
            Vec2::new(center + half_span, y),
            layout.dy(ARROW_HEAD),
        )
    }

    /// Peak-to-peak spans of both channels, the second shifted by the offset.
    fn draw_amplitude_spans<D>(
        &mut self,
        state: &WaveformState,
        layout: &Layout,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let center = layout.center_x();
        let x0 = center - layout.dx(AMPLITUDE_ARROW_X);
        let x1 = center + layout.dx(AMPLITUDE_ARROW_X);
        let tick = layout.dx(AMPLITUDE_TICK_HALF_WIDTH);
        let head = layout.dy(ARROW_HEAD);

        let amplitude = state.amplitude;
        let spans = [
            (x0, amplitude, -amplitude, palette::AMPLITUDE0),
            (x1, amplitude + state.offset, -amplitude + state.offset, palette::AMPLITUDE1),
        ];
        for (x, top, bottom, color) in spans {
            let top = Vec2::new(x, layout.y_exact(top));
            let bottom = Vec2::new(x, layout.y_exact(bottom));
            double_arrow(target, color, top, bottom, head)?;
            for end in [top, bottom] {
                dashed_line(
                    target,
                    color,
                    Vec2::new(end.x - tick, end.y),
                    Vec2::new(end.x + tick, end.y),
                    1,
                    DASH_LENGTH,
                )?;
            }
        }

        Text::with_text_style(
            self.label(format_args!("Amplitude: {:.0} deg", amplitude.to_degrees())),
            Vec2::new(
                center,
                layout.y_exact(amplitude + state.offset) - layout.dy(AMPLITUDE_LABEL_RISE),
            )
            .to_point(),
            MonoTextStyle::new(&FONT_10X20, palette::AMPLITUDE),
            aligned(Alignment::Center),
        )
        .draw(target)?;
        Ok(())
    }
}

impl Renderer {
    /// Format into the label buffer kept between frames.
    fn label(&mut self, args: fmt::Arguments<'_>) -> &str {
        self.label.clear();
        // writing into a String can't fail
        let _ = self.label.write_fmt(args);
        &self.label
    }
}

fn aligned(alignment: Alignment) -> TextStyle {
    TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build()
}
