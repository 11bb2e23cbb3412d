use crate::config;
use adc_uart::config::adc::VREF;
use std::collections::VecDeque;
use std::fmt::Write;

/// One decoded report line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub raw: i32,
    pub volts: f64,
}

pub struct State {
    chart: Chart,
    received: u64,
    latest: Option<Sample>,
    logs: VecDeque<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            chart: Chart::default(),
            received: 0,
            latest: None,
            logs: VecDeque::with_capacity(config::SCROLLBACK_LINES),
        }
    }
}

impl State {
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn latest(&self) -> Option<Sample> {
        self.latest
    }

    /// Number of samples received so far, including ones no longer on the chart.
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn push_sample(&mut self, sample: Sample) {
        #[allow(clippy::cast_precision_loss)]
        let x = self.received as f64;
        self.received += 1;
        self.latest = Some(sample);

        let coords = &mut self.chart.coords;
        if coords.len() >= config::HISTORY {
            coords.remove(0);
        }
        coords.push((x, sample.volts));

        let first_x = coords.first().map_or(x, |&(x, _)| x);
        self.chart.x_axis.range.set_min(first_x);
        self.chart.x_axis.range.set_max(x);
    }

    pub fn logs(&self) -> &VecDeque<String> {
        &self.logs
    }

    pub fn push_log(&mut self, log: &str) {
        let log = match log.char_indices().nth(config::MAX_LINE_LENGTH) {
            Some((end, _)) => &log[..end],
            None => log,
        };

        let string = if self.logs.len() >= config::SCROLLBACK_LINES {
            // Reuse existing string allocation
            match self.logs.pop_front() {
                Some(mut existing_string) => {
                    existing_string.clear();
                    existing_string.push_str(log);
                    existing_string
                }
                None => unreachable!("cannot be empty"),
            }
        } else {
            // Not full yet, allocate new string
            log.to_string()
        };
        self.logs.push_back(string);
    }
}

pub struct Chart {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub coords: Vec<(f64, f64)>,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            x_axis: Axis {
                name: "sample".to_string(),
                range: AxisRange::new(0., 0.),
            },
            y_axis: Axis {
                name: "V".to_string(),
                range: AxisRange::new(0., VREF.into()),
            },
            coords: Vec::with_capacity(config::HISTORY),
        }
    }
}

pub struct Axis {
    pub name: String,
    pub range: AxisRange,
}

pub struct AxisRange {
    min: f64,
    min_name: String,
    max: f64,
    max_name: String,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            min_name: label(min),
            max,
            max_name: label(max),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn min_name(&self) -> &str {
        &self.min_name
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn max_name(&self) -> &str {
        &self.max_name
    }

    pub fn set_min(&mut self, min: f64) {
        if min != self.min {
            self.min = min;
            self.min_name.clear();
            let _ = write!(self.min_name, "{}", Label(min));
        }
    }

    pub fn set_max(&mut self, max: f64) {
        if max != self.max {
            self.max = max;
            self.max_name.clear();
            let _ = write!(self.max_name, "{}", Label(max));
        }
    }
}

/// Axis labels: integers as-is, everything else to 2 decimal places.
struct Label(f64);

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0. {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

fn label(x: f64) -> String {
    Label(x).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(raw: i32) -> Sample {
        Sample {
            raw,
            volts: f64::from(raw) * 3.3 / 4096.,
        }
    }

    #[test]
    fn axis_labels() {
        let state = State::default();
        assert_eq!(state.chart().y_axis.range.min_name(), "0");
        assert_eq!(state.chart().y_axis.range.max_name(), "3.30");
    }

    #[test]
    fn samples_scroll_off_the_chart() {
        let mut state = State::default();
        for raw in 0..(config::HISTORY as i32 + 10) {
            state.push_sample(sample(raw));
        }

        let coords = &state.chart().coords;
        assert_eq!(coords.len(), config::HISTORY);
        assert_eq!(coords[0].0, 10.);
        assert_eq!(state.chart().x_axis.range.min(), 10.);
        assert_eq!(state.chart().x_axis.range.max_name(), "609");
        assert_eq!(state.received(), config::HISTORY as u64 + 10);
        assert_eq!(state.latest().map(|s| s.raw), Some(config::HISTORY as i32 + 9));
    }

    #[test]
    fn log_is_bounded() {
        let mut state = State::default();
        for i in 0..config::SCROLLBACK_LINES + 5 {
            state.push_log(&i.to_string());
        }
        assert_eq!(state.logs().len(), config::SCROLLBACK_LINES);
        assert_eq!(state.logs().front().map(String::as_str), Some("5"));

        state.push_log(&"x".repeat(config::MAX_LINE_LENGTH * 2));
        assert_eq!(state.logs().back().map(String::len), Some(config::MAX_LINE_LENGTH));
    }
}
