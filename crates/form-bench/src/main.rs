use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::layout::Size;
use term_form::widgets::{ButtonAction, Dropdown, Widget};
use term_form::{BufferRenderer, Form, FormConfig};

#[derive(Parser, Debug)]
#[command(
    name = "form-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Layout-heavy benchmark for checking form draw throughput"
)]
struct BenchCli {
    /// Number of widgets on the form.
    #[arg(short = 'w', long = "widgets", value_name = "COUNT", default_value_t = 200)]
    widgets: usize,

    /// Number of frames to draw.
    #[arg(short = 'n', long = "frames", value_name = "FRAMES", default_value_t = 500)]
    frames: u64,

    /// Canvas width in cells.
    #[arg(long = "width", value_name = "CELLS", default_value_t = 120)]
    width: u16,

    /// Canvas height in cells.
    #[arg(long = "height", value_name = "CELLS", default_value_t = 40)]
    height: u16,
}

struct BenchConfig {
    widgets: usize,
    frames: u64,
    size: Size,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=10_000).contains(&cli.widgets) {
            return Err("widgets must be between 1 and 10000".to_string());
        }
        if !(1..=1_000_000).contains(&cli.frames) {
            return Err("frames must be between 1 and 1000000".to_string());
        }
        if !(10..=1_000).contains(&cli.width) || !(5..=1_000).contains(&cli.height) {
            return Err("canvas must be between 10x5 and 1000x1000 cells".to_string());
        }
        Ok(Self {
            widgets: cli.widgets,
            frames: cli.frames,
            size: Size::new(cli.width, cli.height),
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config).map_err(io::Error::other)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn build_form(widgets: usize) -> term_form::Result<Form> {
    let mut form = Form::with_config(FormConfig {
        auto_submit: false,
        ..FormConfig::default()
    });
    for i in 0..widgets {
        let name = format!("w{i}");
        let widget = match i % 4 {
            0 => Widget::label(format!("Row {i}")),
            1 => Widget::labeled_input(format!("Field {i}"), "value"),
            2 => {
                let mut dropdown = Dropdown::new();
                for option in 0..8_i64 {
                    dropdown.add_option(format!("choice {option}"), option, None)?;
                }
                Widget::dropdown(dropdown)
            }
            _ => Widget::button(format!("Go {i}"), ButtonAction::Submit),
        };
        form.add(&name, widget, None)?;
    }
    Ok(form)
}

fn run_benchmark(config: &BenchConfig) -> term_form::Result<BenchStats> {
    let mut form = build_form(config.widgets)?;
    form.present()?;
    let mut renderer = BufferRenderer::new();
    let mut stats = BenchStats::new();
    let cells = config.size.width as u64 * config.size.height as u64;

    for frame in 0..config.frames {
        // Walk focus so dropdown overlays and cursors show up in the mix.
        if frame % 3 == 0 {
            form.focus_next();
        }
        let frame_start = Instant::now();
        form.draw(&mut renderer, config.size)?;
        stats.record_frame(cells, frame_start.elapsed());
    }

    stats.mark_completed();
    Ok(stats)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    cell_updates: u64,
    total_draw_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            cell_updates: 0,
            total_draw_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, cells: u64, draw_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.cell_updates = self.cell_updates.saturating_add(cells);
        self.total_draw_time += draw_time;
        self.fastest_frame = self.fastest_frame.min(draw_time);
        self.slowest_frame = self.slowest_frame.max(draw_time);
    }

    fn frame_ms(&self, duration: Duration) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        duration.as_secs_f64() * 1_000.0
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.frame_ms(self.total_draw_time) / self.frame_count as f64
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Form bench completed.
            Widgets: {widgets} | Canvas: {width}x{height}
            Frames: {frames} in {elapsed:.2}s | Avg FPS: {fps:.1}
            Avg frame: {avg:.3} ms | Best: {best:.3} ms | Worst: {worst:.3} ms
            Cells drawn: {cells} total
            "#,
            widgets = config.widgets,
            width = config.size.width,
            height = config.size.height,
            frames = self.frame_count,
            elapsed = elapsed,
            fps = fps,
            avg = self.average_frame_ms(),
            best = self.frame_ms(self.fastest_frame),
            worst = self.frame_ms(self.slowest_frame),
            cells = self.cell_updates,
        )
    }
}
