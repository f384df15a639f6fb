mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};
use std::{fs::File, io, path::Path, time::Duration};
use studio_viz::{DisplayList, RefreshLoop, SampleKind, SampleSource, VisualizationEngine, tui};

type Engine = VisualizationEngine<DisplayList, RefreshLoop>;

struct Studio {
    source: Box<dyn SampleSource>,
    refresh: RefreshLoop,
    playing: bool,
    view: View,
    waveform: Option<Engine>,
    spectrum: Option<Engine>,
}

impl Studio {
    fn new(args: &Args) -> Self {
        let mut studio = Self {
            source: args.sample_source(),
            refresh: RefreshLoop::new(),
            playing: args.play,
            view: args.view,
            waveform: None,
            spectrum: None,
        };
        studio.sync_view();
        studio
    }

    fn mount(&mut self, kind: SampleKind) -> Engine {
        VisualizationEngine::mount(
            kind,
            self.source.as_mut(),
            DisplayList::default(),
            self.playing,
            self.refresh.clone(),
        )
    }

    /// Mounts the panels the view shows and unmounts the rest.
    fn sync_view(&mut self) {
        if self.view.shows_waveform() {
            if self.waveform.is_none() {
                self.waveform = Some(self.mount(SampleKind::Waveform));
            }
        } else if let Some(engine) = self.waveform.take() {
            engine.unmount();
        }
        if self.view.shows_spectrum() {
            if self.spectrum.is_none() {
                self.spectrum = Some(self.mount(SampleKind::Spectrum));
            }
        } else if let Some(engine) = self.spectrum.take() {
            engine.unmount();
        }
    }

    fn engines_mut(&mut self) -> impl Iterator<Item = &mut Engine> {
        self.waveform.iter_mut().chain(self.spectrum.iter_mut())
    }

    fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        let transport = if self.playing { "playing" } else { "stopped" };
        info!("transport {}", transport);
        let playing = self.playing;
        for engine in self.engines_mut() {
            engine.set_active(playing);
        }
    }

    fn cycle_view(&mut self) {
        self.view = self.view.next();
        self.sync_view();
    }

    /// Fresh series and clocks for every visible panel.
    fn reset(&mut self) {
        if let Some(engine) = self.waveform.take() {
            engine.unmount();
        }
        if let Some(engine) = self.spectrum.take() {
            engine.unmount();
        }
        self.sync_view();
    }

    fn refresh(&mut self) {
        for handle in self.refresh.advance() {
            for engine in self.engines_mut() {
                if engine.on_frame(handle) {
                    break;
                }
            }
        }
    }

    fn draw(&self, f: &mut Frame) {
        let panels: Vec<(&str, &Engine)> = self
            .waveform
            .iter()
            .chain(self.spectrum.iter())
            .map(|e| (title(e.kind()), e))
            .collect();

        let mut constraints: Vec<Constraint> = panels
            .iter()
            .map(|_| Constraint::Ratio(1, panels.len() as u32))
            .collect();
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        for (i, (name, engine)) in panels.iter().enumerate() {
            tui::draw_panel(f, chunks[i], name, engine.surface(), engine.is_active());
        }

        let clocks: Vec<String> = panels
            .iter()
            .map(|(name, e)| format!("{name}: t={} {:?}", e.clock().tick(), e.state()))
            .collect();
        let status = format!(
            " {} | {} | [space] play/stop  [r] reset  [tab] view  [q] quit",
            if self.playing { "PLAYING" } else { "STOPPED" },
            clocks.join("  "),
        );
        let color = if self.playing { Color::Green } else { Color::Gray };
        f.render_widget(
            Paragraph::new(status).style(Style::default().fg(color)),
            chunks[panels.len()],
        );
    }
}

fn title(kind: SampleKind) -> &'static str {
    match kind {
        SampleKind::Waveform => "Waveform",
        SampleKind::Spectrum => "Spectrum Analyzer",
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // Logging to the terminal would tear the UI, so only a file target is offered.
    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        let env = env_logger::Env::default().default_filter_or("info");
        env_logger::Builder::from_env(env)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    studio: &mut Studio,
    frame: Duration,
) -> Result<()> {
    loop {
        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => studio.toggle_playback(),
                        KeyCode::Char('r') => studio.reset(),
                        KeyCode::Tab => studio.cycle_view(),
                        _ => {}
                    }
                }
            }
        }

        studio.refresh();
        terminal.draw(|f| studio.draw(f))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    info!("starting with {:?}", args);

    let mut studio = Studio::new(&args);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut studio, Duration::from_millis(args.frame_ms));

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studio(extra: &[&str]) -> Studio {
        let argv = ["studio-viz", "--seed", "1"].iter().chain(extra);
        Studio::new(&Args::parse_from(argv))
    }

    fn tick(engine: &Option<Engine>) -> u64 {
        engine.as_ref().map_or(0, |e| e.clock().tick())
    }

    #[test]
    fn playing_studio_mounts_both_panels_running() {
        let mut studio = studio(&["--play"]);
        assert_eq!(studio.refresh.pending_len(), 2);
        studio.refresh();
        studio.refresh();
        assert_eq!(tick(&studio.waveform), 2);
        assert_eq!(tick(&studio.spectrum), 2);
        assert_eq!(studio.refresh.pending_len(), 2);

        let kinds: Vec<SampleKind> = studio.engines_mut().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![SampleKind::Waveform, SampleKind::Spectrum]);
    }

    #[test]
    fn stopped_studio_paints_once_and_idles() {
        let mut studio = studio(&[]);
        assert_eq!(studio.refresh.pending_len(), 0);
        studio.refresh();
        assert_eq!(tick(&studio.waveform), 0);
        assert_eq!(studio.waveform.as_ref().map(|e| e.stats().painted), Some(1));
    }

    #[test]
    fn view_changes_unmount_and_remount_panels() {
        let mut studio = studio(&["--play"]);
        studio.refresh();
        studio.refresh();

        studio.cycle_view();
        assert_eq!(studio.view, View::Waveform);
        assert!(studio.spectrum.is_none());
        assert_eq!(studio.refresh.pending_len(), 1);
        studio.refresh();
        assert_eq!(tick(&studio.waveform), 3);

        studio.toggle_playback();
        studio.refresh();
        assert_eq!(studio.refresh.pending_len(), 0);
        assert_eq!(tick(&studio.waveform), 4);

        studio.cycle_view();
        assert!(studio.waveform.is_none());
        assert_eq!(tick(&studio.spectrum), 0);
        assert_eq!(studio.refresh.pending_len(), 0);

        studio.toggle_playback();
        assert_eq!(studio.refresh.pending_len(), 1);
        studio.refresh();
        studio.refresh();
        assert_eq!(tick(&studio.spectrum), 2);
    }

    #[test]
    fn reset_remounts_with_fresh_clock_and_series() {
        let mut studio = studio(&["--play", "--view", "spectrum"]);
        studio.refresh();
        studio.refresh();
        let before = studio.spectrum.as_ref().map(|e| e.series().clone());

        studio.reset();
        assert_eq!(tick(&studio.spectrum), 0);
        assert_eq!(studio.refresh.pending_len(), 1);
        let after = studio.spectrum.as_ref().map(|e| e.series().clone());
        assert!(after.is_some());
        assert_ne!(before, after);
    }

    #[test]
    fn same_seed_gives_same_series() {
        let a = studio(&[]);
        let b = studio(&[]);
        let series = |s: &Studio| s.waveform.as_ref().map(|e| e.series().clone());
        assert_eq!(series(&a), series(&b));
    }
}
