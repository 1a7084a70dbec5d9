//! Drivers without a terminal: a scripted input queue and an in-memory
//! output backed by ratatui's `TestBackend`. Used by tests and benchmarks.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Size;

use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

/// Replays a fixed list of events, then asks to quit.
pub struct ScriptedInputDriver {
    events: VecDeque<Event>,
    mouse_capture: bool,
}

impl ScriptedInputDriver {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        Self {
            events: events.into_iter().collect(),
            mouse_capture: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedInputDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(true)
    }

    fn read(&mut self) -> io::Result<Event> {
        Ok(self.events.pop_front().unwrap_or_else(|| {
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        }))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}

pub struct HeadlessOutputDriver {
    terminal: Terminal<TestBackend>,
    frames: usize,
}

impl HeadlessOutputDriver {
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(Self {
            terminal,
            frames: 0,
        })
    }

    /// The last presented frame.
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl OutputDriver for HeadlessOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn size(&mut self) -> io::Result<Size> {
        self.terminal
            .size()
            .map_err(|err| io::Error::other(err.to_string()))
    }

    fn present(&mut self, canvas: &Buffer) -> io::Result<()> {
        self.terminal
            .draw(|frame| {
                let mut ui = UiFrame::new(frame);
                ui.blit_from(canvas, canvas.area);
            })
            .map_err(|err| io::Error::other(err.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}
