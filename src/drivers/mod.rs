pub mod console;
pub mod headless;
pub mod keyboard;

use ::crossterm::event::Event;
use ratatui::buffer::Buffer;
use ratatui::layout::Size;
use std::io;
use std::time::Duration;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

/// Where finished frames go.
///
/// The form composites each frame into an offscreen canvas first, so a frame
/// that fails to lay out is never presented half drawn.
pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;
    fn size(&mut self) -> io::Result<Size>;
    fn present(&mut self, canvas: &Buffer) -> io::Result<()>;
}
