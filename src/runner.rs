use ratatui::layout::Size;

use crate::clock::Clock;
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::Result;
use crate::event::FormEvent;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::form::{Form, FormResult};
use crate::render::BufferRenderer;

/// Run `form` until it is submitted or quit, returning its result.
///
/// Each frame is `input -> layout -> present`: every handled event and
/// every idle tick is followed by a full layout pass, so a click is always
/// hit-tested against the frame the user saw. A frame that fails to lay out
/// is never presented; the error ends the run and is returned after the
/// terminal has been restored.
pub fn run_form<O, I, C>(output: &mut O, input: I, form: &mut Form, clock: &C) -> Result<FormResult>
where
    O: OutputDriver,
    I: InputDriver,
    C: Clock,
{
    output.enter()?;
    let outcome = drive(output, input, form, clock);
    let restored = output.exit();
    match outcome {
        Ok(()) => {
            restored?;
            let result = form.result();
            tracing::debug!(fields = result.len(), "form finished");
            Ok(result)
        }
        Err(err) => {
            tracing::error!(error = %err, "form run aborted");
            Err(err)
        }
    }
}

fn drive<O, I, C>(output: &mut O, input: I, form: &mut Form, clock: &C) -> Result<()>
where
    O: OutputDriver,
    I: InputDriver,
    C: Clock,
{
    form.present()?;
    let mut renderer = BufferRenderer::new();
    let mut event_loop = EventLoop::new(input, form.config().frame_budget());
    event_loop.driver().set_mouse_capture(true)?;
    redraw(output, form, &mut renderer)?;

    event_loop.run(|_, event| -> Result<ControlFlow> {
        match event {
            Some(event) => {
                if let Some(event) = FormEvent::from_terminal(&event) {
                    form.update(event)?;
                }
            }
            None => form.tick(clock.now()),
        }
        if !form.is_running() {
            return Ok(ControlFlow::Quit);
        }
        redraw(output, form, &mut renderer)?;
        Ok(ControlFlow::Continue)
    })?;

    event_loop.driver().set_mouse_capture(false)?;
    Ok(())
}

fn redraw<O: OutputDriver>(output: &mut O, form: &mut Form, renderer: &mut BufferRenderer) -> Result<()> {
    let size: Size = output.size()?;
    let canvas = form.draw(renderer, size)?;
    output.present(&canvas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::drivers::headless::{HeadlessOutputDriver, ScriptedInputDriver};
    use crate::error::FormError;
    use crate::widgets::{Dropdown, Widget};
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_then_enter_returns_values() {
        let mut form = Form::new();
        form.add("name", Widget::text_input(""), None).unwrap();
        let mut output = HeadlessOutputDriver::new(30, 6).unwrap();
        let input = ScriptedInputDriver::new([
            press(KeyCode::Char('h')),
            press(KeyCode::Char('i')),
            press(KeyCode::Enter),
        ]);

        let result = run_form(&mut output, input, &mut form, &ManualClock::new()).unwrap();
        assert_eq!(result.to_string(), "name:\thi\n");
        assert!(output.frames() >= 3);
    }

    #[test]
    fn layout_errors_end_the_run() {
        let mut form = Form::new();
        form.add("empty", Widget::dropdown(Dropdown::new()), None)
            .unwrap();
        let mut output = HeadlessOutputDriver::new(30, 6).unwrap();
        let err = run_form(
            &mut output,
            ScriptedInputDriver::new(Vec::<Event>::new()),
            &mut form,
            &ManualClock::new(),
        )
        .unwrap_err();
        assert!(matches!(err, FormError::EmptyWidget { ref name, .. } if name == "empty"));
        assert_eq!(output.frames(), 0);
    }
}
