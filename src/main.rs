use std::path::PathBuf;

use clap::Parser;
use indoc::formatdoc;

use term_form::clock::SystemClock;
use term_form::constants::FPS;
use term_form::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_form::keybindings::KeyBindings;
use term_form::widgets::{ButtonAction, Dropdown, Separator};
use term_form::{Form, FormConfig, Result, Widget, run_form, tracing_sub};

#[derive(Parser, Debug)]
#[command(
    name = "term-form",
    version = env!("CARGO_PKG_VERSION"),
    about = "Demo form: fill it in, submit, and get the values printed"
)]
struct Cli {
    /// Frame rate for cursor blink and animations.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = FPS)]
    fps: u32,

    /// Do not submit when Enter is pressed in a text field.
    #[arg(long = "no-auto-submit")]
    no_auto_submit: bool,

    /// Append debug logs to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_file.as_deref())?;

    let mut form = demo_form(&cli)?;
    let mut output = ConsoleOutputDriver::new()?;
    let result = run_form(
        &mut output,
        ConsoleInputDriver::new(),
        &mut form,
        &SystemClock,
    )?;
    drop(output);

    print!(
        "{}",
        formatdoc!(
            "
            Submitted {count} field(s):
            {result}",
            count = result.len(),
        )
    );
    Ok(())
}

fn demo_form(cli: &Cli) -> Result<Form> {
    let mut form = Form::with_config(FormConfig {
        auto_submit: !cli.no_auto_submit,
        fps: cli.fps,
        ..FormConfig::default()
    });

    form.add("text", Widget::label("I am some text"), None)?;
    form.add("input", Widget::labeled_input("Test", "default"), None)?;
    form.add(
        "input2",
        Widget::labeled_input("More Input:", "More testing").with_style([
            ("position", "absolute"),
            ("top", "16"),
            ("left", "20"),
        ])?,
        None,
    )?;

    let mut select = Dropdown::new();
    let options = [
        "option1",
        "option2",
        "option3 which is really long",
        "option4",
        "option5",
        "option6",
    ];
    for (value, name) in (1_i64..).zip(options) {
        select.add_option(name, value, None)?;
    }
    form.add(
        "select",
        Widget::dropdown(select).with_style([("border_width", "1"), ("top", "1")])?,
        None,
    )?;

    form.add("rule", Widget::separator(Separator::default()), None)?;
    form.add("submit", Widget::button("Submit", ButtonAction::Submit), None)?;
    form.add("reset", Widget::button("Reset", ButtonAction::Clear), None)?;
    form.add(
        "help",
        Widget::label(KeyBindings::default().help_line())
            .with_style([("position", "absolute"), ("top", "20")])?,
        None,
    )?;
    Ok(form)
}
