use std::env;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crossterm::event;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Gauge;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tracing::info;
use tracing::warn;

use shopscope_core::reduce;
use shopscope_core::step_count;
use shopscope_core::ControlKind;
use shopscope_core::ControlSpec;
use shopscope_core::RuntimeAction;
use shopscope_core::SubmissionResult;
use shopscope_core::UiTheme;
use shopscope_core::UserAction;
use shopscope_core::WizardAction;
use shopscope_core::WizardEffect;
use shopscope_core::WizardState;
use shopscope_core::WizardView;
use shopscope_core::STEPS;
use shopscope_exec::spawn_submission;
use shopscope_exec::GenerationClient;

use crate::export::export_document;
use crate::markdown::render_markdown;
use crate::markdown::MarkdownStyles;

const TICK: Duration = Duration::from_millis(100);

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            crossterm::cursor::Show
        );
    }
}

pub fn run(mut state: WizardState, client: Arc<dyn GenerationClient>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut state, client)?;
    Ok(())
}

enum UiEvent {
    SubmissionResolved {
        attempt: u64,
        result: SubmissionResult,
    },
}

enum KeyCommand {
    Continue(Vec<UserAction>),
    Exit,
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut WizardState,
    client: Arc<dyn GenerationClient>,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<UiEvent>();
    let started = Instant::now();

    loop {
        while let Ok(event) = rx.try_recv() {
            match event {
                UiEvent::SubmissionResolved { attempt, result } => {
                    reduce(
                        state,
                        WizardAction::Runtime(RuntimeAction::SubmissionResolved { attempt, result }),
                    );
                }
            }
        }

        let frame = (started.elapsed().as_millis() / TICK.as_millis()) as usize;
        terminal.draw(|f| ui(f, state, frame))?;

        if !event::poll(TICK)? {
            continue;
        }
        let actions = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(state, key) {
                KeyCommand::Exit => return Ok(()),
                KeyCommand::Continue(actions) => actions,
            },
            Event::Paste(text) => vec![UserAction::TextPaste(text)],
            _ => Vec::new(),
        };

        let mut effects = Vec::new();
        for action in actions {
            effects.extend(reduce(state, WizardAction::User(action)));
        }
        for effect in effects {
            apply_effect(state, effect, &client, &tx);
        }
    }
}

fn apply_effect(
    state: &mut WizardState,
    effect: WizardEffect,
    client: &Arc<dyn GenerationClient>,
    tx: &mpsc::Sender<UiEvent>,
) {
    match effect {
        WizardEffect::RequestFrame | WizardEffect::ScrollToTop => {}
        WizardEffect::StartSubmission { attempt, answers } => {
            let tx = tx.clone();
            spawn_submission(Arc::clone(client), answers, move |result| {
                let _ = tx.send(UiEvent::SubmissionResolved { attempt, result });
            });
        }
        WizardEffect::CopyToClipboard(text) => {
            let notice = match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
                Ok(()) => "Copied the brief to the clipboard.".to_string(),
                Err(err) => {
                    warn!(error = %err, "clipboard unavailable");
                    format!("Clipboard unavailable: {err}")
                }
            };
            set_notice(state, notice);
        }
        WizardEffect::ExportDocument(text) => {
            let dir = env::current_dir().unwrap_or_else(|_| ".".into());
            let notice = match export_document(&dir, &text) {
                Ok(path) => {
                    info!(path = %path.display(), "exported brief");
                    format!("Saved {}", path.display())
                }
                Err(err) => {
                    warn!(error = %err, "export failed");
                    format!("Could not save the brief: {err}")
                }
            };
            set_notice(state, notice);
        }
    }
}

fn set_notice(state: &mut WizardState, notice: String) {
    reduce(
        state,
        WizardAction::Runtime(RuntimeAction::SetNotice(Some(notice))),
    );
}

fn map_key(state: &WizardState, key: KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyCommand::Exit;
    }
    let mut actions = Vec::new();
    if state.interaction.notice.is_some() {
        actions.push(UserAction::DismissNotice);
    }

    match state.view() {
        WizardView::Result => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyCommand::Exit,
            KeyCode::Char('b') => actions.push(UserAction::Reset),
            KeyCode::Char('c') => actions.push(UserAction::CopyResult),
            KeyCode::Char('w') => actions.push(UserAction::ExportResult),
            KeyCode::Char('t') => actions.push(UserAction::CycleTheme),
            KeyCode::Up | KeyCode::Char('k') => actions.push(UserAction::ScrollResult(-1)),
            KeyCode::Down | KeyCode::Char('j') => actions.push(UserAction::ScrollResult(1)),
            KeyCode::PageUp => actions.push(UserAction::ScrollResult(-10)),
            KeyCode::PageDown | KeyCode::Char(' ') => actions.push(UserAction::ScrollResult(10)),
            _ => {}
        },
        WizardView::Form if state.interaction.editing => {
            let multiline = matches!(
                state.focused_control().map(|control| control.kind),
                Some(ControlKind::Text {
                    input: shopscope_core::TextInputKind::Multiline,
                    ..
                })
            );
            match key.code {
                KeyCode::Esc => actions.push(UserAction::EndEdit),
                KeyCode::Enter if multiline && !key.modifiers.contains(KeyModifiers::ALT) => {
                    actions.push(UserAction::TextInput('\n'))
                }
                KeyCode::Enter => actions.push(UserAction::EndEdit),
                KeyCode::Tab | KeyCode::Down => actions.push(UserAction::FocusNextControl),
                KeyCode::BackTab | KeyCode::Up => actions.push(UserAction::FocusPrevControl),
                KeyCode::Backspace => actions.push(UserAction::TextBackspace),
                KeyCode::Char(c) => actions.push(UserAction::TextInput(c)),
                _ => {}
            }
        }
        WizardView::Form => {
            let focused = state.focused_control().map(|control| control.kind);
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return KeyCommand::Exit,
                _ if state.is_submitting() => {}
                KeyCode::Char('n') | KeyCode::PageDown => actions.push(UserAction::Advance),
                KeyCode::Char('p') | KeyCode::PageUp => actions.push(UserAction::Retreat),
                KeyCode::Char('t') => actions.push(UserAction::CycleTheme),
                KeyCode::Char('s') => actions.push(UserAction::Submit),
                KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                    actions.push(UserAction::FocusNextControl)
                }
                KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                    actions.push(UserAction::FocusPrevControl)
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    actions.push(UserAction::OptionPrev);
                    if matches!(focused, Some(ControlKind::Radio { .. })) {
                        actions.push(UserAction::ActivateOption);
                    }
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    actions.push(UserAction::OptionNext);
                    if matches!(focused, Some(ControlKind::Radio { .. })) {
                        actions.push(UserAction::ActivateOption);
                    }
                }
                KeyCode::Char(' ') => match focused {
                    Some(ControlKind::Text { .. }) => actions.push(UserAction::BeginEdit),
                    Some(_) => actions.push(UserAction::ActivateOption),
                    None => {}
                },
                KeyCode::Enter => match focused {
                    Some(ControlKind::Text { .. }) => actions.push(UserAction::BeginEdit),
                    _ if state.is_last_step() => actions.push(UserAction::Submit),
                    _ => actions.push(UserAction::FocusNextControl),
                },
                _ => {}
            }
        }
    }
    KeyCommand::Continue(actions)
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    accent_alt: Color,
    success: Color,
    warning: Color,
    danger: Color,
    muted: Color,
    border: Color,
    selected_bg: Color,
}

fn palette_for(theme: UiTheme) -> UiPalette {
    match theme {
        UiTheme::Classic => UiPalette {
            accent: Color::Cyan,
            accent_alt: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        },
        UiTheme::Ocean => UiPalette {
            accent: Color::LightBlue,
            accent_alt: Color::LightCyan,
            success: Color::LightGreen,
            warning: Color::Yellow,
            danger: Color::LightRed,
            muted: Color::Gray,
            border: Color::LightBlue,
            selected_bg: Color::Rgb(18, 28, 42),
        },
        UiTheme::Forest => UiPalette {
            accent: Color::LightGreen,
            accent_alt: Color::Green,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::Gray,
            border: Color::LightGreen,
            selected_bg: Color::Rgb(8, 32, 10),
        },
    }
}

fn markdown_styles(palette: UiPalette) -> MarkdownStyles {
    MarkdownStyles {
        base: Style::default(),
        heading: Style::default().fg(palette.accent),
        marker: Style::default().fg(palette.accent_alt),
        code: Style::default()
            .fg(palette.accent_alt)
            .bg(palette.selected_bg),
        quote: Style::default().fg(palette.muted),
    }
}

fn spinner(frame: usize) -> &'static str {
    let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    frames[frame % frames.len()]
}

fn ui(f: &mut ratatui::Frame, state: &WizardState, frame: usize) {
    let palette = palette_for(state.customization.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Step indicator
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Action bar
        ])
        .split(f.area());

    render_step_indicator(f, chunks[0], state, palette);
    match state.view() {
        WizardView::Form => render_form(f, chunks[1], state, palette),
        WizardView::Result => render_result(f, chunks[1], state, palette),
    }
    render_action_bar(f, chunks[2], state, palette);

    if state.is_submitting() {
        let area = centered_rect(50, 20, f.area());
        f.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Drafting your scope brief...", spinner(frame)),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title("Submitting"),
        );
        f.render_widget(popup, area);
    }
}

fn render_step_indicator(f: &mut ratatui::Frame, area: Rect, state: &WizardState, palette: UiPalette) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut spans = Vec::new();
    for descriptor in &STEPS {
        let (marker, style) = if descriptor.index < state.position {
            ("✓", Style::default().fg(palette.success))
        } else if descriptor.index == state.position {
            (
                "●",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(palette.muted))
        };
        if !spans.is_empty() {
            spans.push(Span::styled(" ─ ", Style::default().fg(palette.muted)));
        }
        spans.push(Span::styled(format!("{marker} {}", descriptor.title), style));
    }
    let steps = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title("Shopscope"),
    );
    f.render_widget(steps, halves[0]);

    let count = step_count();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(palette.accent))
        .percent(progress_percent(state))
        .label(format!("Step {} of {count}", state.position + 1));
    f.render_widget(gauge, halves[1]);
}

/// Fill of the progress gauge: 0 on the first step, 100 on the last.
fn progress_percent(state: &WizardState) -> u16 {
    if state.view() == WizardView::Result {
        return 100;
    }
    let last = step_count().saturating_sub(1).max(1);
    ((state.position.min(last) * 100) / last) as u16
}

/// Lines for the current step plus the line index where the focused control
/// starts, used to keep it on screen.
fn form_lines(state: &WizardState, palette: UiPalette) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut focus_line = 0;
    let focused_index = state.focused_index();

    for (index, control) in state.visible_controls().into_iter().enumerate() {
        let focused = index == focused_index;
        if focused {
            focus_line = lines.len();
        }
        let label_style = if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(if focused { "› " } else { "  " }, label_style),
            Span::styled(control.label, label_style),
        ]));
        control_lines(&mut lines, state, control, focused, palette);
        lines.push(Line::from(""));
    }
    (lines, focus_line)
}

fn control_lines(
    lines: &mut Vec<Line<'static>>,
    state: &WizardState,
    control: &ControlSpec,
    focused: bool,
    palette: UiPalette,
) {
    let cursor = state.interaction.option_cursor;
    let option_style = |highlight: bool, chosen: bool| {
        let mut style = Style::default();
        if chosen {
            style = style.fg(palette.success);
        }
        if highlight {
            style = style.bg(palette.selected_bg).add_modifier(Modifier::BOLD);
        }
        style
    };

    match control.kind {
        ControlKind::Radio { field, options } => {
            let selected = state.answers.choice(field);
            for (i, option) in options.iter().enumerate() {
                let chosen = selected == option.value;
                let mark = if chosen { "(•)" } else { "( )" };
                lines.push(Line::from(Span::styled(
                    format!("    {mark} {}", option.label),
                    option_style(focused && i == cursor, chosen),
                )));
            }
        }
        ControlKind::Checkbox {
            field,
            options,
            description,
        } => {
            if let Some(description) = description {
                lines.push(Line::from(Span::styled(
                    format!("    {description}"),
                    Style::default().fg(palette.muted),
                )));
            }
            let selected = state.answers.multi(field);
            for (i, option) in options.iter().enumerate() {
                let chosen = selected.iter().any(|token| token == option.value);
                let mark = if chosen { "[x]" } else { "[ ]" };
                lines.push(Line::from(Span::styled(
                    format!("    {mark} {}", option.label),
                    option_style(focused && i == cursor, chosen),
                )));
            }
        }
        ControlKind::Text {
            field, placeholder, ..
        } => {
            let value = state.answers.text(field);
            let editing = focused && state.interaction.editing;
            let frame_style = if editing {
                Style::default().fg(palette.warning)
            } else {
                Style::default().fg(palette.muted)
            };
            if value.is_empty() && !editing {
                lines.push(Line::from(vec![
                    Span::styled("    ▏", frame_style),
                    Span::styled(
                        placeholder.unwrap_or("").to_string(),
                        Style::default()
                            .fg(palette.muted)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]));
                return;
            }
            let mut rows: Vec<&str> = value.split('\n').collect();
            if rows.is_empty() {
                rows.push("");
            }
            let last = rows.len() - 1;
            for (i, row) in rows.into_iter().enumerate() {
                let mut spans = vec![
                    Span::styled("    ▏", frame_style),
                    Span::raw(row.to_string()),
                ];
                if editing && i == last {
                    spans.push(Span::styled(
                        "█",
                        Style::default().fg(palette.accent),
                    ));
                }
                lines.push(Line::from(spans));
            }
        }
    }
}

fn render_form(f: &mut ratatui::Frame, area: Rect, state: &WizardState, palette: UiPalette) {
    let step = state.current_step();
    let (lines, focus_line) = form_lines(state, palette);
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = if focus_line + 4 > inner_height {
        (focus_line + 4 - inner_height) as u16
    } else {
        0
    };

    let missing = step.unanswered(&state.answers).len();
    let title = if missing == 0 {
        format!(" {} ", step.heading)
    } else {
        format!(" {} ({missing} unanswered) ", step.heading)
    };
    let form = Paragraph::new(lines)
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(form, area);
}

fn render_result(f: &mut ratatui::Frame, area: Rect, state: &WizardState, palette: UiPalette) {
    let Some(result) = state.result.as_ref() else {
        return;
    };
    let (title, border) = match result {
        SubmissionResult::Document(_) => ("Project Scope & Estimation Brief", palette.success),
        SubmissionResult::Error(_) => ("Generation failed", palette.danger),
    };
    let lines = match result {
        SubmissionResult::Document(text) => render_markdown(text, markdown_styles(palette)),
        SubmissionResult::Error(text) => vec![
            Line::from(""),
            Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(palette.danger)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
    };
    let body = Paragraph::new(lines)
        .scroll((state.interaction.result_scroll, 0))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );
    f.render_widget(body, area);
}

fn render_action_bar(f: &mut ratatui::Frame, area: Rect, state: &WizardState, palette: UiPalette) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(palette.accent));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(palette.muted));

    let line = if let Some(notice) = &state.interaction.notice {
        Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(palette.warning),
        ))
    } else {
        match state.view() {
            WizardView::Result => Line::from(vec![
                key("b"),
                hint(" back to form  "),
                key("c"),
                hint(" copy  "),
                key("w"),
                hint(" save .md  "),
                key("↑↓"),
                hint(" scroll  "),
                key("t"),
                hint(" theme  "),
                key("q"),
                hint(" quit"),
            ]),
            WizardView::Form if state.interaction.editing => Line::from(vec![
                key("Esc"),
                hint(" done  "),
                key("Tab"),
                hint(" next field  "),
                key("Backspace"),
                hint(" delete"),
            ]),
            WizardView::Form => {
                let mut spans = vec![
                    key("↑↓"),
                    hint(" field  "),
                    key("←→"),
                    hint(" option  "),
                    key("Space"),
                    hint(" select/edit  "),
                ];
                if state.position > 0 {
                    spans.extend([key("p"), hint(" previous  ")]);
                }
                if state.is_last_step() {
                    spans.extend([key("s"), hint(" generate brief  ")]);
                } else {
                    spans.extend([key("n"), hint(" next  ")]);
                }
                spans.extend([key("t"), hint(" theme  "), key("q"), hint(" quit")]);
                Line::from(spans)
            }
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(state.customization.theme.label());
    let p = Paragraph::new(line).alignment(Alignment::Center).block(block);
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
