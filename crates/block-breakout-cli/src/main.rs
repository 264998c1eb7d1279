mod app;
mod quiet_log;

use anyhow::Result;
use app::App;
use block_breakout_config::Config;
use block_breakout_engine::{Block, BreakoutConfig, BreakoutEngine};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Pane, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let document_path = match args.len() {
        1 => None,
        2 => Some(PathBuf::from(&args[1])),
        _ => {
            eprintln!("Usage: {} [document.toml]", args[0]);
            process::exit(1);
        }
    };

    // First run writes the editorial preset so there is a file to edit
    let config_path = Config::config_path();
    if !config_path.exists() {
        log::info!("Writing editorial preset to {}", config_path.display());
    }
    let breakout_config = match Config::load_or_init(|| Config {
        breakout: BreakoutConfig::editorial(),
    }) {
        Ok(config) => config.breakout,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e:#}");
            process::exit(1);
        }
    };
    let engine = BreakoutEngine::new(breakout_config);

    let document = match &document_path {
        Some(path) if path.exists() => app::load_document(path)?,
        _ => app::demo_document()?,
    };

    // Setup terminal; stderr logging would draw over the frame
    let quiet = quiet_log::QuietLog::new();
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(document, engine, document_path);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(quiet);

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('s') if ctrl => app.save(),
                KeyCode::Char(c) if !ctrl => app.insert_char(c),
                KeyCode::Enter => app.press_enter(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Tab => app.cycle_block_type(),
                KeyCode::Left => app.move_left(),
                KeyCode::Right => app.move_right(),
                KeyCode::Up => app.move_up(),
                KeyCode::Down => app.move_down(),
                _ => {}
            }
        }
    }
}

/// Visual prefix for a block type, as it would look in markdown
fn prefix(block_type: &str) -> &'static str {
    match block_type {
        "header-one" => "# ",
        "header-two" => "## ",
        "blockquote" => "> ",
        "unordered-list-item" => "• ",
        "ordered-list-item" => "1. ",
        "code-block" => "│ ",
        _ => "",
    }
}

fn style(block_type: &str) -> Style {
    match block_type {
        "header-one" | "header-two" => Style::default().add_modifier(Modifier::BOLD),
        "blockquote" => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        "code-block" => Style::default().fg(Color::Green),
        _ => Style::default(),
    }
}

fn render_block(block: &Block) -> Line<'static> {
    let indent = "  ".repeat(block.depth());
    Line::from(vec![
        Span::raw(indent),
        Span::styled(prefix(block.block_type()), style(block.block_type())),
        Span::styled(block.text().to_string(), style(block.block_type())),
    ])
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    // Document panel
    let lines: Vec<Line> = app.document.blocks().iter().map(render_block).collect();
    let content = Paragraph::new(lines).block(Pane::default().borders(Borders::ALL).title("Document"));
    f.render_widget(content, chunks[0]);

    if let (Some(index), Some(block)) = (app.current_index(), app.current_block()) {
        let column = 2 * block.depth() + prefix(block.block_type()).chars().count() + app.caret.offset;
        let x = chunks[0].x + 1 + column as u16;
        let y = chunks[0].y + 1 + index as u16;
        f.set_cursor_position((x, y));
    }

    // Status and instructions
    let block_info = match (app.current_block(), app.current_category()) {
        (Some(block), Some(category)) => format!("{} ({category:?})", block.block_type()),
        _ => String::new(),
    };
    let status_text = vec![
        Line::from(vec![Span::raw(block_info), Span::raw("  "), Span::raw(app.status.clone())]),
        Line::from(vec![
            Span::raw("Esc: Quit | "),
            Span::raw("Enter: Break | "),
            Span::raw("Tab: Block type | "),
            Span::raw("Ctrl-S: Save"),
        ]),
    ];

    let status = Paragraph::new(status_text).block(Pane::default());
    f.render_widget(status, chunks[1]);
}
