//! Topical terminal client
//!
//! Interactive chat against a running reply server: pick a topic, converse
//! inside it, Ctrl+R to start over on a new topic.

use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use topical::client::{
    exchange_outcome, ChatController, ExchangeClient, HttpExchangeClient, Message, RenderTarget,
};
use topical::protocol::ChatRequest;
use topical::session::{Event, ExchangeOutcome, FocusTarget, Sender, View};

type Backend = CrosstermBackend<Stdout>;

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Surface state the terminal draws from
struct ViewModel {
    view: View,
    topic_display: String,
    messages: Vec<Message>,
    pending: bool,
    topic_error: String,
    chat_error: String,
    composer_enabled: bool,
    input: String,
    cursor: usize,
    scroll_offset: usize,
}

impl ViewModel {
    fn new() -> Self {
        Self {
            view: View::TopicSelection,
            topic_display: String::new(),
            messages: Vec::new(),
            pending: false,
            topic_error: String::new(),
            chat_error: String::new(),
            composer_enabled: true,
            input: String::new(),
            cursor: 0,
            scroll_offset: 0,
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

impl RenderTarget for ViewModel {
    fn show_view(&mut self, view: View) {
        self.view = view;
        // The single input line belongs to the visible view
        self.clear_input();
        self.scroll_offset = 0;
    }

    fn set_topic_display(&mut self, topic: &str) {
        self.topic_display = topic.to_string();
    }

    fn append_message(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_offset = 0;
    }

    fn clear_thread(&mut self) {
        self.messages.clear();
    }

    fn show_pending(&mut self) {
        self.pending = true;
    }

    fn clear_pending(&mut self) {
        self.pending = false;
    }

    fn set_topic_error(&mut self, text: &str) {
        self.topic_error = text.to_string();
    }

    fn set_chat_error(&mut self, text: &str) {
        self.chat_error = text.to_string();
    }

    fn clear_topic_entry(&mut self) {
        self.clear_input();
    }

    fn clear_composer(&mut self) {
        self.clear_input();
    }

    fn set_composer_enabled(&mut self, enabled: bool) {
        self.composer_enabled = enabled;
    }

    fn focus(&mut self, _target: FocusTarget) {
        // One shared input line; focus always follows the visible view
    }
}

struct App {
    terminal: Terminal<Backend>,
    controller: ChatController<ViewModel>,
    exchange: Arc<HttpExchangeClient>,
    outcome_tx: mpsc::UnboundedSender<(u64, ExchangeOutcome)>,
    outcome_rx: mpsc::UnboundedReceiver<(u64, ExchangeOutcome)>,
    generation: u64,
    should_quit: bool,
}

impl App {
    fn new(base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(App {
            terminal,
            controller: ChatController::new(ViewModel::new()),
            exchange: Arc::new(HttpExchangeClient::new(base_url)),
            outcome_tx,
            outcome_rx,
            generation: 0,
            should_quit: false,
        })
    }

    async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        while !self.should_quit {
            self.terminal
                .draw(|f| render_ui(f, self.controller.render()))?;

            // Deliver resolved exchanges. Stale generations were begun
            // before a restart and must not touch the session.
            while let Ok((generation, outcome)) = self.outcome_rx.try_recv() {
                if generation == self.generation {
                    self.controller.handle(Event::ExchangeResolved { outcome });
                }
            }

            if event::poll(Duration::from_millis(100))? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.restart();
                return;
            }
            _ => {}
        }

        // Edits are ignored while an exchange is in flight
        if self.controller.render().view == View::Conversation
            && !self.controller.render().composer_enabled
        {
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                let model = self.controller.render_mut();
                model.input.insert(model.cursor, c);
                model.cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                let model = self.controller.render_mut();
                if let Some((idx, _)) = model.input[..model.cursor].char_indices().next_back() {
                    model.input.remove(idx);
                    model.cursor = idx;
                }
            }
            KeyCode::Left => {
                let model = self.controller.render_mut();
                if let Some((idx, _)) = model.input[..model.cursor].char_indices().next_back() {
                    model.cursor = idx;
                }
            }
            KeyCode::Right => {
                let model = self.controller.render_mut();
                if let Some(c) = model.input[model.cursor..].chars().next() {
                    model.cursor += c.len_utf8();
                }
            }
            KeyCode::Home => {
                self.controller.render_mut().cursor = 0;
            }
            KeyCode::End => {
                let model = self.controller.render_mut();
                model.cursor = model.input.len();
            }
            KeyCode::PageUp => {
                let model = self.controller.render_mut();
                model.scroll_offset = model.scroll_offset.saturating_add(5);
            }
            KeyCode::PageDown => {
                let model = self.controller.render_mut();
                model.scroll_offset = model.scroll_offset.saturating_sub(5);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let text = self.controller.render().input.clone();
        match self.controller.render().view {
            View::TopicSelection => {
                self.controller.handle(Event::TopicSubmitted { text });
            }
            View::Conversation => {
                if let Some(request) = self.controller.handle(Event::MessageSubmitted { text }) {
                    self.spawn_exchange(request);
                }
            }
        }
    }

    fn spawn_exchange(&mut self, request: ChatRequest) {
        let exchange = Arc::clone(&self.exchange);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let outcome = exchange_outcome(exchange.send(&request).await);
            let _ = tx.send((generation, outcome));
        });
    }

    fn restart(&mut self) {
        // Anything still in flight belongs to the abandoned session
        self.generation += 1;
        self.controller.handle(Event::RestartRequested);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_ui(f: &mut Frame, model: &ViewModel) {
    match model.view {
        View::TopicSelection => render_topic_selection(f, model),
        View::Conversation => render_conversation(f, model),
    }
}

fn render_topic_selection(f: &mut Frame, model: &ViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Title
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // Topic entry
                Constraint::Length(1), // Validation error
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Topical",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("Esc to exit", Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let prompt =
        Paragraph::new("What would you like to talk about?").alignment(Alignment::Center);
    f.render_widget(prompt, chunks[1]);

    // Center the entry box on wide terminals
    let entry = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ]
            .as_ref(),
        )
        .split(chunks[2])[1];
    render_input_line(f, entry, model, "Topic (Enter to start)");

    if !model.topic_error.is_empty() {
        let error = Paragraph::new(model.topic_error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[3]);
    }
}

fn render_conversation(f: &mut Frame, model: &ViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Thread
                Constraint::Length(1), // Error line
                Constraint::Length(3), // Composer
            ]
            .as_ref(),
        )
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Topic: ", Style::default().fg(Color::Gray)),
        Span::styled(
            model.topic_display.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("Ctrl+R new topic", Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled("Esc exit", Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    render_thread(f, chunks[1], model);

    if !model.chat_error.is_empty() {
        let error =
            Paragraph::new(model.chat_error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[2]);
    }

    let title = if model.composer_enabled {
        "Message (Enter to send)"
    } else {
        "Waiting for reply..."
    };
    render_input_line(f, chunks[3], model, title);
}

fn render_thread(f: &mut Frame, area: Rect, model: &ViewModel) {
    let mut lines: Vec<ListItem> = model.messages.iter().flat_map(thread_lines).collect();

    if model.pending {
        lines.push(ListItem::new(Line::from(Span::styled(
            "Thinking...",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))));
    }

    // Anchor to the bottom; PageUp walks back through history
    let height = area.height.saturating_sub(2) as usize;
    let first = lines.len().saturating_sub(height + model.scroll_offset);
    let visible: Vec<ListItem> = lines.into_iter().skip(first).collect();

    let thread =
        List::new(visible).block(Block::default().borders(Borders::ALL).title("Conversation"));
    f.render_widget(thread, area);
}

fn thread_lines(message: &Message) -> Vec<ListItem<'static>> {
    let style = match message.sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Assistant => Style::default().fg(Color::Green),
    };

    let mut lines = vec![ListItem::new(Line::from(vec![
        Span::styled(
            format!("[{}] ", message.time_label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{}: ", message.sender.label()),
            style.add_modifier(Modifier::BOLD),
        ),
    ]))];

    for (i, paragraph) in message.body.display_paragraphs().iter().enumerate() {
        if i > 0 {
            lines.push(ListItem::new(Line::from("")));
        }
        for line in paragraph.lines() {
            lines.push(ListItem::new(Line::from(Span::styled(
                format!("  {line}"),
                style,
            ))));
        }
    }

    lines.push(ListItem::new(Line::from("")));
    lines
}

fn render_input_line(f: &mut Frame, area: Rect, model: &ViewModel, title: &str) {
    let (text_style, border_style) = if model.composer_enabled {
        (
            Style::default().fg(Color::White),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::Gray),
        )
    };

    let input = Paragraph::new(model.input.as_str())
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(input, area);

    if model.composer_enabled {
        let width = area.width.saturating_sub(2).max(1);
        let cursor = model.input[..model.cursor].chars().count() as u16;
        f.set_cursor_position((
            (area.x + 1 + cursor % width).min(area.x + area.width.saturating_sub(2)),
            (area.y + 1 + cursor / width).min(area.y + area.height.saturating_sub(2)),
        ));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("TOPICAL_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());

    let mut app = App::new(&base_url)?;
    let result = app.run().await;
    drop(app);
    result
}
