mod renderer;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, Sender},
    },
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app,
    generators::WalkConfig,
    maze::CanvasEvent,
    session::Session,
    solvers::Solver,
};
use renderer::Renderer;

enum UserInputEvent {
    KeyPress(event::KeyEvent),
    Resize,
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserAction {
    Solve(Solver),
    Reset,
    Regenerate,
    /// Re-roll the turn probability and regenerate
    Refresh,
    /// Change the turn frequency by the given amount and regenerate
    TurnFrequency(i32),
    /// Resend the whole canvas to the renderer
    Redraw,
    Exit,
}

/// Maximum number of canvas events to buffer in the channel between the session and the renderer
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
/// Timeout for receiving input events, a.k.a. how often to check the stop flag
const INPUT_RECV_TIMEOUT: Duration = Duration::from_millis(100);
/// Timeout for polling input events in the input thread, a.k.a.
/// how often to check the stop flag
const USER_INPUT_EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Pause after each visited or path cell is drawn
const ANIMATION_STEP: Duration = Duration::from_millis(15);

const CONTROLS: &str = "b: BFS  d: DFS  r: reset  g/Enter: regenerate  f: refresh  ↑/↓: turn frequency  Esc: exit";

/// Entry point of the explore mode
pub fn run(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(
        stdout,
        style::SetAttribute(Attribute::Reverse),
        style::PrintStyledContent("Explore Mode\r\n".with(Color::Yellow)),
        style::SetAttribute(Attribute::NoReverse),
    )?;
    stdout.flush()?;

    let (rows, cols) = match app::ask_maze_dimensions(stdout)? {
        Some(dims) => dims,
        None => return Ok(()),
    };

    queue!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Hide
    )?;
    stdout.flush()?;

    // Flag to let threads stop. Set by the main thread, or by the input thread on Esc.
    let should_stop = Arc::new(AtomicBool::new(false));

    let (canvas_event_tx, canvas_event_rx) =
        std::sync::mpsc::sync_channel::<CanvasEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);

    // Spawn a thread to mirror the canvas onto the terminal
    let should_stop_for_render = should_stop.clone();
    let render_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
        let mut renderer = Renderer::new(std::io::stdout(), ANIMATION_STEP, INPUT_RECV_TIMEOUT);
        renderer.render(canvas_event_rx, &should_stop_for_render)
    });

    // Spawn a thread to listen for user input
    let (user_input_event_tx, user_input_event_rx) = std::sync::mpsc::channel::<UserInputEvent>();
    let should_stop_for_input = should_stop.clone();
    let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
        listen_to_user_input(
            user_input_event_tx,
            USER_INPUT_EVENT_POLL_TIMEOUT,
            &should_stop_for_input,
        )
    });

    let session = Session::new(
        rows,
        cols,
        WalkConfig::default(),
        None,
        Some(canvas_event_tx),
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e));

    let result = match session {
        Ok(session) => explore_loop(session, user_input_event_rx, &should_stop),
        Err(e) => Err(e),
    };
    // The session and its canvas sender are gone at this point
    should_stop.store(true, Ordering::Release);

    tracing::debug!("[explore] Waiting for render and input threads to finish...");
    input_thread_handle.join().expect("Input thread panicked")?;
    render_thread_handle
        .join()
        .expect("Render thread panicked")?;
    tracing::debug!("[explore] Render and input threads finished");

    queue!(stdout, cursor::Show)?;
    stdout.flush()?;
    result
}

/// Map a key press to a session action
fn key_to_action(key_event: &event::KeyEvent) -> Option<UserAction> {
    match key_event.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char('b') => Some(UserAction::Solve(Solver::Bfs)),
        KeyCode::Char('d') => Some(UserAction::Solve(Solver::Dfs)),
        KeyCode::Char('r') => Some(UserAction::Reset),
        KeyCode::Char('g') | KeyCode::Enter => Some(UserAction::Regenerate),
        KeyCode::Char('f') => Some(UserAction::Refresh),
        KeyCode::Up => Some(UserAction::TurnFrequency(1)),
        KeyCode::Down => Some(UserAction::TurnFrequency(-1)),
        _ => None,
    }
}

/// Apply one action to the session. Returns false once the user asked to exit.
fn apply_action(session: &mut Session, action: UserAction) -> bool {
    tracing::debug!("[explore loop] applying {:?}", action);
    match action {
        UserAction::Solve(solver) => {
            // Failures are reported on the caption line
            let _ = session.run(solver);
        }
        UserAction::Reset => session.reset(),
        UserAction::Regenerate => {
            session.regenerate();
        }
        UserAction::Refresh => {
            if let Err(e) = session.refresh() {
                tracing::warn!("[explore loop] refresh failed: {}", e);
            }
        }
        UserAction::TurnFrequency(delta) => {
            let current = session.config().turn_frequency();
            let next = current.saturating_add_signed(delta).max(1);
            if next != current {
                session.set_turn_frequency(next);
            }
        }
        UserAction::Redraw => session.canvas().replay(),
        UserAction::Exit => return false,
    }
    true
}

/// Main loop of the explore mode, running in the main thread
/// Reacts to user input until Esc is pressed or the input thread exits
fn explore_loop(
    mut session: Session,
    user_input_event_rx: Receiver<UserInputEvent>,
    should_stop: &AtomicBool,
) -> std::io::Result<()> {
    tracing::info!("[explore loop] started");
    session.caption(CONTROLS);
    loop {
        if should_stop.load(Ordering::Acquire) {
            break;
        }
        let action = match user_input_event_rx.recv_timeout(INPUT_RECV_TIMEOUT) {
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
            Ok(UserInputEvent::KeyPress(key_event)) => key_to_action(&key_event),
            Ok(UserInputEvent::Resize) => Some(UserAction::Redraw),
        };
        if let Some(action) = action
            && !apply_action(&mut session, action)
        {
            break;
        }
    }
    tracing::info!("[explore loop] exiting");
    Ok(())
}

/// Listen for user input events (key presses and resize)
/// This function runs in a separate thread, and is the only place where user input is read
fn listen_to_user_input(
    user_input_event_tx: Sender<UserInputEvent>,
    event_poll_timeout: Duration,
    should_stop: &AtomicBool,
) -> std::io::Result<()> {
    loop {
        if should_stop.load(Ordering::Acquire) {
            return Ok(());
        }

        // Poll for events with a timeout
        if !event::poll(event_poll_timeout)? {
            // No event available, continue loop to check flags again
            continue;
        }

        let input_event = match event::read()? {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                UserInputEvent::KeyPress(key_event)
            }
            event::Event::Resize(_, _) => UserInputEvent::Resize,
            _ => continue, // Ignore other events
        };

        let should_exit = matches!(
            input_event,
            UserInputEvent::KeyPress(event::KeyEvent {
                code: KeyCode::Esc,
                ..
            })
        );
        if should_exit {
            // Stop the renderer right away so a running animation does not hold up the exit
            should_stop.store(true, Ordering::Release);
        }

        if user_input_event_tx.send(input_event).is_err() || should_exit {
            tracing::debug!("[input loop] exiting");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            key_to_action(&key(KeyCode::Char('b'))),
            Some(UserAction::Solve(Solver::Bfs))
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Char('d'))),
            Some(UserAction::Solve(Solver::Dfs))
        );
        assert_eq!(key_to_action(&key(KeyCode::Enter)), Some(UserAction::Regenerate));
        assert_eq!(key_to_action(&key(KeyCode::Esc)), Some(UserAction::Exit));
        assert_eq!(key_to_action(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_turn_frequency_never_drops_below_one() {
        let config = WalkConfig::default().with_turn_frequency(1);
        let mut session = Session::new(8, 8, config, Some(2), None).unwrap();
        assert!(apply_action(&mut session, UserAction::TurnFrequency(-1)));
        assert_eq!(session.config().turn_frequency(), 1);
        assert!(apply_action(&mut session, UserAction::TurnFrequency(1)));
        assert_eq!(session.config().turn_frequency(), 2);
        assert!(!apply_action(&mut session, UserAction::Exit));
    }
}
