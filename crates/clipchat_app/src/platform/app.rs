use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use clipchat_core::{update, AppState, Msg};
use clipchat_engine::{EngineHandle, ReqwestBackend};
use clipchat_logging::{chat_debug, chat_info};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{self, LineAction};
use super::ui::render::Renderer;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed on stdin, without its terminator.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced by an effect settling.
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = config::load_from_dir(&cwd)?;
    logging::initialize(config.log, config.verbose);
    chat_info!("Starting clipchat against {}", config.client.base_url);

    let backend = ReqwestBackend::new(&config.client)?;
    let engine = EngineHandle::new(Arc::new(backend)).context("starting request engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine, event_tx.clone());
    spawn_stdin_reader(event_tx);

    let mut session = Session::new(runner);
    session.render()?;

    for event in event_rx {
        let msgs = match event {
            AppEvent::Line(line) => match input::interpret(&line, &session.state.view()) {
                LineAction::Dispatch(msgs) => msgs,
                LineAction::Quit => break,
            },
            AppEvent::InputClosed => break,
            AppEvent::Msg(msg) => vec![msg],
        };
        for msg in msgs {
            session.dispatch_msg(msg);
        }
        session.render()?;
    }

    chat_info!("Exiting clipchat");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            renderer: Renderer::new(),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        chat_debug!("Dispatching {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.runner.run(effect);
        }
    }

    /// Prints whatever changed since the previous frame.
    fn render(&mut self) -> io::Result<()> {
        let first_frame = self.renderer.is_pristine();
        if !self.state.consume_dirty() && !first_frame {
            return Ok(());
        }
        let lines = self.renderer.render(&self.state.view());
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

fn spawn_stdin_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if events.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}
