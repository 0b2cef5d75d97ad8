//! Rick and Morty TUI - random character roster

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use rickmorty::action::Action;
use rickmorty::api::{ApiClient, DEFAULT_API_URL};
use rickmorty::components::{
    CharacterModal, CharacterModalProps, Component, RosterView, RosterViewProps,
};
use rickmorty::effect::Effect;
use rickmorty::episodes::resolve_episodes;
use rickmorty::logging;
use rickmorty::reducer::reducer;
use rickmorty::sampler::{run_sample_cycle, SampleOutcome};
use rickmorty::state::{AppState, SampleRequest, StatusFilter, DEFAULT_COUNT, LOADING_ANIM_TICK_MS};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Rick and Morty TUI - random character roster
#[derive(Parser, Debug)]
#[command(name = "rickmorty")]
#[command(about = "Sample random Rick and Morty characters into a card grid")]
struct Args {
    /// Number of distinct characters to sample
    #[arg(long, short = 'n', default_value_t = DEFAULT_COUNT, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Only sample characters with this status
    #[arg(long, short, value_enum, default_value_t = StatusFilter::Any)]
    status: StatusFilter,

    /// Give up after this many draws (default: 25 per character)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Base URL of the character API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log file (default: the platform's local data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum RosterComponentId {
    Grid,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum RosterContext {
    Main,
    Detail,
}

impl EventRoutingState<RosterComponentId, RosterContext> for AppState {
    fn focused(&self) -> Option<RosterComponentId> {
        if self.detail.is_open() {
            Some(RosterComponentId::Detail)
        } else {
            Some(RosterComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<RosterComponentId> {
        if self.detail.is_open() {
            Some(RosterComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: RosterComponentId) -> RosterContext {
        match id {
            RosterComponentId::Grid => RosterContext::Main,
            RosterComponentId::Detail => RosterContext::Detail,
        }
    }

    fn default_context(&self) -> RosterContext {
        RosterContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        count,
        status,
        max_attempts,
        api_url,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    let _log_guard = logging::init(&log_path)?;

    let mut request = SampleRequest::new(count, status);
    if let Some(max_attempts) = max_attempts {
        request = request.with_max_attempts(max_attempts);
    }
    tracing::info!(?request, api_url = %api_url, "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(request);
            if let Ok(size) = crossterm::terminal::size() {
                state.terminal_size = size;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);
    let client = Arc::new(ApiClient::new(api_url));

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct RosterUi {
    roster: RosterView,
    detail: CharacterModal,
}

impl RosterUi {
    fn new() -> Self {
        Self {
            roster: RosterView::new(),
            detail: CharacterModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<RosterComponentId>,
    ) {
        event_ctx.set_component_area(RosterComponentId::Grid, area);

        let props = RosterViewProps {
            state,
            is_focused: render_ctx.is_focused() && !state.detail.is_open(),
        };
        self.roster.render(frame, area, props);

        if state.detail.is_open() {
            event_ctx.set_component_area(RosterComponentId::Detail, area);
            let props = CharacterModalProps {
                detail: &state.detail,
                is_focused: render_ctx.is_focused(),
                tick_count: state.tick_count,
            };
            self.detail.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&RosterComponentId::Detail);
        }
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = RosterViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .roster
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CharacterModalProps {
            detail: &state.detail,
            is_focused: true,
            tick_count: state.tick_count,
        };
        let actions: Vec<_> = self
            .detail
            .handle_event(event, props)
            .into_iter()
            .collect();
        // The overlay swallows everything while it is open.
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: Arc<ApiClient>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(RosterUi::new()));
    let mut bus: EventBus<AppState, Action, RosterComponentId, RosterContext> = EventBus::new();
    let keybindings: Keybindings<RosterContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(RosterComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(RosterComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    // Track the terminal size so row navigation matches the drawn grid
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::SampleStart),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, client.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: Arc<ApiClient>) {
    match effect {
        Effect::Sample(request) => {
            // Spawning under the same key cancels a cycle still in flight.
            ctx.tasks().spawn(TaskKey::new("sample"), async move {
                let mut rng = StdRng::from_entropy();
                match run_sample_cycle(client.as_ref(), &request, &mut rng).await {
                    SampleOutcome::Complete(characters) => Action::SampleDidComplete(characters),
                    SampleOutcome::Exhausted {
                        collected,
                        attempts,
                    } => Action::SampleDidExhaust {
                        collected,
                        attempts,
                    },
                    SampleOutcome::Failed(err) => Action::SampleDidError(err.to_string()),
                }
            });
        }
        Effect::LoadEpisodes {
            character_id,
            references,
        } => {
            ctx.tasks().spawn(TaskKey::new("episodes"), async move {
                let episodes = resolve_episodes(client.as_ref(), &references).await;
                Action::EpisodesDidLoad {
                    character_id,
                    episodes,
                }
            });
        }
    }
}
