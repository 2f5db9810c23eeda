// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pathgrid CLI entrypoint.
//!
//! By default this runs the interactive TUI and serves the solver over HTTP at
//! `http://127.0.0.1:<port>/{astar,dijkstra}`; the TUI talks to that embedded service.
//!
//! `--solver-url` points the TUI at an external solver instead, `--offline` searches in-process,
//! and `--serve` runs only the solver service.

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pathgrid::board::Board;
use pathgrid::run::{RunSettings, MAX_SPEED, MAX_WEIGHT_COST, MIN_SPEED};
use pathgrid::solver::{server, Algorithm, HttpSolver, LocalSolver, Solver};
use pathgrid::tui::SolverDispatch;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

const DEFAULT_SOLVER_PORT: u16 = 5000;
const SOLVER_URL_ENV: &str = "PATHGRID_SOLVER_URL";
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--port <port>] [<settings>] [--log-file <path>]\n  {program} --solver-url <url> [<settings>] [--log-file <path>]\n  {program} --offline [<settings>] [--log-file <path>]\n  {program} --serve [--port <port>] [--log-file <path>]\n\nSettings:\n  --speed <{MIN_SPEED}..={MAX_SPEED}>        animation speed (default 50)\n  --weight-cost <0..={MAX_WEIGHT_COST}>     cost of entering a weighted cell (default 5)\n  --algorithm <astar|dijkstra>\n  --four-way                 disallow diagonal moves\n\nTUI mode (default) serves the solver at `http://127.0.0.1:<port>`.\n--port selects the port (0 = ephemeral; default {DEFAULT_SOLVER_PORT}).\n{SOLVER_URL_ENV} supplies a default for --solver-url. RUST_LOG filters logs (default info).\nIn TUI modes logs are written only with --log-file; --serve logs to stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    serve: bool,
    offline: bool,
    solver_url: Option<String>,
    port: Option<u16>,
    speed: Option<u32>,
    weight_cost: Option<u32>,
    algorithm: Option<Algorithm>,
    four_way: bool,
    log_file: Option<String>,
}

impl CliOptions {
    fn has_settings(&self) -> bool {
        self.speed.is_some() || self.weight_cost.is_some() || self.algorithm.is_some() || self.four_way
    }

    fn settings(&self) -> RunSettings {
        let mut settings = RunSettings::default();
        if let Some(speed) = self.speed {
            settings.set_speed(speed);
        }
        if let Some(weight_cost) = self.weight_cost {
            settings.set_weight_cost(weight_cost);
        }
        if let Some(algorithm) = self.algorithm {
            settings.set_algorithm(algorithm);
        }
        if self.four_way {
            settings.set_allow_diagonal(false);
        }
        settings
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--serve" => {
                if options.serve {
                    return Err(());
                }
                options.serve = true;
            }
            "--offline" => {
                if options.offline {
                    return Err(());
                }
                options.offline = true;
            }
            "--four-way" => {
                if options.four_way {
                    return Err(());
                }
                options.four_way = true;
            }
            "--solver-url" => {
                if options.solver_url.is_some() {
                    return Err(());
                }
                options.solver_url = Some(args.next().ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.port = Some(raw.parse().map_err(|_| ())?);
            }
            "--speed" => {
                if options.speed.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let speed: u32 = raw.parse().map_err(|_| ())?;
                if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
                    return Err(());
                }
                options.speed = Some(speed);
            }
            "--weight-cost" => {
                if options.weight_cost.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let cost: u32 = raw.parse().map_err(|_| ())?;
                if cost > MAX_WEIGHT_COST {
                    return Err(());
                }
                options.weight_cost = Some(cost);
            }
            "--algorithm" => {
                if options.algorithm.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.algorithm = Some(raw.parse().map_err(|_| ())?);
            }
            _ => return Err(()),
        }
    }

    if options.serve && (options.offline || options.solver_url.is_some() || options.has_settings())
    {
        return Err(());
    }
    if options.offline && options.solver_url.is_some() {
        return Err(());
    }
    // Only the embedded or headless server binds a port.
    if options.port.is_some() && (options.offline || options.solver_url.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match (&options.log_file, options.serve) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
        (None, true) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
        // The alternate screen owns the terminal; stay silent.
        (None, false) => {}
    }
    Ok(())
}

fn new_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_all().build()
}

fn serve(port: u16) -> Result<(), Box<dyn Error>> {
    let runtime = new_runtime()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        server::serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
        Ok::<(), Box<dyn Error>>(())
    })
}

/// Runs the TUI on the runtime's blocking pool while the runtime keeps driving whatever else
/// was spawned on it (the embedded solver service).
fn run_tui(
    runtime: &Runtime,
    board: Board,
    solver: Arc<dyn Solver>,
) -> Result<(), Box<dyn Error>> {
    let dispatch = SolverDispatch::new(runtime.handle().clone(), solver);
    let tui_join = runtime.block_on(tokio::task::spawn_blocking(move || {
        pathgrid::tui::run(board, dispatch).map_err(|err| err.to_string())
    }));
    let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
    tui_result.map_err(|err| Box::new(std::io::Error::other(err)) as Box<dyn Error>)
}

fn run_embedded(port: u16, board: Board) -> Result<(), Box<dyn Error>> {
    // Bind before the runtime exists so the HTTP client can be built outside of it.
    let std_listener = std::net::TcpListener::bind(("127.0.0.1", port))?;
    std_listener.set_nonblocking(true)?;
    let addr = std_listener.local_addr()?;
    let solver: Arc<dyn Solver> = Arc::new(HttpSolver::new(format!("http://{addr}"))?);

    let runtime = new_runtime()?;
    let listener = {
        let _guard = runtime.enter();
        tokio::net::TcpListener::from_std(std_listener)?
    };
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server_handle = runtime.spawn(server::serve(listener, async move {
        let _ = shutdown_rx.await;
    }));

    let result = run_tui(&runtime, board, solver);

    let _ = shutdown_tx.send(());
    match runtime.block_on(server_handle) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::error!(error = %err, "solver service failed"),
        Err(err) => tracing::error!(error = %err, "solver service task failed"),
    }
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
    result
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "pathgrid".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        init_logging(&options)?;

        let port = options.port.unwrap_or(DEFAULT_SOLVER_PORT);
        if options.serve {
            return serve(port);
        }

        let board = Board::new(options.settings());
        if options.offline {
            tracing::info!("searching in-process");
            let runtime = new_runtime()?;
            let result = run_tui(&runtime, board, Arc::new(LocalSolver));
            runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
            return result;
        }

        let solver_url = options.solver_url.clone().or_else(|| {
            options
                .port
                .is_none()
                .then(|| std::env::var(SOLVER_URL_ENV).ok())
                .flatten()
                .filter(|url| !url.trim().is_empty())
        });
        match solver_url {
            Some(url) => {
                let solver = HttpSolver::new(url)?;
                tracing::info!(url = solver.base_url(), "using external solver");
                let runtime = new_runtime()?;
                let result = run_tui(&runtime, board, Arc::new(solver));
                runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
                result
            }
            None => run_embedded(port, board),
        }
    })();

    if let Err(err) = result {
        tracing::error!(error = %err, "fatal");
        eprintln!("pathgrid: {err}");
        std::process::exit(1);
    }
}
