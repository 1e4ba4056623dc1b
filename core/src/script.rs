//! The fixed request script driven by every worker
//!
//! A cycle walks four steps in order: fetch the index page, register a
//! throwaway account, quit the session, then log the account back in.
//! Credentials derive deterministically from the worker id and the
//! cycle's iteration index, so every request a run produces is unique
//! and reproducible.

use crate::config::RunConfig;

/// Endpoint for the register and login steps
const LOGIN_ENDPOINT: &str = "/login.action";

/// Endpoint for the quit step
const QUIT_ENDPOINT: &str = "/quit.action";

/// One step of the request script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptStep {
    /// GET the configured index page
    GetIndex,
    /// POST a registration for a fresh account
    Register,
    /// POST a session quit
    Quit,
    /// POST a login with the account registered this cycle
    Login,
}

impl std::fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptStep::GetIndex => write!(f, "get_index"),
            ScriptStep::Register => write!(f, "register"),
            ScriptStep::Quit => write!(f, "quit"),
            ScriptStep::Login => write!(f, "login"),
        }
    }
}

/// The fixed four-step request script
///
/// Immutable once built; shared read-only across all workers.
#[derive(Debug, Clone)]
pub struct RequestScript {
    host: String,
    path: String,
}

impl RequestScript {
    /// Build the script for the given run configuration
    pub fn new(config: &RunConfig) -> Self {
        Self {
            host: config.host.clone(),
            path: config.path.clone(),
        }
    }

    /// The steps of one cycle, in execution order
    pub fn steps(&self) -> [ScriptStep; 4] {
        [
            ScriptStep::GetIndex,
            ScriptStep::Register,
            ScriptStep::Quit,
            ScriptStep::Login,
        ]
    }

    /// Wire bytes for one step, for the given worker and iteration
    pub fn request_bytes(&self, step: ScriptStep, worker_id: usize, iteration: u64) -> Vec<u8> {
        match step {
            ScriptStep::GetIndex => format!(
                "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: keep-alive\r\n\r\n",
                self.path, self.host
            )
            .into_bytes(),
            ScriptStep::Register => account_request(worker_id, iteration, "register"),
            ScriptStep::Quit => format!(
                "POST {} HTTP/1.1\r\nConnection: keep-alive\r\nContent-Length: 0\r\n\r\n",
                QUIT_ENDPOINT
            )
            .into_bytes(),
            ScriptStep::Login => account_request(worker_id, iteration, "login"),
        }
    }
}

fn account_request(worker_id: usize, iteration: u64, kind: &str) -> Vec<u8> {
    let credential = format!("{}_{}", worker_id, iteration);
    let body = format!(
        "username={}&passwd={}&type={}",
        credential, credential, kind
    );
    format!(
        "POST {} HTTP/1.1\r\nConnection: keep-alive\r\nContent-Length: {}\r\n\r\n{}",
        LOGIN_ENDPOINT,
        body.len(),
        body
    )
    .into_bytes()
}
