// src/app.rs
use log::{debug, error, info};

use crate::client::FetchError;
use crate::config::StatusConfig;
use crate::models::status::StatusPayload;
use crate::render;

/// Messages driving the UI state machine.
pub enum Msg {
    /// Initial load or a user-initiated refresh.
    Fetch,
    /// A fetch finished. Carries the sequence number of the fetch that
    /// produced it so stale responses can be dropped.
    Fetched(u64, Result<StatusPayload, FetchError>),
}

/// Side effects requested by `update`, executed by the page glue.
#[derive(Debug, PartialEq)]
pub enum Command {
    FetchStatus { seq: u64 },
}

/// The whole UI state. Mutated only by `update`; never concurrently.
pub struct Model {
    pub config: StatusConfig,
    pub payload: Option<StatusPayload>,
    pub image: Option<String>,
    pub message: String,
    fetch_seq: u64,
}

impl Model {
    pub fn new(config: StatusConfig) -> Self {
        Self {
            config,
            payload: None,
            image: None,
            message: String::new(),
            fetch_seq: 0,
        }
    }
}

/// The reducer: applies a message to the model and returns the side effect to
/// run, if any. Pure with respect to the page; no DOM access happens here.
///
/// Overlapping fetches resolve latest-wins: every `Fetch` bumps the sequence
/// number and a `Fetched` carrying an older number is ignored entirely.
pub fn update(model: &mut Model, msg: Msg) -> Option<Command> {
    match msg {
        Msg::Fetch => {
            model.fetch_seq += 1;
            model.payload = None;
            model.image = None;
            model.message = format!("Contacting {}...", model.config.status_base_address);
            Some(Command::FetchStatus {
                seq: model.fetch_seq,
            })
        }
        Msg::Fetched(seq, result) => {
            if seq != model.fetch_seq {
                debug!("Dropping stale status response (seq {} != {})", seq, model.fetch_seq);
                return None;
            }
            match result {
                Ok(payload) => {
                    info!("Received server status: {}", render::name_text(&payload.status));
                    model.message = render::status_message(&payload.status);
                    model.image =
                        Some(render::svg_data_uri(&payload.status, payload.retrieved_at));
                    model.payload = Some(payload);
                }
                Err(e) => {
                    error!("Status fetch failed: {}", e);
                    model.payload = None;
                    model.image = None;
                    model.message = format!("Failed to fetch server status: {}", e);
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::parse_status;
    use chrono::{Local, TimeZone};

    fn model() -> Model {
        Model::new(StatusConfig::default())
    }

    fn payload(raw: &str) -> StatusPayload {
        StatusPayload {
            status: parse_status(raw).unwrap(),
            raw_json: raw.to_string(),
            retrieved_at: Local.with_ymd_and_hms(2024, 5, 1, 18, 30, 45).unwrap(),
        }
    }

    fn fetch_error() -> FetchError {
        FetchError::Json(parse_status("{bad").unwrap_err())
    }

    #[test]
    fn test_fetch_clears_state_and_requests_fetch() {
        let mut model = model();
        model.payload = Some(payload("{}"));
        model.image = Some("data:image/svg+xml;base64,AAAA".to_string());

        let command = update(&mut model, Msg::Fetch);

        assert_eq!(command, Some(Command::FetchStatus { seq: 1 }));
        assert!(model.payload.is_none());
        assert!(model.image.is_none());
        assert_eq!(model.message, "Contacting http://localhost:1212/...");
    }

    #[test]
    fn test_successful_fetch_populates_model() {
        let mut model = model();
        let Some(Command::FetchStatus { seq }) = update(&mut model, Msg::Fetch) else {
            panic!("expected a fetch command");
        };

        let command = update(
            &mut model,
            Msg::Fetched(seq, Ok(payload(r#"{"name": "Box Station"}"#))),
        );

        assert_eq!(command, None);
        assert_eq!(model.message, "Connected to Box Station.");
        assert!(model.payload.is_some());
        assert!(model.image.as_deref().unwrap().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_nameless_status_message() {
        let mut model = model();
        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetched(1, Ok(payload("{}"))));
        assert_eq!(model.message, "Received server status.");
    }

    #[test]
    fn test_failed_fetch_clears_previous_status() {
        let mut model = model();
        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetched(1, Ok(payload(r#"{"name": "Box Station"}"#))));
        assert!(model.payload.is_some());

        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetched(2, Err(fetch_error())));

        assert!(model.payload.is_none());
        assert!(model.image.is_none());
        assert!(model.message.starts_with("Failed to fetch server status:"));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut model = model();
        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetch);

        // seq 1 lost the race against seq 2
        let command = update(
            &mut model,
            Msg::Fetched(1, Ok(payload(r#"{"name": "Stale Station"}"#))),
        );

        assert_eq!(command, None);
        assert!(model.payload.is_none());
        assert!(model.image.is_none());
        assert_eq!(model.message, "Contacting http://localhost:1212/...");
    }

    #[test]
    fn test_stale_error_is_ignored_too() {
        let mut model = model();
        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetched(1, Ok(payload(r#"{"name": "Box Station"}"#))));

        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetch);
        update(&mut model, Msg::Fetched(2, Err(fetch_error())));

        // still waiting on seq 3
        assert_eq!(model.message, "Contacting http://localhost:1212/...");
    }

    #[test]
    fn test_refresh_bumps_sequence() {
        let mut model = model();
        assert_eq!(update(&mut model, Msg::Fetch), Some(Command::FetchStatus { seq: 1 }));
        assert_eq!(update(&mut model, Msg::Fetch), Some(Command::FetchStatus { seq: 2 }));
        assert_eq!(update(&mut model, Msg::Fetch), Some(Command::FetchStatus { seq: 3 }));
    }
}
