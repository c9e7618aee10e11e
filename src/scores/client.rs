//! Client side of score persistence
//!
//! Reports are best-effort and at-most-once: a failure is logged and the last
//! known high score is kept. Nothing here can affect a finished game.

use super::service::{Identity, ScoreService};
use super::store::KeyValueStore;
use crate::sim::ScoreReport;

/// Where finished runs are sent
pub trait ScoreReporter {
    /// Query the persisted high score (once, at startup)
    fn load_high_score(&mut self);
    /// Fire-and-forget report of a finished run
    fn report(&mut self, report: ScoreReport);
    /// Last high score the collaborator confirmed, if any
    fn high_score(&self) -> Option<u64>;
}

/// Reporter that calls a [`ScoreService`] in-process
pub struct LocalReporter<S> {
    service: ScoreService<S>,
    identity: Option<Identity>,
    high_score: Option<u64>,
    clock: fn() -> u64,
}

impl<S: KeyValueStore> LocalReporter<S> {
    pub fn new(service: ScoreService<S>, identity: Option<Identity>) -> Self {
        Self {
            service,
            identity,
            high_score: None,
            clock: now_ms,
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn service(&self) -> &ScoreService<S> {
        &self.service
    }
}

impl<S: KeyValueStore> ScoreReporter for LocalReporter<S> {
    fn load_high_score(&mut self) {
        match self.service.high_score(self.identity.as_ref()) {
            Ok(score) => self.high_score = Some(score),
            Err(e) => log::warn!("Could not load high score: {e}"),
        }
    }

    fn report(&mut self, report: ScoreReport) {
        let timestamp = (self.clock)();
        match self
            .service
            .save_score(self.identity.as_ref(), report, timestamp)
        {
            Ok(score) => self.high_score = Some(score),
            Err(e) => log::warn!("Could not save score {}: {e}", report.score),
        }
    }

    fn high_score(&self) -> Option<u64> {
        self.high_score
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchReporter;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::ScoreReporter;
    use crate::scores::api::{ApiRequest, HighScoreResponse};
    use crate::sim::ScoreReport;

    /// Reporter that talks to the score endpoints over `fetch`
    pub struct FetchReporter {
        base_url: String,
        high_score: Rc<Cell<Option<u64>>>,
    }

    impl FetchReporter {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                high_score: Rc::new(Cell::new(None)),
            }
        }

        fn spawn(&self, path: &'static str, body: Option<String>) {
            let url = format!("{}{}", self.base_url, path);
            let slot = self.high_score.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_high_score(&url, body).await {
                    Ok(score) => slot.set(Some(score)),
                    Err(e) => log::warn!("Score request to {url} failed: {e:?}"),
                }
            });
        }
    }

    impl ScoreReporter for FetchReporter {
        fn load_high_score(&mut self) {
            self.spawn("/api/get-high-score", None);
        }

        fn report(&mut self, report: ScoreReport) {
            let request = ApiRequest::SaveScore {
                score: report.score,
                level: report.level,
            };
            match serde_json::to_string(&request) {
                Ok(body) => self.spawn("/api/save-score", Some(body)),
                Err(e) => log::warn!("Could not encode score report: {e}"),
            }
        }

        fn high_score(&self) -> Option<u64> {
            self.high_score.get()
        }
    }

    async fn fetch_high_score(url: &str, body: Option<String>) -> Result<u64, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let init = RequestInit::new();
        match body {
            Some(body) => {
                init.set_method("POST");
                init.set_body(&JsValue::from_str(&body));
            }
            None => init.set_method("GET"),
        }
        let request = Request::new_with_str_and_init(url, &init)?;
        request.headers().set("Content-Type", "application/json")?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("status {}", response.status())));
        }

        let text = JsFuture::from(response.text()?).await?;
        let text = text
            .as_string()
            .ok_or_else(|| JsValue::from_str("response is not text"))?;
        let parsed: HighScoreResponse =
            serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(parsed.high_score)
    }
}
