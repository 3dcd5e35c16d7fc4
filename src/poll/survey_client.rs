//! Client for the survey service.
//!
//! A poll is built with three dependent calls: create a survey, locate one of
//! its pages, and attach a single-choice question to that page. Every
//! response is checked before the next call is made, and the first error
//! stops the workflow.

use log::{debug, error, info};
use reqwest::header;

use crate::poll::*;

pub const DEFAULT_BASE_URL: &str = "https://api.surveymonkey.com/v3/surveys";

pub const SURVEY_TITLE: &str = "TEST SURVEY CREATION";
const QUESTION_HEADING: &str = "Games";
const QUESTION_POSITION: u32 = 1;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Verb {
    Post,
    Get,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SurveyRequest {
    pub verb: Verb,
    pub url: String,
    pub body: JSValue,
}

/// Sends one request and decodes the response as JSON.
pub trait Transport {
    fn send(&self, request: &SurveyRequest) -> PollResult<JSValue>;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: &SurveyRequest) -> PollResult<JSValue> {
        (**self).send(request)
    }
}

/// Blocking HTTPS transport. The credential and the JSON content type are
/// attached to every request.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

/// Headers sent with every request: the bearer credential and the JSON
/// content type.
fn default_headers(token: &str) -> PollResult<header::HeaderMap> {
    let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))
        .context(InvalidTokenSnafu {})?;
    auth.set_sensitive(true);

    let mut headers = header::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

impl HttpTransport {
    pub fn new(token: &str) -> PollResult<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .default_headers(default_headers(token)?)
            .build()
            .context(HttpClientSnafu {})?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &SurveyRequest) -> PollResult<JSValue> {
        let builder = match request.verb {
            Verb::Post => self.client.post(&request.url),
            Verb::Get => self.client.get(&request.url),
        };
        let url = request.url.as_str();
        let response = builder
            .json(&request.body)
            .send()
            .context(TransportSnafu { url })?;
        debug!("send: {:?} {} -> {}", request.verb, url, response.status());
        response.json::<JSValue>().context(TransportSnafu { url })
    }
}

/// The identifiers collected along the workflow.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollDraft {
    pub survey_id: String,
    pub page_id: String,
}

/// Joins the base endpoint and the path segments with single slashes.
/// The segments are not encoded.
pub fn endpoint(base_url: &str, segments: &[&str]) -> String {
    let mut url = base_url.to_string();
    for s in segments {
        url.push('/');
        url.push_str(s);
    }
    url
}

pub fn create_survey_body() -> JSValue {
    json!({ "title": SURVEY_TITLE })
}

pub fn fetch_page_body(page_index: usize) -> JSValue {
    json!({ "page": page_index })
}

/// The single-choice question listing the games, one choice per game, in order.
pub fn question_body(games: &[GameRecord]) -> JSValue {
    let choices: Vec<JSValue> = games.iter().map(|g| json!({ "text": g.name })).collect();
    json!({
        "headings": [{ "heading": QUESTION_HEADING }],
        "position": QUESTION_POSITION,
        "family": "single_choice",
        "subtype": "vertical",
        "answers": { "choices": choices },
    })
}

/// Fails if the service reported an error in the response.
pub fn validate_response(js: JSValue) -> PollResult<JSValue> {
    if js.get("error").is_some() {
        let body = serde_json::to_string_pretty(&js).unwrap_or_else(|_| js.to_string());
        error!("The survey service returned an error: {}", body);
        return RemoteRequestSnafu { body }.fail();
    }
    Ok(js)
}

// Identifiers are strings in the service documentation, but numbers are accepted too.
fn read_js_id(x: Option<&JSValue>, field: &str) -> PollResult<String> {
    match x {
        Some(JSValue::String(s)) => Ok(s.clone()),
        Some(JSValue::Number(n)) => Ok(n.to_string()),
        _ => MissingResponseFieldSnafu { field }.fail(),
    }
}

/// An authenticated session with the survey service, created once per run.
pub struct SurveySession<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> SurveySession<T> {
    pub fn new(transport: T, base_url: &str) -> SurveySession<T> {
        SurveySession {
            transport,
            base_url: base_url.to_string(),
        }
    }

    fn call(&self, verb: Verb, segments: &[&str], body: JSValue) -> PollResult<JSValue> {
        let request = SurveyRequest {
            verb,
            url: endpoint(&self.base_url, segments),
            body,
        };
        debug!("call: {:?}", request);
        let js = self.transport.send(&request)?;
        debug!("call: response: {:?}", js);
        validate_response(js)
    }

    /// Creates an empty survey and returns its id.
    pub fn create_survey(&self) -> PollResult<String> {
        let js = self.call(Verb::Post, &[], create_survey_body())?;
        read_js_id(js.get("id"), "id")
    }

    /// Returns the id of the page at the given 1-based index.
    ///
    /// The page must already exist, it is not created.
    pub fn fetch_page(&self, survey_id: &str, page_index: usize) -> PollResult<String> {
        let js = self.call(
            Verb::Get,
            &[survey_id, "pages"],
            fetch_page_body(page_index),
        )?;
        let position = page_index.saturating_sub(1);
        let page = js.get("data").and_then(|d| d.get(position));
        read_js_id(
            page.and_then(|p| p.get("id")),
            &format!("data[{}].id", position),
        )
    }

    /// Adds the question listing the games as the first question of the page.
    pub fn attach_poll(
        &self,
        survey_id: &str,
        page_id: &str,
        games: &[GameRecord],
    ) -> PollResult<JSValue> {
        self.call(
            Verb::Post,
            &[survey_id, "pages", page_id, "questions"],
            question_body(games),
        )
    }

    pub fn run_workflow(&self, games: &[GameRecord], page_index: usize) -> PollResult<PollDraft> {
        let survey_id = self.create_survey()?;
        info!("Created survey {}", survey_id);
        let page_id = self.fetch_page(&survey_id, page_index)?;
        info!("Located page {} (index {})", page_id, page_index);
        self.attach_poll(&survey_id, &page_id, games)?;
        Ok(PollDraft { survey_id, page_id })
    }
}
