//! Where payloads go.
//!
//! The HTTP sink sends a form-encoded POST (`lat=..&lng=..`) through a blocking `reqwest`
//! client.  The reply body is never read.  Whether a non-2xx status is a failure depends on the
//! `StatusPolicy`, the historical behaviour is to accept anything the server answers.
//!

use std::time::Duration;

use clap::{crate_name, crate_version};
use reqwest::blocking::Client;
use tracing::{debug, trace};

use crate::{ForwardError, Payload};

/// What to do with the HTTP status of a reply
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StatusPolicy {
    /// Any answer from the server is a success
    #[default]
    Ignore,
    /// Only 2xx is a success
    RequireSuccess,
}

/// Anything able to take a payload.
///
pub trait Sink {
    fn post(&mut self, payload: &Payload) -> Result<(), ForwardError>;
}

#[derive(Clone, Debug)]
pub struct HttpSink {
    /// Endpoint
    url: String,
    /// What we consider success
    policy: StatusPolicy,
    /// reqwest blocking client
    client: Client,
}

impl HttpSink {
    /// `timeout` at `None` means we wait for the server as long as it takes.
    ///
    #[tracing::instrument]
    pub fn new(
        url: &str,
        timeout: Option<Duration>,
        policy: StatusPolicy,
    ) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate_name!(), crate_version!()))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.to_string(),
            policy,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sink for HttpSink {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    fn post(&mut self, payload: &Payload) -> Result<(), ForwardError> {
        trace!("POST {payload}");

        let resp = self.client.post(&self.url).form(payload).send()?;
        let status = resp.status();
        debug!("status = {status}");

        match self.policy {
            StatusPolicy::Ignore => Ok(()),
            StatusPolicy::RequireSuccess if status.is_success() => Ok(()),
            StatusPolicy::RequireSuccess => Err(ForwardError::BadStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rstest::rstest;

    use super::*;

    fn payload(lat: &str, lng: &str) -> Payload {
        Payload {
            lat: lat.to_string(),
            lng: lng.to_string(),
        }
    }

    #[test]
    fn test_post_form() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .header(
                    "user-agent",
                    format!("{}/{}", crate_name!(), crate_version!()),
                )
                .header("content-type", "application/x-www-form-urlencoded")
                .body("lat=1.5&lng=2.5");
            then.status(200);
        });

        let mut sink = HttpSink::new(&server.url("/"), None, StatusPolicy::Ignore).unwrap();
        let res = sink.post(&payload("1.5", "2.5"));

        m.assert();
        assert!(res.is_ok());
    }

    #[test]
    fn test_post_form_encoding() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).body("lat=+1.5&lng=a%26b%3Dc");
            then.status(201);
        });

        let mut sink = HttpSink::new(&server.base_url(), None, StatusPolicy::Ignore).unwrap();
        let res = sink.post(&payload(" 1.5", "a&b=c"));

        m.assert();
        assert!(res.is_ok());
    }

    #[rstest]
    #[case(StatusPolicy::Ignore, 200, true)]
    #[case(StatusPolicy::Ignore, 404, true)]
    #[case(StatusPolicy::Ignore, 500, true)]
    #[case(StatusPolicy::RequireSuccess, 204, true)]
    #[case(StatusPolicy::RequireSuccess, 404, false)]
    #[case(StatusPolicy::RequireSuccess, 500, false)]
    fn test_post_status_policy(
        #[case] policy: StatusPolicy,
        #[case] status: u16,
        #[case] ok: bool,
    ) {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/track");
            then.status(status).body("whatever");
        });

        let mut sink = HttpSink::new(&server.url("/track"), None, policy).unwrap();
        let res = sink.post(&payload("10.0", "20.0"));

        m.assert();
        assert_eq!(ok, res.is_ok());
        if let Err(e) = res {
            assert!(matches!(e, ForwardError::BadStatus { status: s, .. } if s == status));
        }
    }

    #[test]
    fn test_post_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/");

        let mut sink =
            HttpSink::new(&url, Some(Duration::from_secs(5)), StatusPolicy::Ignore).unwrap();
        let res = sink.post(&payload("1", "2"));

        assert!(matches!(res, Err(ForwardError::NetworkError(_))));
    }
}
