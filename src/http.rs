//! Blocking HTTP fetches for remote sources.
//!
//! One GET per source, strictly in source order, with no concurrent fan-out.
//! A fixed header set is forwarded from the caller-supplied request
//! context; `Accept-Encoding` is forced to `identity` so no decompression
//! is needed, and `Connection: close` since each fetch stands alone.
//! Redirects are followed by the client's default policy.

use std::time::Duration;

use crate::debug;
use crate::error::BundleError;
use crate::source::normalize_scheme;

/// Request headers forwarded to remote sources.
///
/// Callers pass these in explicitly (e.g. copied from the incoming
/// request in a web context); the engine never reads ambient state.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

/// Fetch a remote source, validating the response status.
///
/// Scheme-relative `//host/...` URLs are normalized to `http://` first.
/// Any non-2xx status, transport failure or timeout aborts with
/// [`BundleError::RemoteFetch`] naming the URL.
pub fn fetch(
    url: &str,
    headers: &RequestHeaders,
    timeout: Duration,
) -> Result<String, BundleError> {
    let url = normalize_scheme(url);
    debug!("fetch"; "GET {url}");

    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent
        .get(&url)
        .set("User-Agent", &headers.user_agent)
        .set("Accept", &headers.accept)
        .set("Accept-Language", &headers.accept_language)
        .set("Accept-Encoding", "identity")
        .set("Connection", "close")
        .call()
        .map_err(|err| match err {
            ureq::Error::Status(code, _) => {
                BundleError::remote_fetch(&url, format!("status {code}"))
            }
            ureq::Error::Transport(transport) => {
                BundleError::remote_fetch(&url, transport.to_string())
            }
        })?;

    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(BundleError::remote_fetch(&url, format!("status {status}")));
    }

    response
        .into_string()
        .map_err(|err| BundleError::remote_fetch(&url, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tiny_http::{Response, Server};

    /// Spin up a local server answering `count` requests with `respond`.
    fn serve(count: usize, respond: impl Fn(&tiny_http::Request) -> Response<std::io::Cursor<Vec<u8>>> + Send + 'static) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            for _ in 0..count {
                let request = server.recv().unwrap();
                let response = respond(&request);
                request.respond(response).ok();
            }
        });
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn test_fetch_ok() {
        let base = serve(1, |_| Response::from_string("var a = 1;"));
        let body = fetch(
            &format!("{base}/lib.js"),
            &RequestHeaders::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(body, "var a = 1;");
    }

    #[test]
    fn test_fetch_forwards_headers() {
        let base = serve(1, |request| {
            let ua = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("User-Agent"))
                .map(|h| h.value.as_str().to_string())
                .unwrap_or_default();
            let encoding = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Accept-Encoding"))
                .map(|h| h.value.as_str().to_string())
                .unwrap_or_default();
            Response::from_string(format!("{ua}|{encoding}"))
        });

        let headers = RequestHeaders {
            user_agent: "assetpack-test/1.0".to_string(),
            ..Default::default()
        };
        let body = fetch(&base, &headers, Duration::from_secs(5)).unwrap();
        assert_eq!(body, "assetpack-test/1.0|identity");
    }

    #[test]
    fn test_fetch_404_fails() {
        let base = serve(1, |_| Response::from_string("gone").with_status_code(404));
        let err = fetch(&base, &RequestHeaders::default(), Duration::from_secs(5)).unwrap_err();
        match err {
            BundleError::RemoteFetch { url, detail } => {
                assert!(url.starts_with("http://127.0.0.1:"));
                assert!(detail.contains("404"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fetch_connection_refused_fails() {
        // Port 1 is essentially never listening
        let err = fetch(
            "http://127.0.0.1:1/lib.js",
            &RequestHeaders::default(),
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::RemoteFetch { .. }));
    }
}
