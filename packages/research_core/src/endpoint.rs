use url::Url;

/// Path of the research WebSocket on the backend.
pub const RESEARCH_PATH: &str = "/ws/research";

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid backend origin `{origin}`: {source}")]
    Parse {
        origin: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme `{0}`; expected http, https, ws or wss")]
    UnsupportedScheme(String),
}

/// Derives the research WebSocket URL from a backend origin.
///
/// Secure origins (`https`, `wss`) map to `wss`, plain ones to `ws`. Any
/// path, query or fragment on the origin is replaced.
pub fn research_endpoint(origin: &str) -> Result<Url, EndpointError> {
    let mut url = Url::parse(origin.trim()).map_err(|source| EndpointError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(scheme)
        .map_err(|()| EndpointError::UnsupportedScheme(url.scheme().to_string()))?;
    url.set_path(RESEARCH_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_origin_maps_to_ws() {
        let url = research_endpoint("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/ws/research");
    }

    #[test]
    fn secure_origin_maps_to_wss() {
        let url = research_endpoint("https://research.example.com").unwrap();
        assert_eq!(url.as_str(), "wss://research.example.com/ws/research");
    }

    #[test]
    fn websocket_origins_keep_their_security() {
        assert_eq!(
            research_endpoint("wss://host:9443").unwrap().as_str(),
            "wss://host:9443/ws/research"
        );
        assert_eq!(
            research_endpoint("ws://host").unwrap().as_str(),
            "ws://host/ws/research"
        );
    }

    #[test]
    fn replaces_path_query_and_fragment() {
        let url = research_endpoint("https://host/app/index.html?x=1#top").unwrap();
        assert_eq!(url.as_str(), "wss://host/ws/research");
    }

    #[test]
    fn rejects_bad_origins() {
        assert!(matches!(
            research_endpoint("localhost"),
            Err(EndpointError::Parse { .. })
        ));
        assert!(matches!(
            research_endpoint("ftp://host"),
            Err(EndpointError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }
}
