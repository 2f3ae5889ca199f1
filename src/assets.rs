//! Embedded static assets for the browser client.
//!
//! Only the files named here are ever served; any other path gets a
//! plain-text 404 from the façade.

/// An asset ready to serve: content type plus body bytes.
pub struct Asset {
    pub content_type: &'static str,
    pub body: &'static [u8],
}

const INDEX_HTML: &str = include_str!("../public/index.html");
const STYLE_CSS: &str = include_str!("../public/style.css");
const LOGIC_JS: &str = include_str!("../public/logic.js");
const FAVICON_ICO: &[u8] = include_bytes!("../public/favicon.ico");

/// Look up a request path in the asset whitelist. `/` maps to the index page.
pub fn lookup(path: &str) -> Option<Asset> {
    let (content_type, body): (&'static str, &'static [u8]) = match path {
        "/" | "/index.html" => ("text/html; charset=utf-8", INDEX_HTML.as_bytes()),
        "/style.css" => ("text/css; charset=utf-8", STYLE_CSS.as_bytes()),
        "/logic.js" => ("text/javascript; charset=utf-8", LOGIC_JS.as_bytes()),
        "/favicon.ico" => ("image/x-icon", FAVICON_ICO),
        _ => return None,
    };
    Some(Asset { content_type, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_index() {
        let asset = lookup("/").unwrap();
        assert_eq!(asset.content_type, "text/html; charset=utf-8");
        assert_eq!(asset.body, lookup("/index.html").unwrap().body);
    }

    #[test]
    fn test_whitelisted_files_only() {
        assert!(lookup("/style.css").is_some());
        assert!(lookup("/logic.js").is_some());
        assert!(lookup("/favicon.ico").is_some());

        assert!(lookup("/server.rs").is_none());
        assert!(lookup("/../Cargo.toml").is_none());
        assert!(lookup("/index.htm").is_none());
    }
}
