use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

pub const DEFAULT_ENDPOINT: &str = "/calcular";
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

const ENDPOINT_META: &str = "calculator-endpoint";
const DEBOUNCE_META: &str = "calculator-debounce-ms";

#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Where calculation requests are posted.
    pub endpoint: String,
    /// Quiet period applied to stake edits before recomputing.
    pub debounce_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ControllerConfig {
    /// Builds the config from `<meta>` tags of the host page, falling back to
    /// defaults for anything missing or malformed.
    pub fn from_document() -> Self {
        Self::from_lookup(read_meta)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_META) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                config.endpoint = endpoint.to_string();
            }
        }
        if let Some(ms) = lookup(DEBOUNCE_META).and_then(|v| v.trim().parse::<u32>().ok()) {
            config.debounce_ms = ms;
        }
        config
    }
}

fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    element.dyn_into::<HtmlMetaElement>().ok().map(|m| m.content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_page_has_no_meta() {
        let config = ControllerConfig::from_lookup(|_| None);
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.endpoint, "/calcular");
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn meta_overrides_are_applied() {
        let config = ControllerConfig::from_lookup(|name| match name {
            "calculator-endpoint" => Some(" /api/calcular ".into()),
            "calculator-debounce-ms" => Some("450".into()),
            _ => None,
        });
        assert_eq!(config.endpoint, "/api/calcular");
        assert_eq!(config.debounce_ms, 450);
    }

    #[test]
    fn malformed_meta_is_ignored() {
        let config = ControllerConfig::from_lookup(|name| match name {
            "calculator-endpoint" => Some("   ".into()),
            "calculator-debounce-ms" => Some("soon".into()),
            _ => None,
        });
        assert_eq!(config, ControllerConfig::default());
    }
}
