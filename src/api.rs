//! Wire model of the calculation service and the call that reaches it.
//!
//! The service keys per-outcome values by suffixing the letter
//! (`oddA`, `cbB`, `stakeC`), so both directions go through a flat map.

use std::collections::BTreeMap;
use std::fmt;

use gloo::net::http::Request;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::outcome::{Letter, OutcomeCount};

#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeInput {
    pub letter: Letter,
    pub odd: f64,
    pub cashback_percent: f64,
}

/// What drives the computation: the base stake, or a single pinned outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StakeDriver {
    Base(f64),
    Pinned { letter: Letter, stake: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculationRequest {
    pub count: OutcomeCount,
    pub outcomes: Vec<OutcomeInput>,
    pub driver: StakeDriver,
}

impl Serialize for CalculationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("numeroVias", &self.count.get())?;
        for o in &self.outcomes {
            map.serialize_entry(&format!("odd{}", o.letter), &o.odd)?;
            map.serialize_entry(&format!("cb{}", o.letter), &o.cashback_percent)?;
        }
        let mut edited = BTreeMap::new();
        let pinned = match self.driver {
            StakeDriver::Base(stake) => {
                map.serialize_entry("stakeA", &stake)?;
                None
            }
            StakeDriver::Pinned { letter, stake } => {
                edited.insert(letter.to_string(), stake);
                Some(letter)
            }
        };
        map.serialize_entry("stakesEditaveis", &edited)?;
        map.serialize_entry("stakeFixoEditado", &pinned)?;
        map.serialize_entry("modoEdicao", &pinned.is_some())?;
        map.end()
    }
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    lucro: f64,
    #[serde(default)]
    roi: f64,
    #[serde(default)]
    total_invested: f64,
    #[serde(default)]
    modo_dinamico: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawResult")]
pub struct CalculationResult {
    pub stakes: BTreeMap<Letter, f64>,
    pub cashbacks: BTreeMap<Letter, f64>,
    pub lucro: f64,
    pub roi: f64,
    pub total_invested: f64,
    pub modo_dinamico: bool,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl From<RawResult> for CalculationResult {
    fn from(raw: RawResult) -> Self {
        let per_letter = |prefix: &str| {
            Letter::ALL
                .iter()
                .filter_map(|l| {
                    raw.rest
                        .get(&format!("{prefix}{l}"))
                        .and_then(Value::as_f64)
                        .map(|v| (*l, v))
                })
                .collect::<BTreeMap<_, _>>()
        };
        let stakes = per_letter("stake");
        let cashbacks = per_letter("cb");
        Self {
            stakes,
            cashbacks,
            lucro: raw.lucro,
            roi: raw.roi,
            total_invested: raw.total_invested,
            modo_dinamico: raw.modo_dinamico,
            message: raw.message.filter(|m| !m.trim().is_empty()),
            status: raw.status,
        }
    }
}

impl CalculationResult {
    pub fn stake(&self, letter: Letter) -> Option<f64> {
        self.stakes.get(&letter).copied()
    }

    pub fn cashback(&self, letter: Letter) -> Option<f64> {
        self.cashbacks.get(&letter).copied()
    }
}

#[derive(Debug)]
pub enum CalcError {
    Request(gloo::net::Error),
    Status(u16),
    Decode(gloo::net::Error),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Request(e) => write!(f, "request failed: {e}"),
            CalcError::Status(code) => write!(f, "calculation service answered HTTP {code}"),
            CalcError::Decode(e) => write!(f, "invalid calculation response: {e}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Request(e) | CalcError::Decode(e) => Some(e),
            CalcError::Status(_) => None,
        }
    }
}

pub async fn calculate(endpoint: &str, request: &CalculationRequest) -> Result<CalculationResult, CalcError> {
    let response = Request::post(endpoint)
        .json(request)
        .map_err(CalcError::Request)?
        .send()
        .await
        .map_err(CalcError::Request)?;
    if !response.ok() {
        return Err(CalcError::Status(response.status()));
    }
    response.json::<CalculationResult>().await.map_err(CalcError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_way(driver: StakeDriver) -> CalculationRequest {
        CalculationRequest {
            count: OutcomeCount::default(),
            outcomes: vec![
                OutcomeInput { letter: Letter::A, odd: 2.0, cashback_percent: 0.0 },
                OutcomeInput { letter: Letter::B, odd: 2.1, cashback_percent: 5.0 },
            ],
            driver,
        }
    }

    #[test]
    fn automatic_request_carries_base_stake() {
        let body = serde_json::to_value(two_way(StakeDriver::Base(1000.0))).unwrap();
        assert_eq!(
            body,
            json!({
                "numeroVias": 2,
                "oddA": 2.0, "cbA": 0.0,
                "oddB": 2.1, "cbB": 5.0,
                "stakeA": 1000.0,
                "stakesEditaveis": {},
                "stakeFixoEditado": null,
                "modoEdicao": false,
            })
        );
    }

    #[test]
    fn pinned_request_omits_base_stake() {
        let req = two_way(StakeDriver::Pinned { letter: Letter::B, stake: 250.0 });
        let body = serde_json::to_value(req).unwrap();
        assert!(body.get("stakeA").is_none());
        assert_eq!(body["stakesEditaveis"], json!({ "B": 250.0 }));
        assert_eq!(body["stakeFixoEditado"], json!("B"));
        assert_eq!(body["modoEdicao"], json!(true));
    }

    #[test]
    fn result_reads_per_letter_fields() {
        let res: CalculationResult = serde_json::from_value(json!({
            "stakeA": 1000.0,
            "stakeB": 952.38,
            "cbA": 0.0,
            "cbB": null,
            "lucro": 47.62,
            "roi": 4.76,
            "total_invested": 1952.38,
            "modo_dinamico": false,
            "message": null,
            "status": "ok",
        }))
        .unwrap();
        assert_eq!(res.stake(Letter::A), Some(1000.0));
        assert_eq!(res.stake(Letter::B), Some(952.38));
        assert_eq!(res.stake(Letter::C), None);
        assert_eq!(res.cashback(Letter::A), Some(0.0));
        assert_eq!(res.cashback(Letter::B), None);
        assert_eq!(res.lucro, 47.62);
        assert_eq!(res.status.as_deref(), Some("ok"));
        assert!(res.message.is_none());
    }

    #[test]
    fn error_shaped_response_still_decodes() {
        let res: CalculationResult = serde_json::from_value(json!({
            "status": "erro",
            "message": "Stake A deve ser maior que 0.",
            "lucro": 0,
            "roi": 0,
        }))
        .unwrap();
        assert!(res.stakes.is_empty());
        assert_eq!(res.total_invested, 0.0);
        assert!(!res.modo_dinamico);
        assert_eq!(res.message.as_deref(), Some("Stake A deve ser maior que 0."));
    }
}
