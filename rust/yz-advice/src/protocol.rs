//! Response payload of the advice endpoint.
//!
//! ```json
//! {"slip": {"id": 117, "advice": "It is easy to sit up and take notice..."}}
//! ```

use serde::{Deserialize, Serialize};

use yz_core::AdviceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSlip {
    #[serde(default)]
    pub id: Option<u64>,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSlipResponse {
    pub slip: AdviceSlip,
}

/// Extract the advice text from a response body. Blank advice counts as malformed.
pub fn parse_advice(body: &str) -> Result<String, AdviceError> {
    let resp: AdviceSlipResponse =
        serde_json::from_str(body).map_err(|e| AdviceError::Malformed(e.to_string()))?;
    let text = resp.slip.advice.trim();
    if text.is_empty() {
        return Err(AdviceError::Malformed("empty advice".to_string()));
    }
    Ok(text.to_string())
}
