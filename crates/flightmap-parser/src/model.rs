use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub name: Option<String>,
    #[serde(rename = "code2Digit")]
    pub two_digit_code: Option<String>,
    #[serde(rename = "code3Digit")]
    pub three_digit_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub iata3: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// A scheduled link between two stations operated by one carrier.
///
/// Codes are kept as written in the source file; nothing checks that the
/// carrier or either station exists in the other datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(rename = "airlineId")]
    pub carrier_id: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}
