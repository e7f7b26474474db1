use crate::utils::error::{CredHubError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 單一服務綁定描述，結構由 CredHub 定義，原樣保留
pub type ServiceBinding = serde_json::Map<String, serde_json::Value>;

/// Service bindings grouped by service-class label, in the shape of `VCAP_SERVICES`.
///
/// Both the label order and the binding order inside each label survive a
/// serialize/deserialize cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesData {
    services: IndexMap<String, Vec<ServiceBinding>>,
}

impl ServicesData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從任意 JSON 值建立，`null` 或形狀不符時回傳 `InvalidArgument`
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Err(CredHubError::invalid_argument(
                "serviceData must not be null",
            )),
            serde_json::Value::Object(_) => serde_json::from_value(value).map_err(|e| {
                CredHubError::invalid_argument(format!(
                    "serviceData must map service labels to arrays of binding objects: {}",
                    e
                ))
            }),
            other => Err(CredHubError::invalid_argument(format!(
                "serviceData must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            CredHubError::invalid_argument(format!("serviceData is not valid JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(CredHubError::SerializationError)
    }

    /// 新增一筆綁定到指定的服務類別之後
    pub fn add_binding(&mut self, label: impl Into<String>, binding: ServiceBinding) {
        self.services.entry(label.into()).or_default().push(binding);
    }

    pub fn bindings(&self, label: &str) -> Option<&[ServiceBinding]> {
        self.services.get(label).map(Vec::as_slice)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ServiceBinding])> {
        self.services
            .iter()
            .map(|(label, bindings)| (label.as_str(), bindings.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn binding_count(&self) -> usize {
        self.services.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<ServiceBinding>)> for ServicesData {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ServiceBinding>)>>(iter: I) -> Self {
        Self {
            services: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for ServicesData {
    type Error = CredHubError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
