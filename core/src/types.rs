//! Request parameters for the users endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scope of the fields the server returns for each user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    #[default]
    View,
    Embed,
    Edit,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::View => "view",
            Context::Embed => "embed",
            Context::Edit => "edit",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for listing users.
///
/// Defaults to no filter, `view` context and the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserQuery {
    pub filter: Map<String, Value>,
    pub context: Context,
    pub page: u32,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            filter: Map::new(),
            context: Context::View,
            page: 1,
        }
    }
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filter.insert(key.to_string(), value.into());
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Pages are 1-based; 0 is treated as 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Parameters in wire order: `filter`, `context`, `page`.
    pub fn to_params(&self) -> Vec<(String, Value)> {
        vec![
            ("filter".to_string(), Value::Object(self.filter.clone())),
            ("context".to_string(), Value::from(self.context.as_str())),
            ("page".to_string(), Value::from(self.page.max(1))),
        ]
    }
}
