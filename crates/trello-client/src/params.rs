/// Ordered query parameters where absent values are dropped.
///
/// `Some("")` is kept: an explicitly empty value is still sent, which is how
/// callers clear a field upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((name.to_string(), value.into()));
        self
    }

    pub fn add_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.add(name, v);
        }
        self
    }

    pub fn add_opt_num<T: ToString>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.add(name, v.to_string());
        }
        self
    }

    /// Like [`add_opt`](Self::add_opt) but an empty value is dropped too.
    pub fn add_non_empty(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.add_opt(name, value.filter(|v| !v.is_empty()))
    }

    /// Comma-joined list, included whenever the list itself is provided.
    pub fn add_opt_list(&mut self, name: &str, values: Option<&[String]>) -> &mut Self {
        if let Some(v) = values {
            self.add(name, v.join(","));
        }
        self
    }

    /// Comma-joined list, included only when provided and non-empty.
    pub fn add_non_empty_list(&mut self, name: &str, values: Option<&[String]>) -> &mut Self {
        self.add_opt_list(name, values.filter(|v| !v.is_empty()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn build(&self) -> Vec<(&str, &str)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut params = QueryParams::new();
        for (name, value) in pairs {
            params.add(name, value);
        }
        params
    }
}
